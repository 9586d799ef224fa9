//! Host session implementations

pub mod mock;

pub use mock::{MockEvent, MockHost};
