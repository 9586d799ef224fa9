//! Pelt Export - Drives the host application's fur-export node
//!
//! Provides the run orchestrator plus everything it needs around the
//! resolver and ledger from `pelt-asset`: validated configuration, export
//! options, the opaque host-collaborator traits (with a mock for tests),
//! UI collaborator traits, the versioned run log, and per-export records.

pub mod config;
pub mod host;
pub mod hosts;
pub mod options;
pub mod orchestrator;
pub mod record;
pub mod runlog;
pub mod ui;

pub use config::ExportConfig;
pub use host::{HostNode, HostSession, ParamValue};
pub use options::ExportOptions;
pub use orchestrator::{run, RunOutcome, RunStats};
pub use record::ExportRecord;
pub use runlog::RunLog;
pub use ui::{AutoConfirm, ConsolePrompt, ExportPrompt, PreselectedShots, ShotPicker};
