//! Host collaborator traits
//!
//! The host application's node objects are modeled as opaque capabilities:
//! a session that can create export nodes and answer cache time-range
//! queries, and nodes that accept parameters, expressions, and a blocking
//! export trigger. Callers never see node identity beyond these traits.

use pelt_core::Result;
use std::fmt;
use std::path::Path;

/// Node parameter holding the source animation cache path
pub const PARM_SOURCE: &str = "Anim_par";
/// Node parameter holding the output cache path
pub const PARM_FILENAME: &str = "filename";
/// Motion blur toggle
pub const PARM_MOTION_BLUR: &str = "motionBlur";
/// Sample count
pub const PARM_SAMPLES: &str = "samples";
/// Shutter open / close
pub const PARM_SHUTTER_OPEN: &str = "shutter1";
pub const PARM_SHUTTER_CLOSE: &str = "shutter2";
/// Frame-range expression parameters
pub const PARM_FRAME_START: &str = "f1";
pub const PARM_FRAME_END: &str = "f2";
/// Fur growth probability
pub const PARM_PROBABILITY: &str = "Probability_par";

/// A value assignable to a host node parameter
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(v) => write!(f, "{}", v),
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Text(v) => write!(f, "{}", v),
        }
    }
}

/// A live export node inside the host application
pub trait HostNode {
    /// Set a parameter value
    fn set_parameter(&mut self, name: &str, value: ParamValue) -> Result<()>;

    /// Set a parameter to an expression string
    fn set_expression(&mut self, name: &str, expression: &str) -> Result<()>;

    /// Run the host's native export. Blocks until the export completes;
    /// duration is host-dependent and unbounded from our point of view.
    fn trigger_export(&mut self) -> Result<()>;

    /// Remove the node from the host's graph
    fn destroy(self: Box<Self>) -> Result<()>;
}

/// A session with the host application
pub trait HostSession {
    /// Instantiate the export node for a template, wired to a source cache
    fn create_export_node(&self, template: &str, source: &Path) -> Result<Box<dyn HostNode>>;

    /// The time range of an animation cache, in seconds
    fn time_range(&self, source: &Path) -> Result<(f64, f64)>;
}
