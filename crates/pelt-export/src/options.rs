//! Export options applied to the fur node
//!
//! Every option is optional; an absent key leaves the corresponding host
//! parameter untouched. `fps` additionally derives the frame range from
//! the cache's time range and writes it as quoted string expressions, the
//! form the host's frame parameters expect.

use crate::host::{
    HostNode, HostSession, ParamValue, PARM_FRAME_END, PARM_FRAME_START, PARM_MOTION_BLUR,
    PARM_PROBABILITY, PARM_SAMPLES, PARM_SHUTTER_CLOSE, PARM_SHUTTER_OPEN,
};
use pelt_core::Result;
use serde::Deserialize;
use std::path::Path;

/// Recognized export options
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ExportOptions {
    #[serde(default)]
    pub motion_blur: Option<bool>,
    #[serde(default)]
    pub samples: Option<i64>,
    #[serde(default)]
    pub shutter: Option<(f64, f64)>,
    #[serde(default)]
    pub fps: Option<f64>,
    #[serde(default)]
    pub probability: Option<f64>,
}

impl ExportOptions {
    /// Copy the present options onto a node's parameters.
    ///
    /// `source` is the animation cache the node reads from; it is only
    /// consulted (via the session's time-range query) when `fps` is set.
    pub fn apply(
        &self,
        node: &mut dyn HostNode,
        session: &dyn HostSession,
        source: &Path,
    ) -> Result<()> {
        if let Some(motion_blur) = self.motion_blur {
            node.set_parameter(PARM_MOTION_BLUR, ParamValue::Bool(motion_blur))?;
        }
        if let Some(samples) = self.samples {
            node.set_parameter(PARM_SAMPLES, ParamValue::Int(samples))?;
        }
        if let Some((open, close)) = self.shutter {
            node.set_parameter(PARM_SHUTTER_OPEN, ParamValue::Float(open))?;
            node.set_parameter(PARM_SHUTTER_CLOSE, ParamValue::Float(close))?;
        }
        if let Some(fps) = self.fps {
            let (start_time, end_time) = session.time_range(source)?;
            let (start_frame, end_frame) = frame_range(start_time, end_time, fps);
            node.set_expression(PARM_FRAME_START, &format!("\"{}\"", start_frame))?;
            node.set_expression(PARM_FRAME_END, &format!("\"{}\"", end_frame))?;
        }
        if let Some(probability) = self.probability {
            node.set_parameter(PARM_PROBABILITY, ParamValue::Float(probability))?;
        }
        Ok(())
    }
}

/// Convert a time range in seconds to frames, widened by one frame on
/// each side so the export never clips the cache.
fn frame_range(start_time: f64, end_time: f64, fps: f64) -> (i64, i64) {
    let start = (start_time * fps).round() as i64 - 1;
    let end = (end_time * fps).round() as i64 + 1;
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hosts::{MockEvent, MockHost};
    use std::path::PathBuf;

    fn source() -> PathBuf {
        PathBuf::from("/project/sh010/abc/HERO/0002/HERO.abc")
    }

    #[test]
    fn test_frame_range_widens_by_one_frame() {
        assert_eq!(frame_range(0.0, 4.0, 25.0), (-1, 101));
        assert_eq!(frame_range(1.0, 2.0, 24.0), (23, 49));
    }

    #[test]
    fn test_empty_options_touch_nothing() {
        let host = MockHost::new();
        let mut node = host.create_export_node("t", &source()).unwrap();

        ExportOptions::default()
            .apply(node.as_mut(), &host, &source())
            .unwrap();

        // Only the creation event, no parameter traffic
        assert_eq!(host.events().len(), 1);
    }

    #[test]
    fn test_all_options_applied() {
        let host = MockHost::new().with_time_range(0.0, 4.0);
        let mut node = host.create_export_node("t", &source()).unwrap();

        let options = ExportOptions {
            motion_blur: Some(true),
            samples: Some(3),
            shutter: Some((-0.15, 0.15)),
            fps: Some(25.0),
            probability: Some(0.65),
        };
        options.apply(node.as_mut(), &host, &source()).unwrap();

        let events = host.events();
        assert!(events.contains(&MockEvent::ParamSet {
            node: 0,
            name: "motionBlur".into(),
            value: "true".into(),
        }));
        assert!(events.contains(&MockEvent::ParamSet {
            node: 0,
            name: "samples".into(),
            value: "3".into(),
        }));
        assert!(events.contains(&MockEvent::ParamSet {
            node: 0,
            name: "shutter1".into(),
            value: "-0.15".into(),
        }));
        assert!(events.contains(&MockEvent::ExpressionSet {
            node: 0,
            name: "f1".into(),
            expression: "\"-1\"".into(),
        }));
        assert!(events.contains(&MockEvent::ExpressionSet {
            node: 0,
            name: "f2".into(),
            expression: "\"101\"".into(),
        }));
        assert!(events.contains(&MockEvent::ParamSet {
            node: 0,
            name: "Probability_par".into(),
            value: "0.65".into(),
        }));
    }

    #[test]
    fn test_options_deserialize_with_absent_keys() {
        let options: ExportOptions = toml::from_str("fps = 25.0\n").unwrap();
        assert_eq!(options.fps, Some(25.0));
        assert_eq!(options.motion_blur, None);
        assert_eq!(options.shutter, None);
    }

    #[test]
    fn test_shutter_pair_deserializes_from_array() {
        let options: ExportOptions = toml::from_str("shutter = [-0.15, 0.15]\n").unwrap();
        assert_eq!(options.shutter, Some((-0.15, 0.15)));
    }
}
