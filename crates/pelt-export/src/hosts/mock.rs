//! Mock host for testing
//!
//! Records every call made against the session and its nodes, and writes a
//! placeholder cache file on `trigger_export` so callers can assert the
//! artifact landed where the ledger said it would. No real host process is
//! involved.

use crate::host::{HostNode, HostSession, ParamValue, PARM_FILENAME};
use pelt_core::{PeltError, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// One recorded interaction with the mock host
#[derive(Debug, Clone, PartialEq)]
pub enum MockEvent {
    NodeCreated {
        node: usize,
        template: String,
        source: PathBuf,
    },
    ParamSet {
        node: usize,
        name: String,
        value: String,
    },
    ExpressionSet {
        node: usize,
        name: String,
        expression: String,
    },
    Triggered {
        node: usize,
        filename: String,
    },
    Destroyed {
        node: usize,
    },
}

#[derive(Debug, Default)]
struct MockState {
    events: Vec<MockEvent>,
    nodes_created: usize,
}

/// A mock session that fabricates nodes and records all traffic
pub struct MockHost {
    state: Rc<RefCell<MockState>>,
    time_range: (f64, f64),
    fail_trigger_on_node: Option<usize>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(MockState::default())),
            time_range: (0.0, 4.0),
            fail_trigger_on_node: None,
        }
    }

    /// Set the canned time range returned for every cache
    pub fn with_time_range(mut self, start: f64, end: f64) -> Self {
        self.time_range = (start, end);
        self
    }

    /// Make `trigger_export` fail on the node with the given creation index
    pub fn with_trigger_failure_on(mut self, node: usize) -> Self {
        self.fail_trigger_on_node = Some(node);
        self
    }

    /// Snapshot of everything that happened so far
    pub fn events(&self) -> Vec<MockEvent> {
        self.state.borrow().events.clone()
    }

    /// Number of nodes created during the session
    pub fn nodes_created(&self) -> usize {
        self.state.borrow().nodes_created
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostSession for MockHost {
    fn create_export_node(&self, template: &str, source: &Path) -> Result<Box<dyn HostNode>> {
        let mut state = self.state.borrow_mut();
        let node = state.nodes_created;
        state.nodes_created += 1;
        state.events.push(MockEvent::NodeCreated {
            node,
            template: template.to_string(),
            source: source.to_path_buf(),
        });

        Ok(Box::new(MockNode {
            id: node,
            state: Rc::clone(&self.state),
            params: HashMap::new(),
            fail_trigger: self.fail_trigger_on_node == Some(node),
        }))
    }

    fn time_range(&self, _source: &Path) -> Result<(f64, f64)> {
        Ok(self.time_range)
    }
}

struct MockNode {
    id: usize,
    state: Rc<RefCell<MockState>>,
    params: HashMap<String, String>,
    fail_trigger: bool,
}

impl HostNode for MockNode {
    fn set_parameter(&mut self, name: &str, value: ParamValue) -> Result<()> {
        let rendered = value.to_string();
        self.params.insert(name.to_string(), rendered.clone());
        self.state.borrow_mut().events.push(MockEvent::ParamSet {
            node: self.id,
            name: name.to_string(),
            value: rendered,
        });
        Ok(())
    }

    fn set_expression(&mut self, name: &str, expression: &str) -> Result<()> {
        self.params
            .insert(name.to_string(), expression.to_string());
        self.state
            .borrow_mut()
            .events
            .push(MockEvent::ExpressionSet {
                node: self.id,
                name: name.to_string(),
                expression: expression.to_string(),
            });
        Ok(())
    }

    fn trigger_export(&mut self) -> Result<()> {
        if self.fail_trigger {
            return Err(PeltError::HostError(format!(
                "mock node {} export failed",
                self.id
            )));
        }

        let filename = self.params.get(PARM_FILENAME).cloned().ok_or_else(|| {
            PeltError::HostError(format!("mock node {} has no output filename", self.id))
        })?;

        // The real host writes the cache itself; stand in with a stub file.
        let path = PathBuf::from(&filename);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, b"mock fur cache")?;

        self.state
            .borrow_mut()
            .events
            .push(MockEvent::Triggered {
                node: self.id,
                filename,
            });
        Ok(())
    }

    fn destroy(self: Box<Self>) -> Result<()> {
        self.state
            .borrow_mut()
            .events
            .push(MockEvent::Destroyed { node: self.id });
        Ok(())
    }
}
