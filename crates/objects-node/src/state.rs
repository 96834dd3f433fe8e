//! Shared, cloneable state handed to every request handler.

use std::sync::Arc;

use crate::config::NodeConfig;

#[derive(Clone)]
pub struct NodeState(Arc<NodeConfig>);

impl NodeState {
    pub fn new(config: NodeConfig) -> Self {
        Self(Arc::new(config))
    }

    pub fn config(&self) -> &NodeConfig {
        &self.0
    }
}
