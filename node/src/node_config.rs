use entrain_shared::{NodeId, SyncConfig};

/// Contains Config properties which will be used by a Node
#[derive(Clone, Debug)]
pub struct NodeConfig {
    /// Identity carried in this node's broadcast names
    pub node_id: NodeId,
    /// Used to configure estimation, regularity, modes and the clock guard
    pub sync: SyncConfig,
}

impl NodeConfig {
    pub fn new<I: Into<NodeId>>(node_id: I) -> Self {
        Self {
            node_id: node_id.into(),
            sync: SyncConfig::default(),
        }
    }

    pub fn with_sync(mut self, sync: SyncConfig) -> Self {
        self.sync = sync;
        self
    }
}
