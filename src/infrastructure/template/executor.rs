//! Local topology executor
//!
//! Deploys nodes wave by wave. Inside a wave at most `workers` nodes run at
//! once on a dedicated rayon pool. Each node's progress is recorded under
//! `instances/<node>.json`, so a resumed run skips nodes already started.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{keys, InstanceStore, Topology};
use crate::domain::value_objects::{Inputs, Workers};
use crate::error::{KeelError, KeelResult};

/// Lifecycle state of a deployed node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    Creating,
    Started,
}

/// Persisted record of one node instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    pub name: String,
    pub state: NodeState,
    #[serde(default)]
    pub inputs: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

/// Store key of a node's instance record
pub fn node_key(name: &str) -> String {
    format!("{}/{}.json", keys::INSTANCES, name)
}

/// Topology bound to an instance store
pub struct LocalTopology<'s> {
    store: &'s dyn InstanceStore,
    waves: Vec<Vec<String>>,
    inputs: Inputs,
}

impl<'s> LocalTopology<'s> {
    pub fn new(store: &'s dyn InstanceStore, waves: Vec<Vec<String>>, inputs: Inputs) -> Self {
        Self {
            store,
            waves,
            inputs,
        }
    }

    fn load_record(&self, name: &str) -> Option<NodeRecord> {
        let key = node_key(name);
        if !self.store.exists(&key) {
            return None;
        }
        self.store
            .read(&key)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
    }

    fn is_started(&self, name: &str) -> bool {
        self.load_record(name)
            .is_some_and(|record| record.state == NodeState::Started)
    }

    fn record(&self, name: &str, state: NodeState) -> KeelResult<()> {
        let record = NodeRecord {
            name: name.to_string(),
            state,
            inputs: self.inputs.to_value(),
            updated_at: Utc::now(),
        };
        let content = serde_json::to_string_pretty(&record)?;
        self.store.write(&node_key(name), &content)
    }

    fn deploy_node(&self, name: &str) -> KeelResult<()> {
        tracing::debug!(node = name, "creating node");
        self.record(name, NodeState::Creating)?;
        self.record(name, NodeState::Started)?;
        tracing::info!(node = name, "node started");
        Ok(())
    }
}

impl Topology for LocalTopology<'_> {
    fn deploy(&self, workers: Workers) -> KeelResult<()> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers.get())
            .thread_name(|index| format!("keel-worker-{}", index))
            .build()
            .map_err(|e| KeelError::Deploy(format!("could not start worker pool: {}", e)))?;

        for (index, wave) in self.waves.iter().enumerate() {
            let pending: Vec<&str> = wave
                .iter()
                .map(String::as_str)
                .filter(|name| !self.is_started(name))
                .collect();
            tracing::debug!(
                wave = index,
                pending = pending.len(),
                skipped = wave.len() - pending.len(),
                "deploying wave"
            );

            // One job per node so an idle worker picks up the next pending node.
            let results: Vec<(&str, KeelResult<()>)> = pool.install(|| {
                pending
                    .par_iter()
                    .with_max_len(1)
                    .map(|name| (*name, self.deploy_node(name)))
                    .collect()
            });

            for (name, result) in results {
                result.map_err(|e| KeelError::Deploy(format!("node '{}': {}", name, e)))?;
            }
        }
        Ok(())
    }
}
