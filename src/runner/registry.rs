use std::collections::HashMap;
use std::sync::Arc;

use crate::pipeline::StageId;
use crate::runner::executor::StageExecutor;

/// Registry of stage executors keyed by stage id.
#[derive(Default)]
pub struct ExecutorRegistry {
    executors: HashMap<StageId, Arc<dyn StageExecutor>>,
}

impl ExecutorRegistry {
    pub fn new() -> Self {
        Self {
            executors: HashMap::new(),
        }
    }

    /// Register an executor for the stage it reports. A later registration
    /// for the same stage replaces the earlier one.
    pub fn register<E: StageExecutor>(&mut self, executor: E) {
        self.executors.insert(executor.stage(), Arc::new(executor));
    }

    pub fn get(&self, stage: StageId) -> Option<Arc<dyn StageExecutor>> {
        self.executors.get(&stage).cloned()
    }

    /// All stages with a registered executor.
    pub fn registered_stages(&self) -> Vec<StageId> {
        self.executors.keys().copied().collect()
    }
}
