use async_trait::async_trait;
use std::collections::HashMap;

use crate::pipeline::{StageArtifact, StageId};

/// Snapshot of job state handed to an executor: the job identity, its
/// submission metadata, and every artifact produced by earlier stages.
#[derive(Debug, Clone)]
pub struct StageContext {
    pub job_id: String,
    pub metadata: HashMap<String, String>,
    pub artifacts: HashMap<StageId, StageArtifact>,
}

impl StageContext {
    pub fn artifact(&self, stage: StageId) -> Option<&StageArtifact> {
        self.artifacts.get(&stage)
    }
}

/// One unit of pipeline work: executors wrap the external SaaS calls
/// (storage, AI rewriting, publishing) behind a uniform seam. Errors are
/// retried by the runner up to its configured attempt limit.
#[async_trait]
pub trait StageExecutor: Send + Sync + 'static {
    /// Execute the stage and produce its artifact.
    async fn run(&self, ctx: &StageContext) -> anyhow::Result<StageArtifact>;

    /// The stage this executor handles.
    fn stage(&self) -> StageId;
}
