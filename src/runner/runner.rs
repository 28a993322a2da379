use anyhow::{Result, anyhow};
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

use crate::pipeline::{PipelineStateMachine, STAGE_TOPOLOGY, StageId};
use crate::runner::executor::StageContext;
use crate::runner::registry::ExecutorRegistry;

/// Runner configuration.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub max_stage_attempts: u32,
    pub base_backoff_secs: u32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_stage_attempts: 3,
            base_backoff_secs: 2,
        }
    }
}

/// Drives one job through the fixed stage topology: for each stage it calls
/// the registered executor, saves the produced artifact, and advances the
/// state machine. Failed executors are retried with capped exponential
/// backoff before the stage is declared failed.
pub struct PipelineRunner {
    registry: Arc<ExecutorRegistry>,
    config: RunnerConfig,
    runner_id: Uuid,
    machine: PipelineStateMachine,
}

impl PipelineRunner {
    pub fn new(registry: ExecutorRegistry, config: RunnerConfig) -> Self {
        Self {
            registry: Arc::new(registry),
            config,
            runner_id: Uuid::new_v4(),
            machine: PipelineStateMachine::new(),
        }
    }

    /// The underlying state machine, e.g. for subscribing progress observers
    /// before starting a job.
    pub fn machine(&self) -> &PipelineStateMachine {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut PipelineStateMachine {
        &mut self.machine
    }

    /// Process an uploaded document end to end.
    pub async fn run_file_job(
        &mut self,
        job_id: &str,
        file_name: &str,
        file_type: &str,
        file_size: u64,
    ) -> Result<()> {
        self.machine
            .start_file_processing(job_id, file_name, file_type, file_size);
        let span = info_span!("job", runner_id = %self.runner_id, job_id = job_id);
        self.drive().instrument(span).await
    }

    /// Process a submitted URL end to end.
    pub async fn run_url_job(&mut self, url: &str, url_type: &str) -> Result<()> {
        self.machine.start_url_processing(url, url_type);
        let span = info_span!("job", runner_id = %self.runner_id, job_id = url);
        self.drive().instrument(span).await
    }

    async fn drive(&mut self) -> Result<()> {
        for stage in STAGE_TOPOLOGY {
            self.run_stage(stage).await?;
        }
        info!("job completed");
        Ok(())
    }

    async fn run_stage(&mut self, stage: StageId) -> Result<()> {
        let Some(executor) = self.registry.get(stage) else {
            let message = format!("no executor registered for stage '{stage}'");
            error!(%stage, "{message}");
            self.machine.set_stage_error(stage, &message);
            return Err(anyhow!(message));
        };

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let ctx = self.snapshot_context()?;

            let result = executor
                .run(&ctx)
                .instrument(info_span!("stage", id = %stage, attempt))
                .await;

            match result {
                Ok(artifact) => {
                    info!(%stage, attempt, "stage completed");
                    self.machine.save_stage_result(artifact);
                    self.machine.move_to_next_stage();
                    return Ok(());
                }
                Err(err) if attempt < self.config.max_stage_attempts => {
                    let delay = self.config.backoff_delay(attempt);
                    warn!(
                        %stage,
                        attempt,
                        error = %err,
                        delay_secs = delay.as_secs(),
                        "stage failed, retrying"
                    );
                    self.machine.update_stage_progress(
                        stage,
                        0,
                        Some(&format!("retrying after failure: {err}")),
                    );
                    sleep(delay).await;
                }
                Err(err) => {
                    error!(%stage, attempt, error = %err, "stage permanently failed");
                    self.machine.set_stage_error(stage, &err.to_string());
                    return Err(err.context(format!(
                        "stage '{stage}' failed after {attempt} attempts"
                    )));
                }
            }
        }
    }

    fn snapshot_context(&self) -> Result<StageContext> {
        let state = self
            .machine
            .state()
            .ok_or_else(|| anyhow!("runner has no active job"))?;
        Ok(StageContext {
            job_id: state.id.clone(),
            metadata: state.metadata.clone(),
            artifacts: state.stage_results.clone(),
        })
    }
}
