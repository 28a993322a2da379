use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::pipeline::artifact::StageArtifact;
use crate::pipeline::observer::{ObserverCallback, ObserverRegistry, SubscriptionHandle};
use crate::pipeline::stages::{ProcessStage, STAGE_TOPOLOGY, StageId, StageStatus};

/// Whether the job started from an uploaded document or a submitted URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    File,
    Url,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Idle,
    Processing,
    Completed,
    Error,
}

/// Aggregate view across all stages. `progress` stays below 100 until the
/// job is truly complete; 100 is reserved for the `Completed` status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Overall {
    pub progress: f64,
    pub status: OverallStatus,
}

/// Full in-memory state of one processing job. Owned by the orchestrator
/// driving the job; not persisted across restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessState {
    pub id: String,
    pub kind: JobKind,
    pub stages: Vec<ProcessStage>,
    pub current_stage: StageId,
    pub overall: Overall,
    pub metadata: HashMap<String, String>,
    pub stage_results: HashMap<StageId, StageArtifact>,
}

impl ProcessState {
    fn fresh(id: String, kind: JobKind, metadata: HashMap<String, String>) -> Self {
        let mut stages: Vec<ProcessStage> =
            STAGE_TOPOLOGY.iter().map(|s| ProcessStage::pending(*s)).collect();
        stages[0].status = StageStatus::Processing;

        Self {
            id,
            kind,
            stages,
            current_stage: STAGE_TOPOLOGY[0],
            overall: Overall {
                progress: 0.0,
                status: OverallStatus::Processing,
            },
            metadata,
            stage_results: HashMap::new(),
        }
    }

    pub fn for_file(job_id: &str, file_name: &str, file_type: &str, file_size: u64) -> Self {
        let metadata = HashMap::from([
            ("filename".to_string(), file_name.to_string()),
            ("type".to_string(), file_type.to_string()),
            ("size".to_string(), file_size.to_string()),
        ]);
        Self::fresh(job_id.to_string(), JobKind::File, metadata)
    }

    pub fn for_url(url: &str, url_type: &str) -> Self {
        let metadata = HashMap::from([
            ("url".to_string(), url.to_string()),
            ("type".to_string(), url_type.to_string()),
        ]);
        // The URL itself is the natural job identifier for URL submissions.
        Self::fresh(url.to_string(), JobKind::Url, metadata)
    }

    pub fn stage(&self, id: StageId) -> &ProcessStage {
        &self.stages[id.position()]
    }

    fn stage_mut(&mut self, id: StageId) -> &mut ProcessStage {
        &mut self.stages[id.position()]
    }

    fn completed_count(&self) -> usize {
        self.stages
            .iter()
            .filter(|s| s.status == StageStatus::Completed)
            .count()
    }

    fn terminal_completed(&self) -> bool {
        self.stages
            .last()
            .map(|s| s.status == StageStatus::Completed)
            .unwrap_or(false)
    }

    /// Weighted overall progress: each stage contributes an equal share of
    /// 100, completed stages count in full and the active stage contributes
    /// its fractional progress. Clamped to 99 unless the job is truly done,
    /// and never allowed to regress while processing.
    fn recompute_overall(&mut self) {
        let total = self.stages.len() as f64;

        if self.terminal_completed() || self.completed_count() == self.stages.len() {
            self.overall = Overall {
                progress: 100.0,
                status: OverallStatus::Completed,
            };
            return;
        }

        let completed = self.completed_count() as f64;
        let active: f64 = self
            .stages
            .iter()
            .filter(|s| s.status == StageStatus::Processing)
            .map(|s| f64::from(s.progress) / 100.0)
            .sum();

        let mut progress = (completed / total) * 100.0 + active * (100.0 / total);
        progress = progress.min(99.0);
        if self.overall.status == OverallStatus::Processing {
            progress = progress.max(self.overall.progress);
        }
        self.overall.progress = progress;
    }
}

/// State-transition engine for one job. All operations are pure in-memory
/// transitions; the actual work (upload, extraction, AI calls, publishing)
/// lives in the collaborators that report into this machine. Not safe for
/// concurrent mutation: callers serialize operations per job.
///
/// Every mutation notifies subscribed observers synchronously with the
/// post-mutation state. No operation panics or returns an error: reporting
/// progress is best-effort, and references to a missing job are logged and
/// ignored.
#[derive(Default)]
pub struct PipelineStateMachine {
    state: Option<ProcessState>,
    observers: ObserverRegistry,
}

impl PipelineStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current job state, if a job has been started.
    pub fn state(&self) -> Option<&ProcessState> {
        self.state.as_ref()
    }

    /// Attach an observer; it fires synchronously after every mutation.
    pub fn subscribe(
        &mut self,
        callback: impl Fn(&ProcessState) + Send + 'static,
    ) -> SubscriptionHandle {
        self.observers.subscribe(Box::new(callback) as ObserverCallback)
    }

    /// Detach an observer. Returns false if the handle was already removed.
    pub fn unsubscribe(&mut self, handle: SubscriptionHandle) -> bool {
        self.observers.unsubscribe(handle)
    }

    /// Begin a job for an uploaded document. Replaces any prior job state;
    /// this machine tracks one active job at a time.
    pub fn start_file_processing(
        &mut self,
        job_id: &str,
        file_name: &str,
        file_type: &str,
        file_size: u64,
    ) {
        self.state = Some(ProcessState::for_file(job_id, file_name, file_type, file_size));
        self.notify();
    }

    /// Begin a job for a submitted URL. Replaces any prior job state.
    pub fn start_url_processing(&mut self, url: &str, url_type: &str) {
        self.state = Some(ProcessState::for_url(url, url_type));
        self.notify();
    }

    /// Discard the current job state entirely.
    pub fn reset(&mut self) {
        self.state = None;
    }

    /// Report fractional progress for a stage. Marks it `Processing` and
    /// recomputes the weighted overall percentage. Updates addressed to a
    /// stage already `Completed` or `Error` are ignored so that late-arriving
    /// progress events cannot resurrect a finished stage. Retargeting a
    /// different stage demotes the previously active one back to `Pending`,
    /// keeping at most one stage `Processing` at a time.
    pub fn update_stage_progress(&mut self, stage_id: StageId, progress: u8, message: Option<&str>) {
        let Some(state) = self.state.as_mut() else {
            warn!(stage = %stage_id, "progress update with no active job");
            return;
        };

        if state.stage(stage_id).is_terminal_state() {
            debug!(stage = %stage_id, "ignoring progress update for finished stage");
            return;
        }

        if state.current_stage != stage_id {
            let previous = state.stage_mut(state.current_stage);
            if previous.status == StageStatus::Processing {
                previous.status = StageStatus::Pending;
            }
        }

        {
            let stage = state.stage_mut(stage_id);
            stage.status = StageStatus::Processing;
            stage.progress = progress.min(100);
            stage.message = message.map(str::to_string);
        }
        state.current_stage = stage_id;
        state.recompute_overall();
        self.notify();
    }

    /// Mark a stage finished (progress forced to 100). Completing the
    /// terminal stage completes the whole job.
    pub fn complete_stage(&mut self, stage_id: StageId, message: Option<&str>) {
        let Some(state) = self.state.as_mut() else {
            warn!(stage = %stage_id, "stage completion with no active job");
            return;
        };

        {
            let stage = state.stage_mut(stage_id);
            stage.status = StageStatus::Completed;
            stage.progress = 100;
            if message.is_some() {
                stage.message = message.map(str::to_string);
            }
        }
        state.recompute_overall();
        self.notify();
    }

    /// Mark a stage failed. Terminal for the stage and for the overall
    /// status, but earlier stages keep their state so partial progress
    /// stays visible for diagnostics.
    pub fn set_stage_error(&mut self, stage_id: StageId, message: &str) {
        let Some(state) = self.state.as_mut() else {
            warn!(stage = %stage_id, "stage error with no active job");
            return;
        };

        {
            let stage = state.stage_mut(stage_id);
            stage.status = StageStatus::Error;
            stage.message = Some(message.to_string());
        }
        state.overall.status = OverallStatus::Error;
        self.notify();
    }

    /// Complete the current stage and hand off to the next one in topology
    /// order. At the terminal stage this completes the job instead; calling
    /// it again past the end leaves the state untouched.
    pub fn move_to_next_stage(&mut self) {
        let Some(state) = self.state.as_mut() else {
            warn!("stage advance with no active job");
            return;
        };

        let current = state.current_stage;
        if current.is_terminal() && state.stage(current).status == StageStatus::Completed {
            return;
        }

        {
            let stage = state.stage_mut(current);
            stage.status = StageStatus::Completed;
            stage.progress = 100;
        }

        if let Some(next) = current.next() {
            let stage = state.stage_mut(next);
            stage.status = StageStatus::Processing;
            stage.progress = 0;
            state.current_stage = next;
        }

        state.recompute_overall();
        self.notify();
    }

    /// Stash a stage's typed result for downstream stages and the UI.
    pub fn save_stage_result(&mut self, artifact: StageArtifact) {
        let Some(state) = self.state.as_mut() else {
            warn!(stage = %artifact.stage(), "stage result with no active job");
            return;
        };
        state.stage_results.insert(artifact.stage(), artifact);
        self.notify();
    }

    pub fn get_stage_result(&self, stage_id: StageId) -> Option<&StageArtifact> {
        self.state.as_ref()?.stage_results.get(&stage_id)
    }

    fn notify(&self) {
        if let Some(state) = &self.state {
            self.observers.notify(state);
        }
    }
}
