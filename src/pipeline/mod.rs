pub mod artifact;
pub mod observer;
pub mod stages;
pub mod state;

pub use artifact::StageArtifact;
pub use observer::SubscriptionHandle;
pub use stages::{ProcessStage, STAGE_TOPOLOGY, StageId, StageStatus};
pub use state::{JobKind, Overall, OverallStatus, PipelineStateMachine, ProcessState};
