use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Identifier for one unit of work in the fixed publishing pipeline.
///
/// The set of stages is a deployment-time property: all overall-progress
/// math divides by the topology length, so it must stay stable for the
/// duration of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageId {
    Upload,
    Extract,
    Process,
    AdvancedAi,
    FormatConversion,
    CopyEditing,
    PrepPublish,
    PublishNews,
}

/// Pipeline topology in execution order. The last entry is the terminal stage.
pub const STAGE_TOPOLOGY: [StageId; 8] = [
    StageId::Upload,
    StageId::Extract,
    StageId::Process,
    StageId::AdvancedAi,
    StageId::FormatConversion,
    StageId::CopyEditing,
    StageId::PrepPublish,
    StageId::PublishNews,
];

impl StageId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Extract => "extract",
            Self::Process => "process",
            Self::AdvancedAi => "advanced-ai",
            Self::FormatConversion => "format-conversion",
            Self::CopyEditing => "copy-editing",
            Self::PrepPublish => "prep-publish",
            Self::PublishNews => "publish-news",
        }
    }

    /// Human-readable label rendered by progress UIs.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Upload => "Uploading source document",
            Self::Extract => "Extracting text",
            Self::Process => "Cleaning up content",
            Self::AdvancedAi => "Rewriting content",
            Self::FormatConversion => "Converting and formatting",
            Self::CopyEditing => "Copy editing",
            Self::PrepPublish => "Preparing publication",
            Self::PublishNews => "Publishing",
        }
    }

    /// Zero-based position of this stage in the topology.
    pub fn position(&self) -> usize {
        STAGE_TOPOLOGY
            .iter()
            .position(|s| s == self)
            .expect("stage is part of the fixed topology")
    }

    /// The stage that follows this one, or `None` for the terminal stage.
    pub fn next(&self) -> Option<StageId> {
        STAGE_TOPOLOGY.get(self.position() + 1).copied()
    }

    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }
}

impl Display for StageId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a single stage. `Completed` and `Error` are terminal:
/// progress updates to a stage in either state are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Pending,
    Processing,
    Completed,
    Error,
}

/// Tracked state of one stage within a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessStage {
    pub id: StageId,
    pub name: String,
    pub status: StageStatus,
    pub progress: u8,
    pub message: Option<String>,
}

impl ProcessStage {
    pub fn pending(id: StageId) -> Self {
        Self {
            id,
            name: id.display_name().to_string(),
            status: StageStatus::Pending,
            progress: 0,
            message: None,
        }
    }

    pub fn is_terminal_state(&self) -> bool {
        matches!(self.status, StageStatus::Completed | StageStatus::Error)
    }
}
