use serde::{Deserialize, Serialize};

use crate::pipeline::stages::StageId;

/// Typed result payload handed from one pipeline stage to the next (and to
/// the UI). One variant per stage id, so consumers never have to guess the
/// shape of an untyped blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "kebab-case")]
pub enum StageArtifact {
    Upload {
        object_key: String,
        size_bytes: u64,
    },
    Extract {
        markdown: String,
        word_count: usize,
    },
    Process {
        content: String,
    },
    AdvancedAi {
        content: String,
        excerpt: Option<String>,
    },
    FormatConversion {
        html: String,
    },
    CopyEditing {
        html: String,
        title: Option<String>,
        tags: Vec<String>,
    },
    PrepPublish {
        cover_image_url: Option<String>,
    },
    PublishNews {
        post_url: String,
    },
}

impl StageArtifact {
    /// The stage that produced this artifact.
    pub fn stage(&self) -> StageId {
        match self {
            Self::Upload { .. } => StageId::Upload,
            Self::Extract { .. } => StageId::Extract,
            Self::Process { .. } => StageId::Process,
            Self::AdvancedAi { .. } => StageId::AdvancedAi,
            Self::FormatConversion { .. } => StageId::FormatConversion,
            Self::CopyEditing { .. } => StageId::CopyEditing,
            Self::PrepPublish { .. } => StageId::PrepPublish,
            Self::PublishNews { .. } => StageId::PublishNews,
        }
    }
}
