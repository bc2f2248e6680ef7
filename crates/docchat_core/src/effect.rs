use std::path::PathBuf;

use crate::MessageId;

/// Backend work requested by [`crate::update`]. Each effect's completion comes
/// back as exactly one [`crate::Msg`], except `ProbeHealth`, which is only logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ProbeHealth,
    SendChat {
        placeholder_id: MessageId,
        message: String,
    },
    UploadFiles {
        files: Vec<PathBuf>,
    },
    FetchSummary,
    ClearDocuments,
}
