//! File-storage collaborator port, used for resumes.

use async_trait::async_trait;

/// Accepted resume content types. Anything else is rejected before the
/// file-store collaborator is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeType {
    Pdf,
    Docx,
}

impl ResumeType {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "application/pdf" => Some(ResumeType::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(ResumeType::Docx)
            }
            _ => None,
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            ResumeType::Pdf => "pdf",
            ResumeType::Docx => "docx",
        }
    }
}

/// File storage for uploaded resumes.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Store the file bytes and return a URI the resume can be fetched from.
    async fn store(&self, bytes: Vec<u8>, resume_type: ResumeType) -> Result<String, StoreError>;

    /// Remove a previously stored file by the URI `store` returned. Used to
    /// clean up when the mutation that referenced the file did not commit.
    async fn remove(&self, url: &str) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to write file: {0}")]
    Write(String),

    #[error("Failed to remove file: {0}")]
    Remove(String),
}
