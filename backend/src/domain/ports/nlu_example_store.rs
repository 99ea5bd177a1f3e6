//! Port for loading and persisting the NLU example document.

use async_trait::async_trait;
use nlu_data::NluDocument;

use super::define_port_error;

define_port_error! {
    /// Failures raised by NLU document stores.
    pub enum NluStoreError {
        /// The backing medium could not be read or written.
        Io { message: String } => "example store I/O failed: {message}",
        /// The stored document could not be parsed.
        Corrupt { message: String } => "example document is corrupt: {message}",
    }
}

/// Whole-document load and save.
///
/// Stores make each `save` atomic but do not coordinate concurrent
/// read-modify-write cycles; callers serialise those.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NluExampleStore: Send + Sync {
    async fn load(&self) -> Result<NluDocument, NluStoreError>;

    async fn save(&self, document: &NluDocument) -> Result<(), NluStoreError>;
}
