//! Error kinds surfaced by the entry store and page controller.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WikiError {
    #[error("Requested page does not exist.")]
    EntryNotFound(String),
    #[error("This title already exist, please provide another title.")]
    DuplicateTitle(String),
    #[error("0 matches found!")]
    NoSearchResults(String),
    #[error("There are no entries yet.")]
    EmptyStore,
    #[error("\"{0}\" is not a valid page title.")]
    InvalidTitle(String),
    #[error("Storage failure: {0}")]
    Io(#[from] std::io::Error),
}

impl WikiError {
    /// Recoverable errors are shown to the user on the error page.
    /// Anything else is a server fault.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, WikiError::Io(_))
    }
}

pub type WikiResult<T> = Result<T, WikiError>;
