use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TimingError {
    /// A measure referenced a mark that is not in the registry.
    #[error("Unknown mark: {0}")]
    UnknownMark(String),
    #[error("Unknown entry type: {0}")]
    UnknownEntryType(String),
}
