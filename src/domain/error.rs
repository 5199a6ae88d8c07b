use color_eyre::eyre::Report;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogbookAPIError {
    #[error("Activity not found: {0}")]
    ActivityNotFound(i32),
    #[error("Entry not found: {0}")]
    EntryNotFound(i32),
    #[error("Invalid form token")]
    InvalidFormToken(#[source] Report),
    #[error("Member with that name already exists")]
    MemberAlreadyExists,
    #[error("Member not found: {0}")]
    MemberNotFound(String),
    #[error("Missing form token")]
    MissingFormToken,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
    #[error("Validation error")]
    ValidationError(#[from] ValidationError),
}

#[derive(Debug, Error)]
#[error("Validation error: {0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: String) -> Self {
        Self(message)
    }

    pub fn as_ref(&self) -> &String {
        &self.0
    }
}
