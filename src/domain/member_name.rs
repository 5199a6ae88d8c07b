use super::ValidationError;
use serde::{Deserialize, Serialize};

pub const MAX_MEMBER_NAME_LENGTH: usize = 80;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberName(String);

impl MemberName {
    pub fn parse(name: String) -> Result<Self, ValidationError> {
        let name = name.trim();
        match name.chars().count() {
            x if x < 1 => Err(ValidationError::new(
                "Member name cannot be empty".to_string(),
            )),
            x if x > MAX_MEMBER_NAME_LENGTH => Err(ValidationError::new(
                format!("Max name length is {MAX_MEMBER_NAME_LENGTH} characters"),
            )),
            _ => Ok(Self(name.to_owned())),
        }
    }

    /// Key used for the case-insensitive uniqueness check.
    pub fn folded(&self) -> String {
        self.0.to_lowercase()
    }

    pub fn matches_ignoring_case(&self, other: &str) -> bool {
        self.folded() == other.to_lowercase()
    }
}

impl AsRef<String> for MemberName {
    fn as_ref(&self) -> &String {
        &self.0
    }
}
