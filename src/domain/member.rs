use serde::{Deserialize, Serialize};

use super::{MemberId, MemberName};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: MemberName,
}

impl Member {
    pub fn new(id: MemberId, name: MemberName) -> Self {
        Self { id, name }
    }
}
