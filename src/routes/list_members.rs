use axum::{extract::State, http::StatusCode, Json};
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{LogbookAPIError, Member},
    AppState,
};

#[tracing::instrument(name = "List members route handler", skip_all)]
pub async fn list_members(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<MemberListResponse>), LogbookAPIError> {
    let members = state
        .logbook_store
        .read()
        .await
        .get_members()
        .await
        .map_err(|e| LogbookAPIError::UnexpectedError(eyre!(e)))?;

    let response = Json(MemberListResponse {
        members: members.iter().map(MemberResponse::from).collect(),
    });

    Ok((StatusCode::OK, response))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct MemberListResponse {
    pub members: Vec<MemberResponse>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct MemberResponse {
    pub id: i32,
    pub name: String,
}

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            id: *member.id.as_ref(),
            name: member.name.as_ref().to_owned(),
        }
    }
}
