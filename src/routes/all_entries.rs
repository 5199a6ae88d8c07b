use axum::{extract::State, http::StatusCode, Json};
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{LogEntryDetails, LogbookAPIError},
    utils::constants::ALL_MEMBERS_LABEL,
    AppState,
};

#[tracing::instrument(name = "All entries route handler", skip_all)]
pub async fn all_entries(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<EntryListResponse>), LogbookAPIError> {
    let entries = state
        .logbook_store
        .read()
        .await
        .get_entries()
        .await
        .map_err(|e| LogbookAPIError::UnexpectedError(eyre!(e)))?;

    let response = Json(EntryListResponse {
        member_name: ALL_MEMBERS_LABEL.to_owned(),
        entries,
    });

    Ok((StatusCode::OK, response))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct EntryListResponse {
    #[serde(rename = "memberName")]
    pub member_name: String,
    pub entries: Vec<LogEntryDetails>,
}
