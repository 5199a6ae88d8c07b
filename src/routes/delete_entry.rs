use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use color_eyre::eyre::eyre;
use serde::Deserialize;

use super::MessageResponse;
use crate::{
    domain::{EntryId, LogbookAPIError, LogbookStoreError},
    AppState,
};

#[derive(Deserialize)]
pub struct DeleteEntryQueryParams {
    entry_id: i32,
}

#[tracing::instrument(name = "Delete entry route handler", skip_all)]
pub async fn delete_entry(
    State(state): State<AppState>,
    query_params: Query<DeleteEntryQueryParams>,
) -> Result<(StatusCode, Json<MessageResponse>), LogbookAPIError> {
    let entry_id = EntryId::new(query_params.entry_id);

    state
        .logbook_store
        .write()
        .await
        .delete_entry(&entry_id)
        .await
        .map_err(|e| match e {
            LogbookStoreError::EntryNotFound => {
                LogbookAPIError::EntryNotFound(*entry_id.as_ref())
            }
            e => LogbookAPIError::UnexpectedError(eyre!(e)),
        })?;

    let response = Json(MessageResponse {
        message: format!("Entry deleted: {entry_id}"),
    });

    Ok((StatusCode::OK, response))
}
