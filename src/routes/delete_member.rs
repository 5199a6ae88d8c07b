use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{LogbookAPIError, LogbookStoreError, MemberId},
    AppState,
};

#[derive(Deserialize)]
pub struct DeleteMemberQueryParams {
    member_id: String,
}

/// Deletes a member together with all of their log entries.
#[tracing::instrument(name = "Delete member route handler", skip_all)]
pub async fn delete_member(
    State(state): State<AppState>,
    query_params: Query<DeleteMemberQueryParams>,
) -> Result<(StatusCode, Json<MessageResponse>), LogbookAPIError> {
    let member_id = MemberId::parse(&query_params.member_id)?;
    let map_store_error = |e: LogbookStoreError| match e {
        LogbookStoreError::MemberNotFound => {
            LogbookAPIError::MemberNotFound(member_id.to_string())
        }
        e => LogbookAPIError::UnexpectedError(eyre!(e)),
    };

    let mut store = state.logbook_store.write().await;
    let member = store
        .get_member(&member_id)
        .await
        .map_err(map_store_error)?;
    store
        .delete_member(&member_id)
        .await
        .map_err(map_store_error)?;

    tracing::info!("deleted member {}", member_id);

    let response = Json(MessageResponse {
        message: format!("Member deleted: {}", member.name.as_ref()),
    });

    Ok((StatusCode::OK, response))
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
