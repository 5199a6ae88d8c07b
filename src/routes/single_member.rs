use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use color_eyre::eyre::eyre;
use serde::Deserialize;

use super::EntryListResponse;
use crate::{
    domain::{LogbookAPIError, LogbookStoreError, MemberId, ValidationError},
    AppState,
};

#[derive(Deserialize)]
pub struct SingleMemberQueryParams {
    member_id: Option<String>,
    member_name: Option<String>,
}

#[tracing::instrument(name = "Single member route handler", skip_all)]
pub async fn single_member(
    State(state): State<AppState>,
    query_params: Query<SingleMemberQueryParams>,
) -> Result<(StatusCode, Json<EntryListResponse>), LogbookAPIError> {
    let store = state.logbook_store.read().await;

    // An id takes precedence over a name when both are given
    let member = match (&query_params.member_id, &query_params.member_name) {
        (Some(id), _) => {
            let member_id = MemberId::parse(id)?;
            tracing::debug!("member_id: {}", member_id);
            store
                .get_member(&member_id)
                .await
                .map_err(member_lookup_error(member_id.to_string()))?
        }
        (None, Some(name)) => {
            tracing::debug!("member_name: {}", name);
            store
                .get_member_by_name(name)
                .await
                .map_err(member_lookup_error(name.to_owned()))?
        }
        (None, None) => {
            return Err(ValidationError::new(
                "member_id or member_name is required".to_string(),
            )
            .into())
        }
    };

    let entries = store
        .get_member_entries(&member.id)
        .await
        .map_err(|e| LogbookAPIError::UnexpectedError(eyre!(e)))?;

    let response = Json(EntryListResponse {
        member_name: member.name.as_ref().to_owned(),
        entries,
    });

    Ok((StatusCode::OK, response))
}

fn member_lookup_error(
    key: String,
) -> impl FnOnce(LogbookStoreError) -> LogbookAPIError {
    move |e| match e {
        LogbookStoreError::MemberNotFound => LogbookAPIError::MemberNotFound(key),
        e => LogbookAPIError::UnexpectedError(eyre!(e)),
    }
}
