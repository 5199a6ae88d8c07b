use axum::{extract::State, http::StatusCode, Json};
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{compute_totals, LogbookAPIError, MemberTotals},
    AppState,
};

#[tracing::instrument(name = "Get totals route handler", skip_all)]
pub async fn get_totals(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<TotalsResponse>), LogbookAPIError> {
    let snapshot = state
        .logbook_store
        .read()
        .await
        .get_snapshot()
        .await
        .map_err(|e| LogbookAPIError::UnexpectedError(eyre!(e)))?;

    let totals = compute_totals(&snapshot, &state.ratio_config)
        .map_err(|e| LogbookAPIError::UnexpectedError(eyre!(e)))?;

    Ok((StatusCode::OK, Json(TotalsResponse { totals })))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct TotalsResponse {
    pub totals: Vec<MemberTotals>,
}
