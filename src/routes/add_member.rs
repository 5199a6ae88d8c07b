use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use super::MemberResponse;
use crate::{
    domain::{LogbookAPIError, LogbookStoreError, MemberName},
    utils::form_token::{check_form_submission, issue_form_token, Form},
    AppState,
};

#[tracing::instrument(name = "Add member form route handler", skip_all)]
pub async fn get_add_member_form(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(StatusCode, CookieJar, Json<AddMemberFormResponse>), LogbookAPIError>
{
    let (token, cookie) =
        issue_form_token(Form::AddMember, &state.form_token_secret)
            .map_err(LogbookAPIError::UnexpectedError)?;

    let response = Json(AddMemberFormResponse {
        csrf_token: token.expose_secret().to_owned(),
    });

    Ok((StatusCode::OK, jar.add(cookie), response))
}

#[tracing::instrument(name = "Add member route handler", skip_all)]
pub async fn add_member(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<AddMemberRequest>,
) -> Result<(StatusCode, Json<MemberResponse>), LogbookAPIError> {
    check_form_submission(
        &jar,
        request.csrf_token.as_deref(),
        Form::AddMember,
        &state.form_token_secret,
    )?;

    let member_name = MemberName::parse(request.name)?;

    let member = state
        .logbook_store
        .write()
        .await
        .add_member(&member_name)
        .await
        .map_err(|e| match e {
            LogbookStoreError::MemberAlreadyExists => {
                LogbookAPIError::MemberAlreadyExists
            }
            e => LogbookAPIError::UnexpectedError(eyre!(e)),
        })?;

    tracing::info!("added member {}", member.id);

    Ok((StatusCode::CREATED, Json(MemberResponse::from(&member))))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct AddMemberFormResponse {
    #[serde(rename = "csrfToken")]
    pub csrf_token: String,
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct AddMemberRequest {
    pub name: String,
    #[serde(rename = "csrfToken")]
    pub csrf_token: Option<String>,
}
