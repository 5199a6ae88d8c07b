use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use chrono::NaiveDate;
use color_eyre::eyre::eyre;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use super::MemberResponse;
use crate::{
    domain::{
        ActivityId, LogEntry, LogbookAPIError, LogbookStoreError, MemberId,
        NewLogEntry,
    },
    utils::form_token::{check_form_submission, issue_form_token, Form},
    AppState,
};

/// Returns a fresh form token along with the member and activity choices
/// for the entry form.
#[tracing::instrument(name = "Add entry form route handler", skip_all)]
pub async fn get_add_entry_form(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(StatusCode, CookieJar, Json<AddEntryFormResponse>), LogbookAPIError>
{
    let (members, activities) = {
        let store = state.logbook_store.read().await;
        let members = store
            .get_members()
            .await
            .map_err(|e| LogbookAPIError::UnexpectedError(eyre!(e)))?;
        let activities = store
            .get_activities()
            .await
            .map_err(|e| LogbookAPIError::UnexpectedError(eyre!(e)))?;
        (members, activities)
    };

    let (token, cookie) =
        issue_form_token(Form::AddEntry, &state.form_token_secret)
            .map_err(LogbookAPIError::UnexpectedError)?;

    let response = Json(AddEntryFormResponse {
        csrf_token: token.expose_secret().to_owned(),
        members: members.iter().map(MemberResponse::from).collect(),
        activities: activities
            .into_iter()
            .map(|activity| ActivityResponse {
                id: *activity.id.as_ref(),
                name: activity.name,
            })
            .collect(),
    });

    Ok((StatusCode::OK, jar.add(cookie), response))
}

#[tracing::instrument(name = "Add entry route handler", skip_all)]
pub async fn add_entry(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<AddEntryRequest>,
) -> Result<(StatusCode, Json<LogEntry>), LogbookAPIError> {
    check_form_submission(
        &jar,
        request.csrf_token.as_deref(),
        Form::AddEntry,
        &state.form_token_secret,
    )?;

    let new_entry = NewLogEntry::new(
        MemberId::new(request.member_id),
        ActivityId::new(request.activity_id),
        request.date,
    );

    let entry = state
        .logbook_store
        .write()
        .await
        .add_entry(&new_entry)
        .await
        .map_err(|e| match e {
            LogbookStoreError::MemberNotFound => {
                LogbookAPIError::MemberNotFound(request.member_id.to_string())
            }
            LogbookStoreError::ActivityNotFound => {
                LogbookAPIError::ActivityNotFound(request.activity_id)
            }
            e => LogbookAPIError::UnexpectedError(eyre!(e)),
        })?;

    tracing::info!(
        "added entry {} for member {}",
        entry.id,
        entry.member_id
    );

    Ok((StatusCode::CREATED, Json(entry)))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct AddEntryFormResponse {
    #[serde(rename = "csrfToken")]
    pub csrf_token: String,
    pub members: Vec<MemberResponse>,
    pub activities: Vec<ActivityResponse>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ActivityResponse {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct AddEntryRequest {
    #[serde(rename = "memberId")]
    pub member_id: i32,
    #[serde(rename = "activityId")]
    pub activity_id: i32,
    pub date: NaiveDate,
    #[serde(rename = "csrfToken")]
    pub csrf_token: Option<String>,
}
