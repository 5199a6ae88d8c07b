use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    CookieJar,
};
use chrono::Utc;
use color_eyre::eyre::{eyre, Context, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::LogbookAPIError;

// This value determines how long a form stays submittable after it was fetched
pub const FORM_TOKEN_TTL_SECONDS: i64 = 1800; // 30 minutes

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    AddMember,
    AddEntry,
}

impl Form {
    pub fn name(&self) -> &'static str {
        match self {
            Form::AddMember => "add_member",
            Form::AddEntry => "add_entry",
        }
    }

    pub fn cookie_name(&self) -> String {
        format!("{}_token", self.name())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FormClaims {
    pub form: String,
    pub exp: usize,
}

// Issue a new token for `form`, returning it with the cookie that carries it
#[tracing::instrument(name = "Issuing form token", skip_all)]
pub fn issue_form_token(
    form: Form,
    secret: &Secret<String>,
) -> Result<(Secret<String>, Cookie<'static>)> {
    let token = generate_form_token(form, secret)?;
    let cookie = create_form_cookie(form, &token);
    Ok((token, cookie))
}

#[tracing::instrument(name = "Creating form cookie", skip_all)]
fn create_form_cookie(form: Form, token: &Secret<String>) -> Cookie<'static> {
    Cookie::build((form.cookie_name(), token.expose_secret().to_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .build()
}

#[tracing::instrument(name = "Generating form token", skip_all)]
fn generate_form_token(
    form: Form,
    secret: &Secret<String>,
) -> Result<Secret<String>> {
    let delta = chrono::Duration::try_seconds(FORM_TOKEN_TTL_SECONDS)
        .ok_or(eyre!("failed to create form token time delta"))?;

    let exp = Utc::now()
        .checked_add_signed(delta)
        .ok_or(eyre!("failed to add to current time"))?
        .timestamp();

    let exp: usize = exp.try_into().wrap_err(format!(
        "failed to cast exp time to usize. exp time: {}",
        exp
    ))?;

    let claims = FormClaims {
        form: form.name().to_owned(),
        exp,
    };

    let token = encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .wrap_err("failed to create form token")?;

    Ok(Secret::new(token))
}

#[tracing::instrument(name = "Validating form token", skip_all)]
pub fn validate_form_token(
    token: &str,
    form: Form,
    secret: &Secret<String>,
) -> Result<FormClaims> {
    let claims = decode::<FormClaims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .wrap_err("failed to decode form token")?;

    if claims.form != form.name() {
        return Err(eyre!(
            "form token issued for '{}' used on '{}'",
            claims.form,
            form.name()
        ));
    }

    Ok(claims)
}

/// Checks a form submission: the token in the body must equal the one in the
/// form's cookie and must be a valid, unexpired token for this form.
#[tracing::instrument(name = "Checking form submission", skip_all)]
pub fn check_form_submission(
    jar: &CookieJar,
    submitted: Option<&str>,
    form: Form,
    secret: &Secret<String>,
) -> Result<(), LogbookAPIError> {
    let submitted = submitted
        .filter(|token| !token.is_empty())
        .ok_or(LogbookAPIError::MissingFormToken)?;

    let cookie = jar
        .get(&form.cookie_name())
        .ok_or(LogbookAPIError::MissingFormToken)?;

    if cookie.value() != submitted {
        return Err(LogbookAPIError::InvalidFormToken(eyre!(
            "submitted form token does not match cookie"
        )));
    }

    validate_form_token(submitted, form, secret)
        .map_err(LogbookAPIError::InvalidFormToken)?;

    Ok(())
}
