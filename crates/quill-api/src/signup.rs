use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use tracing::error;

use quill_auth::hash::make_pw_hash;
use quill_auth::validate::{valid_email, valid_password, valid_username};
use quill_db::{StoreError, USER_ROOT};

use crate::session::USER_ID_COOKIE;
use crate::state::AppState;
use crate::templates::{SignupFormTemplate, ThanksTemplate};

const BAD_USERNAME: &str = "That's not a valid username";
const TAKEN_USERNAME: &str = "That username already exists";
const BAD_PASSWORD: &str = "That's not a valid password";
const MISMATCH: &str = "Your passwords don't match";
const BAD_EMAIL: &str = "That's not a valid email";

#[derive(Debug, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub verify: String,
    #[serde(default)]
    pub email: String,
}

/// One message slot per form field. Every failing field is reported in the
/// same pass; checking never stops at the first problem.
#[derive(Debug, Default, PartialEq)]
pub struct FieldErrors {
    pub username: Option<&'static str>,
    pub password: Option<&'static str>,
    pub verify: Option<&'static str>,
    pub email: Option<&'static str>,
}

impl FieldErrors {
    pub fn any(&self) -> bool {
        self.username.is_some()
            || self.password.is_some()
            || self.verify.is_some()
            || self.email.is_some()
    }
}

/// Syntax-only pass. The uniqueness lookup is separate and runs only for a
/// username that passed here.
pub fn check_syntax(form: &SignupForm) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if !valid_username(&form.username) {
        errors.username = Some(BAD_USERNAME);
    }
    if !valid_password(&form.password) {
        errors.password = Some(BAD_PASSWORD);
    } else if form.password != form.verify {
        errors.verify = Some(MISMATCH);
    }
    if !valid_email(&form.email) {
        errors.email = Some(BAD_EMAIL);
    }

    errors
}

/// Re-render the form. Username and email are echoed back; the password
/// fields never are.
fn rejected(form: &SignupForm, errors: FieldErrors) -> SignupFormTemplate {
    SignupFormTemplate {
        username: form.username.clone(),
        email: form.email.clone(),
        username_error: errors.username,
        password_error: errors.password,
        verify_error: errors.verify,
        email_error: errors.email,
    }
}

pub async fn signup_form() -> SignupFormTemplate {
    SignupFormTemplate::empty()
}

pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SignupForm>,
) -> Result<Response, StatusCode> {
    let mut errors = check_syntax(&form);

    if errors.username.is_none() {
        let existing = state
            .db
            .get_user_by_username(USER_ROOT, &form.username)
            .map_err(|e| {
                error!("username lookup failed: {e:#}");
                StatusCode::INTERNAL_SERVER_ERROR
            })?;
        if existing.is_some() {
            errors.username = Some(TAKEN_USERNAME);
        }
    }

    if errors.any() {
        return Ok(rejected(&form, errors).into_response());
    }

    let password_hash = make_pw_hash(&form.username, &form.password);
    let email = (!form.email.is_empty()).then_some(form.email.as_str());

    let user_id = match state
        .db
        .create_user(USER_ROOT, &form.username, &password_hash, email)
    {
        Ok(id) => id,
        // Lost the race between lookup and insert; same answer as if the
        // lookup had seen the other signup.
        Err(StoreError::UsernameTaken) => {
            errors.username = Some(TAKEN_USERNAME);
            return Ok(rejected(&form, errors).into_response());
        }
        Err(StoreError::Other(e)) => {
            error!("creating user failed: {e:#}");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let jar = jar.add(Cookie::new(USER_ID_COOKIE, state.identity.encode(user_id)));
    Ok((jar, Redirect::to("/signup/thanks")).into_response())
}

pub async fn signup_thanks(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<ThanksTemplate, StatusCode> {
    let user_id = jar
        .get(USER_ID_COOKIE)
        .and_then(|cookie| state.identity.decode(cookie.value()))
        .ok_or(StatusCode::NOT_FOUND)?;

    let user = state
        .db
        .get_user_by_id(USER_ROOT, user_id)
        .map_err(|e| {
            error!("user lookup failed: {e:#}");
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(ThanksTemplate {
        username: user.username,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(username: &str, password: &str, verify: &str, email: &str) -> SignupForm {
        SignupForm {
            username: username.into(),
            password: password.into(),
            verify: verify.into(),
            email: email.into(),
        }
    }

    #[test]
    fn clean_form_has_no_errors() {
        let errors = check_syntax(&form("bob", "hunter2", "hunter2", "bob@example.com"));
        assert!(!errors.any());
    }

    #[test]
    fn email_may_be_left_blank() {
        let errors = check_syntax(&form("bob", "hunter2", "hunter2", ""));
        assert!(!errors.any());
    }

    #[test]
    fn all_failing_fields_are_reported_together() {
        // Short username, mismatched verify, malformed email: three
        // distinct errors out of a single pass.
        let errors = check_syntax(&form("ab", "abc", "def", "notanemail"));
        assert_eq!(errors.username, Some(BAD_USERNAME));
        assert_eq!(errors.password, None);
        assert_eq!(errors.verify, Some(MISMATCH));
        assert_eq!(errors.email, Some(BAD_EMAIL));
    }

    #[test]
    fn verify_mismatch_rejects() {
        let errors = check_syntax(&form("bob", "hunter2", "hunter3", ""));
        assert_eq!(errors.verify, Some(MISMATCH));
        assert!(errors.any());
    }

    #[test]
    fn mismatch_is_not_reported_when_password_is_invalid() {
        // An invalid password wins its slot; verify is only checked
        // against a password worth keeping.
        let errors = check_syntax(&form("bob", "ab", "different", ""));
        assert_eq!(errors.password, Some(BAD_PASSWORD));
        assert_eq!(errors.verify, None);
    }

    #[test]
    fn rejection_echoes_username_and_email_only() {
        let f = form("bob!", "topsecret", "topsecret", "b@c.d");
        let template = rejected(&f, check_syntax(&f));
        assert_eq!(template.username, "bob!");
        assert_eq!(template.email, "b@c.d");
    }
}
