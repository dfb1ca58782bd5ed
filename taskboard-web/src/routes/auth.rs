/// Registration, login, and logout
///
/// These handlers speak HTML forms, not JSON: expected failures
/// (missing fields, duplicate accounts, bad credentials) re-render the
/// form with an inline message instead of surfacing an error page.
///
/// # Endpoints
///
/// - `GET /register`, `POST /register` - registration form / attempt
/// - `GET /login`, `POST /login` - login form / attempt
/// - `GET /logout` - clear the session
///
/// Registration does not log the new user in; it redirects to the login
/// form for an explicit sign-in.

use crate::{
    app::{AppState, SESSION_COOKIE},
    error::WebResult,
    views,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use serde::Deserialize;
use taskboard_shared::auth::{password, session::Session};
use taskboard_shared::models::user::{NewUser, User};
use validator::Validate;

/// Message shown for any failed login attempt
///
/// The same text covers "no such user" and "wrong password" so a caller
/// cannot tell which half failed.
const WRONG_CREDENTIALS: &str = "Wrong credentials";

/// Message shown when registration collides with an existing account
const ALREADY_EXISTS: &str = "Username or email already exists";

/// Registration form payload
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    /// Desired login name
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    /// Email address
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    /// Plaintext password (hashed before storage, never persisted)
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login form payload
///
/// The identifier is matched against usernames first, then emails.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Username or email
    pub identifier: String,

    /// Plaintext password
    pub password: String,
}

/// Resolves the session behind the request's cookie, if any
async fn current_session(state: &AppState, jar: &SignedCookieJar) -> Option<Session> {
    let cookie = jar.get(SESSION_COOKIE)?;
    state.sessions.get(cookie.value()).await
}

/// Builds the session cookie for a fresh login
fn session_cookie(session_id: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Flattens validator output into one inline message
fn validation_messages(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(_, errors)| errors.iter())
        .map(|error| {
            error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| "Invalid value".to_string())
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders the registration form
///
/// An already-authenticated caller is sent home instead of being
/// re-prompted.
pub async fn register_form(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> WebResult<Response> {
    if current_session(&state, &jar).await.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let html = views::render_register(&state.templates, None)?;
    Ok(Html(html).into_response())
}

/// Attempts registration
///
/// - missing field: re-render with the validation message (422)
/// - duplicate username or email: re-render with a conflict message (409)
/// - success: store the Argon2id hash and redirect to the login form
///
/// The duplicate probe is a courtesy; if two registrations race past it,
/// the unique constraints on the users table reject the loser and the
/// insert error maps to the same conflict message.
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> WebResult<Response> {
    if let Err(errors) = form.validate() {
        let message = validation_messages(&errors);
        let html = views::render_register(&state.templates, Some(&message))?;
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response());
    }

    if User::username_or_email_taken(&state.users_db, &form.username, &form.email).await? {
        let html = views::render_register(&state.templates, Some(ALREADY_EXISTS))?;
        return Ok((StatusCode::CONFLICT, Html(html)).into_response());
    }

    let password_hash = password::hash_password(&form.password)?;

    let user = User::create(
        &state.users_db,
        NewUser {
            username: form.username,
            email: form.email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok(Redirect::to("/login").into_response())
}

/// Renders the login form
///
/// An already-authenticated caller is sent home instead of being
/// re-prompted.
pub async fn login_form(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> WebResult<Response> {
    if current_session(&state, &jar).await.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let html = views::render_login(&state.templates, None)?;
    Ok(Html(html).into_response())
}

/// Attempts login
///
/// Looks the identifier up as a username first, then as an email, and
/// verifies the password against the stored hash. Both failure causes
/// re-render the form with the identical [`WRONG_CREDENTIALS`] message
/// (401). Success creates a server-held session and sets the signed
/// session cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> WebResult<Response> {
    let user = User::find_by_identifier(&state.users_db, &form.identifier).await?;

    let verified = match &user {
        Some(user) => password::verify_password(&form.password, &user.password_hash)?,
        None => false,
    };

    let user = match user {
        Some(user) if verified => user,
        _ => {
            let html = views::render_login(&state.templates, Some(WRONG_CREDENTIALS))?;
            return Ok((StatusCode::UNAUTHORIZED, Html(html)).into_response());
        }
    };

    let session_id = state.sessions.create(user.id, &user.username).await;

    tracing::info!(user_id = user.id, username = %user.username, "User logged in");

    Ok((jar.add(session_cookie(session_id)), Redirect::to("/")).into_response())
}

/// Clears the session
///
/// Unconditional and idempotent: logging out without a session is a
/// no-op, and the cookie is dropped either way.
pub async fn logout(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> (SignedCookieJar, Redirect) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.remove(cookie.value()).await;
    }

    let jar = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/"));
    (jar, Redirect::to("/login"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("abc123".to_string());

        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "abc123");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
    }

    #[test]
    fn test_register_form_rejects_empty_fields() {
        let form = RegisterForm {
            username: "".to_string(),
            email: "alice@example.com".to_string(),
            password: "pw1".to_string(),
        };
        assert!(form.validate().is_err());

        let form = RegisterForm {
            username: "alice".to_string(),
            email: "".to_string(),
            password: "pw1".to_string(),
        };
        assert!(form.validate().is_err());

        let form = RegisterForm {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "".to_string(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_register_form_accepts_complete_input() {
        let form = RegisterForm {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "pw1".to_string(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_validation_messages_flatten() {
        let form = RegisterForm {
            username: "".to_string(),
            email: "alice@example.com".to_string(),
            password: "pw1".to_string(),
        };

        let errors = form.validate().unwrap_err();
        assert_eq!(validation_messages(&errors), "Username is required");
    }
}
