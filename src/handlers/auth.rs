use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    services::auth as auth_service,
    services::mailer,
    state::AppState,
    validation::auth::*,
};

/// The request payload for registration.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// The request payload for sign-in.
#[derive(Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// The request payload for a password reset.
#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub email: String,
}

/// A plain message response.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// The response payload for a successful sign-in.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub token: String,
    pub user_id: Uuid,
}

/// The response payload for a password reset.
#[derive(Serialize)]
pub struct ResetPasswordResponse {
    pub reseted: bool,
}

/// Handles registration.
#[axum::debug_handler]
pub async fn sign_up(
    State(state): State<AppState>,
    Json(payload): Json<SignUpRequest>,
) -> Result<impl IntoResponse> {
    // The submitted password must stay out of every log line.
    tracing::info!("📝 Sign-up attempt for: {}", payload.email);
    validate_email(&payload.email)?;
    validate_password(&payload.password)?;

    let user = auth_service::create_user(
        &state.db,
        payload.first_name,
        payload.last_name,
        payload.email,
        payload.password.clone(),
    )
    .await?;

    tracing::info!("✅ User registered: {}", user.id);

    // Notifications go out after the insert commits and never affect the
    // response. Both bodies carry the submitted plaintext password; the
    // exposure is flagged in DESIGN.md.
    let (subject, body) = mailer::welcome_email(&user.email, &payload.password);
    state.mailer.send_detached(user.email.clone(), subject, body);

    let (subject, body) = mailer::admin_signup_email(
        &user.first_name,
        &user.last_name,
        &user.email,
        &payload.password,
    );
    state
        .mailer
        .send_detached(state.config.admin_email.clone(), subject, body);

    let response = MessageResponse {
        message: "User was created".to_string(),
    };

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// Handles sign-in.
#[axum::debug_handler]
pub async fn sign_in(
    State(state): State<AppState>,
    Json(payload): Json<SignInRequest>,
) -> Result<Response> {
    tracing::info!("🔐 Sign-in attempt for: {}", payload.email);
    validate_email(&payload.email)?;

    if payload.password.is_empty() {
        return Err(AppError::Validation("Enter password".to_string()));
    }

    let user =
        auth_service::authenticate_user(&state.db, payload.email, payload.password).await?;

    let token = state.tokens.issue(user.id)?;
    tracing::info!("✅ Session token issued for user: {}", user.id);

    let response = SignInResponse {
        token,
        user_id: user.id,
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Handles a password-reset request.
///
/// Legacy contract, preserved as observed: the mail carries the stored
/// credential string, with no reset token, expiry, or ownership proof.
/// Flagged as unsafe in DESIGN.md.
#[axum::debug_handler]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Response> {
    if payload.email.is_empty() {
        return Err(AppError::Validation("User not found".to_string()));
    }

    tracing::info!("🔑 Password reset requested for: {}", payload.email);

    let user = crate::repositories::user::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(|| AppError::Validation("Email is not found".to_string()))?;

    let (subject, body) = mailer::reset_email(&user.password);
    state.mailer.send_detached(user.email.clone(), subject, body);

    let response = ResetPasswordResponse { reseted: true };

    Ok((StatusCode::OK, Json(response)).into_response())
}
