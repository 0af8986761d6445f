//! Login boundary and request identity resolution.
//!
//! Login verifies the stored argon2 hash and issues an opaque token. The
//! token is NOT validated by this crate: per the deployment contract, session
//! enforcement sits in front of the API, and authenticated handlers resolve
//! the caller from the `X-Username` header against the directory.

use std::sync::Arc;

use argon2::{Argon2, PasswordHash, PasswordVerifier as _};
use axum::{
  Json,
  extract::State,
  http::{HeaderMap, StatusCode},
};
use rand_core::{OsRng, RngCore as _};
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

use guild_core::{store::MarketStore, user::User};

use crate::error::ApiError;

// ─── Identity ─────────────────────────────────────────────────────────────────

/// Resolve the calling user from the `X-Username` header (the login email).
pub(crate) async fn current_user<S: MarketStore>(
  store: &S,
  headers: &HeaderMap,
) -> Result<User, ApiError> {
  let email = headers
    .get("x-username")
    .and_then(|v| v.to_str().ok())
    .ok_or_else(|| ApiError::Unauthorized("missing X-Username header".into()))?;

  store
    .user_by_login(email)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::Unauthorized(format!("unknown user: {email}")))
}

// ─── Login ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub email:    String,
  pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
  pub token: String,
  pub user:  LoginUser,
}

#[derive(Debug, Serialize)]
pub struct LoginUser {
  pub user_id: i64,
  pub name:    String,
  pub email:   String,
}

/// `POST /auth/login` — body: `{"email":"...","password":"..."}`
pub async fn login<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<LoginBody>,
) -> Result<Json<LoginResponse>, ApiError>
where
  S: MarketStore,
{
  let user = store
    .user_by_login(&body.email)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::Unauthorized("unknown user or bad password".into()))?;

  let parsed = PasswordHash::new(&user.password_hash)
    .map_err(|e| ApiError::Store(format!("stored hash unreadable: {e}")))?;
  if Argon2::default()
    .verify_password(body.password.as_bytes(), &parsed)
    .is_err()
  {
    return Err(ApiError::Unauthorized("unknown user or bad password".into()));
  }

  Ok(Json(LoginResponse {
    token: issue_token(&user.email),
    user:  LoginUser {
      user_id: user.user_id,
      name:    user.name,
      email:   user.email,
    },
  }))
}

/// `POST /auth/logout` — stateless; always succeeds.
pub async fn logout() -> StatusCode { StatusCode::NO_CONTENT }

/// An opaque session handle: sha256 over the login identifier and fresh
/// random material, hex-encoded.
fn issue_token(email: &str) -> String {
  let mut nonce = [0u8; 16];
  OsRng.fill_bytes(&mut nonce);

  let mut hasher = Sha256::new();
  hasher.update(email.as_bytes());
  hasher.update(nonce);
  hex::encode(hasher.finalize())
}
