//! Handlers for registration and profile endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/users` | Body: [`RegisterBody`]; returns 201 + profile |
//! | `GET`  | `/users/me` | Identity from `X-Username` |
//! | `PUT`  | `/users/me` | Body: [`UpdateBody`] |

use std::sync::Arc;

use argon2::{
  Argon2, PasswordHasher as _,
  password_hash::SaltString,
};
use axum::{
  Json,
  extract::State,
  http::{HeaderMap, StatusCode},
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};

use guild_core::{
  store::MarketStore,
  user::{NewUser, ProfileUpdate, User},
};

use crate::{auth::current_user, error::ApiError};

/// The profile view of an account. The password hash never appears here.
#[derive(Debug, Serialize)]
pub struct ProfileBody {
  pub user_id:    i64,
  pub name:       String,
  pub email:      String,
  pub phone:      String,
  pub tax_id:     String,
  pub state_uf:   String,
  pub city_id:    i64,
  pub district:   String,
  pub created_at: DateTime<Utc>,
}

impl From<User> for ProfileBody {
  fn from(u: User) -> Self {
    Self {
      user_id:    u.user_id,
      name:       u.name,
      email:      u.email,
      phone:      u.phone,
      tax_id:     u.tax_id,
      state_uf:   u.state_uf,
      city_id:    u.city_id,
      district:   u.district,
      created_at: u.created_at,
    }
  }
}

// ─── Register ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
  pub name:     String,
  pub email:    String,
  pub phone:    String,
  pub tax_id:   String,
  pub password: String,
  pub state_uf: String,
  pub city_id:  i64,
  pub district: String,
}

/// `POST /users` — create an account.
pub async fn register<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: MarketStore,
{
  let required = [
    ("name", &body.name),
    ("email", &body.email),
    ("phone", &body.phone),
    ("tax_id", &body.tax_id),
    ("state_uf", &body.state_uf),
    ("district", &body.district),
  ];
  for (field, value) in required {
    if value.trim().is_empty() {
      return Err(ApiError::BadRequest(format!("missing required field: {field}")));
    }
  }
  if body.password.len() < 8 {
    return Err(ApiError::BadRequest(
      "password must be at least 8 characters".into(),
    ));
  }

  let salt = SaltString::generate(&mut OsRng);
  let password_hash = Argon2::default()
    .hash_password(body.password.as_bytes(), &salt)
    .map_err(|e| ApiError::Store(format!("password hashing failed: {e}")))?
    .to_string();

  let user = store
    .register_user(NewUser {
      name: body.name,
      email: body.email,
      phone: body.phone,
      tax_id: sanitize_tax_id(&body.tax_id),
      password_hash,
      state_uf: body.state_uf,
      city_id: body.city_id,
      district: body.district,
    })
    .await
    .map_err(ApiError::from_store)?;

  Ok((StatusCode::CREATED, Json(ProfileBody::from(user))))
}

/// Keep only the digits of a taxpayer id; the form arrives punctuated.
fn sanitize_tax_id(raw: &str) -> String {
  raw.chars().filter(char::is_ascii_digit).collect()
}

// ─── Profile ──────────────────────────────────────────────────────────────────

/// `GET /users/me`
pub async fn profile<S>(
  State(store): State<Arc<S>>,
  headers: HeaderMap,
) -> Result<Json<ProfileBody>, ApiError>
where
  S: MarketStore,
{
  let user = current_user(store.as_ref(), &headers).await?;
  Ok(Json(ProfileBody::from(user)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateBody {
  pub name:     String,
  pub phone:    String,
  pub state_uf: String,
  pub city_id:  i64,
  pub district: String,
}

/// `PUT /users/me` — overwrite the editable profile fields.
pub async fn update_profile<S>(
  State(store): State<Arc<S>>,
  headers: HeaderMap,
  Json(body): Json<UpdateBody>,
) -> Result<Json<ProfileBody>, ApiError>
where
  S: MarketStore,
{
  let user = current_user(store.as_ref(), &headers).await?;

  for (field, value) in [
    ("name", &body.name),
    ("phone", &body.phone),
    ("state_uf", &body.state_uf),
    ("district", &body.district),
  ] {
    if value.trim().is_empty() {
      return Err(ApiError::BadRequest(format!("missing required field: {field}")));
    }
  }

  let updated = store
    .update_profile(user.user_id, ProfileUpdate {
      name:     body.name,
      phone:    body.phone,
      state_uf: body.state_uf,
      city_id:  body.city_id,
      district: body.district,
    })
    .await
    .map_err(ApiError::from_store)?;

  Ok(Json(ProfileBody::from(updated)))
}
