//! Handlers for the profession catalog.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/professions` | Full catalog, insertion order |
//! | `POST` | `/professions` | Body: `{"name":"Plumber"}`; 409 on duplicate |
//! | `GET`  | `/professions/{id}` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;

use guild_core::{profession::Profession, store::MarketStore};

use crate::error::ApiError;

/// `GET /professions`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Profession>>, ApiError>
where
  S: MarketStore,
{
  let professions = store
    .list_professions()
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(professions))
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub name: String,
}

/// `POST /professions` — register a new profession.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: MarketStore,
{
  let name = body.name.trim().to_owned();
  if name.is_empty() {
    return Err(ApiError::BadRequest("profession name is required".into()));
  }

  let profession = store
    .register_profession(name)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(profession)))
}

/// `GET /professions/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Profession>, ApiError>
where
  S: MarketStore,
{
  let profession = store
    .profession(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("profession {id} not found")))?;
  Ok(Json(profession))
}
