//! Handlers for the caller's own profession list (the roster).
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/users/me/professions` | Enriched with names and reputation |
//! | `POST` | `/users/me/professions` | Body: `{"profession_id":7}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::{HeaderMap, StatusCode},
  response::IntoResponse,
};
use serde::Deserialize;

use guild_core::{
  matching::{self, ProfessionSummary},
  store::MarketStore,
};

use crate::{auth::current_user, error::ApiError};

/// `GET /users/me/professions`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  headers: HeaderMap,
) -> Result<Json<Vec<ProfessionSummary>>, ApiError>
where
  S: MarketStore,
{
  let user = current_user(store.as_ref(), &headers).await?;
  let rows = matching::profession_summary(store.as_ref(), user.user_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
pub struct AddBody {
  pub profession_id: i64,
}

/// `POST /users/me/professions` — declare an offering.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  headers: HeaderMap,
  Json(body): Json<AddBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: MarketStore,
{
  let user = current_user(store.as_ref(), &headers).await?;
  let offering = store
    .add_offering(user.user_id, body.profession_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(offering)))
}
