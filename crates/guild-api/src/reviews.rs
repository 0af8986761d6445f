//! Handlers for the reputation ledger.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/reviews` | Reviewer taken from `X-Username`; 400 on bad score |
//! | `GET`  | `/reviews` | `?professional_id&profession_id` pair history |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
  http::{HeaderMap, StatusCode},
  response::IntoResponse,
};
use serde::Deserialize;

use guild_core::{
  review::{NewReview, Review},
  store::MarketStore,
};

use crate::{auth::current_user, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub professional_id: i64,
  pub profession_id:   i64,
  pub score:           u8,
  pub comment:         Option<String>,
}

/// `POST /reviews` — append one review to the ledger.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  headers: HeaderMap,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: MarketStore,
{
  let reviewer = current_user(store.as_ref(), &headers).await?;

  let review = store
    .record_review(NewReview {
      reviewer_id:     reviewer.user_id,
      professional_id: body.professional_id,
      profession_id:   body.profession_id,
      score:           body.score,
      comment:         body.comment,
    })
    .await
    .map_err(ApiError::from_store)?;

  Ok((StatusCode::CREATED, Json(review)))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub professional_id: i64,
  pub profession_id:   i64,
}

/// `GET /reviews?professional_id=<id>&profession_id=<id>` — full history for
/// a pair, oldest first.
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Review>>, ApiError>
where
  S: MarketStore,
{
  let history = store
    .reviews_for_pair(params.professional_id, params.profession_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(history))
}
