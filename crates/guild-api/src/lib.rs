//! JSON REST API for the Guild marketplace.
//!
//! Exposes an axum [`Router`] backed by any [`guild_core::store::MarketStore`].
//! TLS, CORS, and session enforcement are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", guild_api::api_router(store.clone()))
//! ```

pub mod auth;
pub mod error;
pub mod locations;
pub mod offerings;
pub mod professions;
pub mod reviews;
pub mod search;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use guild_core::store::MarketStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: MarketStore + 'static,
{
  Router::new()
    // Auth boundary
    .route("/auth/login", post(auth::login::<S>))
    .route("/auth/logout", post(auth::logout))
    // Directory
    .route("/users", post(users::register::<S>))
    .route(
      "/users/me",
      get(users::profile::<S>).put(users::update_profile::<S>),
    )
    // Reference data
    .route("/locations/states", get(locations::states::<S>))
    .route("/locations/cities/{uf}", get(locations::cities::<S>))
    // Profession catalog
    .route(
      "/professions",
      get(professions::list::<S>).post(professions::create::<S>),
    )
    .route("/professions/{id}", get(professions::get_one::<S>))
    // Roster
    .route(
      "/users/me/professions",
      get(offerings::list::<S>).post(offerings::create::<S>),
    )
    // Matching
    .route("/search/professionals", get(search::handler::<S>))
    // Reputation ledger
    .route("/reviews", get(reviews::list::<S>).post(reviews::create::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use guild_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    store.add_state("CA".into(), "California".into()).await.unwrap();
    store.add_city(1, "CA".into(), "Springfield".into()).await.unwrap();
    store.add_city(2, "CA".into(), "Shelbyville".into()).await.unwrap();
    api_router(Arc::new(store))
  }

  async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    username: Option<&str>,
    body: Option<Value>,
  ) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(u) = username {
      builder = builder.header("x-username", u);
    }
    let req = match body {
      Some(v) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(v.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    router.clone().oneshot(req).await.unwrap()
  }

  async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  fn register_body(email: &str, city_id: i64) -> Value {
    json!({
      "name": "Alice Liddell",
      "email": email,
      "phone": "555-0100",
      "tax_id": "123.456.789-01",
      "password": "correct-horse",
      "state_uf": "CA",
      "city_id": city_id,
      "district": "Downtown",
    })
  }

  // ── Professions ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn profession_create_list_and_conflict() {
    let app = app().await;

    let resp = send(&app, "POST", "/professions", None, Some(json!({"name": "Plumber"}))).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await;
    assert_eq!(created["name"], "Plumber");

    let resp = send(&app, "POST", "/professions", None, Some(json!({"name": "Plumber"}))).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = send(&app, "GET", "/professions", None, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let listed = body_json(resp).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let id = created["profession_id"].as_i64().unwrap();
    let resp = send(&app, "GET", &format!("/professions/{id}"), None, None).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&app, "GET", "/professions/99", None, None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn profession_name_is_required() {
    let app = app().await;
    let resp = send(&app, "POST", "/professions", None, Some(json!({"name": "  "}))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  // ── Registration and login ──────────────────────────────────────────────────

  #[tokio::test]
  async fn register_validates_input() {
    let app = app().await;

    let mut short = register_body("a@example.com", 1);
    short["password"] = json!("short");
    let resp = send(&app, "POST", "/users", None, Some(short)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let mut blank = register_body("a@example.com", 1);
    blank["name"] = json!("");
    let resp = send(&app, "POST", "/users", None, Some(blank)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send(&app, "POST", "/users", None, Some(register_body("a@example.com", 404))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&app, "POST", "/users", None, Some(register_body("a@example.com", 1))).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let profile = body_json(resp).await;
    // Punctuation is stripped from the taxpayer id on the way in.
    assert_eq!(profile["tax_id"], "12345678901");

    let resp = send(&app, "POST", "/users", None, Some(register_body("a@example.com", 1))).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
  }

  #[tokio::test]
  async fn login_verifies_the_stored_hash() {
    let app = app().await;
    send(&app, "POST", "/users", None, Some(register_body("a@example.com", 1))).await;

    let resp = send(
      &app,
      "POST",
      "/auth/login",
      None,
      Some(json!({"email": "a@example.com", "password": "correct-horse"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let login = body_json(resp).await;
    assert!(!login["token"].as_str().unwrap().is_empty());
    assert_eq!(login["user"]["email"], "a@example.com");

    let resp = send(
      &app,
      "POST",
      "/auth/login",
      None,
      Some(json!({"email": "a@example.com", "password": "wrong"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = send(
      &app,
      "POST",
      "/auth/login",
      None,
      Some(json!({"email": "ghost@example.com", "password": "whatever"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  // ── Profile ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn profile_requires_identity_and_reflects_updates() {
    let app = app().await;
    send(&app, "POST", "/users", None, Some(register_body("a@example.com", 1))).await;

    let resp = send(&app, "GET", "/users/me", None, None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = send(&app, "GET", "/users/me", Some("ghost@example.com"), None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = send(&app, "GET", "/users/me", Some("a@example.com"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["city_id"], 1);

    let resp = send(
      &app,
      "PUT",
      "/users/me",
      Some("a@example.com"),
      Some(json!({
        "name": "Alice L.",
        "phone": "555-0199",
        "state_uf": "CA",
        "city_id": 2,
        "district": "Harbor",
      })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&app, "GET", "/users/me", Some("a@example.com"), None).await;
    let profile = body_json(resp).await;
    assert_eq!(profile["name"], "Alice L.");
    assert_eq!(profile["city_id"], 2);
  }

  // ── Offerings ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn offering_flow_with_enriched_listing() {
    let app = app().await;
    send(&app, "POST", "/users", None, Some(register_body("a@example.com", 1))).await;
    let resp = send(&app, "POST", "/professions", None, Some(json!({"name": "Plumber"}))).await;
    let id = body_json(resp).await["profession_id"].as_i64().unwrap();

    let resp = send(
      &app,
      "POST",
      "/users/me/professions",
      Some("a@example.com"),
      Some(json!({"profession_id": id})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = send(
      &app,
      "POST",
      "/users/me/professions",
      Some("a@example.com"),
      Some(json!({"profession_id": id})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = send(
      &app,
      "POST",
      "/users/me/professions",
      Some("a@example.com"),
      Some(json!({"profession_id": 99})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&app, "GET", "/users/me/professions", Some("a@example.com"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let rows = body_json(resp).await;
    assert_eq!(rows[0]["name"], "Plumber");
    assert_eq!(rows[0]["status"], "active");
    assert_eq!(rows[0]["reputation"], "None");
  }

  // ── Search and reviews ──────────────────────────────────────────────────────

  #[tokio::test]
  async fn search_end_to_end_uses_latest_review() {
    let app = app().await;
    send(&app, "POST", "/users", None, Some(register_body("pro@example.com", 1))).await;
    send(&app, "POST", "/users", None, Some(register_body("client@example.com", 2))).await;

    let resp = send(&app, "POST", "/professions", None, Some(json!({"name": "Plumber"}))).await;
    let id = body_json(resp).await["profession_id"].as_i64().unwrap();
    send(
      &app,
      "POST",
      "/users/me/professions",
      Some("pro@example.com"),
      Some(json!({"profession_id": id})),
    )
    .await;

    let resp = send(&app, "GET", "/users/me", Some("pro@example.com"), None).await;
    let pro_id = body_json(resp).await["user_id"].as_i64().unwrap();

    // Score 4, then score 1 later: the later review wins, no averaging.
    for score in [4, 1] {
      let resp = send(
        &app,
        "POST",
        "/reviews",
        Some("client@example.com"),
        Some(json!({
          "professional_id": pro_id,
          "profession_id": id,
          "score": score,
        })),
      )
      .await;
      assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = send(
      &app,
      "GET",
      &format!("/search/professionals?profession_id={id}&city_id=1"),
      None,
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let results = body_json(resp).await;
    assert_eq!(results.as_array().unwrap().len(), 1);
    assert_eq!(results[0]["user_id"].as_i64().unwrap(), pro_id);
    assert_eq!(results[0]["contact"], "555-0100");
    assert_eq!(results[0]["reputation"], "Terrible");

    // Filtering by the other city excludes the professional.
    let resp = send(
      &app,
      "GET",
      &format!("/search/professionals?profession_id={id}&city_id=2"),
      None,
      None,
    )
    .await;
    assert!(body_json(resp).await.as_array().unwrap().is_empty());

    // Full pair history stays available, oldest first.
    let resp = send(
      &app,
      "GET",
      &format!("/reviews?professional_id={pro_id}&profession_id={id}"),
      None,
      None,
    )
    .await;
    let history = body_json(resp).await;
    assert_eq!(history.as_array().unwrap().len(), 2);
    assert_eq!(history[0]["score"], 4);
    assert_eq!(history[1]["score"], 1);
  }

  #[tokio::test]
  async fn review_score_out_of_range_is_rejected() {
    let app = app().await;
    send(&app, "POST", "/users", None, Some(register_body("client@example.com", 1))).await;

    let resp = send(
      &app,
      "POST",
      "/reviews",
      Some("client@example.com"),
      Some(json!({"professional_id": 10, "profession_id": 7, "score": 6})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn search_without_profession_id_is_empty_success() {
    let app = app().await;
    let resp = send(&app, "GET", "/search/professionals", None, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_json(resp).await.as_array().unwrap().is_empty());
  }

  #[tokio::test]
  async fn locations_round_trip() {
    let app = app().await;

    let resp = send(&app, "GET", "/locations/states", None, None).await;
    let states = body_json(resp).await;
    assert_eq!(states[0]["uf"], "CA");

    let resp = send(&app, "GET", "/locations/cities/CA", None, None).await;
    let cities = body_json(resp).await;
    assert_eq!(cities.as_array().unwrap().len(), 2);

    let resp = send(&app, "GET", "/locations/cities/NY", None, None).await;
    assert!(body_json(resp).await.as_array().unwrap().is_empty());
  }
}
