//! [`SqliteStore`] — the SQLite implementation of [`MarketStore`].

use std::{collections::HashMap, path::Path};

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use guild_core::{
  location::{City, State},
  offering::{Offering, OfferingStatus},
  profession::Profession,
  reputation::MAX_SCORE,
  review::{NewReview, Review, ReviewPolicy},
  store::MarketStore,
  user::{AccountStatus, NewUser, ProfileUpdate, User},
};

use crate::{
  encode::{
    encode_account_status, encode_dt, encode_offering_status, encode_uuid,
    RawOffering, RawReview, RawUser,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Guild marketplace store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. One store is
/// constructed at process start and shared by every request handler; per-key
/// uniqueness is backed by the schema's constraints, so concurrent writers
/// cannot slip past the pre-insert checks.
#[derive(Clone)]
pub struct SqliteStore {
  conn:          tokio_rusqlite::Connection,
  review_policy: ReviewPolicy,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn, review_policy: ReviewPolicy::default() };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn, review_policy: ReviewPolicy::default() };
    store.init_schema().await?;
    Ok(store)
  }

  /// Replace the write-time review validation policy.
  pub fn with_review_policy(mut self, policy: ReviewPolicy) -> Self {
    self.review_policy = policy;
    self
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Existence checks ──────────────────────────────────────────────────────

  async fn profession_exists(&self, id: i64) -> Result<bool> {
    let exists = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM professions WHERE profession_id = ?1",
              rusqlite::params![id],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(exists)
  }

  async fn offering_exists(&self, user_id: i64, profession_id: i64) -> Result<bool> {
    let exists = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM offerings WHERE user_id = ?1 AND profession_id = ?2",
              rusqlite::params![user_id, profession_id],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(exists)
  }

  async fn city_exists(&self, id: i64) -> Result<bool> {
    let exists = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM cities WHERE city_id = ?1",
              rusqlite::params![id],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(exists)
  }

  async fn email_taken(&self, email: String) -> Result<bool> {
    let taken = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM users WHERE email = ?1",
              rusqlite::params![email],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(taken)
  }

  // ── Row readers ───────────────────────────────────────────────────────────

  async fn offerings_where(
    &self,
    sql: &'static str,
    key: i64,
  ) -> Result<Vec<Offering>> {
    let raws: Vec<RawOffering> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
          .query_map(rusqlite::params![key], |row| {
            Ok(RawOffering {
              user_id:       row.get(0)?,
              profession_id: row.get(1)?,
              status:        row.get(2)?,
              added_at:      row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawOffering::into_offering).collect()
  }
}

// ─── Row-mapping helpers ─────────────────────────────────────────────────────

fn user_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawUser> {
  Ok(RawUser {
    user_id:       row.get(0)?,
    name:          row.get(1)?,
    email:         row.get(2)?,
    phone:         row.get(3)?,
    tax_id:        row.get(4)?,
    password_hash: row.get(5)?,
    state_uf:      row.get(6)?,
    city_id:       row.get(7)?,
    district:      row.get(8)?,
    status:        row.get(9)?,
    created_at:    row.get(10)?,
  })
}

const USER_COLUMNS: &str = "user_id, name, email, phone, tax_id, \
   password_hash, state_uf, city_id, district, status, created_at";

// ─── MarketStore impl ────────────────────────────────────────────────────────

impl MarketStore for SqliteStore {
  type Error = Error;

  // ── Profession catalog ────────────────────────────────────────────────────

  async fn register_profession(&self, name: String) -> Result<Profession> {
    if self.profession_by_name(&name).await?.is_some() {
      return Err(guild_core::Error::DuplicateProfession(name).into());
    }

    let insert_name = name.clone();
    let profession_id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO professions (name) VALUES (?1)",
          rusqlite::params![insert_name],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Profession { profession_id, name })
  }

  async fn profession(&self, id: i64) -> Result<Option<Profession>> {
    let found = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT profession_id, name FROM professions WHERE profession_id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(Profession { profession_id: row.get(0)?, name: row.get(1)? })
              },
            )
            .optional()?,
        )
      })
      .await?;
    Ok(found)
  }

  async fn profession_by_name(&self, name: &str) -> Result<Option<Profession>> {
    let name = name.to_owned();
    let found = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT profession_id, name FROM professions WHERE name = ?1",
              rusqlite::params![name],
              |row| {
                Ok(Profession { profession_id: row.get(0)?, name: row.get(1)? })
              },
            )
            .optional()?,
        )
      })
      .await?;
    Ok(found)
  }

  async fn list_professions(&self) -> Result<Vec<Profession>> {
    let professions = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT profession_id, name FROM professions ORDER BY profession_id",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(Profession { profession_id: row.get(0)?, name: row.get(1)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(professions)
  }

  // ── Professional roster ───────────────────────────────────────────────────

  async fn add_offering(&self, user_id: i64, profession_id: i64) -> Result<Offering> {
    if !self.profession_exists(profession_id).await? {
      return Err(guild_core::Error::ProfessionNotFound(profession_id).into());
    }
    if self.offering_exists(user_id, profession_id).await? {
      return Err(
        guild_core::Error::AlreadyOffered { user_id, profession_id }.into(),
      );
    }

    let offering = Offering {
      user_id,
      profession_id,
      status: OfferingStatus::Active,
      added_at: Utc::now(),
    };

    let status_str = encode_offering_status(offering.status).to_owned();
    let at_str     = encode_dt(offering.added_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO offerings (user_id, profession_id, status, added_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![user_id, profession_id, status_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(offering)
  }

  async fn offerings_for_user(&self, user_id: i64) -> Result<Vec<Offering>> {
    self
      .offerings_where(
        "SELECT user_id, profession_id, status, added_at
         FROM offerings WHERE user_id = ?1 ORDER BY rowid",
        user_id,
      )
      .await
  }

  async fn professionals_for_profession(
    &self,
    profession_id: i64,
  ) -> Result<Vec<Offering>> {
    self
      .offerings_where(
        "SELECT user_id, profession_id, status, added_at
         FROM offerings WHERE profession_id = ?1 ORDER BY rowid",
        profession_id,
      )
      .await
  }

  async fn set_offering_status(
    &self,
    user_id: i64,
    profession_id: i64,
    status: OfferingStatus,
  ) -> Result<()> {
    let status_str = encode_offering_status(status).to_owned();
    let updated = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE offerings SET status = ?3
           WHERE user_id = ?1 AND profession_id = ?2",
          rusqlite::params![user_id, profession_id, status_str],
        )?)
      })
      .await?;

    if updated == 0 {
      return Err(
        guild_core::Error::OfferingNotFound { user_id, profession_id }.into(),
      );
    }
    Ok(())
  }

  // ── Reputation ledger — append-only writes ────────────────────────────────

  async fn record_review(&self, input: NewReview) -> Result<Review> {
    if input.score > MAX_SCORE {
      return Err(guild_core::Error::InvalidScore(input.score).into());
    }
    if self.review_policy == ReviewPolicy::RequireOffering
      && !self
        .offering_exists(input.professional_id, input.profession_id)
        .await?
    {
      return Err(
        guild_core::Error::OfferingNotFound {
          user_id:       input.professional_id,
          profession_id: input.profession_id,
        }
        .into(),
      );
    }

    let review = Review {
      review_id:       Uuid::new_v4(),
      reviewer_id:     input.reviewer_id,
      professional_id: input.professional_id,
      profession_id:   input.profession_id,
      score:           input.score,
      comment:         input.comment,
      recorded_at:     Utc::now(),
    };

    let id_str  = encode_uuid(review.review_id);
    let at_str  = encode_dt(review.recorded_at);
    let comment = review.comment.clone();
    let (reviewer_id, professional_id, profession_id, score) = (
      review.reviewer_id,
      review.professional_id,
      review.profession_id,
      review.score,
    );

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO reviews (
             review_id, reviewer_id, professional_id, profession_id,
             score, comment, recorded_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            id_str,
            reviewer_id,
            professional_id,
            profession_id,
            score,
            comment,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(review)
  }

  // ── Reputation ledger — reads ─────────────────────────────────────────────

  async fn latest_score(
    &self,
    professional_id: i64,
    profession_id: i64,
  ) -> Result<Option<u8>> {
    // rowid is the submission order; recorded_at alone cannot break ties
    // between reviews written in the same instant.
    let raw: Option<i64> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT score FROM reviews
               WHERE professional_id = ?1 AND profession_id = ?2
               ORDER BY rowid DESC LIMIT 1",
              rusqlite::params![professional_id, profession_id],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(crate::encode::decode_score).transpose()
  }

  async fn latest_scores(
    &self,
    professional_id: i64,
    profession_ids: Vec<i64>,
  ) -> Result<HashMap<i64, u8>> {
    let raws: Vec<(i64, i64)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT r.profession_id, r.score
           FROM reviews r
           JOIN (
             SELECT profession_id, MAX(rowid) AS last_rowid
             FROM reviews
             WHERE professional_id = ?1
             GROUP BY profession_id
           ) latest ON latest.last_rowid = r.rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![professional_id], |row| {
            Ok((row.get(0)?, row.get(1)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let mut scores = HashMap::with_capacity(profession_ids.len());
    for (profession_id, raw) in raws {
      if profession_ids.contains(&profession_id) {
        scores.insert(profession_id, crate::encode::decode_score(raw)?);
      }
    }
    Ok(scores)
  }

  async fn reviews_for_pair(
    &self,
    professional_id: i64,
    profession_id: i64,
  ) -> Result<Vec<Review>> {
    let raws: Vec<RawReview> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT review_id, reviewer_id, professional_id, profession_id,
                  score, comment, recorded_at
           FROM reviews
           WHERE professional_id = ?1 AND profession_id = ?2
           ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![professional_id, profession_id], |row| {
            Ok(RawReview {
              review_id:       row.get(0)?,
              reviewer_id:     row.get(1)?,
              professional_id: row.get(2)?,
              profession_id:   row.get(3)?,
              score:           row.get(4)?,
              comment:         row.get(5)?,
              recorded_at:     row.get(6)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawReview::into_review).collect()
  }

  // ── User directory ────────────────────────────────────────────────────────

  async fn register_user(&self, input: NewUser) -> Result<User> {
    if !self.city_exists(input.city_id).await? {
      return Err(guild_core::Error::CityNotFound(input.city_id).into());
    }
    if self.email_taken(input.email.clone()).await? {
      return Err(guild_core::Error::EmailTaken(input.email).into());
    }

    let status     = AccountStatus::Unverified;
    let created_at = Utc::now();

    let row = (
      input.name.clone(),
      input.email.clone(),
      input.phone.clone(),
      input.tax_id.clone(),
      input.password_hash.clone(),
      input.state_uf.clone(),
      input.city_id,
      input.district.clone(),
      encode_account_status(status).to_owned(),
      encode_dt(created_at),
    );

    let user_id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (
             name, email, phone, tax_id, password_hash,
             state_uf, city_id, district, status, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            row.0, row.1, row.2, row.3, row.4, row.5, row.6, row.7, row.8, row.9,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(User {
      user_id,
      name: input.name,
      email: input.email,
      phone: input.phone,
      tax_id: input.tax_id,
      password_hash: input.password_hash,
      state_uf: input.state_uf,
      city_id: input.city_id,
      district: input.district,
      status,
      created_at,
    })
  }

  async fn user_by_id(&self, id: i64) -> Result<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = ?1");
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id], user_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn user_by_login(&self, email: &str) -> Result<Option<User>> {
    let email = email.to_owned();
    let sql   = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1");
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![email], user_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn update_profile(
    &self,
    user_id: i64,
    changes: ProfileUpdate,
  ) -> Result<User> {
    let Some(user) = self.user_by_id(user_id).await? else {
      return Err(guild_core::Error::UserNotFound(user_id).into());
    };
    if !self.city_exists(changes.city_id).await? {
      return Err(guild_core::Error::CityNotFound(changes.city_id).into());
    }

    let row = (
      changes.name.clone(),
      changes.phone.clone(),
      changes.state_uf.clone(),
      changes.city_id,
      changes.district.clone(),
    );

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE users SET name = ?2, phone = ?3, state_uf = ?4,
             city_id = ?5, district = ?6
           WHERE user_id = ?1",
          rusqlite::params![user_id, row.0, row.1, row.2, row.3, row.4],
        )?;
        Ok(())
      })
      .await?;

    Ok(User {
      name: changes.name,
      phone: changes.phone,
      state_uf: changes.state_uf,
      city_id: changes.city_id,
      district: changes.district,
      ..user
    })
  }

  async fn set_account_status(
    &self,
    user_id: i64,
    status: AccountStatus,
  ) -> Result<()> {
    let status_str = encode_account_status(status).to_owned();
    let updated = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE users SET status = ?2 WHERE user_id = ?1",
          rusqlite::params![user_id, status_str],
        )?)
      })
      .await?;

    if updated == 0 {
      return Err(guild_core::Error::UserNotFound(user_id).into());
    }
    Ok(())
  }

  // ── Reference data ────────────────────────────────────────────────────────

  async fn add_state(&self, uf: String, name: String) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO states (uf, name) VALUES (?1, ?2)",
          rusqlite::params![uf, name],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn add_city(&self, city_id: i64, uf: String, name: String) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO cities (city_id, uf, name) VALUES (?1, ?2, ?3)",
          rusqlite::params![city_id, uf, name],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn list_states(&self) -> Result<Vec<State>> {
    let states = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT uf, name FROM states ORDER BY uf")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(State { uf: row.get(0)?, name: row.get(1)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(states)
  }

  async fn cities_in_state(&self, uf: &str) -> Result<Vec<City>> {
    let uf = uf.to_owned();
    let cities = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT city_id, uf, name FROM cities WHERE uf = ?1 ORDER BY name",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![uf], |row| {
            Ok(City { city_id: row.get(0)?, uf: row.get(1)?, name: row.get(2)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(cities)
  }

  async fn city(&self, id: i64) -> Result<Option<City>> {
    let found = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT city_id, uf, name FROM cities WHERE city_id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(City {
                  city_id: row.get(0)?,
                  uf:      row.get(1)?,
                  name:    row.get(2)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;
    Ok(found)
  }
}
