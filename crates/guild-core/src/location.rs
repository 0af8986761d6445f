//! Reference geography: states and cities.
//!
//! Read-mostly data, imported once and then only queried. Users reference a
//! city by id; the matching engine filters on that id.

use serde::{Deserialize, Serialize};

/// A federative state, keyed by its two-letter code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
  pub uf:   String,
  pub name: String,
}

/// A city within a state. Ids come from the imported dataset and are stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
  pub city_id: i64,
  pub uf:      String,
  pub name:    String,
}
