//! Domain DTOs for the movie API.
//!
//! # Design
//! One record type serves every direction: create payloads leave `movie_id`
//! empty, partial updates carry only the fields to change, and inbound records
//! are whatever the server sent. Absent fields are omitted from outbound JSON.
//! The server owns validation, so nothing here is checked client-side.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A movie as exchanged with the movie service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cast: Option<String>,
    /// Serialized as an ISO `YYYY-MM-DD` string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl MovieRecord {
    /// A complete record ready to be created; the server assigns the id.
    pub fn new(name: &str, cast: &str, release_date: NaiveDate, year: i32) -> Self {
        Self {
            movie_id: None,
            name: Some(name.to_string()),
            cast: Some(cast.to_string()),
            release_date: Some(release_date),
            year: Some(year),
        }
    }
}
