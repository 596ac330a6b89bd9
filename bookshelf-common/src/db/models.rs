//! Data models shared between the database layer and the web service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reading-status bucket a book is filed under for a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum ReadingStatus {
    /// Currently being read
    #[sqlx(rename = "reading")]
    InProgress,
    /// Finished
    #[sqlx(rename = "completed")]
    Completed,
    /// Saved to read later
    #[sqlx(rename = "future")]
    ReadLater,
}

impl ReadingStatus {
    /// Stored database value
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingStatus::InProgress => "reading",
            ReadingStatus::Completed => "completed",
            ReadingStatus::ReadLater => "future",
        }
    }

    /// Human-readable bucket name
    pub fn label(&self) -> &'static str {
        match self {
            ReadingStatus::InProgress => "In Progress",
            ReadingStatus::Completed => "Completed",
            ReadingStatus::ReadLater => "Read later",
        }
    }

    /// Parse a stored database value
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "reading" => Some(ReadingStatus::InProgress),
            "completed" => Some(ReadingStatus::Completed),
            "future" => Some(ReadingStatus::ReadLater),
            _ => None,
        }
    }
}

/// Registered user account
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// A book filed on a user's shelf
///
/// `external_id` is the identifier assigned by the catalog API and acts as
/// the natural key; one row may exist per (external_id, user_id) pair.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Book {
    pub id: i64,
    pub external_id: String,
    pub title: String,
    pub authors: String,
    pub cover_url: Option<String>,
    pub published_date: Option<String>,
    pub status: ReadingStatus,
    pub user_id: i64,
}

/// Browser login session (backs the session cookie)
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_stored_value() {
        for status in [
            ReadingStatus::InProgress,
            ReadingStatus::Completed,
            ReadingStatus::ReadLater,
        ] {
            assert_eq!(ReadingStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ReadingStatus::parse("bogus"), None);
    }

    #[test]
    fn status_labels() {
        assert_eq!(ReadingStatus::InProgress.label(), "In Progress");
        assert_eq!(ReadingStatus::Completed.label(), "Completed");
        assert_eq!(ReadingStatus::ReadLater.label(), "Read later");
    }
}
