//! The record every benchmark read targets.

use serde::{Deserialize, Serialize};

/// Id of the single well-known record all benchmark reads go to.
pub const FIXTURE_ID: i64 = 1;

// == Record ==
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl Record {
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }

    /// The fixture created lazily before the first benchmark run.
    pub fn fixture() -> Self {
        Self::new(FIXTURE_ID, "Customer-1", "customer1@example.com")
    }
}
