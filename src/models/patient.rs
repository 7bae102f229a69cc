use serde::{Deserialize, Serialize};

use crate::models::Admission;

/// A patient document as stored in the target collection, with one entry
/// in `admissions` per source CSV row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub blood_type: String,
    pub admissions: Vec<Admission>,
}
