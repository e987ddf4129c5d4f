//! Records stored in the `categories` and `questions` tables.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Categories written by `migration::seed_categories` into an empty table.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

/// A question as stored and as sent over the wire: `{id, question, answer, category, difficulty}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

/// A validated question that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

/// Serializes as a JSON object `{"<id>": "<type>", ...}` keeping id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMap(pub Vec<Category>);

impl CategoryMap {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Category>> for CategoryMap {
    fn from(categories: Vec<Category>) -> Self {
        CategoryMap(categories)
    }
}

impl Serialize for CategoryMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for c in &self.0 {
            map.serialize_entry(&c.id, &c.kind)?;
        }
        map.end()
    }
}
