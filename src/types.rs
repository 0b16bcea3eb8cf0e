use serde::{Deserialize, Serialize};

use crate::store::ItemRecord;

/// External representation of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<ItemRecord> for Item {
    fn from(record: ItemRecord) -> Self {
        Self { id: record.id, name: record.name, description: record.description }
    }
}

// Request bodies
#[derive(Debug, Clone, Deserialize)]
pub struct ItemCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Update payload. Every field is written back; absent fields become null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub message: &'static str,
}
