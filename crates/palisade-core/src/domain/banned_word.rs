use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Banned word entity - one lowercase term of the filter list.
///
/// Words are normalized to lowercase at write time so the filter cache never
/// re-normalizes per check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannedWord {
    pub id: Uuid,
    pub word: String,
    pub created_at: DateTime<Utc>,
}

impl BannedWord {
    /// Create a banned word from an already-normalized term.
    pub fn new(word: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            word,
            created_at: Utc::now(),
        }
    }
}
