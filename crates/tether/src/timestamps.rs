use serde::{Deserialize, Serialize};

/// Names of the columns stamped on insert and update.
///
/// `None` disables stamping of that column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timestamps {
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Timestamps {
    pub fn new(created_at: impl Into<String>, updated_at: impl Into<String>) -> Timestamps {
        Timestamps {
            created_at: Some(created_at.into()),
            updated_at: Some(updated_at.into()),
        }
    }

    pub fn disabled() -> Timestamps {
        Timestamps {
            created_at: None,
            updated_at: None,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.created_at.is_none() && self.updated_at.is_none()
    }
}

impl Default for Timestamps {
    fn default() -> Self {
        Timestamps::new("createdAt", "updatedAt")
    }
}
