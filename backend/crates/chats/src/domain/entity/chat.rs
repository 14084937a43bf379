//! Chat Entity

use chrono::{DateTime, Utc};
use kernel::id::{ChatId, UserId};

use crate::domain::value_object::chat_title::ChatTitle;

/// Chat entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chat {
    pub chat_id: ChatId,
    /// Owning user; must exist in the credential store
    pub owner_id: UserId,
    pub title: ChatTitle,
    pub description: Option<String>,
    /// Immutable; newest first in listings
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field changes for an update. `description: Some(None)` clears it.
#[derive(Debug, Default)]
pub struct ChatChanges {
    pub title: Option<ChatTitle>,
    pub description: Option<Option<String>>,
}

impl ChatChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

impl Chat {
    pub fn new(owner_id: UserId, title: ChatTitle, description: Option<String>) -> Self {
        let now = Utc::now();

        Self {
            chat_id: ChatId::new(),
            owner_id,
            title,
            description,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    pub fn apply(&mut self, changes: ChatChanges) {
        if changes.is_empty() {
            return;
        }

        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }

        self.updated_at = Utc::now();
    }
}
