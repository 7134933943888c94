use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::entities::{conversation, message};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSchema {
    pub id: Uuid,
    pub owner_id: i32,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSchema {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<conversation::Model> for ConversationSchema {
    fn from(model: conversation::Model) -> Self {
        ConversationSchema {
            id: model.id,
            owner_id: model.owner_id,
            title: model.title,
            created_at: model.created_at,
        }
    }
}

impl From<message::Model> for MessageSchema {
    fn from(model: message::Model) -> Self {
        MessageSchema {
            id: model.id,
            conversation_id: model.conversation_id,
            content: model.content,
            created_at: model.created_at,
        }
    }
}
