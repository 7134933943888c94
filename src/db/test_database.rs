//! Per-test persistence handles.
//!
//! Tests build their own [`TestDatabase`] and hand its connection to the code
//! under test. Nothing here touches process-wide state, so tests running in
//! parallel never see each other's target.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, Set};
use uuid::Uuid;

use crate::db::entities::{conversation, message, user};
use crate::db::schema::ensure_schema;
use crate::db::settings::DatabaseSettings;

pub struct TestDatabase {
    db: DatabaseConnection,
    settings: DatabaseSettings,
}

impl TestDatabase {
    /// Connects to the shared local PostgreSQL test database.
    pub async fn postgres() -> Result<Self, DbErr> {
        Self::connect(DatabaseSettings::test()).await
    }

    /// A fresh, empty SQLite database private to the caller.
    pub async fn in_memory() -> Result<Self, DbErr> {
        Self::connect(DatabaseSettings::sqlite_in_memory()).await
    }

    pub async fn connect(settings: DatabaseSettings) -> Result<Self, DbErr> {
        let db = super::connect(&settings.url()).await?;
        ensure_schema(&db).await?;
        Ok(TestDatabase { db, settings })
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn settings(&self) -> &DatabaseSettings {
        &self.settings
    }

    pub async fn seed_user(&self, username: &str) -> Result<user::Model, DbErr> {
        user::ActiveModel {
            username: Set(username.to_owned()),
            password_hash: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
    }

    pub async fn seed_conversation(
        &self,
        owner_id: i32,
        title: &str,
    ) -> Result<conversation::Model, DbErr> {
        conversation::ActiveModel {
            id: Set(Uuid::new_v4()),
            owner_id: Set(owner_id),
            title: Set(title.to_owned()),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
    }

    pub async fn seed_message(
        &self,
        conversation_id: Uuid,
        content: &str,
    ) -> Result<message::Model, DbErr> {
        message::ActiveModel {
            id: Set(Uuid::new_v4()),
            conversation_id: Set(conversation_id),
            content: Set(content.to_owned()),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
    }
}
