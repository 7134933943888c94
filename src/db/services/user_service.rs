use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};

use crate::db::entities::user;

/// Creates a new user.
pub async fn create_user(
    db: &DatabaseConnection,
    username: &str,
    password_hash: &str,
) -> Result<user::Model, DbErr> {
    user::ActiveModel {
        username: Set(username.to_owned()),
        password_hash: Set(Some(password_hash.to_owned())),
        created_at: Set(Utc::now()),
        ..Default::default() // id is assigned by the database
    }
    .insert(db)
    .await
}

/// Retrieves a user by their username.
pub async fn get_user_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<user::Model>, DbErr> {
    user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await
}
