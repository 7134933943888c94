use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set, SqlErr,
};
use tracing::debug;
use uuid::Uuid;

use crate::db::entities::tag;
use crate::db::visibility::VisibleTo;

#[derive(Debug, thiserror::Error)]
pub enum TagServiceError {
    #[error("Database error: {0}")]
    Db(#[from] DbErr),
    #[error("Tag not found: {0}")]
    NotFound(Uuid),
    #[error("A tag with id '{0}' already exists.")]
    AlreadyExists(Uuid),
}

/// Retrieves all tags owned by a user, ordered by title.
pub async fn get_tags_for_user(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<tag::Model>, TagServiceError> {
    let tags = tag::Entity::visible_to(user_id)
        .order_by_asc(tag::Column::Title)
        .order_by_asc(tag::Column::Id)
        .all(db)
        .await?;
    Ok(tags)
}

/// Creates a tag under the id chosen by the client. Tag ids are unique across
/// all users, so an id taken by anyone is rejected.
pub async fn create_tag(
    db: &DatabaseConnection,
    user_id: i32,
    tag_id: Uuid,
    title: &str,
    color: &str,
) -> Result<tag::Model, TagServiceError> {
    if tag::Entity::find_by_id(tag_id).one(db).await?.is_some() {
        return Err(TagServiceError::AlreadyExists(tag_id));
    }

    let now = Utc::now();
    let new_tag = tag::ActiveModel {
        id: Set(tag_id),
        owner_id: Set(user_id),
        title: Set(title.to_owned()),
        color: Set(color.to_owned()),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_tag.insert(db).await.map_err(|db_err| match db_err.sql_err() {
        // Lost a race against a concurrent insert of the same id.
        Some(SqlErr::UniqueConstraintViolation(_)) => TagServiceError::AlreadyExists(tag_id),
        _ => TagServiceError::Db(db_err),
    })
}

/// Replaces the title and color of a tag the user owns. The id never changes.
pub async fn update_tag(
    db: &DatabaseConnection,
    user_id: i32,
    tag_id: Uuid,
    title: &str,
    color: &str,
) -> Result<tag::Model, TagServiceError> {
    let existing = tag::Entity::visible_to(user_id)
        .filter(tag::Column::Id.eq(tag_id))
        .one(db)
        .await?
        .ok_or(TagServiceError::NotFound(tag_id))?;

    let mut active_model = existing.into_active_model();
    active_model.title = Set(title.to_owned());
    active_model.color = Set(color.to_owned());
    active_model.updated_at = Set(Utc::now());

    let updated = active_model.update(db).await?;
    debug!(tag_id = %tag_id, user_id, "Tag updated.");
    Ok(updated)
}
