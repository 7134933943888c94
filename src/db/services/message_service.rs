use sea_orm::{DatabaseConnection, DbErr, QueryOrder};

use crate::db::entities::message;
use crate::db::visibility::VisibleTo;

/// Retrieves every message in the conversations owned by the given user.
pub async fn get_messages_for_user(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<message::Model>, DbErr> {
    message::Entity::visible_to(user_id)
        .order_by_asc(message::Column::CreatedAt)
        .order_by_asc(message::Column::Id)
        .all(db)
        .await
}
