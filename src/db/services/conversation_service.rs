use sea_orm::{DatabaseConnection, DbErr, QueryOrder};

use crate::db::entities::conversation;
use crate::db::visibility::VisibleTo;

/// Retrieves every conversation owned by the given user.
pub async fn get_conversations_for_user(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<conversation::Model>, DbErr> {
    conversation::Entity::visible_to(user_id)
        .order_by_asc(conversation::Column::CreatedAt)
        .order_by_asc(conversation::Column::Id)
        .all(db)
        .await
}
