use sea_orm::{ConnectionTrait, DbErr, EntityName, EntityTrait, Schema};
use tracing::debug;

use crate::db::entities::{conversation, message, tag, user};

/// Creates any missing table. Safe to run on every startup.
pub async fn ensure_schema<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    // Parents before children, so foreign keys resolve.
    create_table(db, user::Entity).await?;
    create_table(db, conversation::Entity).await?;
    create_table(db, message::Entity).await?;
    create_table(db, tag::Entity).await?;
    Ok(())
}

async fn create_table<C, E>(db: &C, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let mut statement = Schema::new(backend).create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(backend.build(&statement)).await?;
    debug!(table = entity.table_name(), "Table ensured.");
    Ok(())
}
