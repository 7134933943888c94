pub mod entities;
pub mod schema;
pub mod services;
pub mod settings;
pub mod test_database;
pub mod visibility;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::info;

/// Opens a connection pool for `database_url`.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url.to_owned());
    opt.max_connections(10).sqlx_logging(false);
    if database_url.contains(":memory:") {
        // Every SQLite connection to :memory: opens a separate database.
        opt.max_connections(1).min_connections(1);
    }

    let db = Database::connect(opt).await?;
    info!(backend = ?db.get_database_backend(), "Database connection established.");
    Ok(db)
}
