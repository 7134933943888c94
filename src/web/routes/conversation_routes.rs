use axum::{
    Json, Router,
    extract::{Extension, State},
    routing::get,
};
use std::sync::Arc;
use tracing::debug;

use crate::db::services;
use crate::web::models::AuthenticatedUser;
use crate::web::models::conversation_models::ConversationSchema;
use crate::web::{AppError, AppState};

async fn list_my_conversations_handler(
    Extension(authenticated_user): Extension<AuthenticatedUser>,
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<ConversationSchema>>, AppError> {
    let user_id = authenticated_user.id;
    let conversations = services::get_conversations_for_user(&app_state.db_pool, user_id).await?;
    debug!(user_id, count = conversations.len(), "Listed conversations.");

    Ok(Json(conversations.into_iter().map(Into::into).collect()))
}

pub fn create_conversations_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(list_my_conversations_handler))
}
