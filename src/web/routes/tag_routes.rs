use axum::{
    Json, Router,
    extract::{Extension, Path, State},
    http::StatusCode,
    routing::{get, put},
};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::db::{entities::tag, services};
use crate::web::models::AuthenticatedUser;
use crate::web::models::tag_models::{NewTagSchema, TagSchema, UpdateTagSchema};
use crate::web::{AppError, AppState};

fn to_schema(model: tag::Model) -> Result<TagSchema, AppError> {
    let tag_id = model.id;
    TagSchema::try_from(model).map_err(|e| {
        error!(tag_id = %tag_id, error = %e, "Stored tag has an unreadable color.");
        AppError::InternalServerError(e.to_string())
    })
}

async fn get_user_tags_handler(
    Extension(authenticated_user): Extension<AuthenticatedUser>,
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<TagSchema>>, AppError> {
    let tags = services::get_tags_for_user(&app_state.db_pool, authenticated_user.id).await?;
    let tags = tags
        .into_iter()
        .map(to_schema)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(tags))
}

async fn create_tag_handler(
    Extension(authenticated_user): Extension<AuthenticatedUser>,
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<NewTagSchema>,
) -> Result<(StatusCode, Json<TagSchema>), AppError> {
    let user_id = authenticated_user.id;
    let tag_model = services::create_tag(
        &app_state.db_pool,
        user_id,
        payload.id,
        &payload.title,
        &payload.color.to_string(),
    )
    .await?;

    info!(tag_id = %tag_model.id, user_id, "Tag created.");
    Ok((StatusCode::CREATED, Json(to_schema(tag_model)?)))
}

async fn update_tag_handler(
    Extension(authenticated_user): Extension<AuthenticatedUser>,
    State(app_state): State<Arc<AppState>>,
    Path(tag_id): Path<Uuid>,
    Json(payload): Json<UpdateTagSchema>,
) -> Result<Json<TagSchema>, AppError> {
    let updated_tag_model = services::update_tag(
        &app_state.db_pool,
        authenticated_user.id,
        tag_id,
        &payload.title,
        &payload.color.to_string(),
    )
    .await?;

    Ok(Json(to_schema(updated_tag_model)?))
}

// --- Router ---

pub fn create_tags_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_user_tags_handler).post(create_tag_handler))
        .route("/{tag_id}", put(update_tag_handler))
}
