use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use quill_core::health::healthz;
use quill_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    auth::{forgot_password, login, register, update_password, verify, verify_forgot_password},
    category::{
        create_category, delete_category, get_category, list_categories, update_category,
    },
    comment::{create_comment, list_comments},
    health::readyz,
    like::{get_like, toggle_like},
    post::{create_post, get_post, list_posts},
    upload::{MAX_UPLOAD_BYTES, upload_file},
    user::{create_user, get_me, get_user, list_users},
};
use crate::state::AppState;
use crate::usecase::upload::MEDIA_URL_PREFIX;

fn api_routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/auth/register", post(register))
        .route("/auth/verify", post(verify))
        .route("/auth/login", post(login))
        .route("/auth/forgot-password", post(forgot_password))
        .route("/auth/verify-forgot-password", post(verify_forgot_password))
        .route("/auth/update-password", post(update_password))
        // Users
        .route("/users", get(list_users).post(create_user))
        .route("/users/me", get(get_me))
        .route("/users/{id}", get(get_user))
        // Categories
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        // Posts
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", get(get_post))
        // Comments
        .route("/comments", get(list_comments).post(create_comment))
        // Likes
        .route("/likes", post(toggle_like))
        .route("/likes/user-post", get(get_like))
        // Uploads
        .route(
            "/file-upload",
            post(upload_file).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
}

pub fn build_router(state: AppState) -> Router {
    let media = ServeDir::new(&state.media_dir);

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest("/v1", api_routes())
        .nest_service(MEDIA_URL_PREFIX, media)
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
