mod handlers;

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::Database;

pub fn create_router(db: Database) -> Router {
    let api = Router::new()
        .route(
            "/features",
            get(handlers::list_features).post(handlers::create_feature),
        )
        .route(
            "/features/{id}",
            put(handlers::update_feature).delete(handlers::delete_feature),
        )
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(db)
}
