pub mod config;
pub mod error;
pub mod observability;
pub mod routes;
pub mod store;

pub use routes::AppState;
pub use store::{Recipe, RecipeStore};

use axum::{
    Router,
    routing::get,
};
use sqlx::SqlitePool;

/// Create app router for testing and serving
///
/// Builds the Axum router with all routes configured, useful for
/// integration testing without starting the full server.
pub fn create_app(db_pool: SqlitePool) -> Router {
    use routes::{
        AppState, create_recipe, delete_recipe, get_categories, get_recipe, health, list_recipes,
        not_found, ready, recipes_by_category, search_recipes, service_index, update_recipe,
    };

    let state = AppState {
        store: RecipeStore::new(db_pool.clone()),
    };

    Router::new()
        // Health check endpoints backed by the bare pool
        .route("/health", get(health))
        .route("/ready", get(ready))
        .with_state(db_pool)
        .merge(
            Router::new()
                .route("/", get(service_index))
                .route("/api/recipes", get(list_recipes).post(create_recipe))
                .route("/api/recipes/search", get(search_recipes))
                .route("/api/recipes/categories", get(get_categories))
                .route(
                    "/api/recipes/category/{category}",
                    get(recipes_by_category),
                )
                .route(
                    "/api/recipes/{id}",
                    get(get_recipe).put(update_recipe).delete(delete_recipe),
                )
                .with_state(state),
        )
        .fallback(not_found)
}
