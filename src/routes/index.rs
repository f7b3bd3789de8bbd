use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

/// GET / - Service index listing the API surface
pub async fn service_index() -> impl IntoResponse {
    Json(json!({
        "message": "Foodie Recipe API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "recipes": "/api/recipes",
            "recipeById": "/api/recipes/:id",
            "recipesByCategory": "/api/recipes/category/:category",
            "searchRecipes": "/api/recipes/search?q=query",
            "categories": "/api/recipes/categories",
        }
    }))
}

/// Fallback for unknown routes; keeps the JSON envelope even for 404s.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "message": "Route not found"
        })),
    )
}
