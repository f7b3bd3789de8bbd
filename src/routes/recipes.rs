use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use foodie_recipe::{Category, IngredientEntry};
use regex::RegexBuilder;
use serde::Deserialize;
use serde_json::json;
use strum::VariantArray;
use validator::Validate;

use crate::error::ApiError;
use crate::routes::AppState;
use crate::store::{Recipe, now_timestamp};

/// Create/update payload. `category` arrives as a plain string so that a
/// value outside the closed set fails with a descriptive message instead
/// of a body-decode rejection.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeInput {
    #[validate(length(min = 1, message = "id is required"))]
    pub id: String,

    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "thumbnail is required"))]
    pub thumbnail: String,

    pub category: String,

    #[serde(default)]
    pub area: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[validate(length(min = 1, message = "instructions are required"))]
    pub instructions: String,

    #[serde(default)]
    pub ingredients: Vec<IngredientEntry>,

    #[serde(rename = "youtubeUrl", default)]
    pub youtube_url: Option<String>,

    #[serde(rename = "source", default)]
    pub source_url: Option<String>,
}

impl RecipeInput {
    fn parse_category(&self) -> Result<Category, ApiError> {
        self.category.parse::<Category>().map_err(|_| {
            let allowed = Category::VARIANTS
                .iter()
                .map(|c| c.as_ref())
                .collect::<Vec<_>>()
                .join(", ");
            ApiError::Validation(format!(
                "category must be one of: {allowed} (got '{}')",
                self.category
            ))
        })
    }

    fn check(&self) -> Result<(), ApiError> {
        self.validate().map_err(|errors| {
            let messages: Vec<String> = errors
                .field_errors()
                .values()
                .filter_map(|field| field.first())
                .filter_map(|error| error.message.as_ref())
                .map(|message| message.to_string())
                .collect();
            ApiError::Validation(messages.join(", "))
        })
    }

    /// Builds the stored record. `id` comes from the route on updates and
    /// from the payload on creates; `created_at` is preserved on updates.
    fn into_record(self, id: String, created_at: i64) -> Result<Recipe, ApiError> {
        self.check()?;
        let category = self.parse_category()?;
        Ok(Recipe {
            id,
            name: self.name.trim().to_string(),
            thumbnail: self.thumbnail,
            category,
            area: self.area.unwrap_or_else(|| "India".to_string()),
            tags: self.tags,
            instructions: self.instructions,
            ingredients: self.ingredients,
            youtube_url: self.youtube_url,
            source_url: self.source_url,
            created_at,
            updated_at: now_timestamp(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// GET /api/recipes - list the whole collection
#[tracing::instrument(skip(state))]
pub async fn list_recipes(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let recipes = state.store.list().await?;
    Ok(Json(json!({
        "success": true,
        "count": recipes.len(),
        "recipes": recipes,
    })))
}

/// GET /api/recipes/search?q= - case-insensitive match on name, category
/// and tags. A missing or blank query is a 400, not an empty result.
#[tracing::instrument(skip(state))]
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = params
        .q
        .filter(|q| !q.is_empty())
        .ok_or(ApiError::MissingQuery)?;

    let pattern = RegexBuilder::new(&query)
        .case_insensitive(true)
        .build()
        .map_err(|err| ApiError::Validation(format!("Invalid search pattern: {err}")))?;

    let recipes = state.store.search(&pattern).await?;
    Ok(Json(json!({
        "success": true,
        "query": query,
        "count": recipes.len(),
        "recipes": recipes,
    })))
}

/// GET /api/recipes/categories - distinct category values
#[tracing::instrument(skip(state))]
pub async fn get_categories(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let categories = state.store.categories().await?;
    Ok(Json(json!({
        "success": true,
        "count": categories.len(),
        "categories": categories,
    })))
}

/// GET /api/recipes/category/{category} - exact category match. An
/// unknown category is an empty listing, not an error.
#[tracing::instrument(skip(state))]
pub async fn recipes_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let recipes = state.store.by_category(&category).await?;
    Ok(Json(json!({
        "success": true,
        "category": category,
        "count": recipes.len(),
        "recipes": recipes,
    })))
}

/// GET /api/recipes/{id} - lookup by the external id field
#[tracing::instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let recipe = state.store.get(&id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(json!({
        "success": true,
        "recipe": recipe,
    })))
}

/// POST /api/recipes - create a recipe
#[tracing::instrument(skip(state, input))]
pub async fn create_recipe(
    State(state): State<AppState>,
    Json(input): Json<RecipeInput>,
) -> Result<impl IntoResponse, ApiError> {
    let id = input.id.clone();
    let record = input.into_record(id.clone(), now_timestamp())?;

    if state.store.get(&id).await?.is_some() {
        return Err(ApiError::Validation(format!(
            "A recipe with id '{id}' already exists"
        )));
    }
    state.store.insert(&record).await?;

    tracing::info!(recipe_id = %id, "Recipe created");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Recipe created successfully",
            "recipe": record,
        })),
    ))
}

/// PUT /api/recipes/{id} - replace a recipe's fields. The id in the path
/// wins; the record keeps its original creation time.
#[tracing::instrument(skip(state, input))]
pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<RecipeInput>,
) -> Result<impl IntoResponse, ApiError> {
    let existing = state.store.get(&id).await?.ok_or(ApiError::NotFound)?;
    let record = input.into_record(id.clone(), existing.created_at)?;
    state.store.update(&record).await?;

    tracing::info!(recipe_id = %id, "Recipe updated");
    Ok(Json(json!({
        "success": true,
        "message": "Recipe updated successfully",
        "recipe": record,
    })))
}

/// DELETE /api/recipes/{id}
#[tracing::instrument(skip(state))]
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.store.delete(&id).await? {
        return Err(ApiError::NotFound);
    }

    tracing::info!(recipe_id = %id, "Recipe deleted");
    Ok(Json(json!({
        "success": true,
        "message": "Recipe deleted successfully",
    })))
}
