use foodie_recipe::{Category, IngredientEntry};
use regex::Regex;
use serde::{Serialize, Serializer};
use sqlx::SqlitePool;
use sqlx::prelude::FromRow;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// A stored recipe record as served by the REST API. `category` is the
/// closed enum the store enforces; timestamps are kept as unix seconds
/// and rendered as RFC 3339 on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub thumbnail: String,
    pub category: Category,
    pub area: String,
    pub tags: Vec<String>,
    pub instructions: String,
    pub ingredients: Vec<IngredientEntry>,
    #[serde(rename = "youtubeUrl", skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    #[serde(rename = "source", skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(rename = "createdAt", serialize_with = "serialize_timestamp")]
    pub created_at: i64,
    #[serde(rename = "updatedAt", serialize_with = "serialize_timestamp")]
    pub updated_at: i64,
}

fn serialize_timestamp<S: Serializer>(ts: &i64, serializer: S) -> Result<S::Ok, S::Error> {
    let formatted = OffsetDateTime::from_unix_timestamp(*ts)
        .map_err(serde::ser::Error::custom)?
        .format(&Rfc3339)
        .map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&formatted)
}

pub fn now_timestamp() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

#[derive(FromRow)]
struct RecipeRow {
    id: String,
    name: String,
    thumbnail: String,
    category: sqlx::types::Text<Category>,
    area: String,
    tags: sqlx::types::Json<Vec<String>>,
    instructions: String,
    ingredients: sqlx::types::Json<Vec<IngredientEntry>>,
    youtube_url: Option<String>,
    source_url: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            thumbnail: row.thumbnail,
            category: row.category.0,
            area: row.area,
            tags: row.tags.0,
            instructions: row.instructions,
            ingredients: row.ingredients.0,
            youtube_url: row.youtube_url,
            source_url: row.source_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const COLUMNS: &str = "id, name, thumbnail, category, area, tags, instructions, ingredients, \
                       youtube_url, source_url, created_at, updated_at";

/// Single-collection document store over sqlite. Structured fields live
/// in scalar columns, tags and ingredients in JSON columns; callers never
/// see the engine.
#[derive(Clone)]
pub struct RecipeStore {
    pool: SqlitePool,
}

impl RecipeStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> sqlx::Result<Vec<Recipe>> {
        let rows: Vec<RecipeRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM recipes ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    pub async fn get(&self, id: &str) -> sqlx::Result<Option<Recipe>> {
        let row: Option<RecipeRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM recipes WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Recipe::from))
    }

    pub async fn by_category(&self, category: &str) -> sqlx::Result<Vec<Recipe>> {
        let rows: Vec<RecipeRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM recipes WHERE category = ? ORDER BY created_at, id"
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    pub async fn categories(&self) -> sqlx::Result<Vec<String>> {
        sqlx::query_scalar("SELECT DISTINCT category FROM recipes ORDER BY category")
            .fetch_all(&self.pool)
            .await
    }

    /// Case-insensitive pattern match over name, category and tags,
    /// mirroring the query surface of a document-store regex find.
    pub async fn search(&self, pattern: &Regex) -> sqlx::Result<Vec<Recipe>> {
        let all = self.list().await?;
        Ok(all
            .into_iter()
            .filter(|recipe| {
                pattern.is_match(&recipe.name)
                    || pattern.is_match(recipe.category.as_ref())
                    || recipe.tags.iter().any(|tag| pattern.is_match(tag))
            })
            .collect())
    }

    pub async fn insert(&self, recipe: &Recipe) -> sqlx::Result<()> {
        sqlx::query(&format!(
            "INSERT INTO recipes ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(&recipe.id)
        .bind(&recipe.name)
        .bind(&recipe.thumbnail)
        .bind(recipe.category.as_ref())
        .bind(&recipe.area)
        .bind(sqlx::types::Json(&recipe.tags))
        .bind(&recipe.instructions)
        .bind(sqlx::types::Json(&recipe.ingredients))
        .bind(&recipe.youtube_url)
        .bind(&recipe.source_url)
        .bind(recipe.created_at)
        .bind(recipe.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn update(&self, recipe: &Recipe) -> sqlx::Result<bool> {
        let result = sqlx::query(
            "UPDATE recipes SET name = ?, thumbnail = ?, category = ?, area = ?, tags = ?, \
             instructions = ?, ingredients = ?, youtube_url = ?, source_url = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(&recipe.name)
        .bind(&recipe.thumbnail)
        .bind(recipe.category.as_ref())
        .bind(&recipe.area)
        .bind(sqlx::types::Json(&recipe.tags))
        .bind(&recipe.instructions)
        .bind(sqlx::types::Json(&recipe.ingredients))
        .bind(&recipe.youtube_url)
        .bind(&recipe.source_url)
        .bind(recipe.updated_at)
        .bind(&recipe.id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: &str) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Clears the collection and loads the given records; used by the
    /// seed command.
    pub async fn replace_all(&self, recipes: &[Recipe]) -> sqlx::Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM recipes").execute(&mut *tx).await?;
        for recipe in recipes {
            sqlx::query(&format!(
                "INSERT INTO recipes ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
            ))
            .bind(&recipe.id)
            .bind(&recipe.name)
            .bind(&recipe.thumbnail)
            .bind(recipe.category.as_ref())
            .bind(&recipe.area)
            .bind(sqlx::types::Json(&recipe.tags))
            .bind(&recipe.instructions)
            .bind(sqlx::types::Json(&recipe.ingredients))
            .bind(&recipe.youtube_url)
            .bind(&recipe.source_url)
            .bind(recipe.created_at)
            .bind(recipe.updated_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::RegexBuilder;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_store() -> RecipeStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        RecipeStore::new(pool)
    }

    fn recipe(id: &str, name: &str, category: Category, tags: &[&str]) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: name.to_string(),
            thumbnail: format!("https://example.test/{id}.jpg"),
            category,
            area: "India".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            instructions: "Cook well.".to_string(),
            ingredients: vec![IngredientEntry {
                ingredient: "Rice".to_string(),
                measure: "1 cup".to_string(),
            }],
            youtube_url: None,
            source_url: None,
            created_at: 1_700_000_000,
            updated_at: 1_700_000_000,
        }
    }

    #[tokio::test]
    async fn crud_round_trip() {
        let store = setup_store().await;
        store
            .insert(&recipe("r1", "Masala Dosa", Category::SouthIndian, &[]))
            .await
            .unwrap();

        let fetched = store.get("r1").await.unwrap().unwrap();
        assert_eq!(fetched.name, "Masala Dosa");
        assert_eq!(fetched.category, Category::SouthIndian);

        let mut updated = fetched.clone();
        updated.name = "Rava Dosa".to_string();
        assert!(store.update(&updated).await.unwrap());
        assert_eq!(store.get("r1").await.unwrap().unwrap().name, "Rava Dosa");

        assert!(store.delete("r1").await.unwrap());
        assert!(!store.delete("r1").await.unwrap());
        assert!(store.get("r1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn search_spans_name_category_and_tags() {
        let store = setup_store().await;
        store
            .insert(&recipe(
                "r1",
                "Masala Dosa",
                Category::SouthIndian,
                &["breakfast"],
            ))
            .await
            .unwrap();
        store
            .insert(&recipe(
                "r2",
                "Chole Bhature",
                Category::NorthIndian,
                &["fried"],
            ))
            .await
            .unwrap();

        let pattern = |s: &str| {
            RegexBuilder::new(s)
                .case_insensitive(true)
                .build()
                .unwrap()
        };
        assert_eq!(store.search(&pattern("dosa")).await.unwrap().len(), 1);
        assert_eq!(store.search(&pattern("indian")).await.unwrap().len(), 2);
        assert_eq!(store.search(&pattern("BREAK")).await.unwrap().len(), 1);
        assert!(store.search(&pattern("pasta")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn categories_are_distinct_and_sorted() {
        let store = setup_store().await;
        for (id, category) in [
            ("r1", Category::Punjabi),
            ("r2", Category::SouthIndian),
            ("r3", Category::Punjabi),
        ] {
            store
                .insert(&recipe(id, "Dish", category, &[]))
                .await
                .unwrap();
        }
        assert_eq!(
            store.categories().await.unwrap(),
            ["Punjabi", "South Indian"]
        );
    }

    #[test]
    fn timestamps_render_rfc3339() {
        let recipe = recipe("r1", "Masala Dosa", Category::SouthIndian, &[]);
        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(value["createdAt"], "2023-11-14T22:13:20Z");
        assert!(value.get("youtubeUrl").is_none());
    }
}
