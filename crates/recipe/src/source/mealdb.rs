use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::SourceResult;
use crate::types::{CategoryTile, IngredientEntry, RecipeDetail, RecipeSummary};

use super::RecipeSource;

pub const MEALDB_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Highest `strIngredientN` slot the upstream payload carries.
const INGREDIENT_SLOTS: usize = 20;

/// Client for the public third-party recipe API. The upstream flattens
/// ingredient pairs into numbered `strIngredientN`/`strMeasureN` fields
/// and signals "no results" with a null `meals` array; both quirks are
/// normalized here.
pub struct MealDbSource {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct MealsEnvelope<T> {
    meals: Option<Vec<T>>,
}

#[derive(Deserialize)]
struct MealSummaryRaw {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal")]
    name: String,
    #[serde(rename = "strMealThumb", default)]
    thumbnail: Option<String>,
}

#[derive(Deserialize)]
struct MealDetailRaw {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal")]
    name: String,
    #[serde(rename = "strMealThumb", default)]
    thumbnail: Option<String>,
    #[serde(rename = "strCategory", default)]
    category: Option<String>,
    #[serde(rename = "strArea", default)]
    area: Option<String>,
    #[serde(rename = "strTags", default)]
    tags: Option<String>,
    #[serde(rename = "strInstructions", default)]
    instructions: Option<String>,
    #[serde(rename = "strYoutube", default)]
    youtube: Option<String>,
    #[serde(rename = "strSource", default)]
    source: Option<String>,
    #[serde(flatten)]
    rest: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct CategoriesEnvelope {
    categories: Vec<CategoryRaw>,
}

#[derive(Deserialize)]
struct CategoryRaw {
    #[serde(rename = "strCategory")]
    name: String,
    #[serde(rename = "strCategoryThumb", default)]
    thumbnail: Option<String>,
    #[serde(rename = "strCategoryDescription", default)]
    description: Option<String>,
}

fn split_tags(tags: Option<String>) -> Vec<String> {
    tags.map(|t| {
        t.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

impl MealDetailRaw {
    /// Collects the numbered ingredient/measure slots into ordered pairs,
    /// skipping blank slots the way the upstream leaves them.
    fn ingredients(&self) -> Vec<IngredientEntry> {
        let text = |key: String| -> Option<String> {
            self.rest
                .get(&key)
                .and_then(|value| value.as_str())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        (1..=INGREDIENT_SLOTS)
            .filter_map(|slot| {
                let ingredient = text(format!("strIngredient{slot}"))?;
                let measure = text(format!("strMeasure{slot}")).unwrap_or_default();
                Some(IngredientEntry {
                    ingredient,
                    measure,
                })
            })
            .collect()
    }

    fn into_detail(self) -> RecipeDetail {
        let ingredients = self.ingredients();
        RecipeDetail {
            id: self.id,
            name: self.name,
            thumbnail: self.thumbnail.unwrap_or_default(),
            category: self.category,
            area: self.area,
            tags: split_tags(self.tags),
            instructions: self.instructions.unwrap_or_default(),
            ingredients,
            youtube_url: self.youtube.filter(|s| !s.is_empty()),
            source_url: self.source.filter(|s| !s.is_empty()),
        }
    }

    fn into_summary(self) -> RecipeSummary {
        RecipeSummary {
            id: self.id,
            name: self.name,
            thumbnail: self.thumbnail.unwrap_or_default(),
            category: self.category,
            area: self.area,
            tags: split_tags(self.tags),
        }
    }
}

impl MealDbSource {
    pub fn new() -> SourceResult<Self> {
        Self::with_base_url(MEALDB_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn meals<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> SourceResult<Vec<T>> {
        let url = format!("{}{path}", self.base_url);
        let envelope: MealsEnvelope<T> = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(envelope.meals.unwrap_or_default())
    }
}

#[async_trait]
impl RecipeSource for MealDbSource {
    async fn list(&self) -> SourceResult<Vec<RecipeSummary>> {
        // an empty search term lists the upstream's default set
        self.search("").await
    }

    async fn search(&self, term: &str) -> SourceResult<Vec<RecipeSummary>> {
        let raw: Vec<MealDetailRaw> = self.meals("/search.php", &[("s", term)]).await?;
        Ok(raw.into_iter().map(MealDetailRaw::into_summary).collect())
    }

    async fn by_category(&self, category: &str) -> SourceResult<Vec<RecipeSummary>> {
        let raw: Vec<MealSummaryRaw> = self.meals("/filter.php", &[("c", category)]).await?;
        Ok(raw
            .into_iter()
            .map(|meal| RecipeSummary {
                id: meal.id,
                name: meal.name,
                thumbnail: meal.thumbnail.unwrap_or_default(),
                category: Some(category.to_string()),
                area: None,
                tags: Vec::new(),
            })
            .collect())
    }

    async fn by_id(&self, id: &str) -> SourceResult<Option<RecipeDetail>> {
        let raw: Vec<MealDetailRaw> = self.meals("/lookup.php", &[("i", id)]).await?;
        Ok(raw.into_iter().next().map(MealDetailRaw::into_detail))
    }

    async fn categories(&self) -> SourceResult<Vec<CategoryTile>> {
        let url = format!("{}/categories.php", self.base_url);
        let envelope: CategoriesEnvelope = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(envelope
            .categories
            .into_iter()
            .map(|raw| CategoryTile {
                name: raw.name,
                thumbnail: raw.thumbnail,
                description: raw.description,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingredient_slots_collapse_into_ordered_pairs() {
        let raw: MealDetailRaw = serde_json::from_value(serde_json::json!({
            "idMeal": "52772",
            "strMeal": "Teriyaki Chicken Casserole",
            "strMealThumb": "https://example.test/52772.jpg",
            "strCategory": "Chicken",
            "strArea": "Japanese",
            "strTags": "Meat,Casserole",
            "strInstructions": "Preheat oven.",
            "strIngredient1": "soy sauce",
            "strMeasure1": "3/4 cup",
            "strIngredient2": "water",
            "strMeasure2": "1/2 cup",
            "strIngredient3": "",
            "strMeasure3": null,
            "strIngredient4": null,
            "strMeasure4": null,
        }))
        .unwrap();

        let detail = raw.into_detail();
        assert_eq!(detail.tags, ["Meat", "Casserole"]);
        assert_eq!(detail.ingredients.len(), 2);
        assert_eq!(detail.ingredients[0].ingredient, "soy sauce");
        assert_eq!(detail.ingredients[0].measure, "3/4 cup");
    }

    #[test]
    fn null_meals_decode_as_empty() {
        let envelope: MealsEnvelope<MealSummaryRaw> =
            serde_json::from_str(r#"{"meals":null}"#).unwrap();
        assert!(envelope.meals.unwrap_or_default().is_empty());
    }
}
