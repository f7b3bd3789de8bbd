use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Closed category set enforced by the backend collaborator. Upstream
/// third-party data carries free-form category strings instead, so list
/// items keep `Option<String>` and only stored records use this enum.
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Default,
    Clone,
    Debug,
    PartialEq,
    Serialize,
    Deserialize,
)]
pub enum Category {
    #[strum(serialize = "North Karnataka")]
    #[serde(rename = "North Karnataka")]
    NorthKarnataka,
    #[strum(serialize = "South Indian")]
    #[serde(rename = "South Indian")]
    SouthIndian,
    #[strum(serialize = "North Indian")]
    #[serde(rename = "North Indian")]
    NorthIndian,
    Punjabi,
    #[default]
    Other,
}

/// List-view projection of a recipe as served by every data source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: String,
    pub name: String,
    pub thumbnail: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IngredientEntry {
    pub ingredient: String,
    pub measure: String,
}

/// Full recipe as served by the detail endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetail {
    pub id: String,
    pub name: String,
    pub thumbnail: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub instructions: String,
    #[serde(default)]
    pub ingredients: Vec<IngredientEntry>,
    #[serde(rename = "youtubeUrl", default)]
    pub youtube_url: Option<String>,
    #[serde(rename = "source", default)]
    pub source_url: Option<String>,
}

impl RecipeDetail {
    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            thumbnail: self.thumbnail.clone(),
            category: self.category.clone(),
            area: self.area.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// Category tile for the home grid. Backends that only expose category
/// names leave thumbnail and description empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryTile {
    pub name: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CategoryTile {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            thumbnail: None,
            description: None,
        }
    }
}

/// Categories hidden from the curated home grid.
const HIDDEN_CATEGORIES: [&str; 4] = ["Beef", "Lamb", "Pork", "Goat"];

/// Builds the home grid from an upstream category listing: red-meat
/// categories are dropped and the two custom tiles are pinned first.
pub fn curated_home_tiles(upstream: Vec<CategoryTile>) -> Vec<CategoryTile> {
    let mut tiles = vec![
        CategoryTile {
            name: "Pizza".to_string(),
            thumbnail: Some(
                "https://www.themealdb.com/images/media/meals/x0lk931587671540.jpg".to_string(),
            ),
            description: Some("Delicious pizzas of all kinds.".to_string()),
        },
        CategoryTile {
            name: "Biryani".to_string(),
            thumbnail: Some(
                "https://www.themealdb.com/images/media/meals/xrttsx1487339558.jpg".to_string(),
            ),
            description: Some("Aromatic and flavorful biryani dishes.".to_string()),
        },
    ];
    tiles.extend(
        upstream
            .into_iter()
            .filter(|tile| !HIDDEN_CATEGORIES.contains(&tile.name.as_str())),
    );
    tiles
}
