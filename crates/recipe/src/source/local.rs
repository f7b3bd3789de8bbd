use async_trait::async_trait;

use crate::error::SourceResult;
use crate::types::{CategoryTile, IngredientEntry, RecipeDetail, RecipeSummary};

use super::RecipeSource;

/// Fixed in-memory dataset. The default contents are the seed recipes
/// the backend ships with, so the app works with no network and no
/// database at all.
pub struct LocalSource {
    dataset: Vec<RecipeDetail>,
}

impl LocalSource {
    pub fn new() -> Self {
        Self {
            dataset: builtin_dataset(),
        }
    }

    pub fn with_dataset(dataset: Vec<RecipeDetail>) -> Self {
        Self { dataset }
    }
}

impl Default for LocalSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecipeSource for LocalSource {
    async fn list(&self) -> SourceResult<Vec<RecipeSummary>> {
        Ok(self.dataset.iter().map(RecipeDetail::summary).collect())
    }

    async fn search(&self, term: &str) -> SourceResult<Vec<RecipeSummary>> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.list().await;
        }
        Ok(self
            .dataset
            .iter()
            .filter(|recipe| {
                recipe.name.to_lowercase().contains(&needle)
                    || recipe
                        .category
                        .as_deref()
                        .is_some_and(|c| c.to_lowercase().contains(&needle))
                    || recipe
                        .tags
                        .iter()
                        .any(|tag| tag.to_lowercase().contains(&needle))
            })
            .map(RecipeDetail::summary)
            .collect())
    }

    async fn by_category(&self, category: &str) -> SourceResult<Vec<RecipeSummary>> {
        Ok(self
            .dataset
            .iter()
            .filter(|recipe| recipe.category.as_deref() == Some(category))
            .map(RecipeDetail::summary)
            .collect())
    }

    async fn by_id(&self, id: &str) -> SourceResult<Option<RecipeDetail>> {
        Ok(self.dataset.iter().find(|recipe| recipe.id == id).cloned())
    }

    async fn categories(&self) -> SourceResult<Vec<CategoryTile>> {
        let mut tiles: Vec<CategoryTile> = Vec::new();
        for recipe in &self.dataset {
            if let Some(category) = &recipe.category {
                if !tiles.iter().any(|tile| &tile.name == category) {
                    tiles.push(CategoryTile::named(category.clone()));
                }
            }
        }
        Ok(tiles)
    }
}

fn entry(ingredient: &str, measure: &str) -> IngredientEntry {
    IngredientEntry {
        ingredient: ingredient.to_string(),
        measure: measure.to_string(),
    }
}

fn recipe(
    id: &str,
    name: &str,
    category: &str,
    tags: &[&str],
    instructions: &str,
    ingredients: Vec<IngredientEntry>,
) -> RecipeDetail {
    RecipeDetail {
        id: id.to_string(),
        name: name.to_string(),
        thumbnail: format!("https://static.foodie.example/thumbs/{id}.jpg"),
        category: Some(category.to_string()),
        area: Some("India".to_string()),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        instructions: instructions.to_string(),
        ingredients,
        youtube_url: None,
        source_url: None,
    }
}

/// The seed dataset shared by the local source and the backend's seed
/// command.
pub fn builtin_dataset() -> Vec<RecipeDetail> {
    vec![
        recipe(
            "ind-001",
            "Jolada Rotti with Ennegai",
            "North Karnataka",
            &["flatbread", "spicy"],
            "Knead sorghum flour with warm water, pat into thin rounds and roast on a hot griddle. Serve with stuffed brinjal curry.",
            vec![
                entry("Sorghum flour", "2 cups"),
                entry("Brinjal", "6 small"),
                entry("Peanut", "1/2 cup"),
            ],
        ),
        recipe(
            "ind-002",
            "Girmit",
            "North Karnataka",
            &["snack", "street food"],
            "Toss puffed rice with onion, tomato, tamarind paste and roasted gram powder. Top with sev and coriander.",
            vec![
                entry("Puffed rice", "4 cups"),
                entry("Onion", "1 large"),
                entry("Tomato", "1"),
            ],
        ),
        recipe(
            "ind-003",
            "Masala Dosa",
            "South Indian",
            &["breakfast", "fermented"],
            "Spread fermented rice and lentil batter on a hot tawa, drizzle ghee, fill with spiced potato palya and fold.",
            vec![
                entry("Dosa batter", "3 cups"),
                entry("Potato", "4"),
                entry("Mustard seeds", "1 tsp"),
            ],
        ),
        recipe(
            "ind-004",
            "Bisi Bele Bath",
            "South Indian",
            &["rice", "one pot"],
            "Pressure cook rice, toor dal and vegetables, then simmer with bisi bele bath powder, tamarind and jaggery.",
            vec![
                entry("Rice", "1 cup"),
                entry("Toor dal", "1/2 cup"),
                entry("Mixed vegetables", "2 cups"),
            ],
        ),
        recipe(
            "ind-005",
            "Chole Bhature",
            "North Indian",
            &["curry", "fried bread"],
            "Simmer soaked chickpeas in an onion-tomato gravy with chole masala. Deep fry leavened dough into puffed bhature.",
            vec![
                entry("Chickpeas", "2 cups"),
                entry("All purpose flour", "2 cups"),
                entry("Yogurt", "1/2 cup"),
            ],
        ),
        recipe(
            "ind-006",
            "Palak Paneer",
            "North Indian",
            &["curry", "vegetarian"],
            "Blanch and puree spinach, simmer with sauteed aromatics and cream, then fold in cubes of paneer.",
            vec![
                entry("Spinach", "500 g"),
                entry("Paneer", "250 g"),
                entry("Cream", "3 tbsp"),
            ],
        ),
        recipe(
            "ind-007",
            "Sarson da Saag",
            "Punjabi",
            &["winter", "greens"],
            "Slow cook mustard greens with spinach and bathua, mash coarsely, finish with a ginger-garlic tadka and white butter.",
            vec![
                entry("Mustard greens", "750 g"),
                entry("Spinach", "250 g"),
                entry("Maize flour", "2 tbsp"),
            ],
        ),
        recipe(
            "ind-008",
            "Amritsari Kulcha",
            "Punjabi",
            &["flatbread", "stuffed"],
            "Stuff leavened dough with spiced potato and onion, crisp in a tandoor and brush generously with butter.",
            vec![
                entry("All purpose flour", "3 cups"),
                entry("Potato", "3"),
                entry("Butter", "4 tbsp"),
            ],
        ),
        recipe(
            "ind-009",
            "Veg Biryani",
            "Other",
            &["rice", "festive"],
            "Layer par-boiled basmati over a spiced vegetable korma, seal and cook on dum until fragrant.",
            vec![
                entry("Basmati rice", "2 cups"),
                entry("Mixed vegetables", "3 cups"),
                entry("Saffron", "1 pinch"),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn list_and_lookup_round_trip() -> anyhow::Result<()> {
        let source = LocalSource::new();
        let all = source.list().await?;
        assert!(!all.is_empty());

        let detail = source.by_id("ind-003").await?.expect("seeded recipe");
        assert_eq!(detail.name, "Masala Dosa");
        assert!(source.by_id("missing").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn search_matches_name_category_and_tags() -> anyhow::Result<()> {
        let source = LocalSource::new();
        assert_eq!(source.search("dosa").await?.len(), 1);
        // category substring
        assert!(!source.search("punjabi").await?.is_empty());
        // tag substring
        assert!(!source.search("street").await?.is_empty());
        // blank query returns everything
        assert_eq!(source.search(" ").await?.len(), source.list().await?.len());
        Ok(())
    }

    #[tokio::test]
    async fn categories_are_distinct_and_ordered() -> anyhow::Result<()> {
        let source = LocalSource::new();
        let names: Vec<_> = source
            .categories()
            .await?
            .into_iter()
            .map(|tile| tile.name)
            .collect();
        assert_eq!(
            names,
            [
                "North Karnataka",
                "South Indian",
                "North Indian",
                "Punjabi",
                "Other"
            ]
        );
        Ok(())
    }
}
