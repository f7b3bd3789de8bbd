//! Data source strategies.
//!
//! The active source is an explicit injected object, selected once from
//! configuration and never mixed per request: a fixed in-memory dataset,
//! the REST collaborator service, or the public third-party recipe API.

mod backend;
mod local;
mod mealdb;

pub use backend::BackendSource;
pub use local::{LocalSource, builtin_dataset};
pub use mealdb::{MEALDB_BASE_URL, MealDbSource};

use async_trait::async_trait;
use serde::Deserialize;
use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::error::SourceResult;
use crate::types::{CategoryTile, RecipeDetail, RecipeSummary};

/// Which upstream the service layer talks to.
#[derive(
    EnumString, Display, VariantArray, AsRefStr, Default, Clone, Copy, Debug, PartialEq, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    #[default]
    Local,
    Backend,
    MealDb,
}

impl SourceKind {
    /// Constructs the selected strategy. `base_url` overrides the
    /// default endpoint of the remote strategies and is ignored by the
    /// local one.
    pub fn build(self, base_url: Option<&str>) -> SourceResult<Box<dyn RecipeSource>> {
        Ok(match self {
            SourceKind::Local => Box::new(LocalSource::new()),
            SourceKind::Backend => Box::new(BackendSource::new(
                base_url.unwrap_or("http://localhost:3000/api"),
            )?),
            SourceKind::MealDb => match base_url {
                Some(url) => Box::new(MealDbSource::with_base_url(url)?),
                None => Box::new(MealDbSource::new()?),
            },
        })
    }
}

#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Every recipe the source knows about.
    async fn list(&self) -> SourceResult<Vec<RecipeSummary>>;

    /// Free-text search by name (sources may also match category/tags).
    async fn search(&self, term: &str) -> SourceResult<Vec<RecipeSummary>>;

    /// Exact category listing.
    async fn by_category(&self, category: &str) -> SourceResult<Vec<RecipeSummary>>;

    /// Detail lookup; an unknown id is an empty state, not an error.
    async fn by_id(&self, id: &str) -> SourceResult<Option<RecipeDetail>>;

    /// Category tiles for the home grid.
    async fn categories(&self) -> SourceResult<Vec<CategoryTile>>;
}

/// Categories that browse via free-text search instead of a category
/// listing. The two custom home tiles do not exist as upstream
/// categories, so a name search is the closest available query.
pub const SEARCH_BACKED_CATEGORIES: [&str; 2] = ["Pizza", "Biryani"];

/// Resolves a category browse against the given source, substituting a
/// name search for the search-backed categories.
pub async fn browse_category(
    source: &dyn RecipeSource,
    category: &str,
) -> SourceResult<Vec<RecipeSummary>> {
    if SEARCH_BACKED_CATEGORIES.contains(&category) {
        source.search(category).await
    } else {
        source.by_category(category).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_kind_parses_config_values() {
        assert_eq!("local".parse::<SourceKind>().unwrap(), SourceKind::Local);
        assert_eq!(
            "meal_db".parse::<SourceKind>().unwrap(),
            SourceKind::MealDb
        );
        assert!("spreadsheet".parse::<SourceKind>().is_err());
    }

    #[tokio::test]
    async fn search_backed_categories_browse_via_search() -> anyhow::Result<()> {
        let source = LocalSource::with_dataset(vec![
            crate::types::RecipeDetail {
                id: "piz-1".to_string(),
                name: "Paneer Pizza".to_string(),
                thumbnail: String::new(),
                category: Some("Other".to_string()),
                area: None,
                tags: Vec::new(),
                instructions: "Bake.".to_string(),
                ingredients: Vec::new(),
                youtube_url: None,
                source_url: None,
            },
        ]);

        // "Pizza" is not a category of the dataset, but the name search
        // still finds the dish.
        let rows = browse_category(&source, "Pizza").await?;
        assert_eq!(rows.len(), 1);

        let rows = browse_category(&source, "Other").await?;
        assert_eq!(rows.len(), 1);
        Ok(())
    }
}
