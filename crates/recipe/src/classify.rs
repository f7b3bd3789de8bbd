//! Vegetarian classification.
//!
//! Two-tier rule: a recipe is vegetarian if its id appears in the set of
//! ids fetched from the upstream "Vegetarian" and "Vegan" category
//! listings, or failing that, if its name contains one of a fixed list of
//! keywords. The keyword list is a display heuristic, not a nutritional
//! authority.

use std::collections::HashSet;

use crate::source::RecipeSource;
use crate::types::RecipeSummary;

/// Name fragments that mark a recipe as vegetarian when id membership is
/// inconclusive. Matched against the lowercased display name.
const VEG_KEYWORDS: [&str; 14] = [
    "mushroom",
    "vegetable",
    "veggie",
    "tofu",
    "lentil",
    "spinach",
    "cheese",
    "egg",
    "potato",
    "tomato",
    "gnocchi",
    "margherita",
    "fettuccine alfredo",
    "penne arrabiata",
];

/// Ids known to be vegetarian, built once per view session and read-only
/// afterwards. An empty context is a valid degraded state while the
/// lookups are in flight or after they failed.
#[derive(Debug, Default, Clone)]
pub struct ClassificationContext {
    vegetarian_ids: HashSet<String>,
}

impl ClassificationContext {
    pub fn from_ids(ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            vegetarian_ids: ids.into_iter().collect(),
        }
    }

    /// Fetches the "Vegetarian" and "Vegan" listings concurrently and
    /// unions their ids. A failed lookup is logged and skipped: the
    /// context degrades classification recall, it never fails the caller.
    pub async fn build(source: &dyn RecipeSource) -> Self {
        let (vegetarian, vegan) = tokio::join!(
            source.by_category("Vegetarian"),
            source.by_category("Vegan"),
        );

        let mut ids = HashSet::new();
        for (category, result) in [("Vegetarian", vegetarian), ("Vegan", vegan)] {
            match result {
                Ok(recipes) => ids.extend(recipes.into_iter().map(|r| r.id)),
                Err(err) => {
                    tracing::warn!(category, %err, "vegetarian id lookup failed, classification degraded");
                }
            }
        }

        Self {
            vegetarian_ids: ids,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.vegetarian_ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.vegetarian_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vegetarian_ids.is_empty()
    }

    /// Id membership wins over keywords; the keyword scan only runs for
    /// ids the upstream listings did not cover.
    pub fn is_vegetarian(&self, recipe: &RecipeSummary) -> bool {
        if self.contains(&recipe.id) {
            return true;
        }
        let name = recipe.name.to_lowercase();
        VEG_KEYWORDS.iter().any(|keyword| name.contains(keyword))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str, name: &str) -> RecipeSummary {
        RecipeSummary {
            id: id.to_string(),
            name: name.to_string(),
            thumbnail: String::new(),
            category: None,
            area: None,
            tags: Vec::new(),
        }
    }

    #[test]
    fn membership_wins_over_keywords() {
        let ctx = ClassificationContext::from_ids(["52772".to_string()]);
        // no veg keyword in the name, id membership alone decides
        assert!(ctx.is_vegetarian(&summary("52772", "Teriyaki Chicken Casserole")));
    }

    #[test]
    fn keywords_cover_unlisted_ids() {
        let ctx = ClassificationContext::default();
        assert!(ctx.is_vegetarian(&summary("1", "Creamy Mushroom Pasta")));
        assert!(ctx.is_vegetarian(&summary("2", "MARGHERITA pizza")));
        assert!(!ctx.is_vegetarian(&summary("3", "Beef Wellington")));
    }

    #[test]
    fn empty_context_classifies_by_name_only() {
        let ctx = ClassificationContext::default();
        assert!(ctx.is_empty());
        assert!(!ctx.is_vegetarian(&summary("52959", "Baked salmon with fennel")));
    }
}
