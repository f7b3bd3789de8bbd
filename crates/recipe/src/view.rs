//! View transformation pipeline: filter, stable sort, optional recycle.
//!
//! Every listing screen shapes its rows the same way: attach synthesized
//! attributes, drop rows the active filter rejects, order by the active
//! sort key, and (for the stress-test list only) replicate the result
//! with rewritten row ids.

use std::cmp::Ordering;

use serde::Deserialize;
use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::classify::ClassificationContext;
use crate::pricing::DerivedAttributes;
use crate::types::RecipeSummary;

/// Row replication factor used by the mobile list view when recycle mode
/// is enabled. A development-time stress artifact, off by default.
pub const RECYCLE_MULTIPLIER: usize = 10;

const COPY_SEPARATOR: &str = "_copy_";

#[derive(
    EnumString, Display, VariantArray, AsRefStr, Default, Clone, Copy, Debug, PartialEq, Deserialize,
)]
pub enum DietFilter {
    #[default]
    All,
    Veg,
    NonVeg,
}

#[derive(
    EnumString, Display, VariantArray, AsRefStr, Default, Clone, Copy, Debug, PartialEq, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    RatingDesc,
    NameAsc,
    NameDesc,
    Category,
}

/// A recipe with its synthesized attributes attached, ready to render.
#[derive(Clone, Debug, PartialEq)]
pub struct PricedRecipe {
    pub recipe: RecipeSummary,
    pub attrs: DerivedAttributes,
}

impl PricedRecipe {
    fn new(recipe: RecipeSummary) -> Self {
        let attrs = DerivedAttributes::synthesize(&recipe.id);
        Self { recipe, attrs }
    }
}

/// Ticket handed out per fetch; only the most recent one may commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Monotonic fetch sequence owned by a view. A slower response from an
/// earlier fetch must not overwrite a newer one, so results only commit
/// when their ticket is still the latest.
#[derive(Debug, Default, Clone)]
pub struct FetchGuard {
    seq: u64,
}

impl FetchGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.seq += 1;
        FetchTicket(self.seq)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.seq
    }
}

/// Per-screen user-controlled selection. Owned by exactly one view
/// instance, mutated only by interaction, reset on navigation via
/// `Default`.
#[derive(Debug, Default, Clone)]
pub struct ViewState {
    pub filter: DietFilter,
    pub sort: SortKey,
    /// `None` browses everything; `Some` requires an exact category match.
    pub category: Option<String>,
    /// Replication factor for the recycle stage; `None` disables it.
    pub recycle: Option<usize>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the full pipeline over a fetched list. Pure: an empty input
    /// yields an empty output, never an error.
    pub fn transform(
        &self,
        recipes: Vec<RecipeSummary>,
        ctx: &ClassificationContext,
    ) -> Vec<PricedRecipe> {
        let mut rows: Vec<PricedRecipe> = recipes
            .into_iter()
            .filter(|recipe| match &self.category {
                Some(category) => recipe.category.as_deref() == Some(category.as_str()),
                None => true,
            })
            .filter(|recipe| match self.filter {
                DietFilter::All => true,
                DietFilter::Veg => ctx.is_vegetarian(recipe),
                DietFilter::NonVeg => !ctx.is_vegetarian(recipe),
            })
            .map(PricedRecipe::new)
            .collect();

        self.sort.apply(&mut rows);

        match self.recycle {
            Some(multiplier) => recycle(&rows, multiplier),
            None => rows,
        }
    }
}

impl SortKey {
    /// Reorders rows in place. All orders are total and the underlying
    /// sort is stable, so equal-key rows keep their input order.
    pub fn apply(self, rows: &mut [PricedRecipe]) {
        match self {
            SortKey::Default => {}
            SortKey::PriceAsc => rows.sort_by(|a, b| a.attrs.price.cmp(&b.attrs.price)),
            SortKey::PriceDesc => rows.sort_by(|a, b| b.attrs.price.cmp(&a.attrs.price)),
            SortKey::RatingDesc => rows.sort_by(|a, b| b.attrs.rating.cmp(&a.attrs.rating)),
            SortKey::NameAsc => rows.sort_by(|a, b| {
                name_cmp(&a.recipe.name, &b.recipe.name).then_with(|| a.recipe.id.cmp(&b.recipe.id))
            }),
            SortKey::NameDesc => rows.sort_by(|a, b| {
                name_cmp(&b.recipe.name, &a.recipe.name).then_with(|| a.recipe.id.cmp(&b.recipe.id))
            }),
            SortKey::Category => rows.sort_by(|a, b| {
                let left = a.recipe.category.as_deref().unwrap_or("");
                let right = b.recipe.category.as_deref().unwrap_or("");
                left.cmp(right)
                    .then_with(|| name_cmp(&a.recipe.name, &b.recipe.name))
            }),
        }
    }
}

/// Case-insensitive name comparison, falling back to the raw strings so
/// the order stays total when names differ only by case.
fn name_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Replicates `rows` `multiplier` times with rewritten ids so each
/// rendered row keeps a unique key. The original id stays recoverable via
/// [`strip_copy_suffix`].
pub fn recycle(rows: &[PricedRecipe], multiplier: usize) -> Vec<PricedRecipe> {
    let mut recycled = Vec::with_capacity(rows.len() * multiplier);
    for copy in 0..multiplier {
        for (position, row) in rows.iter().enumerate() {
            let mut row = row.clone();
            row.recipe.id = format!("{}{}{}_{}", row.recipe.id, COPY_SEPARATOR, copy, position);
            recycled.push(row);
        }
    }
    recycled
}

/// Recovers the original id from a recycled row id. Ids without the copy
/// suffix pass through unchanged.
pub fn strip_copy_suffix(id: &str) -> &str {
    match id.split_once(COPY_SEPARATOR) {
        Some((original, _)) => original,
        None => id,
    }
}

/// Local search within an already-fetched list: case-insensitive
/// substring match on the display name. A blank query keeps everything.
pub fn search_by_name(recipes: &[RecipeSummary], query: &str) -> Vec<RecipeSummary> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return recipes.to_vec();
    }
    recipes
        .iter()
        .filter(|recipe| recipe.name.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

/// Category chips for the list header: "All" first, then the distinct
/// categories of the loaded list in first-seen order.
pub fn category_chips(recipes: &[RecipeSummary]) -> Vec<String> {
    let mut chips = vec!["All".to_string()];
    for recipe in recipes {
        if let Some(category) = &recipe.category {
            if !chips.iter().any(|chip| chip == category) {
                chips.push(category.clone());
            }
        }
    }
    chips
}
