pub mod classify;
pub mod error;
pub mod pricing;
pub mod source;
pub mod types;
pub mod view;

pub use classify::ClassificationContext;
pub use error::{SourceError, SourceResult};
pub use pricing::{DerivedAttributes, Price, Rating};
pub use source::{
    BackendSource, LocalSource, MealDbSource, RecipeSource, SourceKind, browse_category,
    builtin_dataset,
};
pub use types::*;
pub use view::{
    DietFilter, FetchGuard, FetchTicket, PricedRecipe, RECYCLE_MULTIPLIER, SortKey, ViewState,
    category_chips, recycle, search_by_name, strip_copy_suffix,
};
