pub mod health;
pub mod index;
pub mod recipes;

pub use health::{health, ready};
pub use index::{not_found, service_index};
pub use recipes::{
    RecipeInput, create_recipe, delete_recipe, get_categories, get_recipe, list_recipes,
    recipes_by_category, search_recipes, update_recipe,
};

use crate::store::RecipeStore;

#[derive(Clone)]
pub struct AppState {
    pub store: RecipeStore,
}
