//! Saved-recipes list with flag-driven invalidation

use crate::backend::error::ApiError;
use crate::backend::types::{RecipeId, SavedRecipe};

/// Holds the user's saved recipes while a view that shows them is mounted.
///
/// A fetch happens on mount and every time the `removed` flag flips; the
/// flag is flipped by whoever changed the saved list.
#[derive(Debug, Default)]
pub struct SavedListManager {
    recipes: Vec<SavedRecipe>,
    removed: bool,
    mounted: bool,
    loaded: bool,
    /// Why the first fetch failed, shown instead of the list
    failure: Option<String>,
}

impl SavedListManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount the list. Always asks for a fetch.
    pub fn mount(&mut self) -> bool {
        self.mounted = true;
        self.failure = None;
        true
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    /// Flip the removal flag. Returns `true` when a re-fetch is due.
    pub fn toggle_removed(&mut self) -> bool {
        self.removed = !self.removed;
        self.mounted
    }

    /// Store a fetch result. A failure before anything was loaded is kept
    /// and handed back so the caller can report it; later failures keep the
    /// previous list.
    pub fn apply(&mut self, result: Result<Vec<SavedRecipe>, ApiError>) -> Option<ApiError> {
        match result {
            Ok(mut recipes) => {
                for recipe in &mut recipes {
                    recipe.recipe.is_saved = true;
                }
                tracing::debug!("Saved list refreshed ({} recipes)", recipes.len());
                self.recipes = recipes;
                self.loaded = true;
                self.failure = None;
                None
            }
            Err(e) if e.is_cancelled() => None,
            Err(e) if self.loaded => {
                tracing::warn!("Saved list fetch failed, keeping previous list: {}", e);
                None
            }
            Err(e) => {
                tracing::warn!("Saved list fetch failed: {}", e);
                self.failure = Some(e.user_message());
                Some(e)
            }
        }
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn recipes(&self) -> &[SavedRecipe] {
        &self.recipes
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn find(&self, id: RecipeId) -> Option<&SavedRecipe> {
        self.recipes.iter().find(|r| r.recipe.recipe_id == id)
    }
}
