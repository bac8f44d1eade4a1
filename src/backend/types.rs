//! Wire types for the recipe backend

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Recipe identifier as assigned by the recipe provider
pub type RecipeId = i64;

/// Email/password pair posted to the login and create-account endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// `{message}` body returned by every session-mutating endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SessionCheck {
    pub in_session: bool,
}

#[derive(Debug, Serialize)]
pub struct SearchRequest<'a> {
    pub ingredients: &'a str,
}

/// Recipe exactly as the provider returned it.
///
/// Only the fields the client reads are typed; everything else is kept in
/// `extra` so the list can be posted back to `check_results` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecipe {
    pub id: RecipeId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct CheckResultsRequest<'a> {
    pub results_list: &'a [RawRecipe],
}

#[derive(Debug, Deserialize)]
pub struct CheckResultsResponse {
    pub checked_recipes: Vec<SearchResult>,
}

/// A search hit annotated with whether the current user already saved it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(alias = "id")]
    pub recipe_id: RecipeId,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub prep_mins: Option<u32>,
    #[serde(default, rename = "cooking_mins", alias = "cook_mins")]
    pub cook_mins: Option<u32>,
    #[serde(default)]
    pub ready_mins: Option<u32>,
    #[serde(default, alias = "isSaved")]
    pub is_saved: bool,
}

impl SearchResult {
    /// Unannotated result built from provider data alone
    pub fn from_raw(raw: &RawRecipe) -> Self {
        Self {
            recipe_id: raw.id,
            title: raw.title.clone(),
            image: raw.image.clone(),
            servings: None,
            prep_mins: None,
            cook_mins: None,
            ready_mins: None,
            is_saved: false,
        }
    }
}

/// A recipe in the current user's saved list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRecipe {
    #[serde(flatten)]
    pub recipe: SearchResult,
    #[serde(default)]
    pub saved_id: Option<i64>,
    #[serde(default)]
    pub favorite: Option<bool>,
    #[serde(default)]
    pub tried: Option<bool>,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SavedRecipesResponse {
    pub saved_recipes: Vec<SavedRecipe>,
}

#[derive(Debug, Serialize)]
pub struct RecipeRef {
    pub recipe_id: RecipeId,
}
