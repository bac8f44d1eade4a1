//! Requests the state core asks for, and the events that answer them

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::backend::error::ApiError;
use crate::backend::types::{Credentials, RawRecipe, RecipeId, SavedRecipe, SearchResult};

use super::auth_form::AuthMode;

/// Backend call to perform
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    CheckSession,
    Authenticate {
        mode: AuthMode,
        credentials: Credentials,
    },
    Logout,
    Search {
        seq: u64,
        ingredients: String,
    },
    CheckResults {
        seq: u64,
        recipes: Vec<RawRecipe>,
    },
    FetchSaved,
    SaveRecipe(RecipeId),
    RemoveRecipe(RecipeId),
}

impl Request {
    pub fn name(&self) -> &'static str {
        match self {
            Request::CheckSession => "check_session",
            Request::Authenticate {
                mode: AuthMode::Login,
                ..
            } => "login",
            Request::Authenticate {
                mode: AuthMode::CreateAccount,
                ..
            } => "create_account",
            Request::Logout => "logout",
            Request::Search { .. } => "search_results",
            Request::CheckResults { .. } => "check_results",
            Request::FetchSaved => "saved_recipes",
            Request::SaveRecipe(_) => "save_recipe",
            Request::RemoveRecipe(_) => "remove_recipe",
        }
    }
}

/// A request bound to the scope that issued it.
///
/// Cancelling the scope aborts the request and its answer comes back as
/// `ApiError::Cancelled`.
#[derive(Debug, Clone)]
pub struct Effect {
    pub id: Uuid,
    pub scope: CancellationToken,
    pub request: Request,
}

impl Effect {
    pub fn new(scope: &CancellationToken, request: Request) -> Self {
        Self {
            id: Uuid::new_v4(),
            scope: scope.clone(),
            request,
        }
    }
}

/// Backend answer fed back into the state core
#[derive(Debug, Clone)]
pub enum Event {
    SessionChecked(Result<bool, ApiError>),
    Authenticated {
        mode: AuthMode,
        result: Result<String, ApiError>,
    },
    LoggedOut(Result<String, ApiError>),
    SearchCompleted {
        seq: u64,
        result: Result<Vec<RawRecipe>, ApiError>,
    },
    ResultsChecked {
        seq: u64,
        result: Result<Vec<SearchResult>, ApiError>,
    },
    SavedFetched(Result<Vec<SavedRecipe>, ApiError>),
    RecipeSaved {
        id: RecipeId,
        result: Result<String, ApiError>,
    },
    RecipeRemoved {
        id: RecipeId,
        result: Result<String, ApiError>,
    },
}
