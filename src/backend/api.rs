//! HTTP client for the recipe backend API

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::{
    CheckResultsRequest, CheckResultsResponse, Credentials, MessageResponse, RawRecipe, RecipeId,
    RecipeRef, SavedRecipe, SavedRecipesResponse, SearchRequest, SearchResult, SessionCheck,
};

/// Client for the recipe backend.
///
/// The cookie store is enabled so the session cookie set by `/api/login`
/// rides along on every later request.
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Log in with an existing account
    pub async fn login(&self, credentials: &Credentials) -> Result<MessageResponse, ApiError> {
        let response = self
            .client
            .post(self.url("/api/login"))
            .json(credentials)
            .send()
            .await?;
        decode(response).await
    }

    /// Register a new account
    pub async fn create_account(
        &self,
        credentials: &Credentials,
    ) -> Result<MessageResponse, ApiError> {
        let response = self
            .client
            .post(self.url("/api/create_account"))
            .json(credentials)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn logout(&self) -> Result<MessageResponse, ApiError> {
        let response = self.client.get(self.url("/api/logout")).send().await?;
        decode(response).await
    }

    /// Ask the server whether the cookie still maps to a live session
    pub async fn check_session(&self) -> Result<bool, ApiError> {
        let response = self
            .client
            .get(self.url("/api/check_session"))
            .send()
            .await?;
        let check: SessionCheck = decode(response).await?;
        Ok(check.in_session)
    }

    /// Search recipes by a free-text, comma-separated ingredient list
    pub async fn search(&self, ingredients: &str) -> Result<Vec<RawRecipe>, ApiError> {
        let response = self
            .client
            .post(self.url("/api/search_results"))
            .json(&SearchRequest { ingredients })
            .send()
            .await?;
        decode(response).await
    }

    /// Annotate raw results with saved-list membership in one batch call
    pub async fn check_results(
        &self,
        results: &[RawRecipe],
    ) -> Result<Vec<SearchResult>, ApiError> {
        let response = self
            .client
            .post(self.url("/api/check_results"))
            .json(&CheckResultsRequest {
                results_list: results,
            })
            .send()
            .await?;
        let checked: CheckResultsResponse = decode(response).await?;
        Ok(checked.checked_recipes)
    }

    pub async fn saved_recipes(&self) -> Result<Vec<SavedRecipe>, ApiError> {
        let response = self
            .client
            .get(self.url("/api/saved_recipes"))
            .send()
            .await?;
        let saved: SavedRecipesResponse = decode(response).await?;
        Ok(saved.saved_recipes)
    }

    pub async fn save_recipe(&self, recipe_id: RecipeId) -> Result<MessageResponse, ApiError> {
        let response = self
            .client
            .post(self.url("/api/save_recipe"))
            .json(&RecipeRef { recipe_id })
            .send()
            .await?;
        decode(response).await
    }

    pub async fn remove_recipe(&self, recipe_id: RecipeId) -> Result<MessageResponse, ApiError> {
        let response = self
            .client
            .post(self.url("/api/remove_recipe"))
            .json(&RecipeRef { recipe_id })
            .send()
            .await?;
        decode(response).await
    }
}

/// Map non-2xx statuses to `ApiError::Status`, keeping the server's message
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<MessageResponse>()
            .await
            .map(|body| body.message)
            .unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}
