//! Executes state-core effects against the backend

use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use super::api::BackendClient;
use super::error::ApiError;
use crate::state::effect::{Effect, Event, Request};
use crate::state::AuthMode;

/// Perform one effect and turn the outcome into an event.
///
/// The call is raced against the effect's scope; a cancelled scope yields
/// `ApiError::Cancelled` without waiting for the server.
pub async fn run(client: Arc<BackendClient>, effect: Effect) -> Event {
    let Effect { id, scope, request } = effect;
    let span = tracing::debug_span!("request", %id, name = request.name());

    async move {
        tracing::debug!("dispatching");
        let event = match request {
            Request::CheckSession => {
                Event::SessionChecked(guarded(&scope, client.check_session()).await)
            }
            Request::Authenticate { mode, credentials } => {
                let result = match mode {
                    AuthMode::Login => guarded(&scope, client.login(&credentials)).await,
                    AuthMode::CreateAccount => {
                        guarded(&scope, client.create_account(&credentials)).await
                    }
                };
                Event::Authenticated {
                    mode,
                    result: result.map(|r| r.message),
                }
            }
            Request::Logout => {
                Event::LoggedOut(guarded(&scope, client.logout()).await.map(|r| r.message))
            }
            Request::Search { seq, ingredients } => Event::SearchCompleted {
                seq,
                result: guarded(&scope, client.search(&ingredients)).await,
            },
            Request::CheckResults { seq, recipes } => Event::ResultsChecked {
                seq,
                result: guarded(&scope, client.check_results(&recipes)).await,
            },
            Request::FetchSaved => {
                Event::SavedFetched(guarded(&scope, client.saved_recipes()).await)
            }
            Request::SaveRecipe(id) => Event::RecipeSaved {
                id,
                result: guarded(&scope, client.save_recipe(id))
                    .await
                    .map(|r| r.message),
            },
            Request::RemoveRecipe(id) => Event::RecipeRemoved {
                id,
                result: guarded(&scope, client.remove_recipe(id))
                    .await
                    .map(|r| r.message),
            },
        };
        tracing::debug!("done");
        event
    }
    .instrument(span)
    .await
}

async fn guarded<T>(
    scope: &CancellationToken,
    call: impl Future<Output = Result<T, ApiError>>,
) -> Result<T, ApiError> {
    tokio::select! {
        biased;
        () = scope.cancelled() => Err(ApiError::Cancelled),
        result = call => result,
    }
}
