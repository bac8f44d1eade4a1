//! Annotates raw search hits with saved-list membership

use std::collections::HashMap;

use crate::backend::error::ApiError;
use crate::backend::types::{RawRecipe, RecipeId, SearchResult};

/// What the results view should show
#[derive(Debug, PartialEq)]
pub enum ResultsView<'a> {
    /// Nothing to show yet; also used for a search with zero hits
    Searching,
    Results(&'a [SearchResult]),
}

/// One batch of raw results waiting to be checked against the saved list
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveRequest {
    pub seq: u64,
    pub recipes: Vec<RawRecipe>,
}

/// Keeps the annotated copy of the latest search results.
///
/// The `is_saved` flag is only ever taken from a backend answer. A failed
/// answer leaves the previous list in place, and an answer to an older
/// submission is ignored. The annotated list is only shown for the raw list
/// it was merged from.
#[derive(Debug, Default)]
pub struct MembershipResolver {
    annotated: Vec<SearchResult>,
    /// Provider ids `annotated` was merged from
    source: Vec<RecipeId>,
    submitted: Vec<RawRecipe>,
    next_seq: u64,
    pending: Option<u64>,
}

impl MembershipResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a batch check. Empty input needs no round trip.
    pub fn submit(&mut self, raw: &[RawRecipe]) -> Option<ResolveRequest> {
        if raw.is_empty() {
            return None;
        }
        self.next_seq += 1;
        self.pending = Some(self.next_seq);
        self.submitted = raw.to_vec();
        tracing::debug!("Checking {} results (batch {})", raw.len(), self.next_seq);

        Some(ResolveRequest {
            seq: self.next_seq,
            recipes: self.submitted.clone(),
        })
    }

    /// Apply the backend's answer. Returns `true` if the list was replaced.
    pub fn apply(&mut self, seq: u64, result: Result<Vec<SearchResult>, ApiError>) -> bool {
        if self.pending != Some(seq) {
            tracing::debug!("Dropping membership answer for stale batch {}", seq);
            return false;
        }
        self.pending = None;

        match result {
            Ok(checked) => {
                self.annotated = merge(&self.submitted, checked);
                self.source = self.submitted.iter().map(|r| r.id).collect();
                true
            }
            Err(e) if e.is_cancelled() => false,
            Err(e) => {
                tracing::warn!("Membership check failed, keeping previous results: {}", e);
                false
            }
        }
    }

    /// Forget an in-flight batch whose view went away
    pub fn abandon(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Annotated copy of `raw`, if the last successful answer was for it
    pub fn results_for(&self, raw: &[RawRecipe]) -> Option<&[SearchResult]> {
        let current = !raw.is_empty()
            && raw.len() == self.source.len()
            && raw.iter().zip(&self.source).all(|(r, id)| r.id == *id);
        current.then_some(self.annotated.as_slice())
    }

    pub fn find(&self, raw: &[RawRecipe], id: RecipeId) -> Option<&SearchResult> {
        self.results_for(raw)?.iter().find(|r| r.recipe_id == id)
    }

    pub fn view<'a>(&'a self, raw: &[RawRecipe]) -> ResultsView<'a> {
        match self.results_for(raw) {
            Some(results) => ResultsView::Results(results),
            None => ResultsView::Searching,
        }
    }
}

/// Combine provider order with the backend's annotations.
///
/// Recipes the backend did not mention are shown as not saved; entries the
/// backend invented are dropped.
fn merge(raw: &[RawRecipe], checked: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut by_id: HashMap<RecipeId, SearchResult> =
        checked.into_iter().map(|r| (r.recipe_id, r)).collect();

    raw.iter()
        .map(|recipe| match by_id.remove(&recipe.id) {
            Some(mut annotated) => {
                if annotated.image.is_none() {
                    annotated.image = recipe.image.clone();
                }
                annotated
            }
            None => SearchResult::from_raw(recipe),
        })
        .collect()
}
