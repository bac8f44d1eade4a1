//! Application state: owns every store and routes actions and backend
//! answers between them.
//!
//! The controller never does I/O. Each call returns the effects the caller
//! has to run; their answers come back through [`Controller::handle`].

use tokio_util::sync::CancellationToken;

use crate::backend::types::{RawRecipe, RecipeId, SearchResult};

use super::auth_form::{AuthForm, AuthMode};
use super::effect::{Effect, Event, Request};
use super::membership::{MembershipResolver, ResultsView};
use super::notice::Notices;
use super::router::{nav_links, NavLink, OriginList, Route, Router, Transition};
use super::saved::SavedListManager;
use super::search::SearchController;
use super::session::SessionStore;

/// Something the user did
#[derive(Debug, Clone)]
pub enum Action {
    Navigate(Route),
    Back,
    SearchInputChanged(String),
    SearchSubmitted,
    EmailChanged(AuthMode, String),
    PasswordChanged(AuthMode, String),
    AuthSubmitted(AuthMode),
    SaveRecipe(RecipeId),
    RemoveRecipe(RecipeId),
    DismissNotice,
}

/// What the detail view has to show
#[derive(Debug, PartialEq)]
pub enum DetailView<'a> {
    Found {
        recipe: &'a SearchResult,
        origin: OriginList,
    },
    Loading,
    Missing,
}

pub struct Controller {
    session: SessionStore,
    router: Router,
    search: SearchController,
    resolver: MembershipResolver,
    saved: SavedListManager,
    login_form: AuthForm,
    signup_form: AuthForm,
    notices: Notices,
    raw_results: Vec<RawRecipe>,
    root: CancellationToken,
    show_test_page: bool,
}

impl Controller {
    pub fn new(show_test_page: bool) -> Self {
        let root = CancellationToken::new();
        Self {
            session: SessionStore::new(),
            router: Router::new(&root),
            search: SearchController::new(),
            resolver: MembershipResolver::new(),
            saved: SavedListManager::new(),
            login_form: AuthForm::new(AuthMode::Login),
            signup_form: AuthForm::new(AuthMode::CreateAccount),
            notices: Notices::default(),
            raw_results: Vec::new(),
            root,
            show_test_page,
        }
    }

    /// Effects for the first frame: the session check and whatever the
    /// starting route needs.
    pub fn mount(&mut self, start: Route) -> Vec<Effect> {
        let mut effects = vec![self.root_effect(Request::CheckSession)];
        if let Some(transition) = self.router.redirect(start) {
            effects.extend(self.on_transition(transition));
        }
        effects
    }

    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Navigate(route) => self.go(route),
            Action::Back => self.back(),
            Action::SearchInputChanged(value) => {
                self.search.set_input(value);
                Vec::new()
            }
            Action::SearchSubmitted => {
                let submission = self.search.submit();
                let mut effects = vec![self.root_effect(Request::Search {
                    seq: submission.seq,
                    ingredients: submission.ingredients,
                })];
                effects.extend(self.go(Route::SearchResults));
                effects
            }
            Action::EmailChanged(mode, value) => {
                self.form_mut(mode).set_email(value);
                Vec::new()
            }
            Action::PasswordChanged(mode, value) => {
                self.form_mut(mode).set_password(value);
                Vec::new()
            }
            Action::AuthSubmitted(mode) => match self.form_mut(mode).submit() {
                Some(credentials) => {
                    vec![self.root_effect(Request::Authenticate { mode, credentials })]
                }
                None => Vec::new(),
            },
            Action::SaveRecipe(id) => vec![self.root_effect(Request::SaveRecipe(id))],
            Action::RemoveRecipe(id) => vec![self.root_effect(Request::RemoveRecipe(id))],
            Action::DismissNotice => {
                self.notices.dismiss();
                Vec::new()
            }
        }
    }

    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::SessionChecked(Ok(in_session)) => {
                if self.session.set(in_session.into()) {
                    vec![self.root_effect(Request::CheckSession)]
                } else {
                    Vec::new()
                }
            }
            Event::SessionChecked(Err(e)) => {
                if !e.is_cancelled() {
                    tracing::warn!("Session check failed: {}", e);
                }
                Vec::new()
            }
            Event::Authenticated { mode, result } => {
                if result.as_ref().is_err_and(|e| e.is_cancelled()) {
                    return Vec::new();
                }
                self.form_mut(mode).finish(&result);
                match result {
                    Ok(message) => self.notices.info(message),
                    Err(e) => self.notices.error(e.user_message()),
                }
                vec![self.root_effect(Request::CheckSession)]
            }
            Event::LoggedOut(result) => {
                match result {
                    Ok(message) => self.notices.info(message),
                    Err(e) if e.is_cancelled() => return Vec::new(),
                    Err(e) => self.notices.error(e.user_message()),
                }
                let mut effects = vec![self.root_effect(Request::CheckSession)];
                if self.router.current() == Route::Logout {
                    if let Some(transition) = self.router.redirect(Route::Homepage) {
                        effects.extend(self.on_transition(transition));
                    }
                }
                effects
            }
            Event::SearchCompleted { seq, result } => {
                if !self.search.accept(seq) {
                    tracing::debug!("Dropping results of superseded search #{}", seq);
                    return Vec::new();
                }
                match result {
                    Ok(raw) => {
                        tracing::info!("Search #{} returned {} recipes", seq, raw.len());
                        self.raw_results = raw;
                        if self.router.current() == Route::SearchResults {
                            self.resolve_in_view()
                        } else {
                            Vec::new()
                        }
                    }
                    Err(e) if e.is_cancelled() => Vec::new(),
                    Err(e) => {
                        self.notices.error(e.user_message());
                        Vec::new()
                    }
                }
            }
            Event::ResultsChecked { seq, result } => {
                self.resolver.apply(seq, result);
                Vec::new()
            }
            Event::SavedFetched(result) => {
                if let Some(e) = self.saved.apply(result) {
                    self.notices.error(e.user_message());
                }
                Vec::new()
            }
            Event::RecipeSaved { id, result } => match result {
                Ok(message) => {
                    tracing::info!("Saved recipe {}", id);
                    self.notices.info(message);
                    self.after_membership_change()
                }
                Err(e) if e.is_cancelled() => Vec::new(),
                Err(e) => {
                    self.notices.error(e.user_message());
                    Vec::new()
                }
            },
            Event::RecipeRemoved { id, result } => match result {
                Ok(message) => {
                    tracing::info!("Removed recipe {}", id);
                    self.notices.info(message);
                    self.after_membership_change()
                }
                Err(e) if e.is_cancelled() => Vec::new(),
                Err(e) => {
                    self.notices.error(e.user_message());
                    Vec::new()
                }
            },
        }
    }

    /// Cancel everything still in flight
    pub fn shutdown(&self) {
        self.root.cancel();
    }

    // ------------------------------------------------------------------
    // Read side
    // ------------------------------------------------------------------

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn route(&self) -> Route {
        self.router.current()
    }

    pub fn history_len(&self) -> usize {
        self.router.history_len()
    }

    /// Login and create-account forms only render while not logged in
    pub fn shows_auth_forms(&self) -> bool {
        !self.session.is_logged_in()
    }

    pub fn nav_links(&self) -> Vec<NavLink> {
        nav_links(self.session.status(), self.show_test_page)
    }

    pub fn search_input(&self) -> &str {
        self.search.input()
    }

    pub fn is_searching(&self) -> bool {
        self.search.is_in_flight()
    }

    pub fn form(&self, mode: AuthMode) -> &AuthForm {
        match mode {
            AuthMode::Login => &self.login_form,
            AuthMode::CreateAccount => &self.signup_form,
        }
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn raw_results(&self) -> &[RawRecipe] {
        &self.raw_results
    }

    pub fn results_view(&self) -> ResultsView<'_> {
        self.resolver.view(&self.raw_results)
    }

    pub fn saved(&self) -> &SavedListManager {
        &self.saved
    }

    pub fn detail(&self, id: RecipeId, origin: OriginList) -> DetailView<'_> {
        let (recipe, loading) = match origin {
            OriginList::SearchResults => (
                self.resolver.find(&self.raw_results, id),
                self.resolver.is_pending(),
            ),
            OriginList::SavedRecipes => (
                self.saved.find(id).map(|saved| &saved.recipe),
                !self.saved.is_loaded() && self.saved.failure().is_none(),
            ),
        };
        match recipe {
            Some(recipe) => DetailView::Found { recipe, origin },
            None if loading => DetailView::Loading,
            None => DetailView::Missing,
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn go(&mut self, route: Route) -> Vec<Effect> {
        match self.router.navigate(route) {
            Some(transition) => self.on_transition(transition),
            None => Vec::new(),
        }
    }

    /// Pop history; a detail view opened directly falls back to its list
    fn back(&mut self) -> Vec<Effect> {
        let transition = match self.router.back() {
            Some(transition) => Some(transition),
            None => match self.router.current() {
                Route::RecipeDetails { origin, .. } => self.router.redirect(origin.route()),
                _ => None,
            },
        };
        match transition {
            Some(transition) => self.on_transition(transition),
            None => Vec::new(),
        }
    }

    /// Unmount the old view and mount the new one
    fn on_transition(&mut self, transition: Transition) -> Vec<Effect> {
        match transition.from {
            Route::SearchResults => self.resolver.abandon(),
            Route::SavedRecipes
            | Route::RecipeDetails {
                origin: OriginList::SavedRecipes,
                ..
            } => self.saved.unmount(),
            _ => {}
        }

        match transition.to {
            Route::SearchResults => self.resolve_in_view(),
            Route::SavedRecipes
            | Route::RecipeDetails {
                origin: OriginList::SavedRecipes,
                ..
            } => {
                if self.saved.mount() {
                    vec![self.view_effect(Request::FetchSaved)]
                } else {
                    Vec::new()
                }
            }
            Route::Logout => vec![self.root_effect(Request::Logout)],
            _ => Vec::new(),
        }
    }

    fn resolve_in_view(&mut self) -> Vec<Effect> {
        match self.resolver.submit(&self.raw_results) {
            Some(batch) => vec![self.view_effect(Request::CheckResults {
                seq: batch.seq,
                recipes: batch.recipes,
            })],
            None => Vec::new(),
        }
    }

    /// The saved list changed on the server: re-check what is on screen
    fn after_membership_change(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.saved.toggle_removed() {
            effects.push(self.view_effect(Request::FetchSaved));
        }
        let shows_results = matches!(
            self.router.current(),
            Route::SearchResults
                | Route::RecipeDetails {
                    origin: OriginList::SearchResults,
                    ..
                }
        );
        if shows_results {
            effects.extend(self.resolve_in_view());
        }
        effects
    }

    fn form_mut(&mut self, mode: AuthMode) -> &mut AuthForm {
        match mode {
            AuthMode::Login => &mut self.login_form,
            AuthMode::CreateAccount => &mut self.signup_form,
        }
    }

    fn root_effect(&self, request: Request) -> Effect {
        Effect::new(&self.root, request)
    }

    fn view_effect(&self, request: Request) -> Effect {
        Effect::new(self.router.scope(), request)
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.shutdown();
    }
}
