//! Path-based routing and per-view cancellation scopes

use tokio_util::sync::CancellationToken;

use crate::backend::types::RecipeId;

use super::session::LoginStatus;

/// List a detail view was opened from, so "back" lands in the right place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginList {
    SearchResults,
    SavedRecipes,
}

impl OriginList {
    pub fn segment(&self) -> &'static str {
        match self {
            OriginList::SearchResults => "search-results",
            OriginList::SavedRecipes => "saved-recipes",
        }
    }

    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "search-results" => Some(OriginList::SearchResults),
            "saved-recipes" => Some(OriginList::SavedRecipes),
            _ => None,
        }
    }

    pub fn route(&self) -> Route {
        match self {
            OriginList::SearchResults => Route::SearchResults,
            OriginList::SavedRecipes => Route::SavedRecipes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Homepage,
    Login,
    CreateAccount,
    SearchResults,
    SavedRecipes,
    RecipeDetails {
        id: RecipeId,
        origin: OriginList,
    },
    Logout,
    /// Diagnostic page
    Test,
}

impl Route {
    /// Resolve a client path. Unknown paths land on the homepage.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim().trim_matches('/');
        let parts: Vec<&str> = trimmed.split('/').collect();

        match parts.as_slice() {
            [""] | ["homepage"] => Route::Homepage,
            ["login"] => Route::Login,
            ["create-account"] => Route::CreateAccount,
            ["search-results"] => Route::SearchResults,
            ["saved-recipes"] => Route::SavedRecipes,
            ["logout"] => Route::Logout,
            ["test-page"] => Route::Test,
            [from, "recipe-details", id] => {
                match (OriginList::from_segment(from), id.parse::<RecipeId>()) {
                    (Some(origin), Ok(id)) => Route::RecipeDetails { id, origin },
                    _ => {
                        tracing::warn!("Unroutable detail path: {}", path);
                        Route::Homepage
                    }
                }
            }
            _ => {
                tracing::warn!("Unknown path {}, showing homepage", path);
                Route::Homepage
            }
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Homepage => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::CreateAccount => "/create-account".to_string(),
            Route::SearchResults => "/search-results".to_string(),
            Route::SavedRecipes => "/saved-recipes".to_string(),
            Route::RecipeDetails { id, origin } => {
                format!("/{}/recipe-details/{}", origin.segment(), id)
            }
            Route::Logout => "/logout".to_string(),
            Route::Test => "/test-page".to_string(),
        }
    }
}

/// Entry in the navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub route: Route,
}

/// Navigation links for the given session status
pub fn nav_links(status: LoginStatus, show_test_page: bool) -> Vec<NavLink> {
    let mut links = vec![NavLink {
        label: "Homepage",
        route: Route::Homepage,
    }];

    if status == LoginStatus::LoggedIn {
        links.push(NavLink {
            label: "Search Results",
            route: Route::SearchResults,
        });
        links.push(NavLink {
            label: "Saved Recipes",
            route: Route::SavedRecipes,
        });
        links.push(NavLink {
            label: "Log Out",
            route: Route::Logout,
        });
    } else {
        links.push(NavLink {
            label: "Log In",
            route: Route::Login,
        });
        links.push(NavLink {
            label: "Create An Account",
            route: Route::CreateAccount,
        });
        links.push(NavLink {
            label: "Search Results",
            route: Route::SearchResults,
        });
    }

    if show_test_page {
        links.push(NavLink {
            label: "Test",
            route: Route::Test,
        });
    }

    links
}

/// Route change reported by the router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Route,
    pub to: Route,
}

/// Current route, back history and the cancellation scope of the mounted view.
///
/// Leaving a view cancels its scope, which aborts whatever that view still
/// has in flight.
pub struct Router {
    current: Route,
    history: Vec<Route>,
    root: CancellationToken,
    scope: CancellationToken,
}

impl Router {
    pub fn new(root: &CancellationToken) -> Self {
        Self {
            current: Route::Homepage,
            history: Vec::new(),
            root: root.clone(),
            scope: root.child_token(),
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// Token of the mounted view
    pub fn scope(&self) -> &CancellationToken {
        &self.scope
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Push a new route. Navigating to the current route is a no-op.
    pub fn navigate(&mut self, route: Route) -> Option<Transition> {
        if route == self.current {
            return None;
        }
        let from = self.current;
        self.history.push(from);
        Some(self.switch(from, route))
    }

    /// Replace the current route without recording it in history
    pub fn redirect(&mut self, route: Route) -> Option<Transition> {
        if route == self.current {
            return None;
        }
        let from = self.current;
        Some(self.switch(from, route))
    }

    pub fn back(&mut self) -> Option<Transition> {
        let to = self.history.pop()?;
        let from = self.current;
        Some(self.switch(from, to))
    }

    fn switch(&mut self, from: Route, to: Route) -> Transition {
        self.scope.cancel();
        self.scope = self.root.child_token();
        self.current = to;
        tracing::info!("Route {} -> {}", from.path(), to.path());
        Transition { from, to }
    }
}
