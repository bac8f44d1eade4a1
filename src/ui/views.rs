//! Route views
//!
//! Every function here is a pure render of controller state; user input
//! comes back out as [`Action`]s.

use iced::widget::{button, column, container, row, scrollable, text, text_input, Space};
use iced::{Alignment, Background, Border, Element, Length, Padding};

use super::theme::DarkTheme;
use crate::backend::types::{SavedRecipe, SearchResult};
use crate::state::{
    Action, AuthMode, Controller, DetailView, NoticeKind, OriginList, ResultsView, Route,
};

/// Body of the current route
pub fn route<'a>(controller: &'a Controller) -> Element<'a, Action> {
    match controller.route() {
        Route::Homepage => homepage(controller),
        Route::Login | Route::CreateAccount if !controller.shows_auth_forms() => {
            muted("You're already logged in.")
        }
        Route::Login => auth_form(controller, AuthMode::Login),
        Route::CreateAccount => auth_form(controller, AuthMode::CreateAccount),
        Route::SearchResults => search_results(controller),
        Route::SavedRecipes => saved_recipes(controller),
        Route::RecipeDetails { id, origin } => details(controller.detail(id, origin), origin),
        Route::Logout => muted("Signing out…"),
        Route::Test => diagnostics(controller),
    }
}

pub fn nav<'a>(controller: &'a Controller) -> Element<'a, Action> {
    let current = controller.route();
    let links: Vec<Element<'a, Action>> = controller
        .nav_links()
        .into_iter()
        .map(|link| {
            let style = if link.route == current {
                button::primary
            } else {
                button::text
            };
            button(text(link.label).size(14))
                .style(style)
                .on_press(Action::Navigate(link.route))
                .into()
        })
        .collect();

    row(links).spacing(6).into()
}

/// Front notice with a dismiss button, if any
pub fn notice<'a>(controller: &'a Controller) -> Option<Element<'a, Action>> {
    let notice = controller.notices().front()?;
    let accent = match notice.kind {
        NoticeKind::Info => DarkTheme::PRIMARY,
        NoticeKind::Error => DarkTheme::ERROR,
    };

    let banner = container(
        row![
            text(notice.text.as_str()).color(DarkTheme::TEXT),
            Space::with_width(Length::Fill),
            button(text("OK")).on_press(Action::DismissNotice),
        ]
        .spacing(12)
        .align_y(Alignment::Center),
    )
    .padding(Padding::from([8.0, 12.0]))
    .width(Length::Fill)
    .style(move |_theme| container::Style {
        background: Some(Background::Color(DarkTheme::SURFACE)),
        border: Border {
            color: accent,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    });

    Some(banner.into())
}

fn homepage<'a>(controller: &'a Controller) -> Element<'a, Action> {
    if !controller.shows_auth_forms() {
        return column![
            text("Hello! Welcome to the Homepage!").size(24),
            text("You're logged in. Search for some ingredients above!")
                .color(DarkTheme::TEXT_MUTED),
            button(text("Saved Recipes")).on_press(Action::Navigate(Route::SavedRecipes)),
        ]
        .spacing(16)
        .into();
    }

    column![
        text("Hello! Welcome to the Homepage!").size(24),
        auth_form(controller, AuthMode::Login),
        text("OR").color(DarkTheme::TEXT_MUTED),
        button(text("Create New Account!")).on_press(Action::Navigate(Route::CreateAccount)),
    ]
    .spacing(16)
    .into()
}

fn auth_form<'a>(controller: &'a Controller, mode: AuthMode) -> Element<'a, Action> {
    let form = controller.form(mode);
    let submit = (!form.is_submitting()).then_some(Action::AuthSubmitted(mode));

    column![
        text(form.heading()).size(18),
        text_input("Email", form.email())
            .on_input(move |value| Action::EmailChanged(mode, value))
            .padding(8),
        text_input("Password", form.password())
            .on_input(move |value| Action::PasswordChanged(mode, value))
            .on_submit(Action::AuthSubmitted(mode))
            .secure(true)
            .padding(8),
        button(text(form.button_label())).on_press_maybe(submit),
    ]
    .spacing(8)
    .max_width(420.0)
    .into()
}

fn search_results<'a>(controller: &'a Controller) -> Element<'a, Action> {
    match controller.results_view() {
        ResultsView::Searching => muted("Searching..."),
        ResultsView::Results(results) => {
            let cards: Vec<Element<'a, Action>> = results
                .iter()
                .map(|recipe| {
                    let action = (!recipe.is_saved)
                        .then(|| ("Save", Action::SaveRecipe(recipe.recipe_id)));
                    recipe_card(recipe, None, OriginList::SearchResults, action)
                })
                .collect();
            scrollable(column(cards).spacing(8)).height(Length::Fill).into()
        }
    }
}

fn saved_recipes<'a>(controller: &'a Controller) -> Element<'a, Action> {
    let saved = controller.saved();
    if let Some(reason) = saved.failure() {
        return muted(format!("Could not load saved recipes: {}", reason));
    }
    if !saved.is_loaded() {
        return muted("Loading saved recipes...");
    }
    if saved.recipes().is_empty() {
        return muted("No saved recipes yet. Search for something and save it!");
    }

    let cards: Vec<Element<'a, Action>> = saved
        .recipes()
        .iter()
        .map(|saved| {
            recipe_card(
                &saved.recipe,
                saved_notes(saved),
                OriginList::SavedRecipes,
                Some(("Remove", Action::RemoveRecipe(saved.recipe.recipe_id))),
            )
        })
        .collect();
    scrollable(column(cards).spacing(8)).height(Length::Fill).into()
}

fn recipe_card<'a>(
    recipe: &'a SearchResult,
    notes: Option<String>,
    origin: OriginList,
    action: Option<(&'static str, Action)>,
) -> Element<'a, Action> {
    let badge = if recipe.is_saved {
        text("Saved").size(12).color(DarkTheme::SAVED)
    } else {
        text("").size(12)
    };

    let mut controls = row![button(text("Details")).style(button::secondary).on_press(
        Action::Navigate(Route::RecipeDetails {
            id: recipe.recipe_id,
            origin,
        })
    )]
    .spacing(8);
    if let Some((label, action)) = action {
        controls = controls.push(button(text(label)).on_press(action));
    }

    let mut summary = column![
        text(recipe.title.as_str()).size(16).color(DarkTheme::TEXT),
        text(facts(recipe)).size(12).color(DarkTheme::TEXT_MUTED),
        badge,
    ]
    .spacing(2);
    if let Some(notes) = notes {
        summary = summary.push(text(notes).size(12).color(DarkTheme::SAVED));
    }

    container(
        row![
            summary,
            Space::with_width(Length::Fill),
            controls,
        ]
        .spacing(12)
        .align_y(Alignment::Center),
    )
    .padding(Padding::from([10.0, 12.0]))
    .width(Length::Fill)
    .style(|_theme| container::Style {
        background: Some(Background::Color(DarkTheme::SURFACE)),
        border: Border::default().rounded(8),
        ..Default::default()
    })
    .into()
}

fn details<'a>(view: DetailView<'a>, origin: OriginList) -> Element<'a, Action> {
    let back = button(text("Back")).on_press(Action::Back);

    match view {
        DetailView::Loading => column![back, muted("Loading recipe...")].spacing(12).into(),
        DetailView::Missing => {
            let where_from = match origin {
                OriginList::SearchResults => "your search results",
                OriginList::SavedRecipes => "your saved recipes",
            };
            column![
                back,
                muted(format!("This recipe is no longer in {}.", where_from)),
            ]
            .spacing(12)
            .into()
        }
        DetailView::Found { recipe, origin } => {
            let action = match origin {
                OriginList::SavedRecipes => Some(("Remove", Action::RemoveRecipe(recipe.recipe_id))),
                OriginList::SearchResults if !recipe.is_saved => {
                    Some(("Save", Action::SaveRecipe(recipe.recipe_id)))
                }
                OriginList::SearchResults => None,
            };

            let mut body = column![
                back,
                text(recipe.title.as_str()).size(24),
                text(facts(recipe)).color(DarkTheme::TEXT_MUTED),
            ]
            .spacing(12);
            if let Some(image) = &recipe.image {
                body = body.push(text(image.as_str()).size(12).color(DarkTheme::TEXT_MUTED));
            }
            if recipe.is_saved {
                body = body.push(text("In your saved recipes").color(DarkTheme::SAVED));
            }
            if let Some((label, action)) = action {
                body = body.push(button(text(label)).on_press(action));
            }
            body.into()
        }
    }
}

fn diagnostics<'a>(controller: &'a Controller) -> Element<'a, Action> {
    column![
        text("Diagnostics").size(20),
        text(format!("Session: {}", controller.session().status().label())),
        text(format!("Route: {}", controller.route().path())),
        text(format!("History depth: {}", controller.history_len())),
        text(format!(
            "Search in flight: {}",
            if controller.is_searching() { "yes" } else { "no" }
        )),
        text(format!("Raw results: {}", controller.raw_results().len())),
        text(format!("Saved recipes: {}", controller.saved().recipes().len())),
        text(if controller.notices().is_empty() {
            "Queued notices: none".to_string()
        } else {
            format!("Queued notices: {}", controller.notices().len())
        }),
    ]
    .spacing(6)
    .into()
}

fn muted<'a>(message: impl Into<String>) -> Element<'a, Action> {
    text(message.into()).color(DarkTheme::TEXT_MUTED).into()
}

/// One-line summary like "Serves 4 · Prep 10 min · Ready in 30 min"
pub fn facts(recipe: &SearchResult) -> String {
    let parts: Vec<String> = [
        recipe.servings.map(|n| format!("Serves {}", n)),
        recipe.prep_mins.map(|m| format!("Prep {} min", m)),
        recipe.cook_mins.map(|m| format!("Cook {} min", m)),
        recipe.ready_mins.map(|m| format!("Ready in {} min", m)),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        "Details not available yet".to_string()
    } else {
        parts.join(" · ")
    }
}

/// Favourite/tried/rating/comment line for a saved recipe, if any is set
pub fn saved_notes(saved: &SavedRecipe) -> Option<String> {
    let mut parts = Vec::new();
    if saved.favorite == Some(true) {
        parts.push("★ Favourite".to_string());
    }
    if saved.tried == Some(true) {
        parts.push("Tried".to_string());
    }
    if let Some(rating) = saved.rating {
        parts.push(format!("Rated {}/5", rating));
    }
    if let Some(comment) = saved.comment.as_deref().filter(|c| !c.trim().is_empty()) {
        parts.push(format!("\"{}\"", comment.trim()));
    }

    (!parts.is_empty()).then(|| parts.join(" · "))
}
