//! Iced application: owns the state controller and the backend client
//!
//! `update` feeds user actions and backend answers into the controller and
//! turns the effects it hands back into async tasks.

use std::sync::Arc;

use iced::widget::{column, container, horizontal_rule};
use iced::{Background, Border, Element, Length, Padding, Task, Theme};

use crate::backend::{runner, BackendClient};
use crate::config::Config;
use crate::state::{Action, Controller, Effect, Event, Route};
use crate::ui::theme::DarkTheme;
use crate::ui::{search_bar, views};

#[derive(Debug, Clone)]
pub enum Message {
    Action(Action),
    Backend(Event),
}

pub struct Fridge {
    controller: Controller,
    client: Arc<BackendClient>,
}

impl Fridge {
    /// Build the app and kick off the first session check
    pub fn new(config: &Config, client: BackendClient, start: Route) -> (Self, Task<Message>) {
        let mut app = Self {
            controller: Controller::new(config.show_test_page),
            client: Arc::new(client),
        };
        let effects = app.controller.mount(start);
        let task = app.perform(effects);
        (app, task)
    }

    pub fn title(&self) -> String {
        format!("Fridge · {}", self.controller.route().path())
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let effects = match message {
            Message::Action(action) => {
                tracing::debug!("Action: {:?}", action);
                self.controller.dispatch(action)
            }
            Message::Backend(event) => self.controller.handle(event),
        };
        self.perform(effects)
    }

    pub fn view(&self) -> Element<'_, Message> {
        let search = search_bar::view(
            self.controller.search_input(),
            Action::SearchInputChanged,
            Action::SearchSubmitted,
        );

        let mut page = column![views::nav(&self.controller), search, horizontal_rule(1.0)]
            .spacing(12);
        if let Some(notice) = views::notice(&self.controller) {
            page = page.push(notice);
        }
        page = page.push(container(views::route(&self.controller)).height(Length::Fill));

        let content: Element<'_, Action> = container(page)
            .padding(Padding::new(16.0))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(Background::Color(DarkTheme::BACKGROUND)),
                border: Border {
                    color: DarkTheme::BORDER,
                    width: 1.0,
                    radius: 12.0.into(),
                },
                ..Default::default()
            })
            .into();

        content.map(Message::Action)
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn perform(&self, effects: Vec<Effect>) -> Task<Message> {
        Task::batch(effects.into_iter().map(|effect| {
            let client = Arc::clone(&self.client);
            Task::perform(runner::run(client, effect), Message::Backend)
        }))
    }
}
