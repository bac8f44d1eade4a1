//! Ingredient search bar

use iced::widget::{button, row, text, text_input};
use iced::{Alignment, Element, Length};

/// "What's in your fridge?" input plus the submit button
pub fn view<'a, Message: Clone + 'a>(
    value: &str,
    on_input: impl Fn(String) -> Message + 'a,
    on_submit: Message,
) -> Element<'a, Message> {
    row![
        text("What's in your fridge?").size(16),
        text_input("beef, potato, onion", value)
            .on_input(on_input)
            .on_submit(on_submit.clone())
            .padding(10)
            .size(16)
            .width(Length::Fill),
        button(text("Let's get cookin!")).on_press(on_submit).padding(10),
    ]
    .spacing(12)
    .align_y(Alignment::Center)
    .into()
}
