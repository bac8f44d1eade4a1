//! Widgets and route views

pub mod search_bar;
pub mod theme;
pub mod views;
