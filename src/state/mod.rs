//! Client application state
//!
//! Session, search, saved-list and routing stores, wired together by the
//! [`Controller`]. Nothing in here touches the network.

pub mod auth_form;
pub mod controller;
pub mod effect;
pub mod membership;
pub mod notice;
pub mod router;
pub mod saved;
pub mod search;
pub mod session;

#[cfg(test)]
mod tests;

pub use auth_form::AuthMode;
pub use controller::{Action, Controller, DetailView};
pub use effect::{Effect, Event};
pub use membership::ResultsView;
pub use notice::NoticeKind;
pub use router::{OriginList, Route};
