//! Ingredient search box

/// A search ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSubmission {
    pub seq: u64,
    pub ingredients: String,
}

/// Holds the ingredient input and numbers each submitted search.
///
/// Only the newest search may publish results; an older one that answers
/// late is discarded.
#[derive(Debug, Default)]
pub struct SearchController {
    input: String,
    latest: u64,
    in_flight: bool,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: String) {
        self.input = value;
    }

    /// Take the input as typed (no client-side validation) and clear the box
    pub fn submit(&mut self) -> SearchSubmission {
        self.latest += 1;
        self.in_flight = true;
        let ingredients = std::mem::take(&mut self.input);
        tracing::info!("Searching for \"{}\" (#{})", ingredients, self.latest);
        SearchSubmission {
            seq: self.latest,
            ingredients,
        }
    }

    /// Whether results for `seq` may be published. Clears the in-flight
    /// marker for the newest search.
    pub fn accept(&mut self, seq: u64) -> bool {
        if seq != self.latest {
            return false;
        }
        self.in_flight = false;
        true
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}
