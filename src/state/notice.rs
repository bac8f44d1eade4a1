//! Alert queue

use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// FIFO of messages for the user; the front one stays up until dismissed
#[derive(Debug, Default)]
pub struct Notices {
    queue: VecDeque<Notice>,
}

impl Notices {
    pub fn info(&mut self, text: impl Into<String>) {
        self.push(NoticeKind::Info, text.into());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(NoticeKind::Error, text.into());
    }

    fn push(&mut self, kind: NoticeKind, text: String) {
        // Backends sometimes answer with an empty message
        if text.is_empty() {
            return;
        }
        self.queue.push_back(Notice { kind, text });
    }

    pub fn front(&self) -> Option<&Notice> {
        self.queue.front()
    }

    pub fn dismiss(&mut self) {
        self.queue.pop_front();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notices_are_shown_in_order() {
        let mut notices = Notices::default();
        notices.info("Logged in");
        notices.error("Recipe could not be saved");
        notices.info("");

        assert_eq!(notices.len(), 2);
        assert_eq!(notices.front().unwrap().text, "Logged in");
        notices.dismiss();
        assert_eq!(notices.front().unwrap().kind, NoticeKind::Error);
    }
}
