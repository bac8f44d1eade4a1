//! Session store: tri-state login status shared through the view tree

/// What the client currently believes about the server-side session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginStatus {
    /// No session check has answered yet
    #[default]
    Unknown,
    LoggedIn,
    LoggedOut,
}

impl From<bool> for LoginStatus {
    fn from(in_session: bool) -> Self {
        if in_session {
            LoginStatus::LoggedIn
        } else {
            LoginStatus::LoggedOut
        }
    }
}

impl LoginStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LoginStatus::Unknown => "unknown",
            LoginStatus::LoggedIn => "logged in",
            LoginStatus::LoggedOut => "logged out",
        }
    }
}

/// Holds the login status.
///
/// Every change of the stored value asks for another session check, so the
/// UI never keeps trusting a value it just wrote itself. A check that
/// confirms the stored value ends the loop.
#[derive(Debug, Default)]
pub struct SessionStore {
    status: LoginStatus,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> LoginStatus {
        self.status
    }

    /// Gating view of the status: `Unknown` counts as logged out
    pub fn is_logged_in(&self) -> bool {
        self.status == LoginStatus::LoggedIn
    }

    /// Store a new status. Returns `true` when the value changed, meaning
    /// the backend must be queried again.
    pub fn set(&mut self, status: LoginStatus) -> bool {
        if self.status == status {
            return false;
        }
        tracing::info!(
            "Session status {} -> {}",
            self.status.label(),
            status.label()
        );
        self.status = status;
        true
    }
}
