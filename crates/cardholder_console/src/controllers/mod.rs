//! View controllers.
//!
//! Each controller owns the state its screen displays and drives the data
//! clients for it. Controllers know nothing about the terminal: prompts go
//! through [`Dialogs`](crate::dialogs::Dialogs) and route changes through
//! [`Navigator`](crate::navigation::Navigator).

mod detail;
mod form;
mod list;

pub use detail::{CustomerDetailController, DetailState, LOAD_ERROR};
pub use form::{CustomerFormController, CREATE_ERROR};
pub use list::{CustomerListController, FETCH_ERROR, INVALID_ID};

/// How a user action ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The request succeeded and local state was updated
    Completed,
    /// The request failed; local state is unchanged
    Failed,
    /// The user declined the confirmation
    Declined,
    /// Local validation blocked the action before any request
    Rejected,
    /// Nothing to act on in the current state
    Unavailable,
}

impl ActionOutcome {
    pub fn is_completed(self) -> bool {
        self == Self::Completed
    }
}
