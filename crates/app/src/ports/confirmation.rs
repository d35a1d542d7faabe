//! Confirmation port — a yes/no gate in front of destructive operations.

use std::future::Future;

/// The question put to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    pub title: &'static str,
    pub message: &'static str,
    /// Label of the affirming (destructive) choice.
    pub confirm_label: &'static str,
}

impl Confirmation {
    pub const DELETE_TODO: Self = Self {
        title: "Delete Todo",
        message: "Are you sure you want to delete this todo?",
        confirm_label: "Delete",
    };

    pub const CLEAR_ALL: Self = Self {
        title: "Reset App",
        message: "This will delete ALL your todos permanently. This action cannot be undone",
        confirm_label: "Delete All",
    };
}

/// Asks the user to affirm a [`Confirmation`].
///
/// Returning `false` (cancel) means the guarded call must not be issued.
pub trait ConfirmationGate {
    fn confirm(&self, confirmation: &Confirmation) -> impl Future<Output = bool> + Send;
}

impl ConfirmationGate for bool {
    fn confirm(&self, _confirmation: &Confirmation) -> impl Future<Output = bool> + Send {
        let answer = *self;
        async move { answer }
    }
}
