//! Notifier port — shows notices to the user.

use std::sync::Arc;

use tidydo_domain::notice::Notice;

/// Surfaces a [`Notice`] somewhere the user will see it.
///
/// Delivery is best-effort and never fails the calling operation.
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice);
    }
}
