//! In-process notice board backing the [`Notifier`] port.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::TimeDelta;
use tidydo_domain::id::NoticeId;
use tidydo_domain::notice::Notice;
use tidydo_domain::time::now;

use crate::ports::Notifier;

/// How long a notice stays visible unless dismissed earlier.
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Default)]
struct Board {
    notices: Vec<Notice>,
    next_id: u32,
}

impl Board {
    fn prune(&mut self, ttl: TimeDelta) {
        let cutoff = now().checked_sub_signed(ttl);
        self.notices
            .retain(|n| cutoff.is_none_or(|cutoff| n.created_at > cutoff));
    }
}

/// Holds the notices currently shown to the user.
///
/// Notices expire after a fixed time-to-live and can be dismissed early.
pub struct NoticeBoard {
    board: Mutex<Board>,
    ttl: TimeDelta,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_TTL)
    }
}

impl NoticeBoard {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            board: Mutex::new(Board::default()),
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
        }
    }

    /// Add a notice, assigning it the next id. Expired notices are dropped
    /// on the way.
    pub fn push(&self, mut notice: Notice) -> NoticeId {
        let mut board = self.board.lock().unwrap_or_else(PoisonError::into_inner);
        board.prune(self.ttl);
        board.next_id = board.next_id.wrapping_add(1);
        let id = NoticeId(board.next_id);
        notice.id = id;
        board.notices.push(notice);
        id
    }

    /// Remove a notice. Returns `false` if it was already gone.
    pub fn dismiss(&self, id: NoticeId) -> bool {
        let mut board = self.board.lock().unwrap_or_else(PoisonError::into_inner);
        let before = board.notices.len();
        board.notices.retain(|n| n.id != id);
        board.notices.len() != before
    }

    /// Notices that are neither dismissed nor expired, oldest first.
    pub fn active(&self) -> Vec<Notice> {
        let mut board = self.board.lock().unwrap_or_else(PoisonError::into_inner);
        board.prune(self.ttl);
        board.notices.clone()
    }
}

impl Notifier for NoticeBoard {
    fn notify(&self, notice: Notice) {
        let id = self.push(notice);
        tracing::debug!(%id, "notice posted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_assign_increasing_ids() {
        let board = NoticeBoard::default();
        let a = board.push(Notice::error("Error", "one"));
        let b = board.push(Notice::error("Error", "two"));
        assert!(b > a);
        assert_eq!(board.active().len(), 2);
    }

    #[test]
    fn should_remove_notice_when_dismissed() {
        let board = NoticeBoard::default();
        let id = board.push(Notice::info("App Reset", "done"));

        assert!(board.dismiss(id));
        assert!(!board.dismiss(id));
        assert!(board.active().is_empty());
    }

    #[test]
    fn should_drop_expired_notices() {
        let board = NoticeBoard::new(Duration::ZERO);
        board.push(Notice::error("Error", "gone"));
        assert!(board.active().is_empty());
    }

    #[test]
    fn should_not_accumulate_expired_notices_without_readers() {
        let board = NoticeBoard::new(Duration::ZERO);
        for n in 0..10 {
            board.push(Notice::error("Error", format!("failure {n}")));
        }

        let stored = board.board.lock().unwrap().notices.len();
        assert!(stored <= 1, "kept {stored} expired notices");
    }

    #[test]
    fn should_accept_notices_through_notifier_port() {
        let board = NoticeBoard::default();
        board.notify(Notice::error("Error", "Failed to delete todo"));

        let active = board.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, "Failed to delete todo");
        assert_eq!(active[0].id, NoticeId(1));
    }
}
