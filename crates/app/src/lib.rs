//! # tidydo-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `KeyValueStore` — on-device preference storage
//!   - `TodoRepository` — the todo data store (list, toggle, update, delete, clear)
//!   - `ConfirmationGate` — yes/no prompt before destructive calls
//!   - `Notifier` — surfaces notices to the user
//! - Define **driving/inbound** use-cases:
//!   - `PreferenceStore` — owns the display mode, persists it, fans out changes
//!   - `TodoService` — todo interactions with failure reporting
//!   - `EditSession` — inline text editing of one todo
//! - Provide **in-process infrastructure** (`NoticeBoard`) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `tidydo-domain` only (plus `tokio` for detached tasks).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod notice_board;
pub mod ports;
pub mod services;
