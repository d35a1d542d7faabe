//! # tidydo-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON API** for the todo list (`/api/todos`, …)
//! - Expose the display-mode preference, its palettes, and a **server-sent
//!   events** stream that emits one frame per mode change
//! - Expose the notice board so clients can show and dismiss notices
//! - Map HTTP requests into application service calls (driving adapter)
//!
//! Destructive endpoints only run with `?confirm=true`; without it they answer
//! `428 Precondition Required` and describe the confirmation to show.
//!
//! ## Dependency rule
//! Depends on `tidydo-app` (for port traits and services) and `tidydo-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
