//! # tidydo-domain
//!
//! Pure domain model for the tidydo to-do list.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Todos** (text items that can be completed) and their progress stats
//! - Define the **display mode** preference (light / dark)
//! - Define the two static **palettes** and the pure resolver from mode to palette
//! - Define **notices** (user-visible, dismissible notifications)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod display_mode;
pub mod notice;
pub mod palette;
pub mod todo;
