//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod confirmation;
pub mod key_value;
pub mod notifier;
pub mod todo_repo;

pub use confirmation::{Confirmation, ConfirmationGate};
pub use key_value::KeyValueStore;
pub use notifier::Notifier;
pub use todo_repo::TodoRepository;
