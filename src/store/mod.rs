//! The user list: reconciliation rules and the actor that owns them.

pub mod actor;
pub mod state;

pub use actor::UserListActor;
pub use state::*;
