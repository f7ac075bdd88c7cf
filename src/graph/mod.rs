//! Workflow graph model.
//!
//! - [`types`]: nodes, edges and the [`Graph`] snapshot.
//! - [`validator`]: [`is_valid_connection`], the connection rules.
//! - [`mutator`]: [`GraphMutation`] and the edit operations built on the validator.

pub mod mutator;
pub mod types;
pub mod validator;

pub use mutator::*;
pub use types::*;
pub use validator::{is_valid_connection, Connection};
