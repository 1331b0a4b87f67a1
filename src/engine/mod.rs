//! Live form engine
//!
//! - [`validators`]: compiles validator descriptors into rules
//! - [`control`]: state of one materialized field
//! - [`tree`]: ordered collection of live controls
//! - [`session`]: the synchronizer keeping the tree in line with the widget tree

pub mod control;
pub mod session;
pub mod tree;
pub mod validators;

pub use control::LiveControl;
pub use session::{FormSession, TreeChange};
pub use tree::ControlTree;
pub use validators::{ValidationFailure, Validator};
