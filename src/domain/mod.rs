//! Static form model: the field registry, the widget tree and their errors.
//!
//! Everything in here is immutable configuration. The live state built on
//! top of it lives in [`crate::engine`].

pub mod error;
pub mod field;
pub mod widget;

pub use error::{ConfigurationError, FormError};
pub use field::{FieldDescriptor, FieldKind, FieldRegistry, NameValue};
pub use widget::{Branch, FieldControl, Filter, ValidatorDescriptor, Widget};
