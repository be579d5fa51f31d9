pub mod components;
pub mod contracts;
pub mod element;
pub mod form;
pub mod id;
pub mod prelude;
pub mod style;

pub use crate::contracts::{Control, ControlValue, FieldLike, FormControl, InputError};
pub use crate::element::{Element, Node};
pub use crate::style::{ClassList, FieldLayout, FormType, HorizRatio};

#[cfg(test)]
mod test_public_api;
