use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::components::{ControlState, FileEntry};
use crate::element::Element;
use crate::id::ComponentId;
use crate::style::FieldLayout;

/// Snapshot of a control's live value, independent of the model type.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlValue {
    Text(String),
    Bool(bool),
    Number(Decimal),
    Date(NaiveDateTime),
    Files(Vec<FileEntry>),
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("`{0}` is not a number")]
    NotANumber(String),
    #[error("`{0}` is not a valid date")]
    InvalidDate(String),
}

pub trait Control {
    fn state(&self) -> &ControlState;
    fn state_mut(&mut self) -> &mut ControlState;

    /// `None` when the control shows its empty representation.
    fn current(&self) -> Option<ControlValue>;
    fn clear(&mut self);
    fn render(&self) -> Element;

    fn is_empty(&self) -> bool {
        self.current().is_none()
    }

    fn id(&self) -> &ComponentId {
        self.state().id()
    }

    fn is_required(&self) -> bool {
        self.state().is_required()
    }

    fn set_required(&mut self, value: bool) {
        self.state_mut().set_required(value);
    }

    fn validation_error(&self) -> Option<&str> {
        self.state().validation_error()
    }

    fn set_validation_error(&mut self, value: Option<String>) {
        self.state_mut().set_validation_error(value);
    }

    fn apply_layout(&mut self, layout: FieldLayout) {
        self.state_mut().set_layout(layout);
    }

    fn revision(&self) -> u64 {
        self.state().revision()
    }
}

pub trait FormControl: Control + 'static {
    type Value: Clone + 'static;

    fn value(&self) -> Result<Option<Self::Value>, InputError>;
    fn set_value(&mut self, value: Option<Self::Value>);
}

pub trait FieldLike: Sized {
    fn label(self, value: impl Into<String>) -> Self;
    fn name(self, value: impl Into<String>) -> Self;
    fn required(self, value: bool) -> Self;
    fn disabled(self, value: bool) -> Self;
    fn layout(self, value: FieldLayout) -> Self;
}

impl<T> FieldLike for T
where
    T: Control,
{
    fn label(mut self, value: impl Into<String>) -> Self {
        self.state_mut().set_label(Some(value.into()));
        self
    }

    fn name(mut self, value: impl Into<String>) -> Self {
        self.state_mut().set_name(Some(value.into()));
        self
    }

    fn required(mut self, value: bool) -> Self {
        self.set_required(value);
        self
    }

    fn disabled(mut self, value: bool) -> Self {
        self.state_mut().set_disabled(value);
        self
    }

    fn layout(mut self, value: FieldLayout) -> Self {
        self.apply_layout(value);
        self
    }
}
