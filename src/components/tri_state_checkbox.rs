use crate::contracts::{Control, ControlValue, FormControl, InputError};
use crate::element::Element;
use crate::id::ComponentId;

use super::ControlState;

/// Checkbox with a third, indeterminate state that reads as no value.
///
/// Binds nullable flags: `None` shows as indeterminate and comes back as
/// `None`, while unchecked stays a deliberate `false`.
#[derive(Clone, Debug)]
pub struct TriStateCheckbox {
    state: ControlState,
    checked: Option<bool>,
}

impl TriStateCheckbox {
    pub fn new() -> Self {
        Self {
            state: ControlState::new("tristate"),
            checked: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.state.set_id(id.into());
        self
    }

    pub fn checked(&self) -> Option<bool> {
        self.checked
    }

    pub fn set_checked(&mut self, value: Option<bool>) {
        self.checked = value;
        self.state.bump_revision();
    }

    /// Click order: indeterminate, checked, unchecked, indeterminate.
    pub fn toggle(&mut self) {
        let next = match self.checked {
            None => Some(true),
            Some(true) => Some(false),
            Some(false) => None,
        };
        self.set_checked(next);
    }
}

impl Default for TriStateCheckbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Control for TriStateCheckbox {
    fn state(&self) -> &ControlState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ControlState {
        &mut self.state
    }

    fn current(&self) -> Option<ControlValue> {
        self.checked.map(ControlValue::Bool)
    }

    fn clear(&mut self) {
        self.set_checked(None);
    }

    fn render(&self) -> Element {
        let aria = match self.checked {
            None => "mixed",
            Some(true) => "true",
            Some(false) => "false",
        };
        let input = self
            .state
            .input("input", "form-check-input")
            .attr("type", "checkbox")
            .attr("aria-checked", aria)
            .flag("checked", self.checked == Some(true))
            .flag("data-indeterminate", self.checked.is_none());
        self.state.render_check(input)
    }
}

impl FormControl for TriStateCheckbox {
    type Value = bool;

    fn value(&self) -> Result<Option<bool>, InputError> {
        Ok(self.checked)
    }

    fn set_value(&mut self, value: Option<bool>) {
        self.set_checked(value);
    }
}
