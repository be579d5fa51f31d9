use crate::contracts::{Control, ControlValue, FormControl, InputError};
use crate::element::Element;
use crate::id::ComponentId;

use super::ControlState;

#[derive(Clone, Debug)]
pub struct Checkbox {
    state: ControlState,
    checked: bool,
    switch: bool,
}

impl Checkbox {
    pub fn new() -> Self {
        Self {
            state: ControlState::new("checkbox"),
            checked: false,
            switch: false,
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.state.set_id(id.into());
        self
    }

    pub fn switch(mut self, value: bool) -> Self {
        self.switch = value;
        self
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, value: bool) {
        self.checked = value;
        self.state.bump_revision();
    }
}

impl Default for Checkbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Control for Checkbox {
    fn state(&self) -> &ControlState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ControlState {
        &mut self.state
    }

    fn current(&self) -> Option<ControlValue> {
        Some(ControlValue::Bool(self.checked))
    }

    /// A required checkbox must be ticked, as with the HTML attribute.
    fn is_empty(&self) -> bool {
        !self.checked
    }

    fn clear(&mut self) {
        self.set_checked(false);
    }

    fn render(&self) -> Element {
        let mut input = self
            .state
            .input("input", "form-check-input")
            .attr("type", "checkbox")
            .flag("checked", self.checked);
        if self.switch {
            input = input.attr("role", "switch");
        }
        self.state.render_check(input)
    }
}

impl FormControl for Checkbox {
    type Value = bool;

    fn value(&self) -> Result<Option<bool>, InputError> {
        Ok(Some(self.checked))
    }

    fn set_value(&mut self, value: Option<bool>) {
        self.set_checked(value.unwrap_or(false));
    }
}
