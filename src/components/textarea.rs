use crate::contracts::{Control, ControlValue, FormControl, InputError};
use crate::element::Element;
use crate::id::ComponentId;

use super::ControlState;

#[derive(Clone, Debug)]
pub struct Textarea {
    state: ControlState,
    value: String,
    rows: Option<u32>,
    placeholder: Option<String>,
}

impl Textarea {
    pub fn new() -> Self {
        Self {
            state: ControlState::new("textarea"),
            value: String::new(),
            rows: None,
            placeholder: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.state.set_id(id.into());
        self
    }

    pub fn rows(mut self, value: u32) -> Self {
        self.rows = Some(value);
        self
    }

    pub fn placeholder(mut self, value: impl Into<String>) -> Self {
        self.placeholder = Some(value.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.value
    }

    pub fn set_text(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.state.bump_revision();
    }
}

impl Default for Textarea {
    fn default() -> Self {
        Self::new()
    }
}

impl Control for Textarea {
    fn state(&self) -> &ControlState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ControlState {
        &mut self.state
    }

    fn current(&self) -> Option<ControlValue> {
        (!self.value.is_empty()).then(|| ControlValue::Text(self.value.clone()))
    }

    fn clear(&mut self) {
        self.set_text(String::new());
    }

    fn render(&self) -> Element {
        let textarea = self
            .state
            .input("textarea", "form-control")
            .attr_opt("rows", self.rows.map(|rows| rows.to_string()))
            .attr_opt("placeholder", self.placeholder.clone())
            .text(self.value.clone());
        self.state.render_field(textarea)
    }
}

impl FormControl for Textarea {
    type Value = String;

    fn value(&self) -> Result<Option<String>, InputError> {
        Ok((!self.value.is_empty()).then(|| self.value.clone()))
    }

    fn set_value(&mut self, value: Option<String>) {
        self.set_text(value.unwrap_or_default());
    }
}
