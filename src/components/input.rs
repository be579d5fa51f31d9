use crate::contracts::{Control, ControlValue, FormControl, InputError};
use crate::element::Element;
use crate::id::ComponentId;

use super::ControlState;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum InputType {
    #[default]
    Text,
    Password,
    Email,
    Tel,
    Url,
    Search,
    Color,
}

impl InputType {
    pub const fn as_str(self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Password => "password",
            InputType::Email => "email",
            InputType::Tel => "tel",
            InputType::Url => "url",
            InputType::Search => "search",
            InputType::Color => "color",
        }
    }
}

#[derive(Clone, Debug)]
pub struct TextInput {
    state: ControlState,
    input_type: InputType,
    value: String,
    placeholder: Option<String>,
    max_length: Option<usize>,
}

impl TextInput {
    pub fn new() -> Self {
        Self {
            state: ControlState::new("text"),
            input_type: InputType::Text,
            value: String::new(),
            placeholder: None,
            max_length: None,
        }
    }

    pub fn password() -> Self {
        Self::new().input_type(InputType::Password)
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.state.set_id(id.into());
        self
    }

    pub fn input_type(mut self, value: InputType) -> Self {
        self.input_type = value;
        self
    }

    pub fn placeholder(mut self, value: impl Into<String>) -> Self {
        self.placeholder = Some(value.into());
        self
    }

    pub fn max_length(mut self, value: usize) -> Self {
        self.max_length = Some(value);
        self
    }

    pub fn with_text(mut self, value: impl Into<String>) -> Self {
        self.set_text(value);
        self
    }

    pub fn text(&self) -> &str {
        &self.value
    }

    /// Simulates user typing.
    pub fn set_text(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.state.bump_revision();
    }
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl Control for TextInput {
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
        let input = self
            .state
            .input("input", "form-control")
            .attr("type", self.input_type.as_str())
            .attr("value", self.value.clone())
            .attr_opt("placeholder", self.placeholder.clone())
            .attr_opt("maxlength", self.max_length.map(|len| len.to_string()));
        self.state.render_field(input)
    }
}

impl FormControl for TextInput {
    type Value = String;

    fn value(&self) -> Result<Option<String>, InputError> {
        Ok((!self.value.is_empty()).then(|| self.value.clone()))
    }

    fn set_value(&mut self, value: Option<String>) {
        self.set_text(value.unwrap_or_default());
    }
}
