use std::str::FromStr;

use rust_decimal::Decimal;

use crate::contracts::{Control, ControlValue, FormControl, InputError};
use crate::element::Element;
use crate::id::ComponentId;

use super::ControlState;

/// Numeric input that keeps the raw text the user typed; parsing happens on read.
#[derive(Clone, Debug)]
pub struct NumberInput {
    state: ControlState,
    text: String,
    min: Option<Decimal>,
    max: Option<Decimal>,
    step: Option<Decimal>,
}

impl NumberInput {
    pub fn new() -> Self {
        Self {
            state: ControlState::new("number"),
            text: String::new(),
            min: None,
            max: None,
            step: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.state.set_id(id.into());
        self
    }

    pub fn min(mut self, value: Decimal) -> Self {
        self.min = Some(value);
        self
    }

    pub fn max(mut self, value: Decimal) -> Self {
        self.max = Some(value);
        self
    }

    pub fn step(mut self, value: Decimal) -> Self {
        self.step = Some(value);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, value: impl Into<String>) {
        self.text = value.into();
        self.state.bump_revision();
    }

    fn parse(&self) -> Result<Option<Decimal>, InputError> {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(Some)
            .map_err(|_| InputError::NotANumber(trimmed.to_string()))
    }
}

impl Default for NumberInput {
    fn default() -> Self {
        Self::new()
    }
}

impl Control for NumberInput {
    fn state(&self) -> &ControlState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ControlState {
        &mut self.state
    }

    fn current(&self) -> Option<ControlValue> {
        match self.parse() {
            Ok(value) => value.map(ControlValue::Number),
            Err(_) => Some(ControlValue::Text(self.text.clone())),
        }
    }

    fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    fn clear(&mut self) {
        self.set_text(String::new());
    }

    fn render(&self) -> Element {
        let input = self
            .state
            .input("input", "form-control")
            .attr("type", "number")
            .attr("value", self.text.clone())
            .attr_opt("min", self.min.map(|value| value.to_string()))
            .attr_opt("max", self.max.map(|value| value.to_string()))
            .attr_opt("step", self.step.map(|value| value.to_string()));
        self.state.render_field(input)
    }
}

impl FormControl for NumberInput {
    type Value = Decimal;

    fn value(&self) -> Result<Option<Decimal>, InputError> {
        self.parse()
    }

    fn set_value(&mut self, value: Option<Decimal>) {
        let text = value
            .map(|value| value.normalize().to_string())
            .unwrap_or_default();
        self.set_text(text);
    }
}
