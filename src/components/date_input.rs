use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::contracts::{Control, ControlValue, FormControl, InputError};
use crate::element::Element;
use crate::id::ComponentId;

use super::ControlState;

const DEFAULT_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
const DEFAULT_INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
];

/// Date/time text input. The text is parsed with each input format in order;
/// formats without a time component resolve to midnight.
#[derive(Clone, Debug)]
pub struct DateInput {
    state: ControlState,
    text: String,
    display_format: String,
    input_formats: Vec<String>,
}

impl DateInput {
    pub fn new() -> Self {
        Self {
            state: ControlState::new("date"),
            text: String::new(),
            display_format: DEFAULT_DISPLAY_FORMAT.to_string(),
            input_formats: DEFAULT_INPUT_FORMATS
                .iter()
                .map(|format| format.to_string())
                .collect(),
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.state.set_id(id.into());
        self
    }

    pub fn display_format(mut self, value: impl Into<String>) -> Self {
        self.display_format = value.into();
        self
    }

    pub fn input_formats(mut self, formats: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.input_formats = formats.into_iter().map(Into::into).collect();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, value: impl Into<String>) {
        self.text = value.into();
        self.state.bump_revision();
    }

    fn parse(&self) -> Result<Option<NaiveDateTime>, InputError> {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let formats = std::iter::once(self.display_format.as_str())
            .chain(self.input_formats.iter().map(String::as_str));
        for format in formats {
            if let Ok(value) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(Some(value));
            }
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return Ok(Some(date.and_time(NaiveTime::MIN)));
            }
        }
        Err(InputError::InvalidDate(trimmed.to_string()))
    }
}

impl Default for DateInput {
    fn default() -> Self {
        Self::new()
    }
}

impl Control for DateInput {
    fn state(&self) -> &ControlState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ControlState {
        &mut self.state
    }

    fn current(&self) -> Option<ControlValue> {
        match self.parse() {
            Ok(value) => value.map(ControlValue::Date),
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
            .attr("type", "text")
            .attr("value", self.text.clone())
            .attr("data-format", self.display_format.clone());
        self.state.render_field(input)
    }
}

impl FormControl for DateInput {
    type Value = NaiveDateTime;

    fn value(&self) -> Result<Option<NaiveDateTime>, InputError> {
        self.parse()
    }

    fn set_value(&mut self, value: Option<NaiveDateTime>) {
        let text = value
            .map(|value| value.format(&self.display_format).to_string())
            .unwrap_or_default();
        self.set_text(text);
    }
}
