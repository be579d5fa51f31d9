use crate::contracts::{Control, ControlValue, FormControl, InputError};
use crate::element::Element;
use crate::id::ComponentId;

use super::ControlState;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SelectOption {
    value: String,
    label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }

    pub fn label(mut self, value: impl Into<String>) -> Self {
        self.label = value.into();
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

#[derive(Clone, Debug)]
pub struct Select {
    state: ControlState,
    options: Vec<SelectOption>,
    selected: Option<String>,
    empty_option: bool,
}

impl Select {
    pub fn new() -> Self {
        Self {
            state: ControlState::new("select"),
            options: Vec::new(),
            selected: None,
            empty_option: true,
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.state.set_id(id.into());
        self
    }

    pub fn option(mut self, option: SelectOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn options(mut self, options: impl IntoIterator<Item = SelectOption>) -> Self {
        self.options.extend(options);
        self
    }

    pub fn empty_option(mut self, value: bool) -> Self {
        self.empty_option = value;
        self
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Picks an option by value. Unknown values clear the selection.
    pub fn select(&mut self, value: Option<&str>) {
        self.selected = value
            .filter(|value| self.options.iter().any(|option| option.value == *value))
            .map(str::to_string);
        self.state.bump_revision();
    }
}

impl Default for Select {
    fn default() -> Self {
        Self::new()
    }
}

impl Control for Select {
    fn state(&self) -> &ControlState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ControlState {
        &mut self.state
    }

    fn current(&self) -> Option<ControlValue> {
        self.selected.clone().map(ControlValue::Text)
    }

    fn clear(&mut self) {
        self.select(None);
    }

    fn render(&self) -> Element {
        let mut select = self.state.input("select", "form-select");
        if self.empty_option {
            select = select.child(
                Element::new("option")
                    .attr("value", "")
                    .flag("selected", self.selected.is_none()),
            );
        }
        for option in &self.options {
            select = select.child(
                Element::new("option")
                    .attr("value", option.value.clone())
                    .flag(
                        "selected",
                        self.selected.as_deref() == Some(option.value.as_str()),
                    )
                    .text(option.label.clone()),
            );
        }
        self.state.render_field(select)
    }
}

impl FormControl for Select {
    type Value = String;

    fn value(&self) -> Result<Option<String>, InputError> {
        Ok(self.selected.clone())
    }

    fn set_value(&mut self, value: Option<String>) {
        self.select(value.as_deref());
    }
}
