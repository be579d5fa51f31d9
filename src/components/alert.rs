use crate::element::Element;
use crate::id::ComponentId;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum AlertKind {
    Info,
    Success,
    Warning,
    #[default]
    Error,
}

impl AlertKind {
    const fn class_name(self) -> &'static str {
        match self {
            AlertKind::Info => "alert-info",
            AlertKind::Success => "alert-success",
            AlertKind::Warning => "alert-warning",
            AlertKind::Error => "alert-danger",
        }
    }
}

/// Message region rendered at the top of a form. Hidden until a message is shown.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Alert {
    id: ComponentId,
    kind: AlertKind,
    message: Option<String>,
    visible: bool,
}

impl Alert {
    pub fn new() -> Self {
        Self {
            id: ComponentId::auto("alert"),
            kind: AlertKind::Error,
            message: None,
            visible: false,
        }
    }

    pub fn kind(mut self, value: AlertKind) -> Self {
        self.kind = value;
        self
    }

    pub fn show(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.message = None;
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn render(&self) -> Element {
        Element::new("div")
            .attr("id", self.id.as_str())
            .attr("role", "alert")
            .class("alert")
            .class(self.kind.class_name())
            .flag("hidden", !self.visible)
            .child_opt(self.message.clone())
    }
}

impl Default for Alert {
    fn default() -> Self {
        Self::new()
    }
}
