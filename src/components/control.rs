use crate::element::Element;
use crate::id::ComponentId;
use crate::style::{ClassList, FieldLayout};

/// Decoration and bookkeeping shared by every form control.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ControlState {
    id: ComponentId,
    name: Option<String>,
    label: Option<String>,
    required: bool,
    disabled: bool,
    validation_error: Option<String>,
    layout: FieldLayout,
    revision: u64,
}

impl ControlState {
    pub fn new(prefix: &str) -> Self {
        Self {
            id: ComponentId::auto(prefix),
            name: None,
            label: None,
            required: false,
            disabled: false,
            validation_error: None,
            layout: FieldLayout::default(),
            revision: 0,
        }
    }

    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    pub fn set_id(&mut self, id: ComponentId) {
        self.id = id;
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn validation_error(&self) -> Option<&str> {
        self.validation_error.as_deref()
    }

    pub fn set_validation_error(&mut self, error: Option<String>) {
        self.validation_error = error;
    }

    pub fn layout(&self) -> FieldLayout {
        self.layout
    }

    pub fn set_layout(&mut self, layout: FieldLayout) {
        self.layout = layout;
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Called by controls whenever their value changes.
    pub fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    pub(crate) fn input(&self, tag: &str, base_class: &str) -> Element {
        let mut classes = ClassList::new().with(base_class);
        if self.validation_error.is_some() {
            classes.add("is-invalid");
        }
        Element::new(tag)
            .attr("id", self.id.as_str())
            .attr_opt("name", self.name.clone())
            .flag("required", self.required)
            .flag("disabled", self.disabled)
            .attr_opt(
                "aria-invalid",
                self.validation_error.as_ref().map(|_| "true"),
            )
            .classes(classes)
    }

    fn feedback(&self) -> Option<Element> {
        self.validation_error.as_ref().map(|message| {
            Element::new("div")
                .class("invalid-feedback")
                .text(message.clone())
        })
    }

    fn wrapper(&self, classes: ClassList) -> Element {
        let wrapper = Element::new("div").classes(classes);
        if self.required {
            wrapper.class("required")
        } else {
            wrapper
        }
    }

    pub(crate) fn render_field(&self, input: Element) -> Element {
        let classes = self.layout.classes();
        let label = self.label.as_ref().map(|label| {
            Element::new("label")
                .attr("for", self.id.as_str())
                .classes(classes.label.clone())
                .text(label.clone())
        });
        let wrapper = self.wrapper(classes.wrapper).child_opt(label);
        match classes.input_column {
            Some(column) => wrapper.child(
                Element::new("div")
                    .classes(column)
                    .child(input)
                    .child_opt(self.feedback()),
            ),
            None => wrapper.child(input).child_opt(self.feedback()),
        }
    }

    /// Check-style controls put the label after the input.
    pub(crate) fn render_check(&self, input: Element) -> Element {
        let classes = self.layout.classes();
        let label = self.label.as_ref().map(|label| {
            Element::new("label")
                .attr("for", self.id.as_str())
                .class("form-check-label")
                .text(label.clone())
        });
        let check = Element::new("div")
            .class("form-check")
            .child(input)
            .child_opt(label)
            .child_opt(self.feedback());
        match (self.layout, classes.input_column) {
            (FieldLayout::Horizontal(ratio), Some(column)) => {
                let column = column.with(format!("offset-sm-{}", ratio.label_columns()));
                self.wrapper(classes.wrapper)
                    .child(Element::new("div").classes(column).child(check))
            }
            _ => self.wrapper(classes.wrapper).child(check),
        }
    }
}
