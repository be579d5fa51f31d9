use crate::element::Element;

/// A `<fieldset>` with a legend wrapping a run of controls.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Fieldset {
    legend: String,
    children: Vec<Element>,
}

impl Fieldset {
    pub fn new(legend: impl Into<String>) -> Self {
        Self {
            legend: legend.into(),
            children: Vec::new(),
        }
    }

    pub fn legend(&self) -> &str {
        &self.legend
    }

    pub fn child(mut self, child: Element) -> Self {
        self.add_child(child);
        self
    }

    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn remove_child(&mut self, id: &str) -> bool {
        let before = self.children.len();
        self.children
            .retain(|child| child.find_by_id(id).is_none());
        before != self.children.len()
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn render(&self) -> Element {
        let legend = Element::new("legend").text(self.legend.clone());
        self.children
            .iter()
            .cloned()
            .fold(Element::new("fieldset").child(legend), |fieldset, child| {
                fieldset.child(child)
            })
    }
}
