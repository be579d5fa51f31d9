use std::fmt::{Display, Formatter};

use serde::Deserialize;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormType {
    Inline,
    Horizontal,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Deserialize)]
#[serde(try_from = "u8")]
pub enum HorizRatio {
    #[default]
    Ratio2,
    Ratio3,
    Ratio4,
    Ratio5,
    Ratio6,
}

impl HorizRatio {
    pub const fn label_columns(self) -> u8 {
        match self {
            HorizRatio::Ratio2 => 2,
            HorizRatio::Ratio3 => 3,
            HorizRatio::Ratio4 => 4,
            HorizRatio::Ratio5 => 5,
            HorizRatio::Ratio6 => 6,
        }
    }

    pub const fn input_columns(self) -> u8 {
        12 - self.label_columns()
    }
}

impl TryFrom<u8> for HorizRatio {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(HorizRatio::Ratio2),
            3 => Ok(HorizRatio::Ratio3),
            4 => Ok(HorizRatio::Ratio4),
            5 => Ok(HorizRatio::Ratio5),
            6 => Ok(HorizRatio::Ratio6),
            other => Err(format!("horizontal ratio must be between 2 and 6, got {other}")),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum FieldLayout {
    #[default]
    Vertical,
    Horizontal(HorizRatio),
    Inline,
}

impl FieldLayout {
    pub fn for_form(form_type: Option<FormType>, ratio: HorizRatio) -> Self {
        match form_type {
            Some(FormType::Inline) => FieldLayout::Inline,
            Some(FormType::Horizontal) => FieldLayout::Horizontal(ratio),
            None => FieldLayout::Vertical,
        }
    }

    pub fn classes(self) -> FieldClasses {
        match self {
            FieldLayout::Vertical => FieldClasses {
                wrapper: ClassList::new().with("mb-3"),
                label: ClassList::new().with("form-label"),
                input_column: None,
            },
            FieldLayout::Horizontal(ratio) => FieldClasses {
                wrapper: ClassList::new().with("row").with("mb-3"),
                label: ClassList::new()
                    .with(format!("col-sm-{}", ratio.label_columns()))
                    .with("col-form-label"),
                input_column: Some(
                    ClassList::new().with(format!("col-sm-{}", ratio.input_columns())),
                ),
            },
            FieldLayout::Inline => FieldClasses {
                wrapper: ClassList::new().with("col-auto"),
                label: ClassList::new().with("visually-hidden"),
                input_column: None,
            },
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldClasses {
    pub wrapper: ClassList,
    pub label: ClassList,
    pub input_column: Option<ClassList>,
}

pub fn form_classes(form_type: Option<FormType>, condensed: bool) -> ClassList {
    let mut classes = match form_type {
        Some(FormType::Inline) => ClassList::new()
            .with("row")
            .with("row-cols-lg-auto")
            .with("g-3")
            .with("align-items-center"),
        Some(FormType::Horizontal) => ClassList::new().with("form-horizontal"),
        None => ClassList::new(),
    };
    if condensed {
        classes.add("form-condensed");
    }
    classes
}

/// Ordered set of CSS class names. Insertion order is kept so rendered
/// output stays stable.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct ClassList {
    names: Vec<String>,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>) -> Self {
        self.add(name);
        self
    }

    pub fn add(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !name.is_empty() && !self.contains(&name) {
            self.names.push(name);
        }
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|existing| existing != name);
        before != self.names.len()
    }

    pub fn extend(mut self, other: Self) -> Self {
        for name in other.names {
            self.add(name);
        }
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|existing| existing == name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S> FromIterator<S> for ClassList
where
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut classes = Self::new();
        for name in iter {
            classes.add(name);
        }
        classes
    }
}

impl Display for ClassList {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.names.join(" "))
    }
}
