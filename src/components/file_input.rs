use serde::{Deserialize, Serialize};

use crate::contracts::{Control, ControlValue, FormControl, InputError};
use crate::element::Element;
use crate::id::ComponentId;

use super::ControlState;

/// A file picked in a file input. `content` holds a data URL once the host
/// has read the file.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl FileEntry {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            content_type: None,
            content: None,
        }
    }

    pub fn content_type(mut self, value: impl Into<String>) -> Self {
        self.content_type = Some(value.into());
        self
    }

    pub fn content(mut self, value: impl Into<String>) -> Self {
        self.content = Some(value.into());
        self
    }
}

#[derive(Clone, Debug)]
pub struct FileInput {
    state: ControlState,
    files: Vec<FileEntry>,
    multiple: bool,
    accept: Option<String>,
}

impl FileInput {
    pub fn new() -> Self {
        Self {
            state: ControlState::new("file"),
            files: Vec::new(),
            multiple: false,
            accept: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.state.set_id(id.into());
        self
    }

    pub fn multiple(mut self, value: bool) -> Self {
        self.multiple = value;
        self
    }

    pub fn accept(mut self, value: impl Into<String>) -> Self {
        self.accept = Some(value.into());
        self
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    /// Replaces the selection. A single-file input keeps only the first entry.
    pub fn set_files(&mut self, mut files: Vec<FileEntry>) {
        if !self.multiple {
            files.truncate(1);
        }
        self.files = files;
        self.state.bump_revision();
    }
}

impl Default for FileInput {
    fn default() -> Self {
        Self::new()
    }
}

impl Control for FileInput {
    fn state(&self) -> &ControlState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ControlState {
        &mut self.state
    }

    fn current(&self) -> Option<ControlValue> {
        (!self.files.is_empty()).then(|| ControlValue::Files(self.files.clone()))
    }

    fn clear(&mut self) {
        self.set_files(Vec::new());
    }

    fn render(&self) -> Element {
        let names = self
            .files
            .iter()
            .map(|file| file.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let input = self
            .state
            .input("input", "form-control")
            .attr("type", "file")
            .flag("multiple", self.multiple)
            .attr_opt("accept", self.accept.clone())
            .attr_opt("data-files", (!names.is_empty()).then_some(names));
        self.state.render_field(input)
    }
}

impl FormControl for FileInput {
    type Value = Vec<FileEntry>;

    fn value(&self) -> Result<Option<Vec<FileEntry>>, InputError> {
        Ok((!self.files.is_empty()).then(|| self.files.clone()))
    }

    fn set_value(&mut self, value: Option<Vec<FileEntry>>) {
        self.set_files(value.unwrap_or_default());
    }
}
