mod alert;
mod checkbox;
mod control;
mod date_input;
mod fieldset;
mod file_input;
mod input;
mod number_input;
mod select;
mod textarea;
mod tri_state_checkbox;

#[cfg(test)]
mod test_controls;

pub use alert::{Alert, AlertKind};
pub use checkbox::Checkbox;
pub use control::ControlState;
pub use date_input::DateInput;
pub use fieldset::Fieldset;
pub use file_input::{FileEntry, FileInput};
pub use input::{InputType, TextInput};
pub use number_input::NumberInput;
pub use select::{Select, SelectOption};
pub use textarea::Textarea;
pub use tri_state_checkbox::TriStateCheckbox;
