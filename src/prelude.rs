pub use crate::components::{
    Alert, AlertKind, Checkbox, DateInput, Fieldset, FileEntry, FileInput, InputType, NumberInput,
    Select, SelectOption, TextInput, Textarea, TriStateCheckbox,
};
pub use crate::contracts::{Control, ControlValue, FieldLike, FormControl};
pub use crate::element::Element;
pub use crate::form::{
    CustomCodec, FieldKey, FieldLens, FieldOptions, Form, FormError, FormModel, FormPanel,
    FormPanelOptions, FormResult, FormStatus, JsonConverters, Validity,
};
pub use crate::style::{FieldLayout, FormType, HorizRatio};
