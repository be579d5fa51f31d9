mod binding;
mod codec;
mod controller;
mod model;
mod panel;
mod registry;
mod validation;


pub use binding::FieldOptions;
pub use codec::{CustomCodec, FieldCodec, JsonConverters};
pub use controller::{ConversionError, Form, FormError, FormResult, FormStatus, ValidatorError};
pub use formpanel_derive::FormModel;
pub use model::{FieldKey, FieldLens, FormModel};
pub use panel::{FormEnctype, FormMethod, FormPanel, FormPanelOptions, LayoutGroup};
pub use registry::{ControlHandle, ControlRef};
pub use validation::{
    DEFAULT_FORM_VALIDATOR_MESSAGE, DEFAULT_REQUIRED_MESSAGE, DEFAULT_VALIDATOR_MESSAGE,
    ValidatorOutcome, Validity,
};
