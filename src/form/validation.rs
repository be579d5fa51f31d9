use std::fmt::Display;

use super::controller::{
    Form, FormError, FormResult, StatusMark, ValidatorError, read_cell, write_cell,
};
use super::model::FormModel;

pub const DEFAULT_REQUIRED_MESSAGE: &str = "Value is required";
pub const DEFAULT_VALIDATOR_MESSAGE: &str = "Invalid value";
pub const DEFAULT_FORM_VALIDATOR_MESSAGE: &str = "Invalid form data";

/// Verdict of a validator. `Abstain` never fails a field.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Validity {
    Pass,
    Fail,
    #[default]
    Abstain,
}

impl Validity {
    pub const fn is_fail(self) -> bool {
        matches!(self, Validity::Fail)
    }
}

impl From<bool> for Validity {
    fn from(value: bool) -> Self {
        if value { Validity::Pass } else { Validity::Fail }
    }
}

impl From<Option<bool>> for Validity {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Validity::Abstain, Validity::from)
    }
}

/// What a validator closure may return. `Err` means the validator itself
/// failed and is reported as a [`ValidatorError`].
pub trait ValidatorOutcome {
    fn into_outcome(self) -> Result<Validity, String>;
}

impl ValidatorOutcome for Validity {
    fn into_outcome(self) -> Result<Validity, String> {
        Ok(self)
    }
}

impl ValidatorOutcome for bool {
    fn into_outcome(self) -> Result<Validity, String> {
        Ok(self.into())
    }
}

impl ValidatorOutcome for Option<bool> {
    fn into_outcome(self) -> Result<Validity, String> {
        Ok(self.into())
    }
}

impl<V, E> ValidatorOutcome for Result<V, E>
where
    V: ValidatorOutcome,
    E: Display,
{
    fn into_outcome(self) -> Result<Validity, String> {
        match self {
            Ok(value) => value.into_outcome(),
            Err(error) => Err(error.to_string()),
        }
    }
}

impl<K: FormModel> Form<K> {
    /// Runs required checks, field validators and the form validator.
    ///
    /// Stops at the first validator that raises; marks applied to earlier
    /// fields in the pass are kept.
    pub fn validate(&self, mark_fields: bool) -> FormResult<bool> {
        let bindings = self.snapshot("collecting fields for validation")?;

        let mut fields_valid = true;
        for binding in &bindings {
            let key = binding.key;
            let required_failed = binding.required
                && binding
                    .control
                    .try_borrow()
                    .map_err(|_| FormError::ControlBusy {
                        key,
                        context: "checking required value",
                    })?
                    .is_empty();

            let verdict = match &binding.validator {
                Some(validator) => validator().map_err(|message| {
                    tracing::warn!(field = %key, %message, "field validator raised");
                    ValidatorError::Field { key, message }
                })?,
                None => Validity::Abstain,
            };
            let validator_failed = verdict.is_fail();

            if mark_fields {
                let message = if required_failed {
                    Some(
                        binding
                            .required_message
                            .clone()
                            .unwrap_or_else(|| DEFAULT_REQUIRED_MESSAGE.to_string()),
                    )
                } else if validator_failed {
                    Some(
                        binding
                            .validator_message
                            .as_ref()
                            .and_then(|message| message())
                            .unwrap_or_else(|| DEFAULT_VALIDATOR_MESSAGE.to_string()),
                    )
                } else {
                    None
                };
                binding
                    .control
                    .try_borrow_mut()
                    .map_err(|_| FormError::ControlBusy {
                        key,
                        context: "marking validation state",
                    })?
                    .set_validation_error(message);
            }

            if required_failed || validator_failed {
                tracing::trace!(field = %key, required_failed, validator_failed, "field invalid");
                fields_valid = false;
            }
        }

        let (validator, validator_message) = {
            let hooks = read_cell(&self.hooks, "reading form validator")?;
            (hooks.validator.clone(), hooks.validator_message.clone())
        };
        let form_verdict = match validator {
            Some(validator) => validator(self).map_err(|message| {
                tracing::warn!(%message, "form validator raised");
                ValidatorError::Form { message }
            })?,
            None => Validity::Abstain,
        };
        let form_failed = form_verdict.is_fail();

        if mark_fields {
            let form_error = if form_failed {
                Some(
                    validator_message
                        .and_then(|message| message(self))
                        .unwrap_or_else(|| DEFAULT_FORM_VALIDATOR_MESSAGE.to_string()),
                )
            } else {
                None
            };
            write_cell(&self.state, "storing form error")?.form_error = form_error;
        }

        let valid = fields_valid && !form_failed;
        let stamp = self.edit_stamp(&self.snapshot("stamping validation result")?)?;
        self.set_status(StatusMark::Validated { valid, stamp })?;
        tracing::debug!(valid, fields = bindings.len(), "form validated");
        Ok(valid)
    }
}
