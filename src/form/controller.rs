use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use super::codec::JsonConverters;
use super::model::{FieldKey, FormModel};
use super::registry::{ControlHandle, ControlRef, FieldBinding, FieldRegistry};
use super::validation::{ValidatorOutcome, Validity};
use crate::contracts::{ControlValue, FormControl};

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("cannot convert `{key}`: {reason}")]
pub struct ConversionError {
    pub key: FieldKey,
    pub reason: String,
}

impl ConversionError {
    pub(super) fn new(key: FieldKey, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::warn!(field = %key, %reason, "form value conversion failed");
        Self { key, reason }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ValidatorError {
    #[error("validator for `{key}` failed: {message}")]
    Field { key: FieldKey, message: String },
    #[error("form validator failed: {message}")]
    Form { message: String },
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("form state is already in use while {0}")]
    StateBorrowed(&'static str),
    #[error("control `{key}` is already in use while {context}")]
    ControlBusy {
        key: FieldKey,
        context: &'static str,
    },
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error(transparent)]
    Validator(#[from] ValidatorError),
}

pub type FormResult<T> = Result<T, FormError>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FormStatus {
    Unbound,
    Bound,
    Validated { valid: bool },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum StatusMark {
    Unbound,
    Bound,
    Validated { valid: bool, stamp: u64 },
}

pub(super) struct FormState {
    pub(super) status: StatusMark,
    pub(super) form_error: Option<String>,
}

pub(super) type FormValidatorFn<K> = Rc<dyn Fn(&Form<K>) -> Result<Validity, String>>;
pub(super) type FormMessageFn<K> = Rc<dyn Fn(&Form<K>) -> Option<String>>;

pub(super) struct FormHooks<K: FormModel> {
    pub(super) validator: Option<FormValidatorFn<K>>,
    pub(super) validator_message: Option<FormMessageFn<K>>,
}

/// Non-visual form engine: bindings, codec and validation over model `K`.
///
/// Cloning yields another handle to the same form, so callbacks can hold one.
pub struct Form<K: FormModel> {
    pub(super) registry: Rc<RefCell<FieldRegistry<K>>>,
    pub(super) state: Rc<RefCell<FormState>>,
    pub(super) hooks: Rc<RefCell<FormHooks<K>>>,
    pub(super) converters: Rc<JsonConverters>,
}

impl<K: FormModel> Clone for Form<K> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            state: self.state.clone(),
            hooks: self.hooks.clone(),
            converters: self.converters.clone(),
        }
    }
}

impl<K: FormModel> Default for Form<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: FormModel> Form<K> {
    pub fn new() -> Self {
        Self::with_converters(JsonConverters::new())
    }

    pub fn with_converters(converters: JsonConverters) -> Self {
        Self {
            registry: Rc::new(RefCell::new(FieldRegistry::new())),
            state: Rc::new(RefCell::new(FormState {
                status: StatusMark::Unbound,
                form_error: None,
            })),
            hooks: Rc::new(RefCell::new(FormHooks {
                validator: None,
                validator_message: None,
            })),
            converters: Rc::new(converters),
        }
    }

    pub fn set_validator<F, R>(&self, validator: F) -> FormResult<()>
    where
        F: Fn(&Form<K>) -> R + 'static,
        R: ValidatorOutcome,
    {
        let wrapped: FormValidatorFn<K> =
            Rc::new(move |form: &Form<K>| validator(form).into_outcome());
        write_cell(&self.hooks, "setting form validator")?.validator = Some(wrapped);
        Ok(())
    }

    pub fn clear_validator(&self) -> FormResult<()> {
        write_cell(&self.hooks, "clearing form validator")?.validator = None;
        Ok(())
    }

    pub fn set_validator_message<F, M>(&self, message: F) -> FormResult<()>
    where
        F: Fn(&Form<K>) -> M + 'static,
        M: Into<Option<String>>,
    {
        let wrapped: FormMessageFn<K> = Rc::new(move |form: &Form<K>| message(form).into());
        write_cell(&self.hooks, "setting form validator message")?.validator_message =
            Some(wrapped);
        Ok(())
    }

    pub fn remove(&self, key: FieldKey) -> FormResult<bool> {
        let removed = write_cell(&self.registry, "removing field")?.remove(key);
        if removed.is_some() {
            tracing::debug!(field = %key, "field unbound");
        }
        Ok(removed.is_some())
    }

    pub fn remove_all(&self) -> FormResult<usize> {
        let removed = write_cell(&self.registry, "removing all fields")?.clear();
        tracing::debug!(count = removed.len(), "all fields unbound");
        Ok(removed.len())
    }

    pub fn get_control(&self, key: FieldKey) -> FormResult<Option<ControlHandle>> {
        Ok(read_cell(&self.registry, "reading control")?
            .get(key)
            .map(|binding| binding.control.clone()))
    }

    /// Typed handle to the control bound to `key`, if it is a `C`.
    pub fn control_as<C>(&self, key: FieldKey) -> FormResult<Option<ControlRef<C>>>
    where
        C: FormControl,
    {
        let typed = read_cell(&self.registry, "reading typed control")?
            .get(key)
            .map(|binding| binding.typed_control.clone());
        Ok(typed.and_then(|typed| typed.downcast::<RefCell<C>>().ok()))
    }

    /// Live value of the control bound to `key`; `None` when unbound or empty.
    pub fn get(&self, key: FieldKey) -> FormResult<Option<ControlValue>> {
        let Some(control) = self.get_control(key)? else {
            return Ok(None);
        };
        let control = control.try_borrow().map_err(|_| FormError::ControlBusy {
            key,
            context: "reading control value",
        })?;
        Ok(control.current())
    }

    pub fn keys(&self) -> FormResult<Vec<FieldKey>> {
        Ok(read_cell(&self.registry, "listing field keys")?.keys())
    }

    pub fn len(&self) -> FormResult<usize> {
        Ok(read_cell(&self.registry, "counting fields")?.len())
    }

    pub fn is_empty(&self) -> FormResult<bool> {
        Ok(self.len()? == 0)
    }

    pub fn legend(&self, key: FieldKey) -> FormResult<Option<String>> {
        Ok(read_cell(&self.registry, "reading field legend")?
            .get(key)
            .and_then(|binding| binding.legend.clone()))
    }

    /// Message of the last failed whole-form validation, if any.
    pub fn form_error(&self) -> FormResult<Option<String>> {
        Ok(read_cell(&self.state, "reading form error")?.form_error.clone())
    }

    pub fn status(&self) -> FormResult<FormStatus> {
        let mark = read_cell(&self.state, "reading form status")?.status;
        Ok(match mark {
            StatusMark::Unbound => FormStatus::Unbound,
            StatusMark::Bound => FormStatus::Bound,
            StatusMark::Validated { valid, stamp } => {
                if self.edit_stamp(&self.snapshot("reading form status")?)? == stamp {
                    FormStatus::Validated { valid }
                } else {
                    FormStatus::Bound
                }
            }
        })
    }

    pub(super) fn snapshot(&self, context: &'static str) -> FormResult<Vec<Rc<FieldBinding<K>>>> {
        Ok(read_cell(&self.registry, context)?.snapshot())
    }

    pub(super) fn set_status(&self, status: StatusMark) -> FormResult<()> {
        write_cell(&self.state, "updating form status")?.status = status;
        Ok(())
    }

    /// Fingerprint of the bound controls' revisions.
    pub(super) fn edit_stamp(&self, bindings: &[Rc<FieldBinding<K>>]) -> FormResult<u64> {
        let mut stamp = bindings.len() as u64;
        for binding in bindings {
            let revision = binding
                .control
                .try_borrow()
                .map_err(|_| FormError::ControlBusy {
                    key: binding.key,
                    context: "reading control revision",
                })?
                .revision();
            stamp = stamp.wrapping_mul(31).wrapping_add(revision);
        }
        Ok(stamp)
    }
}

pub(super) fn read_cell<'a, T: ?Sized>(
    cell: &'a RefCell<T>,
    context: &'static str,
) -> FormResult<Ref<'a, T>> {
    cell.try_borrow()
        .map_err(|_| FormError::StateBorrowed(context))
}

pub(super) fn write_cell<'a, T: ?Sized>(
    cell: &'a RefCell<T>,
    context: &'static str,
) -> FormResult<RefMut<'a, T>> {
    cell.try_borrow_mut()
        .map_err(|_| FormError::StateBorrowed(context))
}
