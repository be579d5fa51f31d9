use std::any::Any;
use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

use super::codec::{CustomAccessor, CustomCodec, FieldAccessor, FieldCodec, LensAccessor};
use super::controller::{Form, FormError, FormResult, write_cell};
use super::model::{FieldKey, FieldLens, FormModel};
use super::registry::{BoundMessage, BoundValidator, ControlHandle, ControlRef, FieldBinding};
use super::validation::{ValidatorOutcome, Validity};
use crate::contracts::FormControl;

type ControlValidator<C> = Rc<dyn Fn(&C) -> Result<Validity, String>>;
type ControlMessage<C> = Rc<dyn Fn(&C) -> Option<String>>;

/// Per-field settings passed to [`Form::add`].
pub struct FieldOptions<C> {
    required: bool,
    required_message: Option<String>,
    legend: Option<String>,
    validator: Option<ControlValidator<C>>,
    validator_message: Option<ControlMessage<C>>,
}

impl<C> Default for FieldOptions<C> {
    fn default() -> Self {
        Self {
            required: false,
            required_message: None,
            legend: None,
            validator: None,
            validator_message: None,
        }
    }
}

impl<C: FormControl> FieldOptions<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, value: bool) -> Self {
        self.required = value;
        self
    }

    /// Also marks the field required.
    pub fn required_message(mut self, value: impl Into<String>) -> Self {
        self.required = true;
        self.required_message = Some(value.into());
        self
    }

    pub fn legend(mut self, value: impl Into<String>) -> Self {
        self.legend = Some(value.into());
        self
    }

    pub fn validator<F, R>(mut self, validator: F) -> Self
    where
        F: Fn(&C) -> R + 'static,
        R: ValidatorOutcome,
    {
        self.validator = Some(Rc::new(move |control: &C| validator(control).into_outcome()));
        self
    }

    pub fn validator_message<F, M>(mut self, message: F) -> Self
    where
        F: Fn(&C) -> M + 'static,
        M: Into<Option<String>>,
    {
        self.validator_message = Some(Rc::new(move |control: &C| message(control).into()));
        self
    }
}

impl<K: FormModel> Form<K> {
    /// Binds `control` to the property behind `lens`. A previous binding for
    /// the same key is replaced.
    pub fn add<L, C>(
        &self,
        lens: L,
        control: C,
        options: FieldOptions<C>,
    ) -> FormResult<ControlRef<C>>
    where
        L: FieldLens<K>,
        L::Value: FieldCodec<C::Value>,
        C: FormControl,
    {
        let control = Rc::new(RefCell::new(control));
        let accessor = LensAccessor {
            lens,
            control: control.clone(),
            model: PhantomData,
        };
        self.add_internal(lens.key(), control, Rc::new(accessor), options)
    }

    /// Binds a text control to a property of any type; `codec` does the
    /// coercion in both directions.
    pub fn add_custom<L, C>(
        &self,
        lens: L,
        control: C,
        codec: CustomCodec<L::Value>,
        options: FieldOptions<C>,
    ) -> FormResult<ControlRef<C>>
    where
        L: FieldLens<K>,
        C: FormControl<Value = String>,
    {
        let control = Rc::new(RefCell::new(control));
        let accessor = CustomAccessor {
            lens,
            control: control.clone(),
            codec,
            model: PhantomData,
        };
        self.add_internal(lens.key(), control, Rc::new(accessor), options)
    }

    fn add_internal<C: FormControl>(
        &self,
        key: FieldKey,
        control: ControlRef<C>,
        accessor: Rc<dyn FieldAccessor<K>>,
        options: FieldOptions<C>,
    ) -> FormResult<ControlRef<C>> {
        let FieldOptions {
            required,
            required_message,
            legend,
            validator,
            validator_message,
        } = options;

        control
            .try_borrow_mut()
            .map_err(|_| FormError::ControlBusy {
                key,
                context: "binding control",
            })?
            .set_required(required);

        let validator: Option<BoundValidator> = validator.map(|validator| {
            let control = control.clone();
            Rc::new(move || {
                let control = control
                    .try_borrow()
                    .map_err(|_| format!("control `{key}` is already in use"))?;
                validator(&control)
            }) as BoundValidator
        });
        let validator_message: Option<BoundMessage> = validator_message.map(|message| {
            let control = control.clone();
            Rc::new(move || control.try_borrow().ok().and_then(|control| message(&control)))
                as BoundMessage
        });

        let handle: ControlHandle = control.clone();
        let typed: Rc<dyn Any> = control.clone();
        let binding = FieldBinding {
            key,
            control: handle,
            typed_control: typed,
            required,
            required_message,
            legend: legend.clone(),
            validator,
            validator_message,
            accessor,
        };

        let replaced = write_cell(&self.registry, "binding field")?
            .insert(binding)
            .is_some();
        if replaced {
            tracing::debug!(field = %key, legend = ?legend, "field rebound, previous control evicted");
        } else {
            tracing::debug!(field = %key, legend = ?legend, "field bound");
        }
        Ok(control)
    }
}
