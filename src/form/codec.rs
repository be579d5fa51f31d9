use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt::Display;
use std::marker::PhantomData;
use std::rc::Rc;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Value};

use super::controller::{ConversionError, Form, FormError, FormResult, StatusMark};
use super::model::{FieldKey, FieldLens, FormModel};
use super::registry::ControlRef;
use crate::components::FileEntry;
use crate::contracts::FormControl;

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Two-way mapping between a property type and a control's native value.
///
/// `to_control` fails when the property value has no representation in the
/// control, for example a float beyond the decimal range.
pub trait FieldCodec<V>: Sized {
    /// `Ok(None)` puts the control in its empty state.
    fn to_control(&self) -> Result<Option<V>, String>;
    fn from_control(value: Option<V>) -> Result<Self, String>;
    fn to_json(&self) -> Result<Value, String>;
}

impl FieldCodec<String> for String {
    fn to_control(&self) -> Result<Option<String>, String> {
        Ok((!self.is_empty()).then(|| self.clone()))
    }

    fn from_control(value: Option<String>) -> Result<Self, String> {
        Ok(value.unwrap_or_default())
    }

    fn to_json(&self) -> Result<Value, String> {
        Ok(Value::String(self.clone()))
    }
}

impl FieldCodec<bool> for bool {
    fn to_control(&self) -> Result<Option<bool>, String> {
        Ok(Some(*self))
    }

    fn from_control(value: Option<bool>) -> Result<Self, String> {
        Ok(value.unwrap_or(false))
    }

    fn to_json(&self) -> Result<Value, String> {
        Ok(Value::Bool(*self))
    }
}

impl FieldCodec<Decimal> for Decimal {
    fn to_control(&self) -> Result<Option<Decimal>, String> {
        Ok(Some(*self))
    }

    fn from_control(value: Option<Decimal>) -> Result<Self, String> {
        value.ok_or_else(|| "a number is required".to_string())
    }

    fn to_json(&self) -> Result<Value, String> {
        Ok(decimal_to_json(*self))
    }
}

macro_rules! impl_integer_codec {
    ($($ty:ty => $to:ident),* $(,)?) => {
        $(
            impl FieldCodec<Decimal> for $ty {
                fn to_control(&self) -> Result<Option<Decimal>, String> {
                    Ok(Some(Decimal::from(*self)))
                }

                fn from_control(value: Option<Decimal>) -> Result<Self, String> {
                    let value = value.ok_or_else(|| "a number is required".to_string())?;
                    if !value.fract().is_zero() {
                        return Err(format!("{value} is not a whole number"));
                    }
                    value
                        .$to()
                        .ok_or_else(|| format!("{value} is out of range for {}", stringify!($ty)))
                }

                fn to_json(&self) -> Result<Value, String> {
                    Ok(Value::from(*self))
                }
            }
        )*
    };
}

impl_integer_codec!(
    i8 => to_i8,
    i16 => to_i16,
    i32 => to_i32,
    i64 => to_i64,
    isize => to_isize,
    u8 => to_u8,
    u16 => to_u16,
    u32 => to_u32,
    u64 => to_u64,
    usize => to_usize,
);

// Floats travel through their shortest round-trip text, so every value the
// decimal can hold comes back bit-for-bit.
macro_rules! impl_float_codec {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldCodec<Decimal> for $ty {
                fn to_control(&self) -> Result<Option<Decimal>, String> {
                    if !self.is_finite() {
                        return Err(format!("{self} is not a finite number"));
                    }
                    Decimal::from_str_exact(&self.to_string())
                        .map(|value| Some(value.normalize()))
                        .map_err(|_| format!("{self} cannot be represented as a decimal number"))
                }

                fn from_control(value: Option<Decimal>) -> Result<Self, String> {
                    let value = value.ok_or_else(|| "a number is required".to_string())?;
                    value
                        .to_string()
                        .parse::<$ty>()
                        .map_err(|_| format!("{value} is out of range for {}", stringify!($ty)))
                }

                fn to_json(&self) -> Result<Value, String> {
                    serde_json::Number::from_f64(f64::from(*self))
                        .map(Value::Number)
                        .ok_or_else(|| format!("{self} is not a finite number"))
                }
            }
        )*
    };
}

impl_float_codec!(f32, f64);

impl FieldCodec<NaiveDateTime> for NaiveDateTime {
    fn to_control(&self) -> Result<Option<NaiveDateTime>, String> {
        Ok(Some(*self))
    }

    fn from_control(value: Option<NaiveDateTime>) -> Result<Self, String> {
        value.ok_or_else(|| "a date is required".to_string())
    }

    fn to_json(&self) -> Result<Value, String> {
        Ok(Value::String(self.format(DATE_TIME_FORMAT).to_string()))
    }
}

impl FieldCodec<NaiveDateTime> for NaiveDate {
    fn to_control(&self) -> Result<Option<NaiveDateTime>, String> {
        Ok(Some(self.and_time(NaiveTime::MIN)))
    }

    fn from_control(value: Option<NaiveDateTime>) -> Result<Self, String> {
        value
            .map(|value| value.date())
            .ok_or_else(|| "a date is required".to_string())
    }

    fn to_json(&self) -> Result<Value, String> {
        Ok(Value::String(self.format(DATE_FORMAT).to_string()))
    }
}

impl FieldCodec<NaiveDateTime> for DateTime<Utc> {
    fn to_control(&self) -> Result<Option<NaiveDateTime>, String> {
        Ok(Some(self.naive_utc()))
    }

    fn from_control(value: Option<NaiveDateTime>) -> Result<Self, String> {
        value
            .map(|value| value.and_utc())
            .ok_or_else(|| "a date is required".to_string())
    }

    fn to_json(&self) -> Result<Value, String> {
        Ok(Value::String(self.to_rfc3339_opts(SecondsFormat::AutoSi, true)))
    }
}

impl FieldCodec<Vec<FileEntry>> for Vec<FileEntry> {
    fn to_control(&self) -> Result<Option<Vec<FileEntry>>, String> {
        Ok((!self.is_empty()).then(|| self.clone()))
    }

    fn from_control(value: Option<Vec<FileEntry>>) -> Result<Self, String> {
        Ok(value.unwrap_or_default())
    }

    fn to_json(&self) -> Result<Value, String> {
        serde_json::to_value(self).map_err(|error| error.to_string())
    }
}

/// Nullable properties: an empty control maps to `None`.
impl<V, T> FieldCodec<V> for Option<T>
where
    T: FieldCodec<V>,
{
    fn to_control(&self) -> Result<Option<V>, String> {
        self.as_ref().map_or(Ok(None), T::to_control)
    }

    fn from_control(value: Option<V>) -> Result<Self, String> {
        match value {
            None => Ok(None),
            some => T::from_control(some).map(Some),
        }
    }

    fn to_json(&self) -> Result<Value, String> {
        self.as_ref().map_or(Ok(Value::Null), T::to_json)
    }
}

fn decimal_to_json(value: Decimal) -> Value {
    if value.fract().is_zero() {
        if let Some(integer) = value.to_i64() {
            return Value::from(integer);
        }
    }
    value
        .to_f64()
        .and_then(serde_json::Number::from_f64)
        .map_or_else(|| Value::String(value.to_string()), Value::Number)
}

type TextFn<P> = Rc<dyn Fn(&P) -> Option<String>>;
type ParseFn<P> = Rc<dyn Fn(Option<&str>) -> Result<P, String>>;

/// Host-supplied coercion between a text control and property type `P`.
pub struct CustomCodec<P> {
    to_text: TextFn<P>,
    from_text: ParseFn<P>,
}

impl<P> Clone for CustomCodec<P> {
    fn clone(&self) -> Self {
        Self {
            to_text: self.to_text.clone(),
            from_text: self.from_text.clone(),
        }
    }
}

impl<P: 'static> CustomCodec<P> {
    pub fn new<T, F, E>(to_text: T, from_text: F) -> Self
    where
        T: Fn(&P) -> Option<String> + 'static,
        F: Fn(Option<&str>) -> Result<P, E> + 'static,
        E: Display,
    {
        Self {
            to_text: Rc::new(to_text),
            from_text: Rc::new(move |text| from_text(text).map_err(|error| error.to_string())),
        }
    }
}

impl<T> CustomCodec<Option<T>>
where
    T: FromStr + Display + 'static,
    T::Err: Display,
{
    /// Round-trips through `Display` and `FromStr`; empty text is `None`.
    pub fn parsed() -> Self {
        Self::new(
            |value: &Option<T>| value.as_ref().map(ToString::to_string),
            |text: Option<&str>| match text.map(str::trim).filter(|text| !text.is_empty()) {
                Some(text) => text.parse::<T>().map(Some),
                None => Ok(None),
            },
        )
    }
}

type ConverterFn = Rc<dyn Fn(&dyn Any) -> Option<Value>>;

/// JSON converters keyed by the property's declared type. A registered
/// converter wins over the built-in mapping.
#[derive(Clone, Default)]
pub struct JsonConverters {
    converters: HashMap<TypeId, ConverterFn>,
}

impl JsonConverters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T, F>(mut self, converter: F) -> Self
    where
        T: 'static,
        F: Fn(&T) -> Value + 'static,
    {
        let wrapped: ConverterFn =
            Rc::new(move |value: &dyn Any| value.downcast_ref::<T>().map(&converter));
        self.converters.insert(TypeId::of::<T>(), wrapped);
        self
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.converters.contains_key(&TypeId::of::<T>())
    }

    pub fn convert<T: 'static>(&self, value: &T) -> Option<Value> {
        self.converters
            .get(&TypeId::of::<T>())
            .and_then(|converter| converter(value))
    }
}

/// One direction-agnostic property accessor, erased over the control type.
pub(super) trait FieldAccessor<K> {
    fn load(&self, model: &K) -> FormResult<()>;
    fn store(&self, model: &mut K) -> FormResult<()>;
    fn to_json(&self, converters: &JsonConverters) -> FormResult<Value>;
}

pub(super) struct LensAccessor<K, L, C> {
    pub(super) lens: L,
    pub(super) control: ControlRef<C>,
    pub(super) model: PhantomData<fn(&K)>,
}

impl<K, L, C> LensAccessor<K, L, C>
where
    L: FieldLens<K>,
    L::Value: FieldCodec<C::Value>,
    C: FormControl,
{
    fn read(&self) -> FormResult<L::Value> {
        let key = self.lens.key();
        let raw = self
            .control
            .try_borrow()
            .map_err(|_| busy(key, "reading control value"))?
            .value()
            .map_err(|error| ConversionError::new(key, error.to_string()))?;
        <L::Value as FieldCodec<C::Value>>::from_control(raw)
            .map_err(|reason| ConversionError::new(key, reason).into())
    }
}

impl<K, L, C> FieldAccessor<K> for LensAccessor<K, L, C>
where
    L: FieldLens<K>,
    L::Value: FieldCodec<C::Value>,
    C: FormControl,
{
    fn load(&self, model: &K) -> FormResult<()> {
        let key = self.lens.key();
        let value = self
            .lens
            .get(model)
            .to_control()
            .map_err(|reason| ConversionError::new(key, reason))?;
        self.control
            .try_borrow_mut()
            .map_err(|_| busy(key, "writing control value"))?
            .set_value(value);
        Ok(())
    }

    fn store(&self, model: &mut K) -> FormResult<()> {
        let value = self.read()?;
        self.lens.set(model, value);
        Ok(())
    }

    fn to_json(&self, converters: &JsonConverters) -> FormResult<Value> {
        let value = self.read()?;
        match converters.convert(&value) {
            Some(json) => Ok(json),
            None => value
                .to_json()
                .map_err(|reason| ConversionError::new(self.lens.key(), reason).into()),
        }
    }
}

pub(super) struct CustomAccessor<K, L, C>
where
    L: FieldLens<K>,
{
    pub(super) lens: L,
    pub(super) control: ControlRef<C>,
    pub(super) codec: CustomCodec<L::Value>,
    pub(super) model: PhantomData<fn(&K)>,
}

impl<K, L, C> CustomAccessor<K, L, C>
where
    L: FieldLens<K>,
    C: FormControl<Value = String>,
{
    fn read_text(&self) -> FormResult<Option<String>> {
        let key = self.lens.key();
        self.control
            .try_borrow()
            .map_err(|_| busy(key, "reading control text"))?
            .value()
            .map_err(|error| ConversionError::new(key, error.to_string()).into())
    }

    fn read(&self) -> FormResult<(L::Value, Option<String>)> {
        let text = self.read_text()?;
        let value = (self.codec.from_text)(text.as_deref())
            .map_err(|reason| ConversionError::new(self.lens.key(), reason))?;
        Ok((value, text))
    }
}

impl<K, L, C> FieldAccessor<K> for CustomAccessor<K, L, C>
where
    L: FieldLens<K>,
    C: FormControl<Value = String>,
{
    fn load(&self, model: &K) -> FormResult<()> {
        let text = (self.codec.to_text)(self.lens.get(model));
        self.control
            .try_borrow_mut()
            .map_err(|_| busy(self.lens.key(), "writing control text"))?
            .set_value(text);
        Ok(())
    }

    fn store(&self, model: &mut K) -> FormResult<()> {
        let (value, _) = self.read()?;
        self.lens.set(model, value);
        Ok(())
    }

    fn to_json(&self, converters: &JsonConverters) -> FormResult<Value> {
        let (value, text) = self.read()?;
        Ok(converters
            .convert(&value)
            .unwrap_or_else(|| text.map_or(Value::Null, Value::String)))
    }
}

fn busy(key: FieldKey, context: &'static str) -> FormError {
    FormError::ControlBusy { key, context }
}

impl<K: FormModel> Form<K> {
    /// Pushes every bound property of `model` into its control. Properties
    /// without a binding are ignored. A property the control cannot hold
    /// stops the pass with `FormError::Conversion`; controls loaded before
    /// it keep their new values.
    pub fn set_data(&self, model: &K) -> FormResult<()> {
        let bindings = self.snapshot("loading model into controls")?;
        for binding in &bindings {
            binding.accessor.load(model)?;
        }
        self.set_status(StatusMark::Bound)?;
        tracing::trace!(fields = bindings.len(), "model loaded into form");
        Ok(())
    }

    /// Empties every control without touching any model.
    pub fn clear_data(&self) -> FormResult<()> {
        let bindings = self.snapshot("clearing controls")?;
        for binding in &bindings {
            binding
                .control
                .try_borrow_mut()
                .map_err(|_| busy(binding.key, "clearing control"))?
                .clear();
        }
        self.set_status(StatusMark::Unbound)?;
        tracing::trace!(fields = bindings.len(), "form cleared");
        Ok(())
    }

    /// Builds a fresh model from `K::default()` and the bound controls.
    pub fn get_data(&self) -> FormResult<K> {
        let bindings = self.snapshot("reading model from controls")?;
        let mut model = K::default();
        for binding in &bindings {
            binding.accessor.store(&mut model)?;
        }
        Ok(model)
    }

    /// JSON object keyed by field key, in binding order of the keys.
    pub fn get_data_json(&self) -> FormResult<Value> {
        let bindings = self.snapshot("serializing controls")?;
        let mut object = Map::new();
        for binding in &bindings {
            let value = binding.accessor.to_json(&self.converters)?;
            object.insert(binding.key.as_str().to_string(), value);
        }
        Ok(Value::Object(object))
    }
}
