use std::fmt::{Display, Formatter};

/// Stable identifier of a model property.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FieldKey(&'static str);

impl FieldKey {
    pub const fn new(value: &'static str) -> Self {
        Self(value)
    }

    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl Display for FieldKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl From<&'static str> for FieldKey {
    fn from(value: &'static str) -> Self {
        Self(value)
    }
}

/// Typed getter/setter pair for one property of `T`.
pub trait FieldLens<T>: Copy + 'static {
    type Value: 'static;

    fn key(self) -> FieldKey;
    fn get<'a>(self, model: &'a T) -> &'a Self::Value;
    fn set(self, model: &mut T, value: Self::Value);
}

/// A record type that can back a form. `getData` starts from `Default` and
/// writes every bound property.
pub trait FormModel: Default + 'static {
    type Fields;

    fn fields() -> Self::Fields;
    fn field_keys() -> &'static [FieldKey];
}
