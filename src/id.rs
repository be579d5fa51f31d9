use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};

static COMPONENT_ID_ALLOCATOR: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ComponentId(String);

impl ComponentId {
    pub fn auto(prefix: &str) -> Self {
        let next = COMPONENT_ID_ALLOCATOR.fetch_add(1, Ordering::Relaxed);
        Self(format!("{prefix}-{next}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ComponentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ComponentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for ComponentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ComponentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
