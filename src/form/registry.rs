use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use super::codec::FieldAccessor;
use super::model::FieldKey;
use super::validation::Validity;
use crate::contracts::Control;

pub type ControlRef<C> = Rc<RefCell<C>>;
pub type ControlHandle = Rc<RefCell<dyn Control>>;

pub(super) type BoundValidator = Rc<dyn Fn() -> Result<Validity, String>>;
pub(super) type BoundMessage = Rc<dyn Fn() -> Option<String>>;

pub(super) struct FieldBinding<K> {
    pub(super) key: FieldKey,
    pub(super) control: ControlHandle,
    pub(super) typed_control: Rc<dyn Any>,
    pub(super) required: bool,
    pub(super) required_message: Option<String>,
    pub(super) legend: Option<String>,
    pub(super) validator: Option<BoundValidator>,
    pub(super) validator_message: Option<BoundMessage>,
    pub(super) accessor: Rc<dyn FieldAccessor<K>>,
}

/// Ordered key to control bindings. At most one binding per key.
pub(super) struct FieldRegistry<K> {
    bindings: Vec<Rc<FieldBinding<K>>>,
}

impl<K> FieldRegistry<K> {
    pub(super) fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Appends `binding`, evicting any previous binding for the same key.
    pub(super) fn insert(&mut self, binding: FieldBinding<K>) -> Option<Rc<FieldBinding<K>>> {
        let evicted = self.remove(binding.key);
        self.bindings.push(Rc::new(binding));
        evicted
    }

    pub(super) fn get(&self, key: FieldKey) -> Option<&Rc<FieldBinding<K>>> {
        self.bindings.iter().find(|binding| binding.key == key)
    }

    pub(super) fn remove(&mut self, key: FieldKey) -> Option<Rc<FieldBinding<K>>> {
        let index = self
            .bindings
            .iter()
            .position(|binding| binding.key == key)?;
        Some(self.bindings.remove(index))
    }

    pub(super) fn clear(&mut self) -> Vec<Rc<FieldBinding<K>>> {
        std::mem::take(&mut self.bindings)
    }

    /// Copy of the binding list; passes iterate over this so callbacks may
    /// mutate the registry.
    pub(super) fn snapshot(&self) -> Vec<Rc<FieldBinding<K>>> {
        self.bindings.clone()
    }

    pub(super) fn keys(&self) -> Vec<FieldKey> {
        self.bindings.iter().map(|binding| binding.key).collect()
    }

    pub(super) fn len(&self) -> usize {
        self.bindings.len()
    }
}
