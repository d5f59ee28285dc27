use indexmap::IndexMap;

use crate::core::{Axis, AxisId};

/// Owner of every axis record. Panels and bindings refer to axes by id, so
/// removing an axis never leaves a dangling reference, only an unknown id.
#[derive(Debug, Clone, Default)]
pub struct AxisArena {
    axes: IndexMap<AxisId, Axis>,
    next_id: u32,
}

impl AxisArena {
    pub fn insert(&mut self, axis: Axis) -> AxisId {
        let id = AxisId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.axes.insert(id, axis);
        id
    }

    #[must_use]
    pub fn get(&self, id: AxisId) -> Option<&Axis> {
        self.axes.get(&id)
    }

    #[must_use]
    pub fn get_mut(&mut self, id: AxisId) -> Option<&mut Axis> {
        self.axes.get_mut(&id)
    }

    #[must_use]
    pub fn contains(&self, id: AxisId) -> bool {
        self.axes.contains_key(&id)
    }

    pub fn remove(&mut self, id: AxisId) -> Option<Axis> {
        self.axes.shift_remove(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AxisId, &Axis)> {
        self.axes.iter().map(|(id, axis)| (*id, axis))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (AxisId, &mut Axis)> {
        self.axes.iter_mut().map(|(id, axis)| (*id, axis))
    }

    pub fn ids(&self) -> impl Iterator<Item = AxisId> + '_ {
        self.axes.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.axes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }
}
