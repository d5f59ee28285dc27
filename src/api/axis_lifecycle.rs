use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexSet;
use tracing::debug;

use crate::core::{Axis, AxisId};
use crate::render::Renderer;

use super::ChartEngine;

/// Mount-state transition of an axis between two layout passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisLifecycleEvent {
    Attached(AxisId),
    Removed(AxisId),
}

/// Receives axis mount transitions computed at the end of each layout pass.
///
/// A transition fires exactly once: an axis that stays mounted across
/// passes produces no further events.
pub trait AxisLifecycleListener {
    fn on_attach(&mut self, _id: AxisId, _axis: &Axis) {}

    fn on_remove(&mut self, _id: AxisId, _axis: &Axis) {}
}

/// Listener that records every transition into a shared log.
#[derive(Debug, Clone, Default)]
pub struct AxisLifecycleLog {
    events: Rc<RefCell<Vec<AxisLifecycleEvent>>>,
}

impl AxisLifecycleLog {
    #[must_use]
    pub fn events(&self) -> Vec<AxisLifecycleEvent> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl AxisLifecycleListener for AxisLifecycleLog {
    fn on_attach(&mut self, id: AxisId, _axis: &Axis) {
        self.events
            .borrow_mut()
            .push(AxisLifecycleEvent::Attached(id));
    }

    fn on_remove(&mut self, id: AxisId, _axis: &Axis) {
        self.events.borrow_mut().push(AxisLifecycleEvent::Removed(id));
    }
}

/// Diffs two mounted sets, keeping the order of each set.
#[must_use]
pub(super) fn diff_mounted_axes(
    previous: &IndexSet<AxisId>,
    next: &IndexSet<AxisId>,
) -> Vec<AxisLifecycleEvent> {
    let attached = next
        .iter()
        .filter(|id| !previous.contains(*id))
        .map(|id| AxisLifecycleEvent::Attached(*id));
    let removed = previous
        .iter()
        .filter(|id| !next.contains(*id))
        .map(|id| AxisLifecycleEvent::Removed(*id));
    attached.chain(removed).collect()
}

impl<R: Renderer> ChartEngine<R> {
    pub fn add_axis_lifecycle_listener(&mut self, listener: impl AxisLifecycleListener + 'static) {
        self.core.lifecycle_listeners.push(Box::new(listener));
    }

    /// Replaces the mounted-axis set, notifies listeners of the difference
    /// and drops arena records no panel references anymore.
    pub(super) fn sync_axis_lifecycle(&mut self) {
        let model = &mut self.core.model;
        let mut mounted = IndexSet::new();
        for panel in model.panels.values() {
            mounted.extend(panel.axes());
        }

        let events = diff_mounted_axes(&model.active_axes, &mounted);
        for event in &events {
            let (id, attached) = match *event {
                AxisLifecycleEvent::Attached(id) => (id, true),
                AxisLifecycleEvent::Removed(id) => (id, false),
            };
            let Some(axis) = model.axes.get(id) else {
                continue;
            };
            debug!(axis = id.raw(), name = axis.name(), attached, "axis lifecycle");
            for listener in &mut self.core.lifecycle_listeners {
                if attached {
                    listener.on_attach(id, axis);
                } else {
                    listener.on_remove(id, axis);
                }
            }
        }
        model.active_axes = mounted;

        let orphaned: Vec<AxisId> = model
            .axes
            .ids()
            .filter(|id| {
                !model.active_axes.contains(id)
                    && !model.panels.values().any(|panel| panel.primary_axis == *id)
            })
            .collect();
        for id in orphaned {
            model.axes.remove(id);
            model.axis_plots.shift_remove(&id);
        }
    }
}
