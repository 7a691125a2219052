use tracing::{debug, info};

use crate::{
    config::GestureConfig,
    error::{Error, Result},
    frame::{TouchFrame, TouchPoints},
    geometry::TouchPoint,
    gesture::{Gesture, GestureEvent, GestureOutput, GestureType, LifecycleFlags},
    tablet::{TabletGeometry, UnitConverter},
};

/// Caller-chosen identifier of the input binding a gesture drives.
pub type BindingId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GestureHandle(u32);

impl GestureHandle {
    pub fn id(self) -> u32 {
        self.0
    }
}

/// One gesture event tagged with the instance and binding that raised it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DispatchedEvent {
    pub handle: GestureHandle,
    pub binding: BindingId,
    pub gesture_type: GestureType,
    pub event: GestureEvent,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DispatchOutput {
    pub events: Vec<DispatchedEvent>,
}

impl DispatchOutput {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DispatchedEvent> {
        self.events.iter()
    }

    pub fn for_handle(&self, handle: GestureHandle) -> impl Iterator<Item = &GestureEvent> {
        self.events
            .iter()
            .filter(move |e| e.handle == handle)
            .map(|e| &e.event)
    }

    fn extend(
        &mut self,
        handle: GestureHandle,
        binding: BindingId,
        gesture_type: GestureType,
        output: GestureOutput,
    ) {
        self.events.extend(output.events.iter().map(|event| DispatchedEvent {
            handle,
            binding,
            gesture_type,
            event: *event,
        }));
    }
}

struct Slot {
    handle: GestureHandle,
    binding: BindingId,
    gesture: Gesture,
}

/// Owns every configured gesture instance and feeds them touch frames.
pub struct GestureDispatcher {
    converter: UnitConverter,
    slots: Vec<Slot>,
    next_handle: u32,
}

impl GestureDispatcher {
    pub fn new(converter: UnitConverter) -> Self {
        Self {
            converter,
            slots: Vec::new(),
            next_handle: 0,
        }
    }

    pub fn for_tablet(tablet: &TabletGeometry) -> Result<Self> {
        Ok(Self::new(tablet.touch_converter()?))
    }

    pub fn converter(&self) -> UnitConverter {
        self.converter
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn handles(&self) -> impl Iterator<Item = GestureHandle> + '_ {
        self.slots.iter().map(|slot| slot.handle)
    }

    pub fn register(
        &mut self,
        binding: BindingId,
        config: &GestureConfig,
    ) -> Result<GestureHandle> {
        let gesture = Gesture::new(config)?;
        let handle = GestureHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        info!(
            handle = handle.0,
            binding,
            gesture = gesture.gesture_type().as_str(),
            restrained = gesture.is_restrained(),
            "gesture registered"
        );
        self.slots.push(Slot {
            handle,
            binding,
            gesture,
        });
        Ok(handle)
    }

    /// Remove an instance, ending any attempt it has in flight.
    pub fn unregister(&mut self, handle: GestureHandle) -> Result<GestureOutput> {
        let index = self.position(handle)?;
        let mut slot = self.slots.remove(index);
        let output = slot.gesture.end();
        info!(handle = handle.0, binding = slot.binding, "gesture unregistered");
        Ok(output)
    }

    /// End every instance, e.g. when the active profile changes.
    pub fn end_all(&mut self) -> DispatchOutput {
        let mut out = DispatchOutput::default();
        for slot in &mut self.slots {
            let output = slot.gesture.end();
            out.extend(slot.handle, slot.binding, slot.gesture.gesture_type(), output);
        }
        out
    }

    pub fn gesture(&self, handle: GestureHandle) -> Option<&Gesture> {
        self.slots
            .iter()
            .find(|slot| slot.handle == handle)
            .map(|slot| &slot.gesture)
    }

    pub fn flags(&self, handle: GestureHandle) -> Option<LifecycleFlags> {
        self.gesture(handle).map(Gesture::flags)
    }

    /// Route one frame of device-unit touches to every instance.
    ///
    /// Instances with an attempt in flight go first; an idle instance whose
    /// binding is already busy sees no contacts this frame.
    pub fn tick(&mut self, now_ms: u64, frame: &TouchFrame) -> DispatchOutput {
        let points: TouchPoints = frame
            .touches()
            .iter()
            .map(|p| p.with_position(self.converter.to_mm(p.position)))
            .collect();

        let mut order: Vec<usize> = (0..self.slots.len()).collect();
        order.sort_by_key(|&i| !self.slots[i].gesture.is_active());

        let mut busy: Vec<BindingId> = Vec::new();
        let mut out = DispatchOutput::default();
        for i in order {
            let slot = &mut self.slots[i];
            let routed = if !slot.gesture.is_active() && busy.contains(&slot.binding) {
                TouchPoints::new()
            } else {
                route(&slot.gesture, &points)
            };
            let output = slot.gesture.on_input(now_ms, &routed);
            if !output.events.is_empty() {
                debug!(
                    handle = slot.handle.0,
                    binding = slot.binding,
                    events = output.events.len(),
                    "gesture output"
                );
            }
            if slot.gesture.is_active() {
                busy.push(slot.binding);
            }
            out.extend(slot.handle, slot.binding, slot.gesture.gesture_type(), output);
        }
        out
    }

    fn position(&self, handle: GestureHandle) -> Result<usize> {
        self.slots
            .iter()
            .position(|slot| slot.handle == handle)
            .ok_or(Error::UnknownHandle(handle.0))
    }
}

/// Points relevant to one instance, in its coordinate mode.
fn route(gesture: &Gesture, points: &[TouchPoint]) -> TouchPoints {
    let bounds = gesture.bounds();
    let mut routed = TouchPoints::new();
    for point in points {
        let inside = bounds.contains(point.position);
        let relevant = if gesture.is_restrained() {
            inside.then(|| point.with_position(bounds.to_local(point.position)))
        } else {
            (inside || gesture.tracked_contacts().contains(&point.id)).then_some(*point)
        };
        if let Some(point) = relevant {
            let _ = routed.push(point);
        }
    }
    routed
}
