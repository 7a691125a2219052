mod contacts;
mod continuous;
mod hold;
mod lifecycle;
pub mod node;
mod sequencer;
mod swipe;
mod tap;
mod types;
mod utils;

use tracing::debug;

pub use lifecycle::{GesturePhase, LifecycleFlags};
pub use node::{GestureNode, NodeShape};
pub use types::{EventBuffer, GestureEvent, GestureProgress, GestureType, SwipeDirection};

use crate::{
    config::{GestureConfig, GestureKindConfig},
    error::Result,
    geometry::{Area, ContactId, TouchPoint, Vec2},
};
use contacts::{ContactSample, ContactTracker};
use continuous::{ContinuousKind, ContinuousMatcher};
use hold::HoldMatcher;
use lifecycle::Lifecycle;
use sequencer::NodeSequencer;
use swipe::SwipeMatcher;
use tap::TapMatcher;

/// What one `on_input`/`end` call did: which flags flipped, and the events
/// raised for them.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureOutput {
    pub changed: LifecycleFlags,
    pub events: EventBuffer,
}

#[derive(Clone, Copy, Debug)]
enum GestureHsmEvent {
    Sample { now_ms: u64, contacts: ContactSample },
}

#[derive(Debug, Default)]
struct DispatchContext {
    lifecycle: Lifecycle,
    events: EventBuffer,
}

impl DispatchContext {
    fn new(lifecycle: Lifecycle) -> Self {
        Self {
            lifecycle,
            events: EventBuffer::new(),
        }
    }

    fn start(&mut self, start_position: Vec2) {
        self.lifecycle.start(&mut self.events, start_position);
    }

    fn activate(&mut self) {
        self.lifecycle.activate(&mut self.events);
    }

    fn progress(&mut self, progress: GestureProgress) {
        self.lifecycle.progress(&mut self.events, progress);
    }

    fn swiped(&mut self, direction: SwipeDirection) {
        self.lifecycle.swiped(&mut self.events, direction);
    }

    fn complete(&mut self) {
        self.lifecycle.complete(&mut self.events);
    }

    fn fail(&mut self) {
        self.lifecycle.fail(&mut self.events);
    }
}

enum Matcher {
    Tap(TapMatcher),
    Hold(HoldMatcher),
    Swipe(SwipeMatcher),
    Pan(ContinuousMatcher),
    Pinch(ContinuousMatcher),
    Rotate(ContinuousMatcher),
    NodeBased(NodeSequencer),
}

impl Matcher {
    fn from_config(kind: &GestureKindConfig) -> Self {
        match kind {
            GestureKindConfig::Tap(cfg) => Self::Tap(TapMatcher::new(*cfg)),
            GestureKindConfig::Hold(cfg) => Self::Hold(HoldMatcher::new(*cfg)),
            GestureKindConfig::Swipe(cfg) => Self::Swipe(SwipeMatcher::new(*cfg)),
            GestureKindConfig::Pan(cfg) => {
                Self::Pan(ContinuousMatcher::new(ContinuousKind::Pan(*cfg)))
            }
            GestureKindConfig::Pinch(cfg) => {
                Self::Pinch(ContinuousMatcher::new(ContinuousKind::Pinch(*cfg)))
            }
            GestureKindConfig::Rotate(cfg) => {
                Self::Rotate(ContinuousMatcher::new(ContinuousKind::Rotate(*cfg)))
            }
            GestureKindConfig::NodeBased(cfg) => {
                Self::NodeBased(NodeSequencer::new(cfg.nodes.clone()))
            }
        }
    }

    fn contact_capacity(&self) -> usize {
        match self {
            Self::Pan(_) | Self::Pinch(_) | Self::Rotate(_) => 2,
            Self::Tap(_) | Self::Hold(_) | Self::Swipe(_) | Self::NodeBased(_) => 1,
        }
    }

    fn handle(&mut self, context: &mut DispatchContext, now_ms: u64, contacts: ContactSample) {
        match self {
            Self::Tap(m) => m.handle(context, now_ms, contacts),
            Self::Hold(m) => m.handle(context, now_ms, contacts),
            Self::Swipe(m) => m.handle(context, now_ms, contacts),
            Self::Pan(m) | Self::Pinch(m) | Self::Rotate(m) => m.handle(context, now_ms, contacts),
            Self::NodeBased(m) => m.handle(context, now_ms, contacts.primary),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Tap(m) => m.reset(),
            Self::Hold(m) => m.reset(),
            Self::Swipe(m) => m.reset(),
            Self::Pan(m) | Self::Pinch(m) | Self::Rotate(m) => m.reset(),
            Self::NodeBased(m) => m.reset(),
        }
    }
}

/// One configured gesture instance: the shared lifecycle record plus the
/// matching state of its variant.
pub struct Gesture {
    gesture_type: GestureType,
    bounds: Area,
    restrained: bool,
    lifecycle: Lifecycle,
    contacts: ContactTracker,
    matcher: Matcher,
}

impl Gesture {
    pub fn new(config: &GestureConfig) -> Result<Self> {
        config.validate()?;
        let matcher = Matcher::from_config(&config.kind);
        Ok(Self {
            gesture_type: config.kind.gesture_type(),
            bounds: config.bounds,
            restrained: config.restrained,
            lifecycle: Lifecycle::default(),
            contacts: ContactTracker::new(matcher.contact_capacity()),
            matcher,
        })
    }

    pub fn gesture_type(&self) -> GestureType {
        self.gesture_type
    }

    pub fn bounds(&self) -> &Area {
        &self.bounds
    }

    pub fn is_restrained(&self) -> bool {
        self.restrained
    }

    pub fn flags(&self) -> LifecycleFlags {
        self.lifecycle.flags()
    }

    pub fn phase(&self) -> GesturePhase {
        self.flags().phase()
    }

    pub fn is_active(&self) -> bool {
        self.flags().is_active()
    }

    /// Contacts owned by the attempt in flight; empty while idle or ended.
    pub fn tracked_contacts(&self) -> &[ContactId] {
        if self.is_active() {
            self.contacts.tracked()
        } else {
            &[]
        }
    }

    /// Direction of the last recognised swipe.
    pub fn swipe_direction(&self) -> Option<SwipeDirection> {
        match &self.matcher {
            Matcher::Swipe(m) => m.direction(),
            _ => None,
        }
    }

    /// Index of the last matched node, `None` before the first match.
    pub fn current_node_index(&self) -> Option<usize> {
        match &self.matcher {
            Matcher::NodeBased(m) => m.current_node_index(),
            _ => None,
        }
    }

    /// Feed the points relevant to this gesture for one frame. An empty slice
    /// means no contact in the region.
    pub fn on_input(&mut self, now_ms: u64, points: &[TouchPoint]) -> GestureOutput {
        if self.lifecycle.flags().ended {
            self.lifecycle.reset();
        }
        let before = self.lifecycle.flags();
        let contacts = self.contacts.select(points);

        let mut context = DispatchContext::new(self.lifecycle);
        self.matcher.handle(&mut context, now_ms, contacts);
        self.lifecycle = context.lifecycle;

        let flags = self.lifecycle.flags();
        if flags.ended {
            self.contacts.retire(points);
        } else if !flags.started {
            self.contacts.release_lifted(points);
        }

        GestureOutput {
            changed: flags.changed_since(before),
            events: context.events,
        }
    }

    /// Force the attempt to end without completing. Idempotent.
    pub fn end(&mut self) -> GestureOutput {
        let before = self.lifecycle.flags();
        if before.ended {
            return GestureOutput::default();
        }
        let mut context = DispatchContext::new(self.lifecycle);
        context.fail();
        self.lifecycle = context.lifecycle;
        self.matcher.reset();
        self.contacts.retire(&[]);
        debug!(gesture = self.gesture_type.as_str(), "gesture ended by caller");
        GestureOutput {
            changed: self.lifecycle.flags().changed_since(before),
            events: context.events,
        }
    }
}

#[cfg(test)]
mod tests;
