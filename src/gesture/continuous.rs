use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use super::{
    types::GestureProgress, utils::wrap_deg, ContactSample, DispatchContext, GestureHsmEvent,
};
use crate::{
    config::{PanConfig, PinchConfig, RotateConfig},
    geometry::{TouchPoint, Vec2},
};

// Below this separation the pinch ratio is meaningless.
const MIN_PINCH_SPAN_MM: f32 = 0.5;

#[derive(Clone, Copy, Debug)]
pub(super) enum ContinuousKind {
    Pan(PanConfig),
    Pinch(PinchConfig),
    Rotate(RotateConfig),
}

pub(super) struct ContinuousMatcher {
    kind: ContinuousKind,
    machine: statig::blocking::StateMachine<ContinuousHsm>,
}

impl ContinuousMatcher {
    pub(super) fn new(kind: ContinuousKind) -> Self {
        Self {
            kind,
            machine: ContinuousHsm::new(kind).state_machine(),
        }
    }

    pub(super) fn handle(
        &mut self,
        context: &mut DispatchContext,
        now_ms: u64,
        contacts: ContactSample,
    ) {
        self.machine
            .handle_with_context(&GestureHsmEvent::Sample { now_ms, contacts }, context);
    }

    pub(super) fn reset(&mut self) {
        self.machine = ContinuousHsm::new(self.kind).state_machine();
    }
}

/// Two-contact measurements taken once per frame.
#[derive(Clone, Copy, Debug, Default)]
struct PairMeasure {
    centroid: Vec2,
    span: f32,
    angle_deg: f32,
}

impl PairMeasure {
    fn of(a: TouchPoint, b: TouchPoint) -> Self {
        Self {
            centroid: a.position.midpoint(b.position),
            span: a.position.distance(b.position),
            angle_deg: (b.position - a.position).angle_deg(),
        }
    }
}

struct ContinuousHsm {
    kind: ContinuousKind,
    origin: PairMeasure,
    last: PairMeasure,
    total_rotation_deg: f32,
}

impl ContinuousHsm {
    fn new(kind: ContinuousKind) -> Self {
        Self {
            kind,
            origin: PairMeasure::default(),
            last: PairMeasure::default(),
            total_rotation_deg: 0.0,
        }
    }

    fn begin(&mut self, measure: PairMeasure) {
        self.origin = measure;
        self.last = measure;
        self.total_rotation_deg = 0.0;
    }

    /// Progress since the previous frame and whether the activation threshold
    /// has been crossed.
    fn observe(&mut self, measure: PairMeasure) -> (GestureProgress, bool) {
        let last = self.last;
        self.last = measure;
        match self.kind {
            ContinuousKind::Pan(cfg) => {
                let total = measure.centroid - self.origin.centroid;
                let progress = GestureProgress::Pan {
                    delta: measure.centroid - last.centroid,
                    total,
                };
                (progress, total.exceeds(cfg.threshold))
            }
            ContinuousKind::Pinch(cfg) => {
                let scale = span_ratio(measure.span, self.origin.span);
                let progress = GestureProgress::Pinch {
                    scale,
                    delta: span_ratio(measure.span, last.span),
                };
                (progress, (scale - 1.0).abs() > cfg.scale_threshold)
            }
            ContinuousKind::Rotate(cfg) => {
                let delta_deg = wrap_deg(measure.angle_deg - last.angle_deg);
                self.total_rotation_deg += delta_deg;
                let progress = GestureProgress::Rotate {
                    angle_deg: self.total_rotation_deg,
                    delta_deg,
                };
                (
                    progress,
                    self.total_rotation_deg.abs() > cfg.angle_threshold_deg,
                )
            }
        }
    }
}

fn span_ratio(span: f32, reference: f32) -> f32 {
    if reference < MIN_PINCH_SPAN_MM {
        1.0
    } else {
        span / reference
    }
}

#[state_machine(initial = "State::idle()")]
impl ContinuousHsm {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &GestureHsmEvent) -> Outcome<State> {
        match event {
            GestureHsmEvent::Sample { contacts, .. } => {
                let Some((a, b)) = contacts.pair() else {
                    return Handled;
                };
                let measure = PairMeasure::of(a, b);
                self.begin(measure);
                context.start(measure.centroid);
                Transition(State::pending())
            }
        }
    }

    #[state]
    fn pending(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Sample { contacts, .. } => {
                let Some((a, b)) = contacts.pair() else {
                    // Fewer than two contacts before the threshold: no gesture.
                    context.fail();
                    return Transition(State::idle());
                };
                let (progress, crossed) = self.observe(PairMeasure::of(a, b));
                if !crossed {
                    return Handled;
                }
                context.activate();
                context.progress(progress);
                Transition(State::active())
            }
        }
    }

    #[state]
    fn active(&mut self, context: &mut DispatchContext, event: &GestureHsmEvent) -> Outcome<State> {
        match event {
            GestureHsmEvent::Sample { contacts, .. } => {
                let Some((a, b)) = contacts.pair() else {
                    context.complete();
                    return Transition(State::idle());
                };
                let (progress, _) = self.observe(PairMeasure::of(a, b));
                context.progress(progress);
                Handled
            }
        }
    }
}
