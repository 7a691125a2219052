use std::collections::HashMap;

use anyhow::{bail, Result};
use serde::Serialize;
use touch_gestures::{
    trace::{event_label, normalize_label, TraceSample},
    GestureDispatcher, GestureHandle, TouchFrame,
};
use tracing::debug;

use crate::scenario::Scenario;

/// Empty frame appended after the last sample so attempts still waiting on a
/// lift or a deadline get a chance to finish.
pub const TAIL_MS: u64 = 200;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReplayEvent {
    pub ms: u64,
    pub gesture: String,
    pub label: &'static str,
}

/// One `<gesture>,<label>` line of an expected-sequence file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpectedEvent {
    pub gesture: String,
    pub label: &'static str,
}

pub fn replay(scenario: &Scenario, samples: &[TraceSample]) -> Result<Vec<ReplayEvent>> {
    let mut dispatcher = GestureDispatcher::for_tablet(&scenario.tablet)?;
    let mut names: HashMap<GestureHandle, &str> = HashMap::new();
    for gesture in &scenario.gestures {
        let handle = dispatcher.register(gesture.binding, &gesture.config)?;
        names.insert(handle, &gesture.name);
    }

    let mut events = Vec::new();
    let mut feed = |dispatcher: &mut GestureDispatcher, ms: u64, frame: &TouchFrame| {
        let out = dispatcher.tick(ms, frame);
        for dispatched in out.iter() {
            let gesture = names.get(&dispatched.handle).copied().unwrap_or("?");
            events.push(ReplayEvent {
                ms,
                gesture: gesture.to_string(),
                label: event_label(&dispatched.event),
            });
        }
    };

    for sample in samples {
        feed(&mut dispatcher, sample.ms, &sample.frame);
    }
    if let Some(last) = samples.last() {
        let tail_ms = last.ms.saturating_add(TAIL_MS);
        debug!(tail_ms, "flushing trace tail");
        feed(&mut dispatcher, tail_ms, &TouchFrame::empty());
    }

    Ok(events)
}

pub fn parse_expected(text: &str) -> Result<Vec<ExpectedEvent>> {
    let mut expected = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let token = line.trim();
        if token.is_empty() || token.starts_with('#') {
            continue;
        }
        let Some((gesture, label)) = token.split_once(',') else {
            bail!("line {line_no}: expected '<gesture>,<label>', got '{token}'");
        };
        let Some(label) = normalize_label(label) else {
            bail!("line {line_no}: unknown event label '{}'", label.trim());
        };
        expected.push(ExpectedEvent {
            gesture: gesture.trim().to_string(),
            label,
        });
    }
    Ok(expected)
}

/// Compare the replayed sequence against the expected one, ignoring
/// timestamps.
pub fn check_expected(actual: &[ReplayEvent], expected: &[ExpectedEvent]) -> Result<()> {
    let actual: Vec<String> = actual
        .iter()
        .map(|e| format!("{},{}", e.gesture, e.label))
        .collect();
    let expected: Vec<String> = expected
        .iter()
        .map(|e| format!("{},{}", e.gesture, e.label))
        .collect();
    if actual != expected {
        bail!(
            "event sequence mismatch\nexpected: {}\nactual:   {}",
            expected.join(" "),
            actual.join(" ")
        );
    }
    Ok(())
}
