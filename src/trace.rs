//! Text form of recorded touch frames and of the events they produce.
//!
//! A trace line is `touch_trace,<ms>,<count>,<id>,<x>,<y>,...[,<raw hex>]`
//! with `count` id/x/y triples in device units. Blank lines, `#` comments,
//! the header and lines with another leading tag are skipped.

use std::fmt::Write as _;

use crate::{
    frame::{TouchFrame, MAX_TOUCHES},
    geometry::TouchPoint,
    gesture::{GestureEvent, SwipeDirection},
};

pub const TRACE_TAG: &str = "touch_trace";
pub const TRACE_HEADER: &str = "touch_trace,ms,count,id,x,y,...,raw";

const HEADER_PREFIX: &str = "touch_trace,ms,";
const FIXED_COLUMNS: usize = 3;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TraceError {
    #[error("line {line}: expected at least {expected} columns, found {found}")]
    MissingColumns {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid {field} '{value}'")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: {extra} unexpected trailing columns")]
    TrailingColumns { line: usize, extra: usize },
}

#[derive(Clone, Debug, PartialEq)]
pub struct TraceSample {
    pub ms: u64,
    pub frame: TouchFrame,
}

pub fn parse_trace(text: &str) -> Result<Vec<TraceSample>, TraceError> {
    let mut samples = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if let Some(sample) = parse_line(index + 1, line)? {
            samples.push(sample);
        }
    }
    Ok(samples)
}

/// Parse one line; `line` is the 1-based line number used in errors.
pub fn parse_line(line: usize, text: &str) -> Result<Option<TraceSample>, TraceError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(HEADER_PREFIX) {
        return Ok(None);
    }
    let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
    if parts[0] != TRACE_TAG {
        return Ok(None);
    }
    if parts.len() < FIXED_COLUMNS {
        return Err(TraceError::MissingColumns {
            line,
            expected: FIXED_COLUMNS,
            found: parts.len(),
        });
    }

    let ms = parse_field(line, "ms", parts[1])?;
    let count: usize = parse_field(line, "count", parts[2])?;
    let expected = count
        .checked_mul(3)
        .and_then(|n| n.checked_add(FIXED_COLUMNS))
        .filter(|_| count <= MAX_TOUCHES)
        .ok_or_else(|| TraceError::InvalidField {
            line,
            field: "count",
            value: parts[2].to_string(),
        })?;
    if parts.len() < expected {
        return Err(TraceError::MissingColumns {
            line,
            expected,
            found: parts.len(),
        });
    }

    let mut points = Vec::with_capacity(count);
    for triple in parts[FIXED_COLUMNS..expected].chunks_exact(3) {
        points.push(TouchPoint::new(
            parse_field(line, "id", triple[0])?,
            parse_field(line, "x", triple[1])?,
            parse_field(line, "y", triple[2])?,
        ));
    }
    let mut frame = TouchFrame::from_points(points);

    match &parts[expected..] {
        [] => {}
        [raw] => {
            let bytes = parse_hex(raw).ok_or_else(|| TraceError::InvalidField {
                line,
                field: "raw",
                value: (*raw).to_string(),
            })?;
            frame = frame.with_raw(&bytes);
        }
        rest => {
            return Err(TraceError::TrailingColumns {
                line,
                extra: rest.len(),
            })
        }
    }

    Ok(Some(TraceSample { ms, frame }))
}

pub fn format_line(ms: u64, frame: &TouchFrame) -> String {
    let mut line = format!("{TRACE_TAG},{ms},{}", frame.len());
    for point in frame.touches() {
        let _ = write!(line, ",{},{},{}", point.id, point.position.x, point.position.y);
    }
    if !frame.raw().is_empty() {
        line.push(',');
        for byte in frame.raw() {
            let _ = write!(line, "{byte:02x}");
        }
    }
    line
}

fn parse_field<T: std::str::FromStr>(
    line: usize,
    field: &'static str,
    value: &str,
) -> Result<T, TraceError> {
    value.parse().map_err(|_| TraceError::InvalidField {
        line,
        field,
        value: value.to_string(),
    })
}

fn parse_hex(text: &str) -> Option<Vec<u8>> {
    if text.len() % 2 != 0 || !text.is_ascii() {
        return None;
    }
    (0..text.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&text[i..i + 2], 16).ok())
        .collect()
}

/// Stable label of an event, as written in expected-sequence files.
pub fn event_label(event: &GestureEvent) -> &'static str {
    match event {
        GestureEvent::Started { .. } => "started",
        GestureEvent::Activated => "activated",
        GestureEvent::Progress(_) => "progress",
        GestureEvent::Swiped { direction } => swipe_label(*direction),
        GestureEvent::Completed => "completed",
        GestureEvent::Ended { completed: true } => "ended",
        GestureEvent::Ended { completed: false } => "failed",
    }
}

fn swipe_label(direction: SwipeDirection) -> &'static str {
    match direction {
        SwipeDirection::Up => "swipe_up",
        SwipeDirection::UpRight => "swipe_up_right",
        SwipeDirection::Right => "swipe_right",
        SwipeDirection::DownRight => "swipe_down_right",
        SwipeDirection::Down => "swipe_down",
        SwipeDirection::DownLeft => "swipe_down_left",
        SwipeDirection::Left => "swipe_left",
        SwipeDirection::UpLeft => "swipe_up_left",
    }
}

/// Canonical form of a label read from an expected-sequence file.
pub fn normalize_label(label: &str) -> Option<&'static str> {
    const LABELS: [&str; 14] = [
        "started",
        "activated",
        "progress",
        "swipe_up",
        "swipe_up_right",
        "swipe_right",
        "swipe_down_right",
        "swipe_down",
        "swipe_down_left",
        "swipe_left",
        "swipe_up_left",
        "completed",
        "ended",
        "failed",
    ];
    let wanted = label.trim().to_ascii_lowercase();
    LABELS.into_iter().find(|known| *known == wanted)
}
