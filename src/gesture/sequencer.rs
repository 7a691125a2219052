use tracing::trace;

use super::{node::GestureNode, types::GestureProgress, DispatchContext};
use crate::geometry::{TouchPoint, Vec2};

/// Cursor over an ordered node template. `cursor` is the last matched node;
/// `dwell` holds the entry time of a hold node still being dwelt on.
pub(super) struct NodeSequencer {
    nodes: Vec<GestureNode>,
    cursor: Option<usize>,
    sequence_start_ms: Option<u64>,
    dwell: Option<u64>,
    deadline_ms: u64,
}

impl NodeSequencer {
    /// `nodes` must already have passed `validate_nodes`.
    pub(super) fn new(nodes: Vec<GestureNode>) -> Self {
        let deadline_ms = nodes.last().map_or(0, |last| {
            last.window_end_ms().saturating_add(last.hold_duration_ms)
        });
        Self {
            nodes,
            cursor: None,
            sequence_start_ms: None,
            dwell: None,
            deadline_ms,
        }
    }

    pub(super) fn current_node_index(&self) -> Option<usize> {
        self.cursor
    }

    pub(super) fn reset(&mut self) {
        self.cursor = None;
        self.sequence_start_ms = None;
        self.dwell = None;
    }

    pub(super) fn handle(
        &mut self,
        context: &mut DispatchContext,
        now_ms: u64,
        point: Option<TouchPoint>,
    ) {
        let Some(start_ms) = self.sequence_start_ms else {
            self.try_start(context, now_ms, point);
            return;
        };

        let elapsed = now_ms.saturating_sub(start_ms);
        if elapsed > self.deadline_ms {
            trace!(elapsed, deadline = self.deadline_ms, "node sequence timed out");
            self.abort(context);
            return;
        }
        let Some(point) = point else {
            trace!(cursor = ?self.cursor, "contact lifted mid-sequence");
            self.abort(context);
            return;
        };

        let next = self.next_index();
        if let Some(entered_ms) = self.dwell {
            let node = &self.nodes[next];
            if !node.contains(point.position) {
                trace!(node = next, "left hold node before dwell elapsed");
                self.abort(context);
            } else if now_ms.saturating_sub(entered_ms) >= node.hold_duration_ms {
                self.dwell = None;
                self.advance(context, next);
            }
            return;
        }

        self.seek(context, now_ms, elapsed, point.position);
    }

    fn try_start(&mut self, context: &mut DispatchContext, now_ms: u64, point: Option<TouchPoint>) {
        // Cursor of a finished attempt stays readable until the next frame.
        self.cursor = None;
        let Some(point) = point else {
            return;
        };
        let Some(first) = self.nodes.first() else {
            return;
        };
        if !first.is_within(point.position, 0) {
            return;
        }
        self.sequence_start_ms = Some(now_ms);
        context.start(point.position);
        self.enter(context, 0, now_ms);
    }

    fn seek(&mut self, context: &mut DispatchContext, now_ms: u64, elapsed: u64, position: Vec2) {
        let next = self.next_index();
        let Some(node) = self.nodes.get(next).copied() else {
            return;
        };
        if node.is_within(position, elapsed) {
            self.enter(context, next, now_ms);
            return;
        }
        let skipped_to = self.nodes[next + 1..]
            .iter()
            .find(|later| later.is_within(position, elapsed))
            .map(|later| later.index);
        if let Some(got) = skipped_to {
            trace!(expected = next, got, "node skipped");
            self.abort(context);
            return;
        }
        if elapsed > node.window_end_ms() {
            trace!(node = next, elapsed, "node window missed");
            self.abort(context);
        }
    }

    fn enter(&mut self, context: &mut DispatchContext, index: usize, now_ms: u64) {
        let node = &self.nodes[index];
        if node.is_hold && node.hold_duration_ms > 0 {
            trace!(node = index, hold_ms = node.hold_duration_ms, "dwelling on hold node");
            self.dwell = Some(now_ms);
        } else {
            self.advance(context, index);
        }
    }

    fn advance(&mut self, context: &mut DispatchContext, index: usize) {
        self.cursor = Some(index);
        trace!(node = index, "node matched");
        context.progress(GestureProgress::Node {
            last_completed_node_index: index,
        });
        if index + 1 == self.nodes.len() {
            context.complete();
            self.sequence_start_ms = None;
            self.dwell = None;
        }
    }

    fn abort(&mut self, context: &mut DispatchContext) {
        self.reset();
        context.fail();
    }

    fn next_index(&self) -> usize {
        self.cursor.map_or(0, |c| c + 1)
    }
}
