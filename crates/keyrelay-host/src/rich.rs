//! In-memory rich-text region.
//!
//! [`RunRegion`] models editable rich content as a sequence of text runs
//! (formatting itself is irrelevant to injection; only the run boundaries
//! matter).  The edit range is a pair of `(run, char offset)` positions in
//! document order, collapsed when both are equal.  Like
//! [`BufferField`](crate::field::BufferField), it records notifications and
//! synthesized key events for callers to assert on.

use crate::field::FieldEvent;
use crate::target::{FieldNotification, RichTextRegion, SyntheticKey};

/// Position inside a region: `(run index, char offset within that run)`.
pub type RunPos = (usize, usize);

/// A run-structured editable region.
#[derive(Debug, Default)]
pub struct RunRegion {
    runs: Vec<String>,
    start: RunPos,
    end: RunPos,
    events: Vec<FieldEvent>,
}

fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

impl RunRegion {
    /// An empty region.
    pub fn new() -> Self {
        Self::default()
    }

    /// A region with the given runs and the caret at the end of the last one.
    pub fn from_runs(runs: &[&str]) -> Self {
        let runs: Vec<String> = runs.iter().map(|r| r.to_string()).collect();
        let caret = match runs.last() {
            Some(last) => (runs.len() - 1, last.chars().count()),
            None => (0, 0),
        };
        Self {
            runs,
            start: caret,
            end: caret,
            events: Vec::new(),
        }
    }

    /// Sets the edit range (builder form for tests).  Positions must already
    /// be in document order.
    pub fn with_range(mut self, start: RunPos, end: RunPos) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// The region's full text with run boundaries erased.
    pub fn text(&self) -> String {
        self.runs.concat()
    }

    /// The current runs.
    pub fn runs(&self) -> &[String] {
        &self.runs
    }

    /// The current edit range.
    pub fn range(&self) -> (RunPos, RunPos) {
        (self.start, self.end)
    }

    /// Drains the recorded side effects.
    pub fn take_events(&mut self) -> Vec<FieldEvent> {
        std::mem::take(&mut self.events)
    }
}

impl RichTextRegion for RunRegion {
    fn has_selection(&self) -> bool {
        self.start != self.end
    }

    fn delete_range(&mut self) {
        if self.start == self.end {
            return;
        }
        let (start_run, start_off) = self.start;
        let (end_run, end_off) = self.end;

        if start_run == end_run {
            let run = &mut self.runs[start_run];
            let from = byte_index(run, start_off);
            let to = byte_index(run, end_off);
            run.replace_range(from..to, "");
        } else {
            // Keep the prefix of the start run and the suffix of the end
            // run; everything in between goes away.
            let suffix = {
                let run = &self.runs[end_run];
                run[byte_index(run, end_off)..].to_string()
            };
            let run = &mut self.runs[start_run];
            run.truncate(byte_index(run, start_off));
            run.push_str(&suffix);
            self.runs.drain(start_run + 1..=end_run);
        }

        self.start = (start_run, start_off);
        self.end = self.start;
    }

    fn extend_start_back(&mut self) -> bool {
        if self.has_selection() {
            return false;
        }
        let (run, offset) = self.start;
        if offset == 0 {
            // The range stays within its text run; offset 0 has nothing
            // before it to take.
            return false;
        }
        self.start = (run, offset - 1);
        true
    }

    fn insert_text(&mut self, text: &str) {
        if self.runs.is_empty() {
            self.runs.push(String::new());
            self.start = (0, 0);
            self.end = (0, 0);
        }
        let (run_idx, offset) = self.start;
        let run = &mut self.runs[run_idx];
        run.insert_str(byte_index(run, offset), text);

        let caret = (run_idx, offset + text.chars().count());
        self.start = caret;
        self.end = caret;
    }

    fn notify(&mut self, notification: FieldNotification) {
        self.events.push(FieldEvent::Notification(notification));
    }

    fn dispatch_key(&mut self, event: SyntheticKey) {
        self.events.push(FieldEvent::Key(event));
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_runs_places_caret_after_the_last_run() {
        let region = RunRegion::from_runs(&["bold", "plain"]);
        assert_eq!(region.range(), ((1, 5), (1, 5)));
        assert!(!region.has_selection());
    }

    #[test]
    fn test_insert_at_caret_advances_by_char_count() {
        let mut region = RunRegion::from_runs(&["ab"]).with_range((0, 1), (0, 1));
        region.insert_text("ला");
        assert_eq!(region.text(), "aलाb");
        // "ला" is two chars
        assert_eq!(region.range(), ((0, 3), (0, 3)));
    }

    #[test]
    fn test_insert_into_an_empty_region_creates_a_run() {
        let mut region = RunRegion::new();
        region.insert_text("hi");
        assert_eq!(region.runs(), ["hi"]);
        assert_eq!(region.range(), ((0, 2), (0, 2)));
    }

    #[test]
    fn test_delete_range_within_one_run() {
        let mut region = RunRegion::from_runs(&["hello"]).with_range((0, 1), (0, 4));
        region.delete_range();
        assert_eq!(region.text(), "ho");
        assert_eq!(region.range(), ((0, 1), (0, 1)));
    }

    #[test]
    fn test_delete_range_across_runs_merges_the_remainders() {
        let mut region =
            RunRegion::from_runs(&["abc", "middle", "xyz"]).with_range((0, 2), (2, 1));
        region.delete_range();
        assert_eq!(region.text(), "abyz");
        assert_eq!(region.runs().len(), 1);
        assert_eq!(region.range(), ((0, 2), (0, 2)));
    }

    #[test]
    fn test_delete_range_on_a_collapsed_range_is_a_no_op() {
        let mut region = RunRegion::from_runs(&["abc"]);
        region.delete_range();
        assert_eq!(region.text(), "abc");
    }

    #[test]
    fn test_extend_start_back_steps_one_char() {
        let mut region = RunRegion::from_runs(&["abc"]); // caret at (0, 3)
        assert!(region.extend_start_back());
        assert_eq!(region.range(), ((0, 2), (0, 3)));
    }

    #[test]
    fn test_extend_start_back_at_run_start_refuses() {
        let mut region = RunRegion::from_runs(&["abc", "def"]).with_range((1, 0), (1, 0));
        // Offset 0 never crosses into the previous run.
        assert!(!region.extend_start_back());
        assert_eq!(region.range(), ((1, 0), (1, 0)));
    }

    #[test]
    fn test_extend_start_back_with_active_selection_refuses() {
        let mut region = RunRegion::from_runs(&["abc"]).with_range((0, 1), (0, 2));
        assert!(!region.extend_start_back());
    }
}
