//! Applying a resolved key action to a located input target.
//!
//! [`apply`] is the single entry point.  The two target kinds get different
//! disciplines:
//!
//! - **Plain fields** are edited through value replacement: read the value,
//!   splice at the selection, write it back, move the caret.  Every applied
//!   action then fires `ValueChanged` followed by `ChangeCommitted`, even
//!   when the edit was a no-op (backspace at position 0), matching how a
//!   host reacts to real typing.
//!
//! - **Rich regions** are edited through their range primitives and fire
//!   exactly one `ValueChanged`, never `ChangeCommitted`.
//!
//! Enter and Tab additionally dispatch a synthesized keydown/keypress/keyup
//! triple before mutating, so listeners keyed on the physical event (e.g.
//! submit-on-Enter) observe the virtual press.
//!
//! All index arithmetic is in chars.  Nothing here returns an error: an
//! action that cannot do anything (delete at the start, delete-selection with
//! no selection) simply leaves the text alone.

use keyrelay_core::relay::messages::TAB_SUBSTITUTE;
use keyrelay_core::KeyAction;

use crate::target::{FieldNotification, InputTarget, RichTextRegion, SyntheticKey, TextField};

/// Applies `action` to `target`, with the notification discipline the target
/// kind requires.
pub fn apply(target: InputTarget<'_>, action: &KeyAction) {
    match target {
        InputTarget::PlainField(field) => apply_plain(field, action),
        InputTarget::RichText(region) => apply_rich(region, action),
    }
}

// ── Plain fields ──────────────────────────────────────────────────────────────

fn apply_plain(field: &mut dyn TextField, action: &KeyAction) {
    match action {
        KeyAction::InsertChars(text) => replace_selection(field, text),
        KeyAction::InsertNewline => {
            dispatch_triple(field, "Enter");
            replace_selection(field, "\n");
        }
        KeyAction::InsertTab => {
            dispatch_triple(field, "Tab");
            replace_selection(field, TAB_SUBSTITUTE);
        }
        KeyAction::DeleteBackward => delete_backward(field),
        KeyAction::DeleteSelection => delete_selection(field),
    }
    field.notify(FieldNotification::ValueChanged);
    field.notify(FieldNotification::ChangeCommitted);
}

fn dispatch_triple(field: &mut dyn TextField, key: &str) {
    for event in SyntheticKey::triple(key, key) {
        field.dispatch_key(event);
    }
}

/// Selection as clamped char indices; a missing selection API degrades to a
/// collapsed caret at the start of the value.
fn normalized_selection(field: &dyn TextField, char_len: usize) -> (usize, usize) {
    let (start, end) = field.selection().unwrap_or((0, 0));
    let end = end.min(char_len);
    (start.min(end), end)
}

fn splice(field: &mut dyn TextField, from: usize, to: usize, text: &str) {
    let chars: Vec<char> = field.value().chars().collect();
    let mut value: String = chars[..from].iter().collect();
    value.push_str(text);
    value.extend(&chars[to..]);

    let cursor = from + text.chars().count();
    field.set_value(value);
    field.set_selection(cursor, cursor);
}

fn replace_selection(field: &mut dyn TextField, text: &str) {
    let len = field.value().chars().count();
    let (start, end) = normalized_selection(field, len);
    splice(field, start, end, text);
}

fn delete_backward(field: &mut dyn TextField) {
    let len = field.value().chars().count();
    let (start, end) = normalized_selection(field, len);
    if start < end {
        splice(field, start, end, "");
    } else if start > 0 {
        splice(field, start - 1, start, "");
    }
    // At position 0 with nothing selected there is nothing to remove; the
    // caller still fires the notifications.
}

fn delete_selection(field: &mut dyn TextField) {
    let len = field.value().chars().count();
    let (start, end) = normalized_selection(field, len);
    if start < end {
        splice(field, start, end, "");
    }
}

// ── Rich regions ──────────────────────────────────────────────────────────────

fn apply_rich(region: &mut dyn RichTextRegion, action: &KeyAction) {
    match action {
        KeyAction::InsertChars(text) => insert_rich(region, text),
        KeyAction::InsertNewline => {
            dispatch_triple_rich(region, "Enter");
            insert_rich(region, "\n");
        }
        KeyAction::InsertTab => {
            dispatch_triple_rich(region, "Tab");
            insert_rich(region, TAB_SUBSTITUTE);
        }
        KeyAction::DeleteBackward => {
            if region.has_selection() || region.extend_start_back() {
                region.delete_range();
            }
        }
        KeyAction::DeleteSelection => region.delete_range(),
    }
    region.notify(FieldNotification::ValueChanged);
}

fn insert_rich(region: &mut dyn RichTextRegion, text: &str) {
    if region.has_selection() {
        region.delete_range();
    }
    region.insert_text(text);
}

fn dispatch_triple_rich(region: &mut dyn RichTextRegion, key: &str) {
    for event in SyntheticKey::triple(key, key) {
        region.dispatch_key(event);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{BufferField, FieldEvent};
    use crate::rich::RunRegion;
    use crate::target::KeyPhase;

    fn apply_to_field(field: &mut BufferField, action: KeyAction) {
        apply(InputTarget::PlainField(field), &action);
    }

    fn apply_to_region(region: &mut RunRegion, action: KeyAction) {
        apply(InputTarget::RichText(region), &action);
    }

    fn notifications(events: &[FieldEvent]) -> Vec<FieldNotification> {
        events
            .iter()
            .filter_map(|e| match e {
                FieldEvent::Notification(n) => Some(*n),
                FieldEvent::Key(_) => None,
            })
            .collect()
    }

    // ── Plain field: insertion ────────────────────────────────────────────────

    #[test]
    fn test_insert_at_caret_advances_cursor_by_char_count() {
        let mut field = BufferField::with_value("ab").with_selection(1, 1);

        apply_to_field(&mut field, KeyAction::InsertChars("ला".to_string()));

        assert_eq!(field.value(), "aलाb");
        assert_eq!(field.selection(), Some((3, 3)));
    }

    #[test]
    fn test_insert_replaces_the_selected_range() {
        let mut field = BufferField::with_value("hello").with_selection(1, 4);

        apply_to_field(&mut field, KeyAction::InsertChars("X".to_string()));

        assert_eq!(field.value(), "hXo");
        assert_eq!(field.selection(), Some((2, 2)));
    }

    #[test]
    fn test_insert_without_selection_api_lands_at_the_start() {
        let mut field = BufferField::without_selection_api("abc");

        apply_to_field(&mut field, KeyAction::InsertChars("d".to_string()));

        assert_eq!(field.value(), "dabc");
    }

    #[test]
    fn test_backspace_without_selection_api_is_a_no_op() {
        let mut field = BufferField::without_selection_api("abc");

        apply_to_field(&mut field, KeyAction::DeleteBackward);

        assert_eq!(field.value(), "abc");
    }

    #[test]
    fn test_insert_fires_value_changed_then_change_committed() {
        let mut field = BufferField::new();

        apply_to_field(&mut field, KeyAction::InsertChars("a".to_string()));

        assert_eq!(
            notifications(&field.take_events()),
            vec![
                FieldNotification::ValueChanged,
                FieldNotification::ChangeCommitted
            ]
        );
    }

    // ── Plain field: deletion ─────────────────────────────────────────────────

    #[test]
    fn test_backspace_removes_one_char_before_the_caret() {
        let mut field = BufferField::with_value("aли").with_selection(2, 2);

        apply_to_field(&mut field, KeyAction::DeleteBackward);

        assert_eq!(field.value(), "aи");
        assert_eq!(field.selection(), Some((1, 1)));
    }

    #[test]
    fn test_backspace_with_selection_removes_the_whole_range() {
        let mut field = BufferField::with_value("hello").with_selection(1, 4);

        apply_to_field(&mut field, KeyAction::DeleteBackward);

        assert_eq!(field.value(), "ho");
        assert_eq!(field.selection(), Some((1, 1)));
    }

    #[test]
    fn test_backspace_at_position_zero_changes_nothing_but_still_notifies() {
        let mut field = BufferField::with_value("abc").with_selection(0, 0);

        apply_to_field(&mut field, KeyAction::DeleteBackward);

        assert_eq!(field.value(), "abc");
        assert_eq!(field.selection(), Some((0, 0)));
        assert_eq!(
            notifications(&field.take_events()),
            vec![
                FieldNotification::ValueChanged,
                FieldNotification::ChangeCommitted
            ]
        );
    }

    #[test]
    fn test_delete_selection_without_a_selection_is_a_no_op() {
        let mut field = BufferField::with_value("abc").with_selection(2, 2);

        apply_to_field(&mut field, KeyAction::DeleteSelection);

        assert_eq!(field.value(), "abc");
        assert_eq!(field.selection(), Some((2, 2)));
    }

    #[test]
    fn test_insert_then_backspaces_restores_value_and_cursor() {
        let mut field = BufferField::with_value("xy").with_selection(1, 1);
        let text = "अनु";

        apply_to_field(&mut field, KeyAction::InsertChars(text.to_string()));
        for _ in 0..text.chars().count() {
            apply_to_field(&mut field, KeyAction::DeleteBackward);
        }

        assert_eq!(field.value(), "xy");
        assert_eq!(field.selection(), Some((1, 1)));
    }

    // ── Plain field: Enter and Tab ────────────────────────────────────────────

    #[test]
    fn test_newline_dispatches_the_key_triple_and_inserts() {
        let mut field = BufferField::with_value("ab").with_selection(2, 2);

        apply_to_field(&mut field, KeyAction::InsertNewline);

        assert_eq!(field.value(), "ab\n");
        let events = field.take_events();
        let phases: Vec<KeyPhase> = events
            .iter()
            .filter_map(|e| match e {
                FieldEvent::Key(k) => Some(k.phase),
                _ => None,
            })
            .collect();
        assert_eq!(
            phases,
            vec![KeyPhase::KeyDown, KeyPhase::KeyPress, KeyPhase::KeyUp]
        );
    }

    #[test]
    fn test_tab_inserts_two_spaces_never_a_literal_tab() {
        let mut field = BufferField::with_value("a").with_selection(1, 1);

        apply_to_field(&mut field, KeyAction::InsertTab);

        assert_eq!(field.value(), "a  ");
        assert!(!field.value().contains('\t'));
    }

    #[test]
    fn test_tab_replaces_an_active_selection() {
        let mut field = BufferField::with_value("hello").with_selection(1, 4);

        apply_to_field(&mut field, KeyAction::InsertTab);

        assert_eq!(field.value(), "h  o");
        assert_eq!(field.selection(), Some((3, 3)));
    }

    // ── Rich regions ──────────────────────────────────────────────────────────

    #[test]
    fn test_rich_insert_fires_exactly_one_value_changed() {
        let mut region = RunRegion::from_runs(&["ab"]);

        apply_to_region(&mut region, KeyAction::InsertChars("c".to_string()));

        assert_eq!(region.text(), "abc");
        assert_eq!(
            notifications(&region.take_events()),
            vec![FieldNotification::ValueChanged]
        );
    }

    #[test]
    fn test_rich_insert_over_selection_replaces_it() {
        let mut region = RunRegion::from_runs(&["hello"]).with_range((0, 1), (0, 4));

        apply_to_region(&mut region, KeyAction::InsertChars("X".to_string()));

        assert_eq!(region.text(), "hXo");
        assert_eq!(region.range(), ((0, 2), (0, 2)));
    }

    #[test]
    fn test_rich_backspace_removes_one_char_within_the_run() {
        let mut region = RunRegion::from_runs(&["abc"]);

        apply_to_region(&mut region, KeyAction::DeleteBackward);

        assert_eq!(region.text(), "ab");
    }

    #[test]
    fn test_rich_backspace_at_run_start_still_notifies() {
        let mut region = RunRegion::from_runs(&["abc", "def"]).with_range((1, 0), (1, 0));

        apply_to_region(&mut region, KeyAction::DeleteBackward);

        assert_eq!(region.text(), "abcdef");
        assert_eq!(
            notifications(&region.take_events()),
            vec![FieldNotification::ValueChanged]
        );
    }

    #[test]
    fn test_rich_backspace_with_selection_removes_the_range() {
        let mut region = RunRegion::from_runs(&["abc", "def"]).with_range((0, 2), (1, 1));

        apply_to_region(&mut region, KeyAction::DeleteBackward);

        assert_eq!(region.text(), "abef");
    }

    #[test]
    fn test_rich_newline_dispatches_triple_and_one_value_changed() {
        let mut region = RunRegion::from_runs(&["ab"]);

        apply_to_region(&mut region, KeyAction::InsertNewline);

        assert_eq!(region.text(), "ab\n");
        let events = region.take_events();
        let keys = events
            .iter()
            .filter(|e| matches!(e, FieldEvent::Key(_)))
            .count();
        assert_eq!(keys, 3);
        assert_eq!(
            notifications(&events),
            vec![FieldNotification::ValueChanged]
        );
    }

    #[test]
    fn test_rich_tab_inserts_the_two_space_substitute() {
        let mut region = RunRegion::from_runs(&["x"]);

        apply_to_region(&mut region, KeyAction::InsertTab);

        assert_eq!(region.text(), "x  ");
    }
}
