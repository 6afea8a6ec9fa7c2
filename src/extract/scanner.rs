//! Balanced-bracket scanner
//!
//! A single forward pass with an explicit string/escape state machine.
//! Bracket characters inside string literals are ignored, and an escaped
//! quote (`\"`) does not toggle the in-string state.

use serde_json::Value;

/// Scanner state for one pass over the text.
#[derive(Debug, Clone, Copy, Default)]
struct ScanState {
    /// Nesting balance for the bracket kind being matched
    balance: i32,
    /// Currently inside a string literal
    in_string: bool,
    /// Previous character was an unconsumed backslash
    escaped: bool,
}

/// Extract the first balanced top-level JSON object or array from `text`.
///
/// The earlier of the first `{` and the first `[` decides which bracket
/// kind is matched; the other kind is ignored at the top level (it can
/// still occur nested inside, where it does not affect the balance
/// counter). Returns the exact span from the opening bracket to the
/// position where the balance returns to zero, or `None` when no opening
/// bracket exists or the balance never closes.
pub fn extract_balanced_json(text: &str) -> Option<&str> {
    let start_obj = text.find('{');
    let start_arr = text.find('[');

    let (start, open, close) = match (start_obj, start_arr) {
        (None, None) => return None,
        (Some(o), None) => (o, '{', '}'),
        (None, Some(a)) => (a, '[', ']'),
        (Some(o), Some(a)) => {
            if o < a {
                (o, '{', '}')
            } else {
                (a, '[', ']')
            }
        }
    };

    let mut state = ScanState::default();

    for (offset, ch) in text[start..].char_indices() {
        if state.escaped {
            state.escaped = false;
            continue;
        }

        match ch {
            '\\' => state.escaped = true,
            '"' => state.in_string = !state.in_string,
            _ if state.in_string => {}
            c if c == open => state.balance += 1,
            c if c == close => {
                state.balance -= 1;
                if state.balance == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Extract and parse the first embedded JSON value from `text`.
///
/// Text that already starts with a bracket is tried as-is first, so a
/// document that *is* JSON does not pay for a scan. Malformed candidates
/// yield `None` (the caller moves on to its next source), never an error.
pub fn parse_embedded_json(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        if let Ok(value) = serde_json::from_str(trimmed) {
            return Some(value);
        }
    }

    let candidate = extract_balanced_json(trimmed)?;
    serde_json::from_str(candidate).ok()
}
