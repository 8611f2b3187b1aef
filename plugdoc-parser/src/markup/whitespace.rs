//! Whitespace normalization
//!
//! Works on maximal runs of space-like characters. Inside a run, the characters
//! listed in [`is_kept_space`] are copied verbatim and split the run into
//! sub-runs; each sub-run of ordinary whitespace is then replaced:
//!
//! - `Strip`: by a single space.
//! - `KeepSingleNewlines`: by a single `\n` if it contains a line break (and
//!   newlines are allowed for the value), else by a single space.
//! - In a code-like value: `\t`, `\n` and `\r` each become a space and every
//!   other character is kept, so the width of the run does not change.

use super::options::Whitespace;

/// Space-like characters that are never rewritten.
pub fn is_kept_space(ch: char) -> bool {
    matches!(
        ch,
        '\u{00A0}' // no-break space
            | '\u{2007}' // figure space
            | '\u{202F}' // narrow no-break space
            | '\u{200B}' // zero width space
            | '\u{200C}' // zero width non-joiner
            | '\u{200D}' // zero width joiner
            | '\u{2060}' // word joiner
            | '\u{FEFF}' // zero width no-break space / BOM
    )
}

fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

fn is_space_like(ch: char) -> bool {
    ch.is_whitespace() || is_kept_space(ch)
}

/// Normalizes `text` according to `mode`.
///
/// `code_like` marks values such as `C(...)` whose spacing matters.
/// `no_newlines` marks title-like values that must stay on one line even under
/// [`Whitespace::KeepSingleNewlines`].
pub fn normalize(text: &str, mode: Whitespace, code_like: bool, no_newlines: bool) -> String {
    if mode == Whitespace::Ignore {
        return text.to_string();
    }
    let keep_newlines = mode == Whitespace::KeepSingleNewlines && !no_newlines;

    let mut result = String::with_capacity(text.len());
    let mut run = String::new();
    for ch in text.chars() {
        if is_space_like(ch) {
            run.push(ch);
        } else {
            if !run.is_empty() {
                push_run(&mut result, &run, code_like, keep_newlines);
                run.clear();
            }
            result.push(ch);
        }
    }
    if !run.is_empty() {
        push_run(&mut result, &run, code_like, keep_newlines);
    }
    result
}

fn push_run(result: &mut String, run: &str, code_like: bool, keep_newlines: bool) {
    let mut start = None;
    for (index, ch) in run.char_indices() {
        if is_kept_space(ch) {
            if let Some(from) = start.take() {
                push_spaces(result, &run[from..index], code_like, keep_newlines);
            }
            result.push(ch);
        } else if start.is_none() {
            start = Some(index);
        }
    }
    if let Some(from) = start {
        push_spaces(result, &run[from..], code_like, keep_newlines);
    }
}

fn push_spaces(result: &mut String, spaces: &str, code_like: bool, keep_newlines: bool) {
    if code_like {
        result.extend(spaces.chars().map(|ch| match ch {
            '\t' | '\n' | '\r' => ' ',
            other => other,
        }));
    } else if keep_newlines && spaces.chars().any(is_line_break) {
        result.push('\n');
    } else {
        result.push(' ');
    }
}
