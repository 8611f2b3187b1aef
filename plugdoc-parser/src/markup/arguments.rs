//! Argument extraction for commands with parameters
//!
//! Both extractors start right after the opening `(` of a command and read
//! exactly `count` comma-separated arguments up to the closing `)`. Indices are
//! byte offsets into `input`.
//!
//! - [`parse_unescaped_args`] is used by the classic commands. There is no way
//!   to put a `,` or `)` inside an argument. Spaces next to a separator are
//!   trimmed, except in front of the first and behind the last argument.
//! - [`parse_escaped_args`] is used by the semantic commands. A backslash makes
//!   the next character literal, so `\,` `\)` and `\\` can be used inside
//!   arguments. Spaces around a separating comma are dropped.
//!
//! On failure both return what they collected so far, an end index at the end
//! of the input, and the reason.

use super::error::MarkupError;

/// Result of reading the arguments of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub args: Vec<String>,
    /// Byte offset right after the closing `)`, or the input length on failure.
    pub end: usize,
    pub error: Option<MarkupError>,
}

impl Extraction {
    fn complete(args: Vec<String>, end: usize) -> Self {
        Self {
            args,
            end,
            error: None,
        }
    }

    fn failed(args: Vec<String>, end: usize, error: MarkupError) -> Self {
        Self {
            args,
            end,
            error: Some(error),
        }
    }

    pub fn into_result(self) -> Result<(Vec<String>, usize), MarkupError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok((self.args, self.end)),
        }
    }
}

/// Reads `count` arguments without escaping.
pub fn parse_unescaped_args(input: &str, index: usize, count: usize) -> Extraction {
    let mut args = Vec::new();
    if count == 0 {
        return Extraction::complete(args, index);
    }

    let mut index = index;
    let mut first = true;
    let mut remaining = count;
    while remaining > 1 {
        remaining -= 1;
        let Some(next) = find_from(input, index, ',') else {
            return Extraction::failed(
                args,
                input.len(),
                MarkupError::MissingComma(count - remaining),
            );
        };
        let mut parameter = input[index..next].trim_end_matches(' ');
        if first {
            first = false;
        } else {
            parameter = parameter.trim_start_matches(' ');
        }
        args.push(parameter.to_string());
        index = next + 1;
    }

    let Some(next) = find_from(input, index, ')') else {
        return Extraction::failed(args, input.len(), MarkupError::MissingClosingParenthesis);
    };
    let mut parameter = &input[index..next];
    if !first {
        parameter = parameter.trim_start_matches(' ');
    }
    args.push(parameter.to_string());
    Extraction::complete(args, next + 1)
}

/// Reads `count` arguments where `\` escapes the following character.
pub fn parse_escaped_args(input: &str, index: usize, count: usize) -> Extraction {
    let mut args = Vec::new();
    if count == 0 {
        return Extraction::complete(args, index);
    }

    let mut index = index;
    for parameter in 1..count {
        let mut value = String::new();
        loop {
            let Some(found) = next_escape_or_comma(input, index) else {
                args.push(value);
                return Extraction::failed(
                    args,
                    input.len(),
                    MarkupError::MissingComma(parameter),
                );
            };
            value.push_str(&input[index..found.start]);
            index = found.end;
            match found.escaped {
                Some(ch) => value.push(ch),
                None => break,
            }
        }
        args.push(value);
    }

    let mut value = String::new();
    loop {
        let Some(found) = next_escape_or_closing(input, index) else {
            args.push(value);
            return Extraction::failed(args, input.len(), MarkupError::MissingClosingParenthesis);
        };
        value.push_str(&input[index..found.start]);
        index = found.end;
        match found.escaped {
            Some(ch) => value.push(ch),
            None => break,
        }
    }
    args.push(value);
    Extraction::complete(args, index)
}

/// An escape pair or a delimiter found while scanning escaped arguments.
struct Delimiter {
    start: usize,
    end: usize,
    /// The escaped character, `None` for a delimiter.
    escaped: Option<char>,
}

fn find_from(input: &str, index: usize, needle: char) -> Option<usize> {
    input.get(index..)?.find(needle).map(|offset| index + offset)
}

/// A backslash escapes anything but a line terminator.
fn escape_at(input: &str, position: usize) -> Option<Delimiter> {
    let mut chars = input[position..].chars();
    if chars.next() != Some('\\') {
        return None;
    }
    match chars.next() {
        Some(ch) if !matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}') => Some(Delimiter {
            start: position,
            end: position + 1 + ch.len_utf8(),
            escaped: Some(ch),
        }),
        _ => None,
    }
}

/// Finds the first escape pair or ` *, *` separator at or after `index`.
fn next_escape_or_comma(input: &str, index: usize) -> Option<Delimiter> {
    let bytes = input.as_bytes();
    let mut position = index;
    while position < bytes.len() {
        match bytes[position] {
            b'\\' => {
                if let Some(escape) = escape_at(input, position) {
                    return Some(escape);
                }
                position += 1;
            }
            b' ' | b',' => {
                let mut comma = position;
                while comma < bytes.len() && bytes[comma] == b' ' {
                    comma += 1;
                }
                if comma < bytes.len() && bytes[comma] == b',' {
                    let mut end = comma + 1;
                    while end < bytes.len() && bytes[end] == b' ' {
                        end += 1;
                    }
                    return Some(Delimiter {
                        start: position,
                        end,
                        escaped: None,
                    });
                }
                // Every later start inside this run of spaces fails the same way.
                position = comma;
            }
            _ => position += 1,
        }
    }
    None
}

/// Finds the first escape pair or `)` at or after `index`.
fn next_escape_or_closing(input: &str, index: usize) -> Option<Delimiter> {
    let bytes = input.as_bytes();
    let mut position = index;
    while position < bytes.len() {
        match bytes[position] {
            b'\\' => {
                if let Some(escape) = escape_at(input, position) {
                    return Some(escape);
                }
            }
            b')' => {
                return Some(Delimiter {
                    start: position,
                    end: position + 1,
                    escaped: None,
                })
            }
            _ => {}
        }
        position += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn escaped_parses() {
        let cases: &[(&str, usize, &[&str], usize)] = &[
            ("(a)", 1, &["a"], 3),
            ("(a,b)", 1, &["a,b"], 5),
            ("(a,b,c)", 1, &["a,b,c"], 7),
            ("(a,b)", 2, &["a", "b"], 5),
            ("(a,b,c)", 2, &["a", "b,c"], 7),
            ("(a,b,c)", 3, &["a", "b", "c"], 7),
            ("(a\\,,b\\,\\),c\\))", 3, &["a,", "b,)", "c)"], 15),
        ];
        for (input, count, args, end) in cases {
            assert_eq!(
                parse_escaped_args(input, 1, *count),
                Extraction::complete(strings(args), *end),
                "input {input:?} count {count}"
            );
        }
    }

    #[test]
    fn escaped_errors() {
        assert_eq!(
            parse_escaped_args("(a", 1, 1),
            Extraction::failed(strings(&[""]), 2, MarkupError::MissingClosingParenthesis)
        );
        assert_eq!(
            parse_escaped_args("(a", 1, 2),
            Extraction::failed(strings(&[""]), 2, MarkupError::MissingComma(1))
        );
        assert_eq!(
            parse_escaped_args("(a,b", 1, 2),
            Extraction::failed(strings(&["a", ""]), 4, MarkupError::MissingClosingParenthesis)
        );
        assert_eq!(
            parse_escaped_args("(a\\)b", 1, 1),
            Extraction::failed(strings(&["a)"]), 5, MarkupError::MissingClosingParenthesis)
        );
    }

    #[test]
    fn escaped_separator_absorbs_spaces() {
        assert_eq!(
            parse_escaped_args("( a  ,  b )", 1, 2),
            Extraction::complete(strings(&[" a", "b "]), 11)
        );
        assert_eq!(
            parse_escaped_args("(a \\, b)", 1, 1),
            Extraction::complete(strings(&["a , b"]), 8)
        );
    }

    #[test]
    fn escaped_backslash_before_newline_is_literal() {
        assert_eq!(
            parse_escaped_args("(a\\\nb)", 1, 1),
            Extraction::complete(strings(&["a\\\nb"]), 6)
        );
        assert_eq!(
            parse_escaped_args("(a\\\\)", 1, 1),
            Extraction::complete(strings(&["a\\"]), 5)
        );
    }

    #[test]
    fn escaped_multibyte() {
        assert_eq!(
            parse_escaped_args("(ä\\ö,ü)", 1, 2),
            Extraction::complete(strings(&["äö", "ü"]), "(ä\\ö,ü)".len())
        );
    }

    #[test]
    fn unescaped_parses() {
        let cases: &[(&str, usize, &[&str], usize)] = &[
            ("(a)", 1, &["a"], 3),
            ("(a,b)", 1, &["a,b"], 5),
            ("(a,b,c)", 1, &["a,b,c"], 7),
            ("(a,b)", 2, &["a", "b"], 5),
            ("(a,b,c)", 2, &["a", "b,c"], 7),
            ("(a,b,c)", 3, &["a", "b", "c"], 7),
        ];
        for (input, count, args, end) in cases {
            assert_eq!(
                parse_unescaped_args(input, 1, *count),
                Extraction::complete(strings(args), *end),
                "input {input:?} count {count}"
            );
        }
    }

    #[test]
    fn unescaped_trims_around_separators_only() {
        assert_eq!(
            parse_unescaped_args("( a , b )", 1, 2),
            Extraction::complete(strings(&[" a", "b "]), 9)
        );
        assert_eq!(
            parse_unescaped_args("(foo ,  https://bar.com)", 1, 2),
            Extraction::complete(strings(&["foo", "https://bar.com"]), 24)
        );
        assert_eq!(
            parse_unescaped_args("( bam )", 1, 1),
            Extraction::complete(strings(&[" bam "]), 7)
        );
    }

    #[test]
    fn unescaped_errors() {
        assert_eq!(
            parse_unescaped_args("(a", 1, 1),
            Extraction::failed(vec![], 2, MarkupError::MissingClosingParenthesis)
        );
        assert_eq!(
            parse_unescaped_args("(a", 1, 2),
            Extraction::failed(vec![], 2, MarkupError::MissingComma(1))
        );
        assert_eq!(
            parse_unescaped_args("(a,b", 1, 2),
            Extraction::failed(strings(&["a"]), 4, MarkupError::MissingClosingParenthesis)
        );
        assert_eq!(
            parse_unescaped_args("(a,b)", 1, 3),
            Extraction::failed(strings(&["a"]), 5, MarkupError::MissingComma(2))
        );
    }

    #[test]
    fn zero_count_consumes_nothing() {
        assert_eq!(
            parse_unescaped_args("()", 1, 0),
            Extraction::complete(vec![], 1)
        );
        assert_eq!(parse_escaped_args("()", 1, 0), Extraction::complete(vec![], 1));
    }

    #[test]
    fn into_result() {
        assert_eq!(
            parse_unescaped_args("(a)", 1, 1).into_result(),
            Ok((strings(&["a"]), 3))
        );
        assert_eq!(
            parse_unescaped_args("(a", 1, 1).into_result(),
            Err(MarkupError::MissingClosingParenthesis)
        );
    }
}
