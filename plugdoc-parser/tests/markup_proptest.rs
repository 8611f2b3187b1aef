//! Property-based tests for the markup parser
//!
//! These check the guarantees every input gets, whatever its content:
//! - text without commands comes back verbatim
//! - with sources enabled, the sources of a paragraph rebuild it exactly
//! - parsing always terminates and never panics
//! - whitespace normalization is idempotent
//! - both argument grammars agree when nothing is escaped

use plugdoc_parser::markup::arguments::{parse_escaped_args, parse_unescaped_args};
use plugdoc_parser::markup::testing::assert_paragraph;
use plugdoc_parser::markup::whitespace::normalize;
use plugdoc_parser::markup::{parse, ErrorPolicy, Part, ParsingOptions, Whitespace};
use proptest::prelude::*;

/// Text that can never contain a command: commands are uppercase.
fn plain_text_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9 ,.()\\\\\t\n]{0,40}"
}

/// Fragments that form valid, broken and partial commands when joined.
fn fragment_strategy() -> impl Strategy<Value = String> {
    let fragments = vec![
        "B(bold)",
        "M(foo.bar.baz)",
        "M(foo)",
        "L(text, https://example.com)",
        "L(unclosed, ",
        "HORIZONTALLINE",
        "O(foo.bar.baz#role:x)",
        "RV(a.b[0]=c)",
        "V(a\\,b\\))",
        "P(foo.bar.baz#lookup)",
        "C( c\t)",
        ")",
        "ä",
        "\u{00A0}",
    ];
    prop_oneof![
        3 => prop::sample::select(fragments).prop_map(str::to_string),
        1 => "[a-zA-Z \t\n]{1,6}",
    ]
}

fn markup_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment_strategy(), 0..12).prop_map(|fragments| fragments.concat())
}

fn whitespace_strategy() -> impl Strategy<Value = Whitespace> {
    prop_oneof![
        Just(Whitespace::Ignore),
        Just(Whitespace::Strip),
        Just(Whitespace::KeepSingleNewlines),
    ]
}

proptest! {
    #[test]
    fn test_text_without_commands_is_verbatim(text in plain_text_strategy()) {
        let document = parse(vec![text.as_str()], &ParsingOptions::default()).unwrap();
        let expected = if text.is_empty() {
            vec![]
        } else {
            vec![Part::text(text.clone())]
        };
        prop_assert_eq!(document, vec![expected]);
    }

    #[test]
    fn test_sources_rebuild_input(
        input in markup_strategy(),
        whitespace in whitespace_strategy(),
    ) {
        let options = ParsingOptions::default()
            .with_add_source(true)
            .with_whitespace(whitespace);
        let document = parse(vec![input.as_str()], &options).unwrap();
        prop_assert_eq!(document.len(), 1);
        assert_paragraph(&document[0]).sources_concatenate_to(&input);
    }

    #[test]
    fn test_arbitrary_input_terminates(input in "\\PC{0,60}", helpful in any::<bool>()) {
        let options = ParsingOptions::default()
            .with_add_source(true)
            .with_helpful_errors(helpful);
        let document = parse(vec![input.as_str()], &options).unwrap();
        assert_paragraph(&document[0]).sources_concatenate_to(&input);
    }

    #[test]
    fn test_ignore_policy_never_emits_errors(input in markup_strategy()) {
        let options = ParsingOptions::default().with_errors(ErrorPolicy::Ignore);
        let document = parse(vec![input.as_str()], &options).unwrap();
        assert_paragraph(&document[0]).no_errors();
    }

    #[test]
    fn test_normalization_is_idempotent(
        text in "[a-z \t\n\r\u{0B}\u{A0}\u{200B}\u{2028}\u{3000}]{0,30}",
        code_like in any::<bool>(),
    ) {
        for mode in [Whitespace::Strip, Whitespace::KeepSingleNewlines] {
            let once = normalize(&text, mode, code_like, false);
            prop_assert_eq!(normalize(&once, mode, code_like, false), once.clone());
        }
    }

    #[test]
    fn test_extractors_agree_without_escapes(args in prop::collection::vec("[a-z0-9.:#]{1,6}", 1..5)) {
        let input = format!("({})", args.join(","));
        let unescaped = parse_unescaped_args(&input, 1, args.len()).into_result();
        let escaped = parse_escaped_args(&input, 1, args.len()).into_result();
        prop_assert_eq!(unescaped.clone(), Ok((args.clone(), input.len())));
        prop_assert_eq!(unescaped, escaped);
    }
}
