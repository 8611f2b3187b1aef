//! Identifier validation

use once_cell::sync::Lazy;
use regex::Regex;

static FQCN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_]+\.[a-z0-9_]+(?:\.[a-z0-9_]+)+$").unwrap());

static PLUGIN_TYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z_]+$").unwrap());

/// Whether `input` is a fully-qualified collection name: at least three
/// dot-separated segments of lowercase letters, digits and underscores.
pub fn is_fqcn(input: &str) -> bool {
    FQCN.is_match(input)
}

/// Whether `input` is a plugin type such as `module` or `become`.
pub fn is_plugin_type(input: &str) -> bool {
    PLUGIN_TYPE.is_match(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("foo.bar.baz", true)]
    #[case("foo.bar.baz.bam", true)]
    #[case("a_1.b_2.c_3", true)]
    #[case("foo.bar", false)]
    #[case("foo", false)]
    #[case("", false)]
    #[case("foo. bar.baz", false)]
    #[case("Foo.bar.baz", false)]
    #[case("foo..baz", false)]
    #[case("foo.bar.baz.", false)]
    #[case("foo.bar.baz\n", false)]
    fn fqcn(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_fqcn(input), expected);
    }

    #[rstest]
    #[case("module", true)]
    #[case("test_filter", true)]
    #[case("role", true)]
    #[case("", false)]
    #[case("modul3", false)]
    #[case("Module", false)]
    #[case("mod ule", false)]
    fn plugin_type(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_plugin_type(input), expected);
    }
}
