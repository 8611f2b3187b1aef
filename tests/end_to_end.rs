//! From configuration to rendered output

use plugdoc::config::Loader;
use plugdoc::{load_defaults, parse, render, to_rst, ErrorPolicy, FormatError, ParsingOptions};
use rstest::rstest;

#[rstest]
#[case("html", "<p><b>x</b> <code class='docutils literal notranslate'>y</code></p>")]
#[case("markdown", "<b>x</b> <code>y</code>")]
#[case("rst", ":strong:`x` :literal:`y`")]
#[case("ansible-doc-text", "*x* `y'")]
fn test_render_with_defaults(#[case] format: &str, #[case] expected: &str) {
    let config = load_defaults().unwrap();
    assert_eq!(render("B(x) C(y)", format, &config).unwrap(), expected);
}

#[test]
fn test_render_with_overrides() {
    let config = Loader::new()
        .set_override("html.style", "plain")
        .unwrap()
        .set_override("html.par_start", "<div>")
        .unwrap()
        .set_override("html.par_end", "</div>")
        .unwrap()
        .set_override("parsing.whitespace", "strip")
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(
        render("  B(a   b)   \n I(c)", "html", &config).unwrap(),
        "<div> <b>a b</b> <em>c</em></div>"
    );
}

#[test]
fn test_exception_policy_surfaces_parse_error() {
    let config = Loader::new()
        .set_override("parsing.errors", "exception")
        .unwrap()
        .build()
        .unwrap();
    match render("M(nope)", "rst", &config) {
        Err(FormatError::Markup(error)) => assert_eq!(
            error.to_string(),
            "While parsing \"M(nope)\" at index 1: Module name \"nope\" is not a FQCN"
        ),
        other => panic!("expected a markup error, got {other:?}"),
    }
}

#[test]
fn test_unknown_format() {
    let config = load_defaults().unwrap();
    assert!(matches!(
        render("x", "docx", &config),
        Err(FormatError::FormatNotFound(_))
    ));
}

#[test]
fn test_documents_from_yaml_options() {
    let options: ParsingOptions = serde_yaml::from_str(
        "errors: ignore\ncurrent_plugin:\n  fqcn: a.b.c\n  type: module\n",
    )
    .unwrap();
    assert_eq!(options.errors, ErrorPolicy::Ignore);
    let document = parse(["O(foo) M(x)", "RV(bar)"], &options).unwrap();
    insta::assert_snapshot!(to_rst(&document, &Default::default()), @r"
    :ansopt:`a.b.c#module:foo`

    :ansretval:`a.b.c#module:bar`
    ");
}
