mod common;

use common::MapEnvironment;
use envtemplate::error::Error;
use envtemplate::renderer::{MiniJinjaRenderer, TemplateRenderer};
use envtemplate::resolver::resolve;

fn render(template: &str, vars: &[&str], env: &[(&str, &str)]) -> Result<String, Error> {
    let functions = resolve(vars, None).unwrap();
    let renderer = MiniJinjaRenderer::new(&functions, MapEnvironment::new(env));
    renderer.render("<stdin>", template)
}

fn template_message(result: Result<String, Error>) -> (Option<usize>, String) {
    match result {
        Err(Error::TemplateError { line, message, .. }) => (line, message),
        other => panic!("Expected TemplateError, got {:?}", other),
    }
}

#[test]
fn test_noop() {
    assert_eq!(render("foo", &[], &[]).unwrap(), "foo");
}

#[test]
fn test_keeps_trailing_newline() {
    assert_eq!(render("listen: 80\n", &[], &[]).unwrap(), "listen: 80\n");
}

#[test]
fn test_good_variable() {
    assert_eq!(render("foo{{ bar() }}", &["bar=BAR"], &[]).unwrap(), "fooBAR");
    assert_eq!(
        render("{{ bar() }}-{{ bar() }}", &["bar=$HOME"], &[("HOME", "/root")]).unwrap(),
        "$HOME-$HOME"
    );
}

#[test]
fn test_bad_variable() {
    let (line, message) = template_message(render("foo{{ bar() }}", &[], &[]));
    assert_eq!(line, Some(1));
    assert!(message.contains("bar"), "{message}");
}

#[test]
fn test_no_data_context() {
    let (_, message) = template_message(render("{{ bar }}", &["baz=x"], &[]));
    assert!(message.contains("undefined"), "{message}");
}

#[test]
fn test_bad_template() {
    let (line, message) = template_message(render("foo{{", &[], &[]));
    assert_eq!(line, Some(1));
    assert!(message.starts_with("syntax error"), "{message}");
}

#[test]
fn test_error_reports_line_and_column() {
    match render("a: 1\nb: {{ nope() }}\n", &[], &[]) {
        Err(Error::TemplateError { line, column, .. }) => {
            assert_eq!(line, Some(2));
            assert!(column.is_some());
        }
        other => panic!("Expected TemplateError, got {:?}", other),
    }
}

#[test]
fn test_values_are_not_escaped_for_any_file_name() {
    let functions = resolve(&["region=a&b<c>"], None).unwrap();
    let renderer = MiniJinjaRenderer::new(&functions, MapEnvironment::new(&[("HOST", "db.local")]));
    let template = r#"host: {{ env("HOST") }} region: {{ region() }}"#;

    for name in ["app.conf", "app.yaml", "app.yml", "app.json", "app.xml", "app.html", "<stdin>"] {
        assert_eq!(
            renderer.render(name, template).unwrap(),
            "host: db.local region: a&b<c>",
            "rendering as {name}"
        );
    }
}

#[test]
fn test_required_env_missing() {
    let result = render(r#"foo{{ env("BAR") }}"#, &["bar=BAR"], &[]);
    let err = result.unwrap_err();

    assert!(
        err.to_string().contains("no value for $BAR in environment"),
        "{err}"
    );
    assert!(err.to_string().starts_with("template: <stdin>:1"), "{err}");
}

#[test]
fn test_required_env() {
    let out = render(r#"foo{{ env("BAR") }}"#, &["bar=BAR"], &[("BAR", "baz")]).unwrap();
    assert_eq!(out, "foobaz");
}

#[test]
fn test_optional_env_missing() {
    let out = render(r#"foo{{ envOrDefault("BAR", "$BAZ") }}"#, &[], &[("BAZ", "baz")]).unwrap();
    assert_eq!(out, "foobaz");
}

#[test]
fn test_optional_env_present_ignores_default() {
    let out = render(
        r#"foo{{ envOrDefault("BAR", "$BAZ") }}"#,
        &[],
        &[("BAR", "blegga"), ("BAZ", "baz")],
    )
    .unwrap();
    assert_eq!(out, "fooblegga");
}

#[test]
fn test_optional_env_present_value_is_not_expanded() {
    let out = render(
        r#"{{ envOrDefault("BAR", "x") }}"#,
        &[],
        &[("BAR", "$BAZ"), ("BAZ", "baz")],
    )
    .unwrap();
    assert_eq!(out, "$BAZ");
}

#[test]
fn test_engine_syntax_is_available() {
    let template = "{% if tier() == \"prod\" %}replicas: 3{% else %}replicas: 1{% endif %}";
    assert_eq!(render(template, &["tier=prod"], &[]).unwrap(), "replicas: 3");
    assert_eq!(render(template, &["tier=dev"], &[]).unwrap(), "replicas: 1");
}

#[test]
fn test_error_position_on_later_line() {
    let err = render("a: 1\nb: {{ env(\"MISSING\") }}\n", &[], &[]).unwrap_err();
    match err {
        Error::TemplateError { line, .. } => assert_eq!(line, Some(2)),
        other => panic!("Expected TemplateError, got {:?}", other),
    }
}
