use casegen_core::proc_macro2::Span;
use casegen_core::*;

fn name(name: &str) -> Expr {
    Expr::Name(name.to_owned())
}

fn call(f: &str, arg: Expr) -> Expr {
    Expr::Call(f.to_owned(), Box::new(arg))
}

#[test]
pub fn parses_text_and_variables() {
    let template = Template::parse("Hello {{name}}!").unwrap();
    assert_eq!(
        template.nodes,
        vec![
            Node::Text("Hello ".to_owned()),
            Node::Variable(name("name")),
            Node::Text("!".to_owned()),
        ]
    );
}

#[test]
pub fn parses_nested_calls() {
    let template = Template::parse("{{joinedWithParens(namesAndTypes(parameters))}}").unwrap();
    assert_eq!(
        template.nodes,
        vec![Node::Variable(call(
            "joinedWithParens",
            call("namesAndTypes", name("parameters"))
        ))]
    );
}

#[test]
pub fn parses_sections() {
    let template = Template::parse("{{#cases}}{{name}}{{/cases}}").unwrap();
    assert_eq!(
        template.nodes,
        vec![Node::Section(
            name("cases"),
            vec![Node::Variable(name("name"))]
        )]
    );

    let template = Template::parse("{{^isLast}}, {{/isLast}}").unwrap();
    assert_eq!(
        template.nodes,
        vec![Node::Inverted(name("isLast"), vec![Node::Text(", ".to_owned())])]
    );
}

#[test]
pub fn sections_nest() {
    let template =
        Template::parse("{{#cases}}{{#parameters}}{{type}}{{/parameters}}{{/cases}}").unwrap();
    assert_eq!(
        template.nodes,
        vec![Node::Section(
            name("cases"),
            vec![Node::Section(
                name("parameters"),
                vec![Node::Variable(name("type"))]
            )]
        )]
    );
}

#[test]
pub fn reports_positions_on_parse_failures() {
    let err = Template::parse("a\nb {{oops").unwrap_err();
    assert!(matches!(err.kind, TemplateErrorKind::UnclosedDelimiter));
    assert_eq!((err.line, err.column), (2, 3));

    let err = Template::parse("{{#cases}}body").unwrap_err();
    assert!(matches!(err.kind, TemplateErrorKind::UnclosedSection(_)));
    assert_eq!((err.line, err.column), (1, 1));

    let err = Template::parse("{{#cases}}{{/other}}").unwrap_err();
    assert!(matches!(err.kind, TemplateErrorKind::UnmatchedClose(_)));

    let err = Template::parse("x {{9bad}}").unwrap_err();
    assert!(matches!(err.kind, TemplateErrorKind::InvalidExpr(_)));

    let err = Template::parse("{{broken(}}").unwrap_err();
    assert!(matches!(err.kind, TemplateErrorKind::InvalidExpr(_)));
}

fn render_for(input: syn::DeriveInput, template: &str) -> (String, Vec<Diagnostic>) {
    let cases = cases_from_input(&input).unwrap();
    let template = Template::parse(template).unwrap();
    let mut diags = Diagnostics::new();
    let out = render(
        &template,
        &Value::Cases(cases),
        Span::call_site(),
        &mut diags,
    );
    (out, diags.into_vec())
}

#[test]
pub fn renders_cases_in_declaration_order() {
    let (out, diags) = render_for(
        syn::parse_quote! {
            enum Fruit { Apple, Banana, Cherry }
        },
        "{{#cases}}{{name}}{{^isLast}}, {{/isLast}}{{/cases}}",
    );
    assert!(diags.is_empty());
    assert_eq!(out, "Apple, Banana, Cherry");
}

#[test]
pub fn renders_transform_chains() {
    let (out, diags) = render_for(
        syn::parse_quote! {
            enum Event {
                Moved { from: i32, to: i32 },
            }
        },
        "{{#cases}}{{snakeCased(name)}}{{joinedWithParens(namesAndTypes(parameters))}}{{/cases}}",
    );
    assert!(diags.is_empty());
    assert_eq!(out, "moved(from: i32, to: i32)");
}

#[test]
pub fn inverted_sections_render_on_absence() {
    let (out, diags) = render_for(
        syn::parse_quote! {
            enum Sparse { Nothing, Something(i32) }
        },
        "{{#cases}}{{name}}{{^parameters}}!{{/parameters}};{{/cases}}",
    );
    assert!(diags.is_empty());
    assert_eq!(out, "Nothing!;Something;");
}

#[test]
pub fn optional_interpolation_is_empty_when_absent() {
    let (out, diags) = render_for(
        syn::parse_quote! {
            enum Mixed { Pair(String, i32) }
        },
        "{{#cases}}{{#parameters}}[{{name}}]{{/parameters}}{{/cases}}",
    );
    assert!(diags.is_empty());
    // Unnamed parameters have no name to interpolate.
    assert_eq!(out, "[][]");
}

#[test]
pub fn comment_values_resolve_by_key() {
    let (out, diags) = render_for(
        syn::parse_quote! {
            enum Annotated {
                /// display: the first one
                First,
                Second,
            }
        },
        "{{#cases}}<{{display(comments)}}>{{/cases}}",
    );
    assert!(diags.is_empty());
    assert_eq!(out, "<the first one><>");
}

#[test]
pub fn unknown_names_resolve_outward_through_sections() {
    let (out, diags) = render_for(
        syn::parse_quote! {
            enum Outer { A(i32) }
        },
        "{{#cases}}{{#parameters}}{{name}}{{index}}{{/parameters}}{{/cases}}",
    );
    assert!(diags.is_empty());
    // `name` is absent on the unnamed parameter but does not fall back
    // to the case name; `index` is the parameter's own.
    assert_eq!(out, "0");
}
