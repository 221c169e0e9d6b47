use casegen_core::proc_macro2::Span;
use casegen_core::*;

fn apply(value: Value, name: &str) -> (Option<Value>, Vec<Diagnostic>) {
    let mut diags = Diagnostics::new();
    let result = transform(value, name, Span::call_site(), &mut diags);
    (result, diags.into_vec())
}

fn ok(value: Value, name: &str) -> Value {
    let (result, diags) = apply(value, name);
    assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
    result.expect("transform should produce a value")
}

fn cases_of(input: syn::DeriveInput) -> Vec<CaseDescriptor> {
    cases_from_input(&input).unwrap()
}

#[test]
pub fn string_operations() {
    let s = |s: &str| Value::Str(s.to_owned());
    assert_eq!(ok(s("Hello"), "lowercased"), s("hello"));
    assert_eq!(ok(s("Hello"), "uppercased"), s("HELLO"));
    assert_eq!(ok(s("someCaseName"), "snakeCased"), s("some_case_name"));
    assert_eq!(ok(s("some_case_name"), "camelCased"), s("someCaseName"));
    assert_eq!(ok(s("value"), "firstCapitalized"), s("Value"));
    assert_eq!(ok(s("a, b"), "withParens"), s("(a, b)"));
    assert_eq!(ok(s(""), "withParens"), s(""));
    assert_eq!(ok(s(""), "isEmpty"), Value::Bool(true));
    assert_eq!(ok(s("abc"), "count"), Value::Int(3));
}

#[test]
pub fn integer_operations() {
    assert_eq!(ok(Value::Int(0), "equalsZero"), Value::Bool(true));
    assert_eq!(ok(Value::Int(2), "plusOne"), Value::Int(3));
    assert_eq!(ok(Value::Int(2), "minusOne"), Value::Int(1));
    assert_eq!(ok(Value::Int(2), "isEven"), Value::Bool(true));
    assert_eq!(ok(Value::Int(2), "isOdd"), Value::Bool(false));
}

#[test]
pub fn list_operations() {
    let list = Value::List(vec![
        Value::Str("b".to_owned()),
        Value::Str("a".to_owned()),
        Value::Str("c".to_owned()),
    ]);
    assert_eq!(ok(list.clone(), "count"), Value::Int(3));
    assert_eq!(ok(list.clone(), "isEmpty"), Value::Bool(false));
    assert_eq!(
        ok(list.clone(), "first"),
        Value::Opt(Some(Box::new(Value::Str("b".to_owned()))))
    );
    assert_eq!(ok(list.clone(), "joined"), Value::Str("b, a, c".to_owned()));
    assert_eq!(
        ok(list.clone(), "joinedWithParens"),
        Value::Str("(b, a, c)".to_owned())
    );
    assert_eq!(
        ok(list, "sorted"),
        Value::List(vec![
            Value::Str("a".to_owned()),
            Value::Str("b".to_owned()),
            Value::Str("c".to_owned()),
        ])
    );
    assert_eq!(
        ok(Value::List(Vec::new()), "joinedWithParens"),
        Value::Str(String::new())
    );
}

#[test]
pub fn sorted_cases_repin_extremes() {
    let cases = cases_of(syn::parse_quote! {
        enum Unordered { Cherry, Apple, Banana }
    });
    let sorted = ok(Value::Cases(cases), "sorted");
    let Value::Cases(sorted) = sorted else {
        panic!("expected a case list")
    };
    let names: Vec<&str> = sorted.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Apple", "Banana", "Cherry"]);
    // Exactly one first, exactly one last, pinned to the new extremes.
    assert_eq!(sorted.iter().filter(|c| c.is_first).count(), 1);
    assert_eq!(sorted.iter().filter(|c| c.is_last).count(), 1);
    assert!(sorted[0].is_first);
    assert!(sorted[2].is_last);
    // The original declaration index rides along unchanged.
    assert_eq!(sorted[0].index, 1);
}

#[test]
pub fn reversed_cases_repin_extremes() {
    let cases = cases_of(syn::parse_quote! {
        enum Plain { A, B, C }
    });
    let reversed = ok(Value::Cases(cases), "reversed");
    let Value::Cases(reversed) = reversed else {
        panic!("expected a case list")
    };
    assert_eq!(reversed[0].name, "C");
    assert!(reversed[0].is_first && !reversed[0].is_last);
    assert!(reversed[2].is_last);
}

#[test]
pub fn parameter_list_operations() {
    let cases = cases_of(syn::parse_quote! {
        enum Shape {
            Rect { width: i32, height: i32 },
            Label(String),
            Pair(String, i32),
            Dot,
        }
    });
    let rect = Value::Params(cases[0].parameters.clone());
    assert_eq!(
        ok(rect.clone(), "names"),
        Value::List(vec![
            Value::Str("width".to_owned()),
            Value::Str("height".to_owned())
        ])
    );
    assert_eq!(
        ok(rect.clone(), "namesAndTypes"),
        Value::List(vec![
            Value::Str("width: i32".to_owned()),
            Value::Str("height: i32".to_owned())
        ])
    );
    assert_eq!(
        ok(rect, "tupleValue"),
        Value::Str("(i32, i32)".to_owned())
    );

    // Unnamed parameters take 1-based positional placeholders.
    let pair = Value::Params(cases[2].parameters.clone());
    assert_eq!(
        ok(pair.clone(), "names"),
        Value::List(vec![
            Value::Str("param1".to_owned()),
            Value::Str("param2".to_owned())
        ])
    );
    assert_eq!(
        ok(pair, "types"),
        Value::List(vec![
            Value::Str("String".to_owned()),
            Value::Str("i32".to_owned())
        ])
    );

    // One parameter degenerates to the bare type, none to unit.
    let label = Value::Params(cases[1].parameters.clone());
    assert_eq!(ok(label, "tupleValue"), Value::Str("String".to_owned()));
    let dot = Value::Params(cases[3].parameters.clone());
    assert_eq!(ok(dot, "tupleValue"), Value::Str("()".to_owned()));
}

#[test]
pub fn comment_lookup_returns_first_match() {
    let kv = |key: &str, value: &str| {
        Value::KeyValue(KeyValue {
            key: key.to_owned(),
            value: value.to_owned(),
        })
    };
    let comments = Value::List(vec![
        kv("kind", "first"),
        kv("other", "x"),
        kv("kind", "second"),
    ]);
    assert_eq!(
        ok(comments.clone(), "kind"),
        Value::Opt(Some(Box::new(Value::Str("first".to_owned()))))
    );
    // A miss is absent, never a diagnostic.
    assert_eq!(ok(comments, "missing"), Value::Opt(None));
    assert_eq!(ok(Value::List(Vec::new()), "missing"), Value::Opt(None));
}

#[test]
pub fn key_values_materializes_raw_annotations() {
    let raw = Value::List(vec![
        Value::Str("kind: accessor".to_owned()),
        Value::Str("   ".to_owned()),
        Value::Str("flag".to_owned()),
    ]);
    let materialized = ok(raw, "keyValues");
    let Value::List(items) = &materialized else {
        panic!("expected a list")
    };
    // The malformed annotation is dropped, not defaulted.
    assert_eq!(items.len(), 2);

    // A second application is flagged as redundant and returns the
    // receiver unchanged.
    let (result, diags) = apply(materialized.clone(), "keyValues");
    assert_eq!(result, Some(materialized));
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].severity, Severity::Note);
}

#[test]
pub fn optionals_delegate_to_their_value() {
    let some = Value::Opt(Some(Box::new(Value::Str("ab".to_owned()))));
    assert_eq!(ok(some.clone(), "uppercased"), Value::Str("AB".to_owned()));
    assert_eq!(ok(some.clone(), "exists"), Value::Bool(true));
    assert_eq!(ok(some, "isEmpty"), Value::Bool(false));

    let none = Value::Opt(None);
    assert_eq!(ok(none.clone(), "exists"), Value::Bool(false));
    assert_eq!(ok(none.clone(), "bool"), Value::Bool(false));
    // Delegation on an absent optional stays absent.
    assert_eq!(ok(none, "uppercased"), Value::Opt(None));
}

#[test]
pub fn unknown_transform_is_reported_once() {
    let mut diags = Diagnostics::new();
    let result = transform(
        Value::Int(1),
        "frobnicated",
        Span::call_site(),
        &mut diags,
    );
    assert_eq!(result, None);
    // Same operation on the same type is deduplicated.
    let result = transform(
        Value::Int(2),
        "frobnicated",
        Span::call_site(),
        &mut diags,
    );
    assert_eq!(result, None);
    let diags = diags.into_vec();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].severity, Severity::Error);
    assert!(diags[0].message.contains("frobnicated"));
    assert!(diags[0].message.contains("Integer"));
}
