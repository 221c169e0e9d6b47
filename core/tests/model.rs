use casegen_core::*;

#[test]
pub fn key_value_splitting() {
    assert_eq!(
        KeyValue::parse("kind: accessor"),
        Some(KeyValue {
            key: "kind".to_owned(),
            value: "accessor".to_owned()
        })
    );
    // No colon: the whole annotation is the key.
    assert_eq!(
        KeyValue::parse("deprecated"),
        Some(KeyValue {
            key: "deprecated".to_owned(),
            value: String::new()
        })
    );
    // A colon with nothing after it keeps the key and an empty value.
    assert_eq!(
        KeyValue::parse("kind:"),
        Some(KeyValue {
            key: "kind".to_owned(),
            value: String::new()
        })
    );
    assert_eq!(
        KeyValue::parse("  kind  :  accessor  "),
        Some(KeyValue {
            key: "kind".to_owned(),
            value: "accessor".to_owned()
        })
    );
    assert_eq!(KeyValue::parse(""), None);
    assert_eq!(KeyValue::parse("   "), None);
    assert_eq!(KeyValue::parse(": orphaned"), None);
}

#[test]
pub fn descriptors_from_enum() -> Result<(), ExpandError> {
    let input: syn::DeriveInput = syn::parse_quote! {
        enum Event {
            /// kind: lifecycle
            /// internal
            Started,
            Progress { percent: i32, label: Option<String> },
            Finished(String, i32),
        }
    };
    let cases = cases_from_input(&input)?;
    assert_eq!(cases.len(), 3);

    let started = &cases[0];
    assert_eq!(started.name, "Started");
    assert!(started.parameters.is_empty());
    assert_eq!(
        started.comments,
        vec![
            KeyValue {
                key: "kind".to_owned(),
                value: "lifecycle".to_owned()
            },
            KeyValue {
                key: "internal".to_owned(),
                value: String::new()
            },
        ]
    );
    assert!(started.is_first && !started.is_last);

    let progress = &cases[1];
    assert_eq!(progress.index, 1);
    assert!(!progress.is_first && !progress.is_last);
    let percent = &progress.parameters[0];
    assert_eq!(percent.name.as_deref(), Some("percent"));
    assert_eq!(percent.ty, "i32");
    assert!(!percent.is_optional);
    assert!(percent.is_first && !percent.is_last);
    let label = &progress.parameters[1];
    assert_eq!(label.ty, "Option<String>");
    assert!(label.is_optional);
    assert!(!label.is_first && label.is_last);

    let finished = &cases[2];
    assert!(finished.is_last);
    assert_eq!(finished.parameters[0].name, None);
    assert_eq!(finished.parameters[0].ty, "String");
    assert_eq!(finished.parameters[1].ty, "i32");
    Ok(())
}

#[test]
pub fn single_case_is_both_first_and_last() -> Result<(), ExpandError> {
    let input: syn::DeriveInput = syn::parse_quote! {
        enum Only { It }
    };
    let cases = cases_from_input(&input)?;
    assert!(cases[0].is_first && cases[0].is_last);
    Ok(())
}

#[test]
pub fn rejects_non_enums() {
    let input: syn::DeriveInput = syn::parse_quote! {
        struct NotAnEnum { field: i32 }
    };
    let err = cases_from_input(&input).unwrap_err();
    assert!(matches!(err.kind, ExpandErrorKind::NotAnEnum));
}
