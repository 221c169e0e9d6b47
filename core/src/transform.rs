use convert_case::{Case, Casing};
use proc_macro2::Span;

use crate::{
    model::{repin_cases, repin_parameters},
    Diagnostics, KeyValue, ParameterDescriptor, Value,
};

/// Dispatch transform `name` on `value`.
///
/// Variant-specific operations are tried before the shared generic
/// table. An unknown name records an invalid-transform diagnostic and
/// evaluates to nothing; the renderer treats that as an absent value.
pub fn transform(
    value: Value,
    name: &str,
    span: Span,
    diags: &mut Diagnostics,
) -> Option<Value> {
    match value {
        // Optionals delegate to their wrapped value, except for the
        // presence checks. Delegating on an absent optional stays absent.
        Value::Opt(inner) => match name {
            "exists" | "bool" => Some(Value::Bool(inner.is_some())),
            "isEmpty" => Some(Value::Bool(inner.is_none())),
            _ => match inner {
                Some(inner) => transform(*inner, name, span, diags),
                None => Some(Value::Opt(None)),
            },
        },
        Value::Str(s) => string_transform(s, name, span, diags),
        Value::Int(i) => integer_transform(i, name, span, diags),
        Value::Cases(cases) => case_list_transform(cases, name, span, diags),
        Value::Params(parameters) => parameter_list_transform(parameters, name, span, diags),
        Value::List(items) => list_transform(items, name, span, diags),
        value @ (Value::Bool(_) | Value::KeyValue(_) | Value::Case(_) | Value::Param(_)) => {
            diags.invalid_transform(span, name, value.type_name());
            None
        }
    }
}

fn string_transform(s: String, name: &str, span: Span, diags: &mut Diagnostics) -> Option<Value> {
    let out = match name {
        "lowercased" => Value::Str(s.to_lowercase()),
        "uppercased" => Value::Str(s.to_uppercase()),
        "snakeCased" => Value::Str(s.to_case(Case::Snake)),
        "camelCased" => Value::Str(s.to_case(Case::Camel)),
        "firstCapitalized" => Value::Str(first_capitalized(&s)),
        // Empty strings stay empty so optional payloads do not
        // materialize a stray `()`.
        "withParens" => Value::Str(if s.is_empty() { s } else { format!("({s})") }),
        "isEmpty" => Value::Bool(s.is_empty()),
        "count" => Value::Int(s.chars().count() as i64),
        _ => {
            diags.invalid_transform(span, name, "String");
            return None;
        }
    };
    Some(out)
}

fn integer_transform(i: i64, name: &str, span: Span, diags: &mut Diagnostics) -> Option<Value> {
    let out = match name {
        "equalsZero" => Value::Bool(i == 0),
        "plusOne" => Value::Int(i + 1),
        "minusOne" => Value::Int(i - 1),
        "isEven" => Value::Bool(i % 2 == 0),
        "isOdd" => Value::Bool(i % 2 != 0),
        _ => {
            diags.invalid_transform(span, name, "Integer");
            return None;
        }
    };
    Some(out)
}

fn case_list_transform(
    mut cases: Vec<crate::CaseDescriptor>,
    name: &str,
    span: Span,
    diags: &mut Diagnostics,
) -> Option<Value> {
    let out = match name {
        // Stable sort by case name; first/last flags re-pin to the
        // extremes of the new order.
        "sorted" => {
            cases.sort_by(|a, b| a.name.cmp(&b.name));
            repin_cases(&mut cases);
            Value::Cases(cases)
        }
        "reversed" => {
            cases.reverse();
            repin_cases(&mut cases);
            Value::Cases(cases)
        }
        "first" => Value::Opt(cases.into_iter().next().map(|c| Box::new(Value::Case(c)))),
        "last" => Value::Opt(cases.into_iter().last().map(|c| Box::new(Value::Case(c)))),
        "count" => Value::Int(cases.len() as i64),
        "isEmpty" => Value::Bool(cases.is_empty()),
        _ => {
            diags.invalid_transform(span, name, "CaseList");
            return None;
        }
    };
    Some(out)
}

fn parameter_list_transform(
    mut parameters: Vec<ParameterDescriptor>,
    name: &str,
    span: Span,
    diags: &mut Diagnostics,
) -> Option<Value> {
    let out = match name {
        "names" => Value::List(
            parameters
                .iter()
                .map(|p| Value::Str(parameter_name(p)))
                .collect(),
        ),
        "types" => Value::List(parameters.iter().map(|p| Value::Str(p.ty.clone())).collect()),
        "namesAndTypes" => Value::List(
            parameters
                .iter()
                .map(|p| Value::Str(format!("{}: {}", parameter_name(p), p.ty)))
                .collect(),
        ),
        // A single element degenerates to the bare type, no list gives
        // the unit type.
        "tupleValue" => Value::Str(match parameters.len() {
            0 => "()".to_owned(),
            1 => parameters[0].ty.clone(),
            _ => format!(
                "({})",
                parameters
                    .iter()
                    .map(|p| p.ty.clone())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }),
        "reversed" => {
            parameters.reverse();
            repin_parameters(&mut parameters);
            Value::Params(parameters)
        }
        "first" => Value::Opt(
            parameters
                .into_iter()
                .next()
                .map(|p| Box::new(Value::Param(p))),
        ),
        "last" => Value::Opt(
            parameters
                .into_iter()
                .last()
                .map(|p| Box::new(Value::Param(p))),
        ),
        "count" => Value::Int(parameters.len() as i64),
        "isEmpty" => Value::Bool(parameters.is_empty()),
        _ => {
            diags.invalid_transform(span, name, "ParameterList");
            return None;
        }
    };
    Some(out)
}

fn list_transform(
    mut items: Vec<Value>,
    name: &str,
    span: Span,
    diags: &mut Diagnostics,
) -> Option<Value> {
    let out = match name {
        "first" => Value::Opt(items.into_iter().next().map(Box::new)),
        "last" => Value::Opt(items.into_iter().last().map(Box::new)),
        "reversed" => {
            items.reverse();
            Value::List(items)
        }
        "count" => Value::Int(items.len() as i64),
        "isEmpty" => Value::Bool(items.is_empty()),
        "joined" => Value::Str(joined(&items)),
        "joinedWithParens" => Value::Str(if items.is_empty() {
            String::new()
        } else {
            format!("({})", joined(&items))
        }),
        // Only lists of comparable elements support ordering.
        "sorted" if items.iter().all(|v| matches!(v, Value::Str(_))) => {
            items.sort_by(|a, b| match (a, b) {
                (Value::Str(a), Value::Str(b)) => a.cmp(b),
                _ => unreachable!(),
            });
            Value::List(items)
        }
        "sorted" if items.iter().all(|v| matches!(v, Value::Int(_))) => {
            items.sort_by(|a, b| match (a, b) {
                (Value::Int(a), Value::Int(b)) => a.cmp(b),
                _ => unreachable!(),
            });
            Value::List(items)
        }
        "keyValues" => {
            if items.iter().all(|v| matches!(v, Value::KeyValue(_))) && !items.is_empty() {
                diags.redundant_key_values(span);
                Value::List(items)
            } else if items.iter().all(|v| matches!(v, Value::Str(_))) {
                Value::List(
                    items
                        .iter()
                        .filter_map(|v| match v {
                            Value::Str(s) => KeyValue::parse(s).map(Value::KeyValue),
                            _ => None,
                        })
                        .collect(),
                )
            } else {
                diags.invalid_transform(span, name, "List");
                return None;
            }
        }
        // A key-value list answers any other name as a key lookup,
        // yielding the first match or nothing. Never a diagnostic.
        _ if items.iter().all(|v| matches!(v, Value::KeyValue(_))) => Value::Opt(
            items
                .iter()
                .find_map(|v| match v {
                    Value::KeyValue(kv) if kv.key == name => {
                        Some(Box::new(Value::Str(kv.value.clone())))
                    }
                    _ => None,
                }),
        ),
        _ => {
            diags.invalid_transform(span, name, "List");
            return None;
        }
    };
    Some(out)
}

fn joined(items: &[Value]) -> String {
    items
        .iter()
        .map(Value::render_inline)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The name a parameter renders under; unnamed parameters take a
/// 1-based positional placeholder.
pub(crate) fn parameter_name(parameter: &ParameterDescriptor) -> String {
    parameter
        .name
        .clone()
        .unwrap_or_else(|| format!("param{}", parameter.index + 1))
}

fn first_capitalized(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
