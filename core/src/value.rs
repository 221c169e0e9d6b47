use crate::{CaseDescriptor, KeyValue, ParameterDescriptor};

/// A value the template language can evaluate to.
///
/// The variant set is closed. Values are immutable once constructed:
/// transforms produce new values, never mutate the receiver.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Bool(bool),
    List(Vec<Value>),
    Opt(Option<Box<Value>>),
    KeyValue(KeyValue),
    Case(CaseDescriptor),
    Param(ParameterDescriptor),
    Cases(Vec<CaseDescriptor>),
    Params(Vec<ParameterDescriptor>),
}

/// How a section treats the value it was opened on.
pub(crate) enum Section {
    /// Render the body once per element, rebinding the context.
    Repeat(Vec<Value>),
    /// Render the body iff true, context unchanged.
    Gate(bool),
    /// Render the body once with the value as context.
    Scope(Value),
}

impl Value {
    /// Canonical type name, used in transform diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "String",
            Value::Int(_) => "Integer",
            Value::Bool(_) => "Boolean",
            Value::List(_) => "List",
            Value::Opt(_) => "Optional",
            Value::KeyValue(_) => "KeyValue",
            Value::Case(_) => "Case",
            Value::Param(_) => "Parameter",
            Value::Cases(_) => "CaseList",
            Value::Params(_) => "ParameterList",
        }
    }

    /// Property lookup for a bare name in a template expression.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        match self {
            Value::Case(case) => match name {
                "name" => Some(Value::Str(case.name.clone())),
                "parameters" => Some(Value::Params(case.parameters.clone())),
                "comments" => Some(Value::List(
                    case.comments.iter().cloned().map(Value::KeyValue).collect(),
                )),
                "index" => Some(Value::Int(case.index as i64)),
                "isFirst" => Some(Value::Bool(case.is_first)),
                "isLast" => Some(Value::Bool(case.is_last)),
                _ => None,
            },
            Value::Param(parameter) => match name {
                "name" => Some(Value::Opt(
                    parameter
                        .name
                        .clone()
                        .map(|name| Box::new(Value::Str(name))),
                )),
                "type" => Some(Value::Str(parameter.ty.clone())),
                "isOptional" => Some(Value::Bool(parameter.is_optional)),
                "index" => Some(Value::Int(parameter.index as i64)),
                "isFirst" => Some(Value::Bool(parameter.is_first)),
                "isLast" => Some(Value::Bool(parameter.is_last)),
                _ => None,
            },
            Value::KeyValue(kv) => match name {
                "key" => Some(Value::Str(kv.key.clone())),
                "value" => Some(Value::Str(kv.value.clone())),
                _ => None,
            },
            Value::Opt(Some(inner)) => inner.lookup(name),
            _ => None,
        }
    }

    /// The text a direct `{{ }}` interpolation produces.
    pub fn render_inline(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Int(i) => i.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::List(items) => items
                .iter()
                .map(Value::render_inline)
                .collect::<Vec<_>>()
                .join(", "),
            Value::Opt(None) => String::new(),
            Value::Opt(Some(inner)) => inner.render_inline(),
            Value::KeyValue(kv) => {
                if kv.value.is_empty() {
                    kv.key.clone()
                } else {
                    format!("{}: {}", kv.key, kv.value)
                }
            }
            Value::Case(case) => case.name.clone(),
            Value::Param(parameter) => parameter
                .name
                .clone()
                .unwrap_or_else(|| parameter.ty.clone()),
            Value::Cases(cases) => cases
                .iter()
                .map(|case| case.name.clone())
                .collect::<Vec<_>>()
                .join(", "),
            Value::Params(parameters) => parameters
                .iter()
                .map(|parameter| Value::Param(parameter.clone()).render_inline())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Truthiness for sections and inverted sections: empty, absent
    /// and false values are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Str(s) => !s.is_empty(),
            Value::Int(i) => *i != 0,
            Value::Bool(b) => *b,
            Value::List(items) => !items.is_empty(),
            Value::Opt(None) => false,
            Value::Opt(Some(inner)) => inner.is_truthy(),
            Value::KeyValue(_) | Value::Case(_) | Value::Param(_) => true,
            Value::Cases(cases) => !cases.is_empty(),
            Value::Params(parameters) => !parameters.is_empty(),
        }
    }

    pub(crate) fn into_section(self) -> Section {
        match self {
            Value::List(items) => Section::Repeat(items),
            Value::Cases(cases) => Section::Repeat(cases.into_iter().map(Value::Case).collect()),
            Value::Params(parameters) => {
                Section::Repeat(parameters.into_iter().map(Value::Param).collect())
            }
            Value::Bool(b) => Section::Gate(b),
            Value::Opt(None) => Section::Gate(false),
            Value::Opt(Some(inner)) => Section::Scope(*inner),
            Value::Str(s) => Section::Gate(!s.is_empty()),
            Value::Int(i) => Section::Gate(i != 0),
            value @ (Value::KeyValue(_) | Value::Case(_) | Value::Param(_)) => {
                Section::Scope(value)
            }
        }
    }
}
