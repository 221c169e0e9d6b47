use quote::ToTokens;

use crate::{classify, ExpandError, ExpandErrorKind};

/// A `key: value` pair split out of a free-form case annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    /// Split an annotation on its first colon, trimming both sides.
    ///
    /// An annotation without a colon has an empty value. An annotation
    /// whose key trims to nothing yields no pair at all.
    ///
    /// ```
    /// # use casegen_core::KeyValue;
    /// assert_eq!(
    ///     KeyValue::parse("kind: accessor"),
    ///     Some(KeyValue { key: "kind".to_owned(), value: "accessor".to_owned() })
    /// );
    /// assert_eq!(
    ///     KeyValue::parse("deprecated"),
    ///     Some(KeyValue { key: "deprecated".to_owned(), value: String::new() })
    /// );
    /// assert_eq!(KeyValue::parse("   "), None);
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        let (key, value) = match text.split_once(':') {
            Some((key, value)) => (key.trim(), value.trim()),
            None => (text.trim(), ""),
        };
        if key.is_empty() {
            return None;
        }
        Some(Self {
            key: key.to_owned(),
            value: value.to_owned(),
        })
    }
}

/// One associated value of a case, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    /// `None` for tuple-variant fields.
    pub name: Option<String>,
    /// The declared type, printed as compact source text.
    pub ty: String,
    pub is_optional: bool,
    pub index: usize,
    pub is_first: bool,
    pub is_last: bool,
}

/// One case of the enum under expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseDescriptor {
    pub name: String,
    pub parameters: Vec<ParameterDescriptor>,
    pub comments: Vec<KeyValue>,
    pub index: usize,
    pub is_first: bool,
    pub is_last: bool,
}

/// Build case descriptors from the derive target, in source order.
///
/// Fails with `NotAnEnum` for structs and unions. Tuple-variant fields
/// become unnamed parameters, struct-variant fields named ones. Doc
/// comments on a variant are parsed line by line into [`KeyValue`]
/// annotations.
pub fn cases_from_input(input: &syn::DeriveInput) -> Result<Vec<CaseDescriptor>, ExpandError> {
    let data = match &input.data {
        syn::Data::Enum(data) => data,
        syn::Data::Struct(s) => {
            return Err(ExpandError::new(
                ExpandErrorKind::NotAnEnum,
                s.struct_token.span,
            ))
        }
        syn::Data::Union(u) => {
            return Err(ExpandError::new(
                ExpandErrorKind::NotAnEnum,
                u.union_token.span,
            ))
        }
    };
    let count = data.variants.len();
    let mut cases = Vec::with_capacity(count);
    for (index, variant) in data.variants.iter().enumerate() {
        let parameters = parameters_of(&variant.fields)?;
        let comments = doc_lines(&variant.attrs)
            .iter()
            .filter_map(|line| KeyValue::parse(line))
            .collect();
        cases.push(CaseDescriptor {
            name: variant.ident.to_string(),
            parameters,
            comments,
            index,
            is_first: index == 0,
            is_last: index + 1 == count,
        });
    }
    Ok(cases)
}

fn parameters_of(fields: &syn::Fields) -> Result<Vec<ParameterDescriptor>, ExpandError> {
    let count = fields.iter().count();
    let mut parameters = Vec::with_capacity(count);
    for (index, field) in fields.iter().enumerate() {
        let shape = classify(&field.ty)?;
        parameters.push(ParameterDescriptor {
            name: field.ident.as_ref().map(|ident| ident.to_string()),
            ty: type_text(&field.ty),
            is_optional: shape.is_optional(),
            index,
            is_first: index == 0,
            is_last: index + 1 == count,
        });
    }
    Ok(parameters)
}

/// Doc comment lines of an item, one per `#[doc = "..."]` attribute.
pub(crate) fn doc_lines(attrs: &[syn::Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            syn::Meta::NameValue(nv) => match &nv.value {
                syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(s),
                    ..
                }) => Some(s.value()),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

/// Print a type the way it was declared, without the spaces the token
/// printer inserts between every token.
pub(crate) fn type_text(ty: &syn::Type) -> String {
    let raw = ty.to_token_stream().to_string();
    raw.replace(" :: ", "::")
        .replace("< ", "<")
        .replace(" <", "<")
        .replace(" >", ">")
        .replace(" ,", ",")
        .replace("( ", "(")
        .replace(" )", ")")
        .replace("[ ", "[")
        .replace(" ]", "]")
        .replace("& ", "&")
        .replace(" ;", ";")
}

/// Re-pin `is_first`/`is_last` to the extremes of the current order.
pub(crate) fn repin_cases(cases: &mut [CaseDescriptor]) {
    let len = cases.len();
    for (position, case) in cases.iter_mut().enumerate() {
        case.is_first = position == 0;
        case.is_last = position + 1 == len;
    }
}

/// Re-pin `is_first`/`is_last` on a reordered parameter list.
pub(crate) fn repin_parameters(parameters: &mut [ParameterDescriptor]) {
    let len = parameters.len();
    for (position, parameter) in parameters.iter_mut().enumerate() {
        parameter.is_first = position == 0;
        parameter.is_last = position + 1 == len;
    }
}
