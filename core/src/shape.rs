use syn::spanned::Spanned;

use crate::{model::type_text, ExpandError, ExpandErrorKind};

/// Structural classification of a parameter's declared type.
///
/// Produced by [`classify`] and owned by the parameter that requested
/// it; shapes are never shared or cached across parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    /// A plain identifier like `String`.
    Ident(String),
    /// `Option<T>`.
    Optional(Box<TypeShape>),
    /// `Vec<T>`, `[T]` or `[T; N]`.
    Array(Box<TypeShape>),
    /// `HashMap<K, V>` or `BTreeMap<K, V>`.
    Dictionary(Box<TypeShape>, Box<TypeShape>),
    /// `(A, B, ...)`.
    Tuple(Vec<TypeShape>),
    /// `impl Trait`.
    Opaque(Box<TypeShape>),
    /// `dyn Trait`.
    Existential(Box<TypeShape>),
    /// A qualified path `base::Name`, folded left.
    Member(Box<TypeShape>, Box<TypeShape>),
    /// `PhantomData<T>`, the type-level marker of `T`.
    Metatype(Box<TypeShape>),
    /// `&T` and `&mut T`.
    Reference(Box<TypeShape>),
    /// Any other generic application.
    UnknownGeneric(Box<TypeShape>, Vec<TypeShape>),
}

impl TypeShape {
    pub fn is_optional(&self) -> bool {
        matches!(self, TypeShape::Optional(_))
    }
}

/// Decompose a declared type into its [`TypeShape`].
///
/// Purely structural and recursive. The optional, array and dictionary
/// sugar spellings are folded regardless of path prefix, so
/// `std::option::Option<T>` classifies the same as `Option<T>`.
/// Unrecognized forms (function pointers, raw pointers, macros in type
/// position) fail with `UnknownParameterType`; classification is not
/// best-effort.
pub fn classify(ty: &syn::Type) -> Result<TypeShape, ExpandError> {
    match ty {
        syn::Type::Path(path) if path.qself.is_none() => classify_path(&path.path, ty),
        syn::Type::Tuple(tuple) => {
            let elems = tuple
                .elems
                .iter()
                .map(classify)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(TypeShape::Tuple(elems))
        }
        syn::Type::Slice(slice) => Ok(TypeShape::Array(Box::new(classify(&slice.elem)?))),
        syn::Type::Array(array) => Ok(TypeShape::Array(Box::new(classify(&array.elem)?))),
        syn::Type::Reference(reference) => {
            Ok(TypeShape::Reference(Box::new(classify(&reference.elem)?)))
        }
        syn::Type::ImplTrait(opaque) => Ok(TypeShape::Opaque(Box::new(first_trait_bound(
            &opaque.bounds,
            ty,
        )?))),
        syn::Type::TraitObject(object) => Ok(TypeShape::Existential(Box::new(first_trait_bound(
            &object.bounds,
            ty,
        )?))),
        syn::Type::Paren(paren) => classify(&paren.elem),
        syn::Type::Group(group) => classify(&group.elem),
        other => Err(unknown(other)),
    }
}

fn classify_path(path: &syn::Path, whole: &syn::Type) -> Result<TypeShape, ExpandError> {
    let last = path.segments.last().ok_or_else(|| unknown(whole))?;
    match &last.arguments {
        syn::PathArguments::None => member_chain(path, None),
        syn::PathArguments::AngleBracketed(generics) => {
            let args = generics
                .args
                .iter()
                .filter_map(|arg| match arg {
                    syn::GenericArgument::Type(ty) => Some(ty),
                    _ => None,
                })
                .map(classify)
                .collect::<Result<Vec<_>, _>>()?;
            match (last.ident.to_string().as_str(), args.len()) {
                ("Option", 1) => Ok(TypeShape::Optional(Box::new(into_only(args)))),
                ("Vec", 1) => Ok(TypeShape::Array(Box::new(into_only(args)))),
                ("HashMap" | "BTreeMap", 2) => {
                    let mut args = args.into_iter();
                    let key = args.next().expect("two arguments");
                    let value = args.next().expect("two arguments");
                    Ok(TypeShape::Dictionary(Box::new(key), Box::new(value)))
                }
                ("PhantomData", 1) => Ok(TypeShape::Metatype(Box::new(into_only(args)))),
                _ => {
                    let base = member_chain(path, None)?;
                    Ok(TypeShape::UnknownGeneric(Box::new(base), args))
                }
            }
        }
        syn::PathArguments::Parenthesized(_) => Err(unknown(whole)),
    }
}

/// Fold a path's segments into nested `Member` shapes, left to right.
fn member_chain(path: &syn::Path, whole: Option<&syn::Type>) -> Result<TypeShape, ExpandError> {
    let mut shape: Option<TypeShape> = None;
    for segment in &path.segments {
        let name = TypeShape::Ident(segment.ident.to_string());
        shape = Some(match shape {
            None => name,
            Some(base) => TypeShape::Member(Box::new(base), Box::new(name)),
        });
    }
    shape.ok_or_else(|| {
        ExpandError::new(
            ExpandErrorKind::UnknownParameterType(String::new()),
            whole.map(Spanned::span).unwrap_or_else(|| path.span()),
        )
    })
}

fn first_trait_bound(
    bounds: &syn::punctuated::Punctuated<syn::TypeParamBound, syn::Token![+]>,
    whole: &syn::Type,
) -> Result<TypeShape, ExpandError> {
    for bound in bounds {
        if let syn::TypeParamBound::Trait(bound) = bound {
            return member_chain(&bound.path, Some(whole));
        }
    }
    Err(unknown(whole))
}

fn into_only(args: Vec<TypeShape>) -> TypeShape {
    args.into_iter().next().expect("one argument")
}

fn unknown(ty: &syn::Type) -> ExpandError {
    ExpandError::new(
        ExpandErrorKind::UnknownParameterType(type_text(ty)),
        ty.span(),
    )
}
