//! Type expression decoding.
//!
//! Classifies a raw `TypeExpr` into the small closed set of shapes the
//! mapper reasons about. Classification is syntax-insensitive: the
//! dedicated `Nullable<T>` spelling and the conventionally-named
//! `sys.types.Maybe<T>` wrapper are the same optional-wrapper shape.

use crate::graph::{well_known, PrimitiveKind, ScopedName, TypeExpr};
use crate::mapper::GenError;

/// Semantic shape of a type expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape<'a> {
    Primitive(PrimitiveKind),
    /// A single-parameter optional wrapper, whichever way it was spelled.
    Nullable(&'a TypeExpr),
    Reference(&'a ScopedName, &'a [TypeExpr]),
}

/// Decodes one expression. Pure; consults nothing but the expression itself.
///
/// A type variable in decode position means a generic declaration leaked
/// into a column position unsubstituted, which the expander rules out for
/// well-formed graphs.
pub fn decode(expr: &TypeExpr) -> Result<Shape<'_>, GenError> {
    match expr {
        TypeExpr::Primitive { primitive } => Ok(Shape::Primitive(*primitive)),
        TypeExpr::Nullable { inner } => Ok(Shape::Nullable(inner)),
        TypeExpr::Ref { name, params } if well_known::is_maybe(name) => {
            match params.as_slice() {
                [inner] => Ok(Shape::Nullable(inner)),
                _ => Err(GenError::WrongArity {
                    name: name.clone(),
                    expected: 1,
                    found: params.len(),
                }),
            }
        }
        TypeExpr::Ref { name, params } => Ok(Shape::Reference(name, params)),
        TypeExpr::Var { var } => Err(GenError::UnboundTypeVariable { var: var.clone() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{maybe, ty_prim, ty_ref};

    #[test]
    fn test_primitive_decodes_to_primitive() {
        let expr = ty_prim(PrimitiveKind::Int32);
        assert_eq!(decode(&expr).unwrap(), Shape::Primitive(PrimitiveKind::Int32));
    }

    #[test]
    fn test_nullable_spelling_decodes_to_nullable() {
        let inner = ty_prim(PrimitiveKind::String);
        let expr = TypeExpr::nullable(inner.clone());
        assert_eq!(decode(&expr).unwrap(), Shape::Nullable(&inner));
    }

    #[test]
    fn test_maybe_spelling_decodes_to_nullable() {
        let inner = ty_prim(PrimitiveKind::String);
        let expr = maybe(inner.clone());
        // Both optional spellings collapse to the same shape.
        assert_eq!(decode(&expr).unwrap(), Shape::Nullable(&inner));
    }

    #[test]
    fn test_maybe_with_wrong_arity_is_error() {
        let expr = TypeExpr::reference(ScopedName::new("sys.types", "Maybe"), vec![]);
        assert!(matches!(
            decode(&expr),
            Err(GenError::WrongArity { expected: 1, found: 0, .. })
        ));
    }

    #[test]
    fn test_reference_decodes_to_reference() {
        let expr = ty_ref("app.model", "Person", vec![]);
        match decode(&expr).unwrap() {
            Shape::Reference(name, params) => {
                assert_eq!(name, &ScopedName::new("app.model", "Person"));
                assert!(params.is_empty());
            }
            other => panic!("expected reference, got {:?}", other),
        }
    }

    #[test]
    fn test_user_maybe_in_other_module_is_plain_reference() {
        // Only the distinguished sys.types.Maybe is an optional wrapper.
        let expr = ty_ref("app.model", "Maybe", vec![ty_prim(PrimitiveKind::Bool)]);
        assert!(matches!(decode(&expr).unwrap(), Shape::Reference(..)));
    }

    #[test]
    fn test_unbound_variable_is_error() {
        let expr = TypeExpr::var("T");
        assert!(matches!(
            decode(&expr),
            Err(GenError::UnboundTypeVariable { .. })
        ));
    }
}
