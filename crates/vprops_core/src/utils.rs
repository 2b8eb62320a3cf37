use swc_core::{
    common::{Span, DUMMY_SP},
    ecma::ast::{Ident, IdentName, PropName, Str},
};

use crate::PropsAtom;

pub trait IntoIdent {
    fn into_ident(self) -> Ident;
    fn into_ident_spanned(self, span: Span) -> Ident;
}

impl IntoIdent for PropsAtom {
    #[inline]
    fn into_ident(self) -> Ident {
        self.into_ident_spanned(DUMMY_SP)
    }

    #[inline]
    fn into_ident_spanned(self, span: Span) -> Ident {
        Ident {
            span,
            ctxt: Default::default(),
            sym: self,
            optional: false,
        }
    }
}

/// Checks whether `name` can be used as-is for an object key or a variable name
pub fn is_valid_ident(name: &str) -> bool {
    let mut chars = name.chars();

    let Some(first) = chars.next() else {
        return false;
    };

    if !(first == '_' || first == '$' || first.is_alphabetic()) {
        return false;
    }

    chars.all(|c| c == '_' || c == '$' || c.is_alphanumeric())
}

/// Converts an atom to an object key, quoting it when it is not a valid identifier.
/// `foo` stays `foo`, but `foo-bar` becomes `"foo-bar"`.
pub fn atom_to_propname(sym: PropsAtom, span: Span) -> PropName {
    if is_valid_ident(&sym) {
        PropName::Ident(IdentName { span, sym })
    } else {
        PropName::Str(Str {
            span,
            value: sym,
            raw: None,
        })
    }
}
