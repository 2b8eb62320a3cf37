mod bindings;
mod utils;
mod vue_imports;

pub use bindings::*;
pub use utils::*;
pub use vue_imports::{VueImports, VueImportsSet};

/// Interned string used for identifiers, prop keys and helper names
pub type PropsAtom = swc_core::ecma::atoms::Atom;

/// Creates a [`PropsAtom`] from a string literal
#[macro_export]
macro_rules! props_atom {
    ($lit: literal) => {
        $crate::PropsAtom::from($lit)
    };
}
