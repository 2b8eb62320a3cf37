//! Helper module to provide commonly used Vue words as static symbols (`PropsAtom`)

use vprops_core::{props_atom, PropsAtom};

lazy_static! {
    // Compiler macros
    pub static ref DEFINE_PROPS: PropsAtom = props_atom!("defineProps");
    pub static ref WITH_DEFAULTS: PropsAtom = props_atom!("withDefaults");

    // Prop options
    pub static ref DEFAULT: PropsAtom = props_atom!("default");
    pub static ref REQUIRED: PropsAtom = props_atom!("required");
    pub static ref SKIP_CHECK: PropsAtom = props_atom!("skipCheck");
    pub static ref TYPE: PropsAtom = props_atom!("type");

    // Helper atoms
    pub static ref PROPS_HELPER: PropsAtom = props_atom!("__props");
}
