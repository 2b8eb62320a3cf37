use crate::PropsAtom;

/// How a name introduced by the props declaration may be referenced in the rest of the script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingTypes {
    /// A declared prop, e.g. `foo` in `defineProps<{ foo: string }>()`
    Props,

    /// A local alias of a destructured prop,
    /// e.g. `bar` in `const { foo: bar } = defineProps(['foo'])`
    PropsAliased,

    /// A reactive object which is never reassigned,
    /// e.g. `props` in `const props = defineProps()` or `rest` in `const { ...rest } = defineProps()`
    SetupReactiveConst,
}

/// A name together with its binding type
#[derive(Debug, Clone, PartialEq)]
pub struct SetupBinding(pub PropsAtom, pub BindingTypes);
