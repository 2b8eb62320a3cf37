use swc_core::common::{Span, Spanned};
use thiserror::Error;
use vprops_core::PropsAtom;

/// A declaration error. It is always fatal for the component being compiled.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct ScriptError {
    pub span: Span,
    pub kind: ScriptErrorKind,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScriptErrorKind {
    /// Duplicate `defineProps` call
    #[error("duplicate defineProps() call")]
    DuplicateDefineProps,
    /// `defineProps` was called with both runtime and type arguments
    #[error("defineProps() cannot accept both type and non-type arguments at the same time. Use one or the other.")]
    DefinePropsTypeAndNonTypeArguments,
    /// E.g. `const { [foo]: bar } = defineProps()`
    #[error("defineProps() destructure cannot use computed key.")]
    DefinePropsDestructureComputedKey,
    /// E.g. `const { foo: { bar } } = defineProps()`
    #[error("defineProps() destructure does not support nested patterns.")]
    DefinePropsDestructureNestedPattern,
    /// Destructure was disabled using `PropsDestructureConfig::Error`
    #[error("Props destructure is explicitly prohibited via config.")]
    DefinePropsDestructureForbidden,
    /// E.g. `const { foo = 0 } = defineProps<{ foo: string }>()`
    #[error("Default value of prop \"{0}\" does not match declared type.")]
    DefinePropsDestructureDefaultMismatch(PropsAtom),
    /// First argument of `withDefaults` is not a `defineProps` call
    #[error("withDefaults' first argument must be a defineProps call.")]
    WithDefaultsWithoutDefineProps,
    /// `withDefaults(defineProps({ /* runtime */ }))`
    #[error("withDefaults can only be used with type-based defineProps declaration.")]
    WithDefaultsNeedsTypeOnlyDefineProps,
    /// `const { foo } = withDefaults(defineProps<{ foo?: string }>(), {})`
    #[error("withDefaults() is unnecessary when using destructure with defineProps(). Prefer using destructure default values, e.g. const {{ foo = 1 }} = defineProps(...).")]
    WithDefaultsWithDestructure,
    /// `withDefaults(defineProps<{}>())`
    #[error("The 2nd argument of withDefaults is required.")]
    WithDefaultsMissingDefaults,
    /// Unsupported computed key in type referenced by a macro
    #[error("Unsupported computed key in type referenced by a macro")]
    ResolveTypeUnsupportedComputedKey,
    /// A type which cannot be resolved to an object type literal or an interface
    #[error("Unresolvable type reference or unsupported built-in utility type")]
    ResolveTypeUnresolvable,
    /// An unsupported construction during type resolution
    #[error("Unsupported type in type resolution")]
    ResolveTypeUnsupported,
    /// A type param was not provided, e.g. `Partial<>`
    #[error("Missing type parameter")]
    ResolveTypeMissingTypeParam,
    /// Base type of an interface could not be resolved
    #[error("Failed to resolve extends base type.")]
    ResolveTypeExtendsBaseType,
    /// Type references are nested too deeply, most likely a cycle
    #[error("Type reference is too deeply nested or circular")]
    ResolveTypeTooDeep,
}

impl Spanned for ScriptError {
    fn span(&self) -> Span {
        self.span
    }
}

#[inline]
pub(crate) fn error(kind: ScriptErrorKind, span: Span) -> ScriptError {
    ScriptError { span, kind }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swc_core::common::DUMMY_SP;

    #[test]
    fn it_formats_messages() {
        let err = error(
            ScriptErrorKind::DefinePropsDestructureDefaultMismatch(PropsAtom::from("foo")),
            DUMMY_SP,
        );
        assert_eq!(
            err.to_string(),
            "Default value of prop \"foo\" does not match declared type."
        );
        assert_eq!(err.span(), DUMMY_SP);
    }
}
