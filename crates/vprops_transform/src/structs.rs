//! Exports data structs used by the crate

use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use smallvec::SmallVec;
use swc_core::{
    common::Span,
    ecma::ast::{ClassDecl, Expr, ObjectPat, TsEnumDecl, TsInterfaceDecl, TsType, TsTypeAliasDecl},
};
use vprops_core::{PropsAtom, SetupBinding, VueImportsSet};

use crate::script::resolve_type::TypesSet;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// What to do when `defineProps` result is destructured
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PropsDestructureConfig {
    /// Destructured props are analyzed and their defaults are compiled into the props declaration
    #[default]
    True,
    /// Destructure is left alone, as if it was a normal variable declaration
    False,
    /// Destructure is a compilation error
    Error,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TransformOptions {
    /// Production mode drops the type checks from the generated props
    pub is_prod: bool,
    /// Custom element mode keeps the `type` even in production
    pub is_ce: bool,
    pub props_destructure: PropsDestructureConfig,
}

/// A named type visible to the props declaration
#[derive(Debug, Clone)]
pub enum ScopeTypeNode<'s> {
    /// `type Foo = { bar: string }`
    Alias(&'s TsTypeAliasDecl),
    /// `interface Foo { bar: string }`.
    /// Re-opened interfaces are merged in order of appearance.
    Interface(SmallVec<[&'s TsInterfaceDecl; 1]>),
    /// `enum Foo { Bar = 'bar' }`
    Enum(&'s TsEnumDecl),
    /// `class Foo {}`
    Class(&'s ClassDecl),
}

/// Type declarations of a component script, keyed by their names
#[derive(Debug, Default)]
pub struct TypeScope<'s> {
    pub types: FxIndexMap<PropsAtom, ScopeTypeNode<'s>>,
}

/// Local binding produced by destructuring `defineProps()`
#[derive(Debug, Clone, PartialEq)]
pub struct PropsDestructureBinding<'s> {
    /// Name of the local variable, e.g. `bar` in `const { foo: bar = 1 } = defineProps()`
    pub local: PropsAtom,
    /// Default value, e.g. `1` in `const { foo: bar = 1 } = defineProps()`
    pub default: Option<&'s Expr>,
}

/// Runtime metadata of a single prop declared with types
#[derive(Debug, Clone, PartialEq)]
pub struct PropTypeData {
    pub key: PropsAtom,
    pub types: TypesSet,
    pub required: bool,
    pub skip_check: bool,
}

/// State of the props declaration of one component script.
///
/// It is populated while walking the top-level statements of `<script setup>`
/// and later consumed by [`gen_runtime_props`](crate::script::setup::gen_runtime_props).
/// The script itself is only borrowed, never modified.
#[derive(Debug, Default)]
pub struct PropsContext<'s> {
    pub options: TransformOptions,
    /// Types available for resolving the type-only declaration
    pub scope: TypeScope<'s>,

    pub has_define_props_call: bool,
    /// Span of the `defineProps` (or `withDefaults`) call
    pub props_call_span: Span,
    /// `defineProps({ foo: String })` or `defineProps(['foo'])`
    pub props_runtime_decl: Option<&'s Expr>,
    /// `defineProps<{ foo: string }>()`
    pub props_type_decl: Option<&'s TsType>,
    /// Second argument of `withDefaults`
    pub props_runtime_defaults: Option<&'s Expr>,
    /// `{ foo, bar = 1 }` in `const { foo, bar = 1 } = defineProps()`
    pub props_destructure_decl: Option<&'s ObjectPat>,
    /// Destructured props keyed by the prop name
    pub props_destructured_bindings: FxIndexMap<PropsAtom, PropsDestructureBinding<'s>>,
    /// `rest` in `const { foo, ...rest } = defineProps()`
    pub props_destructure_rest_id: Option<PropsAtom>,
    /// `props` in `const props = defineProps()`
    pub props_identifier: Option<PropsAtom>,
    /// Local alias to prop name, e.g. `bar -> foo` for `const { foo: bar } = defineProps()`
    pub props_aliases: FxIndexMap<PropsAtom, PropsAtom>,
    /// Props extracted from the type declaration
    pub declared_props: FxIndexMap<PropsAtom, PropTypeData>,
    /// Bindings introduced by the props declaration
    pub setup_bindings: Vec<SetupBinding>,

    /// Props generated for `defineModel`, merged into the resulting declaration
    pub model_props: Option<Box<Expr>>,
}

impl<'s> PropsContext<'s> {
    pub fn new(options: &TransformOptions) -> PropsContext<'s> {
        PropsContext {
            options: *options,
            ..Default::default()
        }
    }
}

/// Runtime props declaration ready to be put into the component options
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedProps {
    pub decl: Box<Expr>,
    /// Vue helpers referenced by `decl`
    pub vue_imports: VueImportsSet,
}
