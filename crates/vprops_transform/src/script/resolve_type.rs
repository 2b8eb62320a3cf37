//! Resolution of the types used in type-only props declarations.
//!
//! Two things happen here:
//! - a type node is dereferenced down to a list of type elements (props);
//! - a type node is classified into a set of coarse runtime types ([`Types`]).

use std::ops::{BitOrAssign, SubAssign};

use phf::{phf_set, Set};
use smallvec::{smallvec, SmallVec};
use strum_macros::{AsRefStr, IntoStaticStr};
use swc_core::{
    common::{Span, Spanned},
    ecma::ast::{
        Decl, Expr, Lit, ModuleDecl, ModuleItem, Module, Stmt, TsEntityName, TsEnumDecl,
        TsExprWithTypeArgs, TsInterfaceDecl, TsKeywordTypeKind, TsLit, TsType, TsTypeElement,
        TsTypeOperatorOp, TsTypeParamInstantiation, TsTypeRef, TsUnionOrIntersectionType,
    },
};
use vprops_core::PropsAtom;

use crate::{
    error::{error, ScriptError, ScriptErrorKind},
    FxIndexMap, ScopeTypeNode, TypeScope,
};

static SUPPORTED_BUILTINS_SET: Set<&'static str> = phf_set! {
    "Partial",
    "Required",
    "Readonly",
    "Pick",
    "Omit",
};

/// Guards against self-referencing aliases, e.g. `type A = B; type B = A`
const MAX_RESOLVE_DEPTH: usize = 64;

pub type ResolutionResult<T> = Result<T, ScriptError>;

/// Runtime types a prop can be checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, IntoStaticStr)]
pub enum Types {
    String,
    Number,
    Boolean,
    Object,
    Array,
    Function,
    /// Could not be statically classified
    #[strum(serialize = "unknown")]
    Unknown,
    /// Any value is accepted
    #[strum(serialize = "null")]
    Null,
}

/// Ordered set of [`Types`]. Keeps the order in which the types were first seen,
/// because the order of e.g. `Boolean` and `String` changes the runtime casting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypesSet(SmallVec<[Types; 2]>);

impl TypesSet {
    pub fn insert(&mut self, t: Types) {
        if !self.contains(t) {
            self.0.push(t);
        }
    }

    #[inline]
    pub fn contains(&self, t: Types) -> bool {
        self.0.contains(&t)
    }

    pub fn remove(&mut self, t: Types) {
        self.0.retain(|it| *it != t);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Types> + '_ {
        self.0.iter().copied()
    }
}

impl From<Types> for TypesSet {
    fn from(value: Types) -> Self {
        TypesSet(smallvec![value])
    }
}

impl FromIterator<Types> for TypesSet {
    fn from_iter<I: IntoIterator<Item = Types>>(iter: I) -> Self {
        let mut result = TypesSet::default();
        for t in iter {
            result.insert(t);
        }
        result
    }
}

impl BitOrAssign<Types> for TypesSet {
    fn bitor_assign(&mut self, rhs: Types) {
        self.insert(rhs);
    }
}

impl BitOrAssign<TypesSet> for TypesSet {
    fn bitor_assign(&mut self, rhs: TypesSet) {
        for t in rhs.0 {
            self.insert(t);
        }
    }
}

impl SubAssign<Types> for TypesSet {
    fn sub_assign(&mut self, rhs: Types) {
        self.remove(rhs);
    }
}

/// The value of a prop found during type resolution
#[derive(Debug, Clone)]
pub enum ResolvedPropValue<'s> {
    /// `foo: string`, or `foo` without an annotation
    Property(Option<&'s TsType>),
    /// `foo(): void`
    Method,
    /// Same key found in several members of a union
    Union(Vec<ResolvedPropValue<'s>>),
    /// Same key found in several members of an intersection
    Intersection(Vec<ResolvedPropValue<'s>>),
}

#[derive(Debug, Clone)]
pub struct ResolvedProp<'s> {
    pub span: Span,
    pub optional: bool,
    pub value: ResolvedPropValue<'s>,
}

#[derive(Debug, Default)]
pub struct ResolvedElements<'s> {
    pub props: FxIndexMap<PropsAtom, ResolvedProp<'s>>,
}

enum MergeElementsAs {
    Union,
    Intersection,
}

/// Records the type declarations of a script.
/// May be called for both `<script>` and `<script setup>` of a component.
pub fn record_types<'s>(scope: &mut TypeScope<'s>, module: &'s Module) {
    for module_item in module.body.iter() {
        let decl = match module_item {
            ModuleItem::Stmt(Stmt::Decl(decl)) => decl,
            ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export_decl)) => &export_decl.decl,
            _ => continue,
        };

        record_type_decl(scope, decl);
    }
}

fn record_type_decl<'s>(scope: &mut TypeScope<'s>, decl: &'s Decl) {
    match decl {
        Decl::TsTypeAlias(alias) => {
            scope
                .types
                .insert(alias.id.sym.to_owned(), ScopeTypeNode::Alias(&**alias));
        }

        Decl::TsInterface(interface) => match scope.types.get_mut(&interface.id.sym) {
            Some(ScopeTypeNode::Interface(decls)) => decls.push(&**interface),
            _ => {
                scope.types.insert(
                    interface.id.sym.to_owned(),
                    ScopeTypeNode::Interface(smallvec![&**interface]),
                );
            }
        },

        Decl::TsEnum(ts_enum) => {
            scope
                .types
                .insert(ts_enum.id.sym.to_owned(), ScopeTypeNode::Enum(&**ts_enum));
        }

        Decl::Class(class_decl) => {
            scope
                .types
                .insert(class_decl.ident.sym.to_owned(), ScopeTypeNode::Class(class_decl));
        }

        _ => {}
    }
}

/// Resolve arbitrary type node to a list of type elements that can be then
/// mapped to runtime props.
pub fn resolve_type_elements<'s>(
    scope: &TypeScope<'s>,
    ts_type: &'s TsType,
) -> ResolutionResult<ResolvedElements<'s>> {
    resolve_type_elements_impl(scope, ts_type, 0)
}

fn resolve_type_elements_impl<'s>(
    scope: &TypeScope<'s>,
    ts_type: &'s TsType,
    depth: usize,
) -> ResolutionResult<ResolvedElements<'s>> {
    if depth > MAX_RESOLVE_DEPTH {
        return Err(error(ScriptErrorKind::ResolveTypeTooDeep, ts_type.span()));
    }

    match ts_type {
        TsType::TsTypeLit(type_lit) => type_elements_to_map(&type_lit.members),

        TsType::TsParenthesizedType(paren) => {
            resolve_type_elements_impl(scope, &paren.type_ann, depth + 1)
        }

        TsType::TsUnionOrIntersectionType(union_or_intersection) => {
            let (types, merge_as) = match union_or_intersection {
                TsUnionOrIntersectionType::TsUnionType(union_type) => {
                    (&union_type.types, MergeElementsAs::Union)
                }
                TsUnionOrIntersectionType::TsIntersectionType(intersection_type) => {
                    (&intersection_type.types, MergeElementsAs::Intersection)
                }
            };

            let mut resolved_elements = Vec::with_capacity(types.len());
            for t in types.iter() {
                resolved_elements.push(resolve_type_elements_impl(scope, t, depth + 1)?);
            }

            Ok(merge_elements(resolved_elements, merge_as))
        }

        TsType::TsTypeRef(type_ref) => {
            let TsEntityName::Ident(ref ident) = type_ref.type_name else {
                return Err(error(ScriptErrorKind::ResolveTypeUnsupported, type_ref.span));
            };

            resolve_reference_elements(
                scope,
                &ident.sym,
                type_ref.type_params.as_deref(),
                type_ref.span,
                depth,
            )
        }

        x => Err(error(ScriptErrorKind::ResolveTypeUnresolvable, x.span())),
    }
}

fn resolve_reference_elements<'s>(
    scope: &TypeScope<'s>,
    name: &PropsAtom,
    type_params: Option<&'s TsTypeParamInstantiation>,
    span: Span,
    depth: usize,
) -> ResolutionResult<ResolvedElements<'s>> {
    if let Some(node) = scope.types.get(name) {
        return match *node {
            ScopeTypeNode::Alias(alias) => {
                resolve_type_elements_impl(scope, &alias.type_ann, depth + 1)
            }
            ScopeTypeNode::Interface(ref decls) => {
                resolve_interface_members(scope, decls, depth + 1)
            }
            ScopeTypeNode::Enum(_) | ScopeTypeNode::Class(_) => {
                Err(error(ScriptErrorKind::ResolveTypeUnresolvable, span))
            }
        };
    }

    if SUPPORTED_BUILTINS_SET.contains(name.as_str()) {
        let Some(type_params) = type_params else {
            return Err(error(ScriptErrorKind::ResolveTypeMissingTypeParam, span));
        };

        return resolve_builtin(scope, name.as_str(), type_params, depth + 1);
    }

    Err(error(ScriptErrorKind::ResolveTypeUnresolvable, span))
}

fn type_elements_to_map(elements: &[TsTypeElement]) -> ResolutionResult<ResolvedElements> {
    let mut result = ResolvedElements::default();

    for ts_type_element in elements.iter() {
        match ts_type_element {
            TsTypeElement::TsPropertySignature(signature) => {
                let key = get_static_key(&signature.key, signature.computed, signature.span)?;
                result.props.insert(
                    key,
                    ResolvedProp {
                        span: signature.span,
                        optional: signature.optional,
                        value: ResolvedPropValue::Property(
                            signature.type_ann.as_ref().map(|ann| &*ann.type_ann),
                        ),
                    },
                );
            }

            TsTypeElement::TsMethodSignature(signature) => {
                let key = get_static_key(&signature.key, signature.computed, signature.span)?;
                result.props.insert(
                    key,
                    ResolvedProp {
                        span: signature.span,
                        optional: signature.optional,
                        value: ResolvedPropValue::Method,
                    },
                );
            }

            TsTypeElement::TsGetterSignature(signature) => {
                let key = get_static_key(&signature.key, signature.computed, signature.span)?;
                result.props.insert(
                    key,
                    ResolvedProp {
                        span: signature.span,
                        optional: false,
                        value: ResolvedPropValue::Property(
                            signature.type_ann.as_ref().map(|ann| &*ann.type_ann),
                        ),
                    },
                );
            }

            // Call, construct and index signatures, as well as setters, do not declare props
            _ => {}
        }
    }

    Ok(result)
}

fn get_static_key(key: &Expr, computed: bool, span: Span) -> ResolutionResult<PropsAtom> {
    if computed {
        return Err(error(ScriptErrorKind::ResolveTypeUnsupportedComputedKey, span));
    }

    match key {
        Expr::Ident(ident) => Ok(ident.sym.to_owned()),
        Expr::Lit(Lit::Str(s)) => Ok(s.value.to_owned()),
        _ => Err(error(ScriptErrorKind::ResolveTypeUnsupportedComputedKey, span)),
    }
}

fn merge_elements<'s>(
    mut elements: Vec<ResolvedElements<'s>>,
    merge_as: MergeElementsAs,
) -> ResolvedElements<'s> {
    if elements.len() == 1 {
        if let Some(single) = elements.pop() {
            return single;
        }
    }

    let mut result = ResolvedElements::default();

    for ResolvedElements { props } in elements {
        for (key, new_prop) in props {
            let Some(existing) = result.props.get_mut(&key) else {
                result.props.insert(key, new_prop);
                continue;
            };

            existing.optional = existing.optional || new_prop.optional;

            let existing_value =
                std::mem::replace(&mut existing.value, ResolvedPropValue::Property(None));
            let values = vec![existing_value, new_prop.value];
            existing.value = match merge_as {
                MergeElementsAs::Union => ResolvedPropValue::Union(values),
                MergeElementsAs::Intersection => ResolvedPropValue::Intersection(values),
            };
        }
    }

    result
}

fn resolve_interface_members<'s>(
    scope: &TypeScope<'s>,
    decls: &[&'s TsInterfaceDecl],
    depth: usize,
) -> ResolutionResult<ResolvedElements<'s>> {
    let mut base = ResolvedElements::default();

    for decl in decls.iter().copied() {
        let own = type_elements_to_map(&decl.body.body)?;
        for (key, value) in own.props {
            base.props.entry(key).or_insert(value);
        }
    }

    for decl in decls.iter().copied() {
        for ext in decl.extends.iter() {
            let Ok(resolved) = resolve_extends(scope, ext, depth) else {
                return Err(error(ScriptErrorKind::ResolveTypeExtendsBaseType, ext.span));
            };

            // Own members take precedence over the inherited ones
            for (key, value) in resolved.props {
                base.props.entry(key).or_insert(value);
            }
        }
    }

    Ok(base)
}

fn resolve_extends<'s>(
    scope: &TypeScope<'s>,
    ext: &'s TsExprWithTypeArgs,
    depth: usize,
) -> ResolutionResult<ResolvedElements<'s>> {
    let Expr::Ident(ref ident) = *ext.expr else {
        return Err(error(ScriptErrorKind::ResolveTypeUnsupported, ext.span));
    };

    resolve_reference_elements(
        scope,
        &ident.sym,
        ext.type_args.as_deref(),
        ext.span,
        depth + 1,
    )
}

fn resolve_builtin<'s>(
    scope: &TypeScope<'s>,
    name: &str,
    type_params: &'s TsTypeParamInstantiation,
    depth: usize,
) -> ResolutionResult<ResolvedElements<'s>> {
    let Some(first_type_param) = type_params.params.first() else {
        return Err(error(
            ScriptErrorKind::ResolveTypeMissingTypeParam,
            type_params.span,
        ));
    };

    let mut resolved = resolve_type_elements_impl(scope, first_type_param, depth + 1)?;

    match name {
        "Partial" => resolved.props.values_mut().for_each(|p| p.optional = true),
        "Required" => resolved.props.values_mut().for_each(|p| p.optional = false),
        "Pick" | "Omit" => {
            let Some(keys_type_param) = type_params.params.get(1) else {
                return Err(error(
                    ScriptErrorKind::ResolveTypeMissingTypeParam,
                    type_params.span,
                ));
            };

            let keys = resolve_string_type(scope, keys_type_param, depth + 1)?;

            if name == "Pick" {
                let mut picked = ResolvedElements::default();
                for key in keys {
                    if let Some(prop) = resolved.props.shift_remove(&key) {
                        picked.props.insert(key, prop);
                    }
                }
                return Ok(picked);
            }

            resolved.props.retain(|key, _| !keys.contains(key));
        }

        // `Readonly` does not change anything at runtime
        _ => {}
    }

    Ok(resolved)
}

/// Resolves a union of string literal types, e.g. `'foo' | 'bar'`
fn resolve_string_type(
    scope: &TypeScope,
    ts_type: &TsType,
    depth: usize,
) -> ResolutionResult<Vec<PropsAtom>> {
    if depth > MAX_RESOLVE_DEPTH {
        return Err(error(ScriptErrorKind::ResolveTypeTooDeep, ts_type.span()));
    }

    match ts_type {
        TsType::TsLitType(lit_type) => match lit_type.lit {
            TsLit::Str(ref s) => Ok(vec![s.value.to_owned()]),
            _ => Err(error(ScriptErrorKind::ResolveTypeUnsupported, lit_type.span)),
        },

        TsType::TsUnionOrIntersectionType(TsUnionOrIntersectionType::TsUnionType(union_type)) => {
            let mut result = Vec::with_capacity(union_type.types.len());
            for t in union_type.types.iter() {
                result.extend(resolve_string_type(scope, t, depth + 1)?);
            }
            Ok(result)
        }

        TsType::TsParenthesizedType(paren) => resolve_string_type(scope, &paren.type_ann, depth + 1),

        TsType::TsTypeRef(TsTypeRef {
            type_name: TsEntityName::Ident(ident),
            span,
            ..
        }) => match scope.types.get(&ident.sym) {
            Some(ScopeTypeNode::Alias(alias)) => {
                resolve_string_type(scope, &alias.type_ann, depth + 1)
            }
            _ => Err(error(ScriptErrorKind::ResolveTypeUnsupported, *span)),
        },

        x => Err(error(ScriptErrorKind::ResolveTypeUnsupported, x.span())),
    }
}

/// Infers runtime types of a resolved prop
pub fn infer_runtime_type_resolved_prop(
    scope: &TypeScope,
    value: &ResolvedPropValue,
) -> TypesSet {
    let inferred = match value {
        ResolvedPropValue::Property(Some(ts_type)) => infer_runtime_type(scope, ts_type),
        ResolvedPropValue::Property(None) => TypesSet::from(Types::Unknown),
        ResolvedPropValue::Method => TypesSet::from(Types::Function),
        ResolvedPropValue::Union(values) => {
            let mut result = TypesSet::default();
            for v in values.iter() {
                result |= infer_runtime_type_resolved_prop(scope, v);
            }
            result
        }
        ResolvedPropValue::Intersection(values) => {
            let mut result = TypesSet::default();
            for v in values.iter() {
                result |= infer_runtime_type_resolved_prop(scope, v);
            }
            result -= Types::Unknown;
            result
        }
    };

    non_empty(inferred)
}

/// Infers the runtime types of a type node. The result is never empty.
pub fn infer_runtime_type(scope: &TypeScope, ts_type: &TsType) -> TypesSet {
    infer_runtime_type_impl(scope, ts_type, 0)
}

fn infer_runtime_type_impl(scope: &TypeScope, ts_type: &TsType, depth: usize) -> TypesSet {
    if depth > MAX_RESOLVE_DEPTH {
        return TypesSet::from(Types::Unknown);
    }

    macro_rules! single {
        ($v: expr) => {
            TypesSet::from($v)
        };
    }

    match ts_type {
        TsType::TsKeywordType(keyword) => match keyword.kind {
            TsKeywordTypeKind::TsStringKeyword => single!(Types::String),
            TsKeywordTypeKind::TsNumberKeyword | TsKeywordTypeKind::TsBigIntKeyword => {
                single!(Types::Number)
            }
            TsKeywordTypeKind::TsBooleanKeyword => single!(Types::Boolean),
            TsKeywordTypeKind::TsObjectKeyword => single!(Types::Object),
            TsKeywordTypeKind::TsNullKeyword => single!(Types::Null),

            TsKeywordTypeKind::TsAnyKeyword
            | TsKeywordTypeKind::TsSymbolKeyword
            | TsKeywordTypeKind::TsUnknownKeyword
            | TsKeywordTypeKind::TsVoidKeyword
            | TsKeywordTypeKind::TsUndefinedKeyword
            | TsKeywordTypeKind::TsNeverKeyword
            | TsKeywordTypeKind::TsIntrinsicKeyword => single!(Types::Unknown),
        },

        TsType::TsTypeLit(type_lit) => infer_type_elements(&type_lit.members),
        TsType::TsFnOrConstructorType(_) => single!(Types::Function),
        TsType::TsArrayType(_) | TsType::TsTupleType(_) => single!(Types::Array),
        TsType::TsMappedType(_) => single!(Types::Object),

        TsType::TsLitType(literal_type) => match literal_type.lit {
            TsLit::Number(_) | TsLit::BigInt(_) => single!(Types::Number),
            TsLit::Str(_) | TsLit::Tpl(_) => single!(Types::String),
            TsLit::Bool(_) => single!(Types::Boolean),
        },

        TsType::TsTypeRef(type_ref) => infer_type_reference(scope, type_ref, depth),

        TsType::TsParenthesizedType(paren) => {
            infer_runtime_type_impl(scope, &paren.type_ann, depth + 1)
        }

        TsType::TsUnionOrIntersectionType(union_or_intersection) => {
            let (types, is_intersection) = match union_or_intersection {
                TsUnionOrIntersectionType::TsUnionType(union_type) => (&union_type.types, false),
                TsUnionOrIntersectionType::TsIntersectionType(intersection) => {
                    (&intersection.types, true)
                }
            };

            let mut result = TypesSet::default();
            for t in types.iter() {
                result |= infer_runtime_type_impl(scope, t, depth + 1);
            }
            if is_intersection {
                result -= Types::Unknown;
            }
            non_empty(result)
        }

        // `keyof`, `unique`, `readonly`
        TsType::TsTypeOperator(type_operator) => match type_operator.op {
            TsTypeOperatorOp::KeyOf => single!(Types::Unknown),
            TsTypeOperatorOp::Unique | TsTypeOperatorOp::ReadOnly => {
                infer_runtime_type_impl(scope, &type_operator.type_ann, depth + 1)
            }
        },

        TsType::TsThisType(_)
        | TsType::TsTypeQuery(_)
        | TsType::TsOptionalType(_)
        | TsType::TsRestType(_)
        | TsType::TsConditionalType(_)
        | TsType::TsInferType(_)
        | TsType::TsIndexedAccessType(_)
        | TsType::TsTypePredicate(_)
        | TsType::TsImportType(_) => single!(Types::Unknown),
    }
}

fn infer_type_reference(scope: &TypeScope, type_ref: &TsTypeRef, depth: usize) -> TypesSet {
    let TsEntityName::Ident(ref ident) = type_ref.type_name else {
        return TypesSet::from(Types::Unknown);
    };

    if let Some(node) = scope.types.get(&ident.sym) {
        return match *node {
            ScopeTypeNode::Alias(alias) => infer_runtime_type_impl(scope, &alias.type_ann, depth + 1),
            ScopeTypeNode::Interface(ref decls) => {
                let mut result = TypesSet::default();
                for decl in decls.iter() {
                    result |= infer_type_elements(&decl.body.body);
                }
                non_empty(result)
            }
            ScopeTypeNode::Enum(ts_enum) => infer_enum_type(ts_enum),
            ScopeTypeNode::Class(_) => TypesSet::from(Types::Object),
        };
    }

    let type_param = |idx: usize| {
        type_ref
            .type_params
            .as_ref()
            .and_then(|params| params.params.get(idx))
    };

    match ident.sym.as_str() {
        "Array" | "ReadonlyArray" | "Parameters" | "ConstructorParameters" => {
            TypesSet::from(Types::Array)
        }
        "Function" => TypesSet::from(Types::Function),
        "String" | "Uppercase" | "Lowercase" | "Capitalize" | "Uncapitalize" => {
            TypesSet::from(Types::String)
        }
        "Number" => TypesSet::from(Types::Number),
        "Boolean" => TypesSet::from(Types::Boolean),

        "Object" | "Record" | "Partial" | "Required" | "Readonly" | "Pick" | "Omit"
        | "InstanceType" | "Set" | "Map" | "WeakSet" | "WeakMap" | "ReadonlySet"
        | "ReadonlyMap" | "Date" | "Promise" | "Error" | "RegExp" => TypesSet::from(Types::Object),

        "NonNullable" => match type_param(0) {
            Some(t) => {
                let mut inferred = infer_runtime_type_impl(scope, t, depth + 1);
                inferred -= Types::Null;
                non_empty(inferred)
            }
            None => TypesSet::from(Types::Unknown),
        },

        "Extract" => match type_param(1) {
            Some(t) => infer_runtime_type_impl(scope, t, depth + 1),
            None => TypesSet::from(Types::Unknown),
        },

        "Exclude" | "OmitThisParameter" => match type_param(0) {
            Some(t) => infer_runtime_type_impl(scope, t, depth + 1),
            None => TypesSet::from(Types::Unknown),
        },

        _ => TypesSet::from(Types::Unknown),
    }
}

fn infer_type_elements(elements: &[TsTypeElement]) -> TypesSet {
    let mut result = TypesSet::default();

    for member in elements.iter() {
        let call_or_construct = matches!(
            member,
            TsTypeElement::TsCallSignatureDecl(_) | TsTypeElement::TsConstructSignatureDecl(_)
        );

        result |= if call_or_construct {
            Types::Function
        } else {
            Types::Object
        };
    }

    if result.is_empty() {
        result |= Types::Object;
    }

    result
}

fn infer_enum_type(ts_enum: &TsEnumDecl) -> TypesSet {
    let mut result = TypesSet::default();

    for m in ts_enum.members.iter() {
        let Some(ref initializer) = m.init else {
            continue;
        };

        match **initializer {
            Expr::Lit(Lit::Str(_)) | Expr::Tpl(_) => result |= Types::String,
            Expr::Lit(Lit::Num(_)) => result |= Types::Number,
            _ => {}
        }
    }

    if result.is_empty() {
        result |= Types::Number;
    }

    result
}

#[inline]
fn non_empty(mut types: TypesSet) -> TypesSet {
    if types.is_empty() {
        types.insert(Types::Unknown);
    }
    types
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::parser::ts_module;
    use itertools::Itertools;

    fn scope_of(module: &Module) -> TypeScope {
        let mut scope = TypeScope::default();
        record_types(&mut scope, module);
        scope
    }

    /// Finds `type <name> = ...` and returns its right-hand side
    fn alias_type<'m>(module: &'m Module, name: &str) -> &'m TsType {
        module
            .body
            .iter()
            .find_map(|item| match item {
                ModuleItem::Stmt(Stmt::Decl(Decl::TsTypeAlias(alias))) if &*alias.id.sym == name => {
                    Some(&*alias.type_ann)
                }
                _ => None,
            })
            .expect("alias should exist")
    }

    fn infer(src: &str) -> Vec<Types> {
        let module = ts_module(src);
        let scope = scope_of(&module);
        infer_runtime_type(&scope, alias_type(&module, "T"))
            .iter()
            .collect_vec()
    }

    fn resolve_keys(src: &str) -> Vec<(String, bool)> {
        let module = ts_module(src);
        let scope = scope_of(&module);
        resolve_type_elements(&scope, alias_type(&module, "T"))
            .expect("should resolve")
            .props
            .iter()
            .map(|(k, v)| (k.to_string(), v.optional))
            .collect_vec()
    }

    fn resolve_err(src: &str) -> ScriptErrorKind {
        let module = ts_module(src);
        let scope = scope_of(&module);
        resolve_type_elements(&scope, alias_type(&module, "T"))
            .expect_err("should not resolve")
            .kind
    }

    #[test]
    fn it_infers_keywords_and_literals() {
        assert_eq!(infer("type T = string"), vec![Types::String]);
        assert_eq!(infer("type T = number"), vec![Types::Number]);
        assert_eq!(infer("type T = bigint"), vec![Types::Number]);
        assert_eq!(infer("type T = boolean"), vec![Types::Boolean]);
        assert_eq!(infer("type T = object"), vec![Types::Object]);
        assert_eq!(infer("type T = null"), vec![Types::Null]);
        assert_eq!(infer("type T = any"), vec![Types::Unknown]);
        assert_eq!(infer("type T = 'foo'"), vec![Types::String]);
        assert_eq!(infer("type T = 42"), vec![Types::Number]);
        assert_eq!(infer("type T = true"), vec![Types::Boolean]);
    }

    #[test]
    fn it_infers_structural_types() {
        assert_eq!(infer("type T = () => void"), vec![Types::Function]);
        assert_eq!(infer("type T = new () => Foo"), vec![Types::Function]);
        assert_eq!(infer("type T = string[]"), vec![Types::Array]);
        assert_eq!(infer("type T = [string, number]"), vec![Types::Array]);
        assert_eq!(infer("type T = { foo: string }"), vec![Types::Object]);
        assert_eq!(infer("type T = {}"), vec![Types::Object]);
        assert_eq!(infer("type T = { (): void }"), vec![Types::Function]);
        assert_eq!(infer("type T = readonly string[]"), vec![Types::Array]);
        assert_eq!(infer("type T = keyof Foo"), vec![Types::Unknown]);
    }

    #[test]
    fn it_keeps_first_seen_order_of_unions() {
        assert_eq!(
            infer("type T = boolean | string | boolean"),
            vec![Types::Boolean, Types::String]
        );
        assert_eq!(
            infer("type T = (number | 'a') | string[] | null"),
            vec![Types::Number, Types::String, Types::Array, Types::Null]
        );
        assert_eq!(
            infer("type T = string | undefined"),
            vec![Types::String, Types::Unknown]
        );
    }

    #[test]
    fn it_drops_unknown_from_intersections() {
        assert_eq!(infer("type T = { a: 1 } & Unknown"), vec![Types::Object]);
        assert_eq!(infer("type T = Foo & Bar"), vec![Types::Unknown]);
    }

    #[test]
    fn it_infers_named_types() {
        assert_eq!(infer("type Foo = string; type T = Foo"), vec![Types::String]);
        assert_eq!(infer("interface Foo { a: 1 } type T = Foo"), vec![Types::Object]);
        assert_eq!(infer("interface Foo { (): void } type T = Foo"), vec![Types::Function]);
        assert_eq!(infer("enum E { A = 'a' } type T = E"), vec![Types::String]);
        assert_eq!(infer("enum E { A, B } type T = E"), vec![Types::Number]);
        assert_eq!(infer("class Foo {} type T = Foo"), vec![Types::Object]);
        assert_eq!(infer("type T = Unresolved"), vec![Types::Unknown]);
        assert_eq!(infer("type T = Foo.Bar"), vec![Types::Unknown]);
    }

    #[test]
    fn it_infers_globals() {
        assert_eq!(infer("type T = Array<string>"), vec![Types::Array]);
        assert_eq!(infer("type T = Function"), vec![Types::Function]);
        assert_eq!(infer("type T = Date"), vec![Types::Object]);
        assert_eq!(infer("type T = Record<string, number>"), vec![Types::Object]);
        assert_eq!(infer("type T = Uppercase<'a'>"), vec![Types::String]);
        assert_eq!(infer("type T = NonNullable<string | null>"), vec![Types::String]);
        assert_eq!(infer("type T = Exclude<number, 1>"), vec![Types::Number]);
        assert_eq!(infer("type T = Extract<string, 'a'>"), vec![Types::String]);
    }

    #[test]
    fn it_does_not_loop_on_circular_aliases() {
        assert_eq!(infer("type A = B; type B = A; type T = A"), vec![Types::Unknown]);
        assert_eq!(
            resolve_err("type A = B; type B = A; type T = A"),
            ScriptErrorKind::ResolveTypeTooDeep
        );
    }

    #[test]
    fn it_resolves_type_literals() {
        assert_eq!(
            resolve_keys("type T = { foo: string; bar?: number; 'baz-qux': boolean; m(): void }"),
            vec![
                ("foo".to_string(), false),
                ("bar".to_string(), true),
                ("baz-qux".to_string(), false),
                ("m".to_string(), false)
            ]
        );
    }

    #[test]
    fn it_resolves_interfaces_with_extends() {
        assert_eq!(
            resolve_keys(
                "
                interface Base { a: string; b?: number }
                interface Props extends Base { b: number; c: boolean }
                interface Props { d: string }
                type T = Props
                "
            ),
            vec![
                ("b".to_string(), false),
                ("c".to_string(), false),
                ("d".to_string(), false),
                ("a".to_string(), false)
            ]
        );

        assert_eq!(
            resolve_err("interface Props extends Missing { a: string } type T = Props"),
            ScriptErrorKind::ResolveTypeExtendsBaseType
        );
    }

    #[test]
    fn it_merges_intersections() {
        assert_eq!(
            resolve_keys("type A = { a: string; c?: number } type T = A & { b: number; c: number }"),
            vec![
                ("a".to_string(), false),
                ("c".to_string(), true),
                ("b".to_string(), false)
            ]
        );
    }

    #[test]
    fn it_infers_merged_props() {
        let module = ts_module("type T = { a: string } & { a: number } | { a?: boolean }");
        let scope = scope_of(&module);
        let resolved =
            resolve_type_elements(&scope, alias_type(&module, "T")).expect("should resolve");
        let a = resolved.props.get(&PropsAtom::from("a")).expect("a should be present");

        assert!(a.optional);
        assert_eq!(
            infer_runtime_type_resolved_prop(&scope, &a.value)
                .iter()
                .collect_vec(),
            vec![Types::String, Types::Number, Types::Boolean]
        );
    }

    #[test]
    fn it_resolves_builtins() {
        assert_eq!(
            resolve_keys("type P = { a: string; b?: number } type T = Partial<P>"),
            vec![("a".to_string(), true), ("b".to_string(), true)]
        );
        assert_eq!(
            resolve_keys("type P = { a: string; b?: number } type T = Required<P>"),
            vec![("a".to_string(), false), ("b".to_string(), false)]
        );
        assert_eq!(
            resolve_keys("type P = { a: string; b?: number; c: 1 } type T = Pick<P, 'c' | 'a'>"),
            vec![("c".to_string(), false), ("a".to_string(), false)]
        );
        assert_eq!(
            resolve_keys(
                "type K = 'a' | 'c'; type P = { a: string; b?: number; c: 1 } type T = Omit<P, K>"
            ),
            vec![("b".to_string(), true)]
        );
        assert_eq!(
            resolve_err("type T = Partial"),
            ScriptErrorKind::ResolveTypeMissingTypeParam
        );
    }

    #[test]
    fn it_rejects_unresolvable_types() {
        assert_eq!(
            resolve_err("type T = string"),
            ScriptErrorKind::ResolveTypeUnresolvable
        );
        assert_eq!(
            resolve_err("type T = Missing"),
            ScriptErrorKind::ResolveTypeUnresolvable
        );
        assert_eq!(
            resolve_err("type T = { [key]: string }"),
            ScriptErrorKind::ResolveTypeUnsupportedComputedKey
        );
        assert_eq!(
            resolve_err("type T = { ['foo']: string }"),
            ScriptErrorKind::ResolveTypeUnsupportedComputedKey
        );
    }
}
