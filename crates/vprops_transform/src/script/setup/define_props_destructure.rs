use swc_core::{
    common::{Spanned, DUMMY_SP},
    ecma::ast::{
        ArrowExpr, BlockStmtOrExpr, Expr, Lit, ObjectPat, ObjectPatProp, ParenExpr, Pat, PropName,
    },
};
use tracing::trace;
use vprops_core::{BindingTypes, PropsAtom, SetupBinding};

use crate::{
    error::{error, ScriptErrorKind},
    script::{
        resolve_type::{ResolutionResult, Types, TypesSet},
        utils::{is_function_expr, is_literal_node, resolve_object_key, unwrap_ts_node_expr},
    },
    PropsContext, PropsDestructureBinding, PropsDestructureConfig,
};

/// Records the bindings of `const { foo, bar: baz = 1, ...rest } = defineProps()`
pub fn process_props_destructure<'s>(
    ctx: &mut PropsContext<'s>,
    declaration: &'s ObjectPat,
) -> ResolutionResult<()> {
    match ctx.options.props_destructure {
        PropsDestructureConfig::False => return Ok(()),
        PropsDestructureConfig::True => {}
        PropsDestructureConfig::Error => {
            return Err(error(
                ScriptErrorKind::DefinePropsDestructureForbidden,
                declaration.span,
            ));
        }
    }

    ctx.props_destructure_decl = Some(declaration);

    for prop in declaration.props.iter() {
        match prop {
            // `foo: bar` or `foo: bar = 1`
            ObjectPatProp::KeyValue(key_value) => {
                let key = resolve_destructured_key(&key_value.key)?;

                let (local, default) = match *key_value.value {
                    Pat::Ident(ref binding) => (binding.id.sym.to_owned(), None),
                    Pat::Assign(ref assign_pat) => {
                        let Pat::Ident(ref binding) = *assign_pat.left else {
                            return Err(error(
                                ScriptErrorKind::DefinePropsDestructureNestedPattern,
                                assign_pat.left.span(),
                            ));
                        };
                        (binding.id.sym.to_owned(), Some(&*assign_pat.right))
                    }
                    ref other => {
                        return Err(error(
                            ScriptErrorKind::DefinePropsDestructureNestedPattern,
                            other.span(),
                        ));
                    }
                };

                register_destructured_prop(ctx, key, local, default);
            }

            // `foo` or `foo = 1`
            ObjectPatProp::Assign(assign) => {
                let key = assign.key.id.sym.to_owned();
                register_destructured_prop(ctx, key.to_owned(), key, assign.value.as_deref());
            }

            // `...rest`
            ObjectPatProp::Rest(rest) => {
                let Pat::Ident(ref binding) = *rest.arg else {
                    return Err(error(
                        ScriptErrorKind::DefinePropsDestructureNestedPattern,
                        rest.span,
                    ));
                };

                let rest_id = binding.id.sym.to_owned();
                ctx.setup_bindings.push(SetupBinding(
                    rest_id.to_owned(),
                    BindingTypes::SetupReactiveConst,
                ));
                ctx.props_destructure_rest_id = Some(rest_id);
            }
        }
    }

    Ok(())
}

fn resolve_destructured_key(key: &PropName) -> ResolutionResult<PropsAtom> {
    if let PropName::Computed(ref computed) = key {
        return Err(error(
            ScriptErrorKind::DefinePropsDestructureComputedKey,
            computed.span,
        ));
    }

    resolve_object_key(key)
        .ok_or_else(|| error(ScriptErrorKind::DefinePropsDestructureComputedKey, key.span()))
}

fn register_destructured_prop<'s>(
    ctx: &mut PropsContext<'s>,
    key: PropsAtom,
    local: PropsAtom,
    default: Option<&'s Expr>,
) {
    if local != key {
        ctx.props_aliases.insert(local.to_owned(), key.to_owned());
        ctx.setup_bindings
            .push(SetupBinding(local.to_owned(), BindingTypes::PropsAliased));
    }

    ctx.props_destructured_bindings
        .insert(key, PropsDestructureBinding { local, default });
}

pub struct DestructuredDefault {
    pub value: Box<Expr>,
    /// Runtime must not treat a function default as a factory
    pub need_skip_factory: bool,
}

/// Generates the default value of a destructured prop.
///
/// `inferred_types` are the declared types of the prop (type-only declaration),
/// or `None` when the prop was declared in runtime.
pub fn gen_destructured_default_value(
    ctx: &PropsContext,
    key: &PropsAtom,
    inferred_types: Option<&TypesSet>,
) -> ResolutionResult<Option<DestructuredDefault>> {
    let Some(default) = ctx
        .props_destructured_bindings
        .get(key)
        .and_then(|binding| binding.default)
    else {
        return Ok(None);
    };

    let unwrapped = unwrap_ts_node_expr(default);

    if let Some(types) = inferred_types {
        let is_checkable = !types.is_empty()
            && !types.contains(Types::Null)
            && !types.contains(Types::Unknown);

        if is_checkable {
            if let Some(value_type) = infer_value_type(unwrapped) {
                if !types.contains(value_type) {
                    return Err(error(
                        ScriptErrorKind::DefinePropsDestructureDefaultMismatch(key.to_owned()),
                        default.span(),
                    ));
                }
            }
        }
    }

    // When the type is unknown, a function or an identifier may be either
    // the default itself or its factory
    let need_skip_factory = inferred_types.is_none()
        && (is_function_expr(unwrapped) || matches!(unwrapped, Expr::Ident(_)));

    let need_factory_wrap = !need_skip_factory
        && !is_literal_node(unwrapped)
        && !inferred_types.is_some_and(|types| types.contains(Types::Function));

    let mut value = Box::new(default.to_owned());
    if need_factory_wrap {
        // `() => (value)`
        value = Box::new(Expr::Arrow(ArrowExpr {
            span: DUMMY_SP,
            ctxt: Default::default(),
            params: vec![],
            body: Box::new(BlockStmtOrExpr::Expr(Box::new(Expr::Paren(ParenExpr {
                span: DUMMY_SP,
                expr: value,
            })))),
            is_async: false,
            is_generator: false,
            type_params: None,
            return_type: None,
        }));
    }

    trace!(
        prop = %key,
        need_factory_wrap,
        need_skip_factory,
        "Generated destructured default"
    );

    Ok(Some(DestructuredDefault {
        value,
        need_skip_factory,
    }))
}

/// Statically infers the type of a default value
fn infer_value_type(expr: &Expr) -> Option<Types> {
    match expr {
        Expr::Lit(Lit::Str(_)) => Some(Types::String),
        Expr::Lit(Lit::Num(_)) => Some(Types::Number),
        Expr::Lit(Lit::Bool(_)) => Some(Types::Boolean),
        Expr::Object(_) => Some(Types::Object),
        Expr::Array(_) => Some(Types::Array),
        Expr::Fn(_) | Expr::Arrow(_) => Some(Types::Function),
        _ => None,
    }
}
