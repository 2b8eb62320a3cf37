use itertools::Itertools;
use swc_core::{
    common::{Spanned, DUMMY_SP},
    ecma::ast::{
        CallExpr, Expr, GetterProp, IdentName, KeyValueProp, Lit, MethodProp, ObjectLit, Pat,
        Prop, PropName, PropOrSpread, SetterProp, TsType,
    },
};
use tracing::{debug, trace};
use vprops_core::{atom_to_propname, BindingTypes, PropsAtom, SetupBinding, VueImports, VueImportsSet};

use crate::{
    atoms::{DEFAULT, DEFINE_PROPS, REQUIRED, SKIP_CHECK, TYPE},
    error::{error, ScriptErrorKind},
    script::{
        resolve_type::{
            infer_runtime_type_resolved_prop, resolve_type_elements, ResolutionResult, Types,
        },
        utils::{collect_obj_fields, collect_string_arr, is_call_of, resolve_object_key},
    },
    FxIndexMap, GeneratedProps, PropTypeData, PropsContext, TypeScope,
};

use super::{
    define_props_destructure::{gen_destructured_default_value, process_props_destructure},
    utils::{bool_lit, call_helper, key_value, object_lit, to_runtime_type_string},
};

/// Processes `defineProps()` and records the declaration into the context.
/// `decl_id` is the left-hand side of the variable declaration the call is assigned to.
pub fn process_define_props<'s>(
    ctx: &mut PropsContext<'s>,
    call_expr: &'s CallExpr,
    decl_id: Option<&'s Pat>,
) -> ResolutionResult<()> {
    process_define_props_impl(ctx, call_expr, decl_id, false)
}

/// Processes `withDefaults(defineProps<T>(), defaults)`
pub fn process_with_defaults<'s>(
    ctx: &mut PropsContext<'s>,
    with_defaults_call: &'s CallExpr,
    decl_id: Option<&'s Pat>,
) -> ResolutionResult<()> {
    // 1. Validate that first argument is `defineProps`
    let first_arg = with_defaults_call.args.first();
    let Some(define_props_call) = first_arg.and_then(|arg| is_call_of(&arg.expr, &DEFINE_PROPS))
    else {
        let span = first_arg.map_or(with_defaults_call.span, |arg| arg.expr.span());
        return Err(error(ScriptErrorKind::WithDefaultsWithoutDefineProps, span));
    };

    process_define_props_impl(ctx, define_props_call, decl_id, true)?;

    // 2. Validate the combination
    if ctx.props_runtime_decl.is_some() {
        return Err(error(
            ScriptErrorKind::WithDefaultsNeedsTypeOnlyDefineProps,
            with_defaults_call.span,
        ));
    }

    if let Some(Pat::Object(object_pat)) = decl_id {
        return Err(error(
            ScriptErrorKind::WithDefaultsWithDestructure,
            object_pat.span,
        ));
    }

    // 3. Defaults
    let Some(defaults) = with_defaults_call.args.get(1) else {
        return Err(error(
            ScriptErrorKind::WithDefaultsMissingDefaults,
            with_defaults_call.span,
        ));
    };

    ctx.props_runtime_defaults = Some(&*defaults.expr);
    ctx.props_call_span = with_defaults_call.span;

    Ok(())
}

fn process_define_props_impl<'s>(
    ctx: &mut PropsContext<'s>,
    call_expr: &'s CallExpr,
    decl_id: Option<&'s Pat>,
    is_with_defaults: bool,
) -> ResolutionResult<()> {
    // Check duplicate
    if ctx.has_define_props_call {
        return Err(error(ScriptErrorKind::DuplicateDefineProps, call_expr.span));
    }
    ctx.has_define_props_call = true;
    ctx.props_call_span = call_expr.span;

    let runtime_decl = call_expr.args.first().map(|arg| &*arg.expr);
    let type_decl = call_expr
        .type_args
        .as_ref()
        .and_then(|type_args| type_args.params.first())
        .map(|ts_type| &**ts_type);

    // Check runtime and types co-usage
    if let (Some(_), Some(type_decl)) = (runtime_decl, type_decl) {
        return Err(error(
            ScriptErrorKind::DefinePropsTypeAndNonTypeArguments,
            type_decl.span(),
        ));
    }

    if let Some(runtime_decl) = runtime_decl {
        // Add props as bindings
        let mut raw_bindings = Vec::new();
        match runtime_decl {
            Expr::Array(props_arr) => collect_string_arr(props_arr, &mut raw_bindings),
            Expr::Object(props_obj) => collect_obj_fields(props_obj, &mut raw_bindings),
            _ => {}
        }

        for raw in raw_bindings {
            register_prop_binding(&mut ctx.setup_bindings, raw);
        }

        ctx.props_runtime_decl = Some(runtime_decl);
    }

    if let Some(type_decl) = type_decl {
        ctx.declared_props = resolve_runtime_props_from_type(&ctx.scope, type_decl)?;
        ctx.props_type_decl = Some(type_decl);

        for key in ctx.declared_props.keys() {
            register_prop_binding(&mut ctx.setup_bindings, key.to_owned());
        }
    }

    debug!(
        is_runtime = ctx.props_runtime_decl.is_some(),
        is_type = ctx.props_type_decl.is_some(),
        is_with_defaults,
        "Recognized defineProps"
    );

    match decl_id {
        Some(Pat::Object(object_pat)) if !is_with_defaults => {
            process_props_destructure(ctx, object_pat)?;
        }
        Some(Pat::Ident(binding)) => {
            let props_identifier = binding.id.sym.to_owned();
            ctx.setup_bindings.push(SetupBinding(
                props_identifier.to_owned(),
                BindingTypes::SetupReactiveConst,
            ));
            ctx.props_identifier = Some(props_identifier);
        }
        _ => {}
    }

    Ok(())
}

/// Registers a prop binding unless a binding with the same name already exists
fn register_prop_binding(setup_bindings: &mut Vec<SetupBinding>, key: PropsAtom) {
    if !setup_bindings.iter().any(|it| it.0 == key) {
        setup_bindings.push(SetupBinding(key, BindingTypes::Props));
    }
}

/// Resolves the props of a type-only declaration and infers their runtime types
pub fn resolve_runtime_props_from_type<'s>(
    scope: &TypeScope<'s>,
    type_decl: &'s TsType,
) -> ResolutionResult<FxIndexMap<PropsAtom, PropTypeData>> {
    let elements = resolve_type_elements(scope, type_decl)?;
    let mut props = FxIndexMap::default();

    for (key, element) in elements.props {
        let mut types = infer_runtime_type_resolved_prop(scope, &element.value);

        // Skip check for result containing unknown types
        let mut skip_check = false;
        if types.contains(Types::Unknown) {
            if types.contains(Types::Boolean) || types.contains(Types::Function) {
                types -= Types::Unknown;
                skip_check = true;
            } else {
                types = Types::Null.into();
            }
        }

        trace!(prop = %key, ?types, skip_check, "Inferred prop types");

        props.insert(
            key.to_owned(),
            PropTypeData {
                key,
                types,
                required: !element.optional,
                skip_check,
            },
        );
    }

    Ok(props)
}

/// Generates the runtime props declaration from the recorded context.
///
/// Returns `None` when there is nothing to declare.
/// The context is not modified, so calling this twice gives the same output.
pub fn gen_runtime_props(ctx: &PropsContext) -> ResolutionResult<Option<GeneratedProps>> {
    let mut vue_imports = VueImportsSet::default();

    let props_decl = if let Some(runtime_decl) = ctx.props_runtime_decl {
        Some(gen_runtime_decl_with_defaults(ctx, runtime_decl, &mut vue_imports)?)
    } else if ctx.props_type_decl.is_some() {
        extract_runtime_props(ctx, &mut vue_imports)?
    } else {
        None
    };

    let decl = match (props_decl, ctx.model_props.as_ref()) {
        (Some(props_decl), Some(model_props)) => {
            vue_imports |= VueImports::MergeModels;
            Some(call_helper(
                VueImports::MergeModels,
                vec![props_decl, model_props.to_owned()],
            ))
        }
        (Some(props_decl), None) => Some(props_decl),
        (None, Some(model_props)) => Some(model_props.to_owned()),
        (None, None) => None,
    };

    debug!(
        has_decl = decl.is_some(),
        vue_imports = ?vue_imports.into_iter().map(VueImports::as_str).collect_vec(),
        "Generated runtime props"
    );

    Ok(decl.map(|decl| GeneratedProps { decl, vue_imports }))
}

/// Runtime declaration, possibly merged with the destructured defaults
fn gen_runtime_decl_with_defaults(
    ctx: &PropsContext,
    runtime_decl: &Expr,
    vue_imports: &mut VueImportsSet,
) -> ResolutionResult<Box<Expr>> {
    let props_decl = Box::new(runtime_decl.to_owned());

    if ctx.props_destructure_decl.is_none() {
        return Ok(props_decl);
    }

    let mut defaults = Vec::with_capacity(ctx.props_destructured_bindings.len());
    for key in ctx.props_destructured_bindings.keys() {
        let Some(destructured) = gen_destructured_default_value(ctx, key, None)? else {
            continue;
        };

        defaults.push(key_value(
            atom_to_propname(key.to_owned(), DUMMY_SP),
            destructured.value,
        ));

        // e.g. `__skip_foo: true`
        if destructured.need_skip_factory {
            let skip_key = PropsAtom::from(format!("__skip_{key}"));
            defaults.push(key_value(
                atom_to_propname(skip_key, DUMMY_SP),
                bool_lit(true),
            ));
        }
    }

    if defaults.is_empty() {
        return Ok(props_decl);
    }

    *vue_imports |= VueImports::MergeDefaults;
    Ok(call_helper(
        VueImports::MergeDefaults,
        vec![props_decl, object_lit(defaults)],
    ))
}

/// Convert type-only props declaration to a runtime value
fn extract_runtime_props(
    ctx: &PropsContext,
    vue_imports: &mut VueImportsSet,
) -> ResolutionResult<Option<Box<Expr>>> {
    if ctx.declared_props.is_empty() {
        return Ok(None);
    }

    let defaults = ctx.props_runtime_defaults;
    let has_static_defaults = has_static_with_defaults(defaults);

    let mut props_obj = ObjectLit {
        span: DUMMY_SP,
        props: Vec::with_capacity(ctx.declared_props.len()),
    };

    for prop in ctx.declared_props.values() {
        props_obj.props.push(get_runtime_prop_from_type(
            ctx,
            prop,
            defaults,
            has_static_defaults,
        )?);
    }

    let mut props_decl = Box::new(Expr::Object(props_obj));

    // Has defaults, but they are not static
    if let (false, Some(defaults)) = (has_static_defaults, defaults) {
        *vue_imports |= VueImports::MergeDefaults;
        props_decl = call_helper(
            VueImports::MergeDefaults,
            vec![props_decl, Box::new(defaults.to_owned())],
        );
    }

    Ok(Some(props_decl))
}

fn get_runtime_prop_from_type(
    ctx: &PropsContext,
    prop: &PropTypeData,
    defaults: Option<&Expr>,
    has_static_defaults: bool,
) -> ResolutionResult<PropOrSpread> {
    let key = &prop.key;

    let default = match gen_destructured_default_value(ctx, key, Some(&prop.types))? {
        Some(destructured) => Some(Box::new(Prop::KeyValue(KeyValueProp {
            key: default_prop_name(),
            value: destructured.value,
        }))),
        None => match defaults {
            Some(Expr::Object(defaults_obj)) if has_static_defaults => {
                find_static_default(key, defaults_obj)
            }
            _ => None,
        },
    };

    // For return value
    let mut prop_object_fields: Vec<PropOrSpread> = Vec::with_capacity(4);

    macro_rules! add_field {
        ($name: expr, $value: expr) => {
            prop_object_fields.push(key_value(
                PropName::Ident(IdentName {
                    span: DUMMY_SP,
                    sym: $name.to_owned(),
                }),
                $value,
            ))
        };
    }

    let prop_name = atom_to_propname(key.to_owned(), DUMMY_SP);

    macro_rules! return_value {
        ($prop_object_fields: expr) => {
            Ok(key_value(prop_name, object_lit($prop_object_fields)))
        };
    }

    let types = &prop.types;

    if !ctx.options.is_prod {
        // e.g. `type: Number`
        add_field!(*TYPE, to_runtime_type_string(types));

        // e.g. `required: true`
        add_field!(*REQUIRED, bool_lit(prop.required));

        // `skipCheck: true`
        if prop.skip_check {
            add_field!(*SKIP_CHECK, bool_lit(true));
        }

        // e.g. `default: 0`
        if let Some(default) = default {
            prop_object_fields.push(PropOrSpread::Prop(default));
        }

        return return_value!(prop_object_fields);
    }

    // Custom element: keep the type.
    // Boolean: keep the type for the casting.
    // Function: keep the type if default value exists or defaults are not static.
    let default_defined_or_not_static = !has_static_defaults || default.is_some();
    if ctx.options.is_ce
        || types.contains(Types::Boolean)
        || (default_defined_or_not_static && types.contains(Types::Function))
    {
        // e.g. `type: Number`
        add_field!(*TYPE, to_runtime_type_string(types));

        // e.g. `default: 0`
        if let Some(default) = default {
            prop_object_fields.push(PropOrSpread::Prop(default));
        }

        return return_value!(prop_object_fields);
    }

    // Production: checks are useless
    let prop_object_fields = match default {
        Some(default) => vec![PropOrSpread::Prop(default)],
        None => vec![],
    };

    return_value!(prop_object_fields)
}

#[inline]
fn default_prop_name() -> PropName {
    PropName::Ident(IdentName {
        span: DUMMY_SP,
        sym: DEFAULT.to_owned(),
    })
}

/// Finds the default of `key` in static defaults and renames it to `default`.
/// Methods and accessors keep their bodies, e.g. `foo() { return 1 }` becomes `default() { return 1 }`.
fn find_static_default(key: &PropsAtom, defaults: &ObjectLit) -> Option<Box<Prop>> {
    for iterated_prop in defaults.props.iter() {
        let PropOrSpread::Prop(iterated_prop) = iterated_prop else {
            continue;
        };

        let key_matches = |prop_name: &PropName| resolve_object_key(prop_name).as_ref() == Some(key);

        let found = match **iterated_prop {
            // Equivalent of `ObjectProperty`
            Prop::KeyValue(ref key_value) if key_matches(&key_value.key) => {
                Prop::KeyValue(KeyValueProp {
                    key: default_prop_name(),
                    value: key_value.value.to_owned(),
                })
            }
            Prop::Shorthand(ref shorthand) if &shorthand.sym == key => {
                Prop::KeyValue(KeyValueProp {
                    key: default_prop_name(),
                    value: Box::new(Expr::Ident(shorthand.to_owned())),
                })
            }

            // Equivalent of `ObjectMethod`
            Prop::Getter(ref getter) if key_matches(&getter.key) => Prop::Getter(GetterProp {
                span: getter.span,
                key: default_prop_name(),
                type_ann: getter.type_ann.to_owned(),
                body: getter.body.to_owned(),
            }),
            Prop::Setter(ref setter) if key_matches(&setter.key) => Prop::Setter(SetterProp {
                span: setter.span,
                key: default_prop_name(),
                this_param: setter.this_param.to_owned(),
                param: setter.param.to_owned(),
                body: setter.body.to_owned(),
            }),
            Prop::Method(ref method) if key_matches(&method.key) => Prop::Method(MethodProp {
                key: default_prop_name(),
                function: method.function.to_owned(),
            }),

            _ => continue,
        };

        return Some(Box::new(found));
    }

    None
}

/// Check defaults. If the default object is an object literal with only
/// static properties, we can directly generate more optimized default
/// declarations. Otherwise we will have to fallback to runtime merging.
fn has_static_with_defaults(defaults: Option<&Expr>) -> bool {
    let Some(Expr::Object(obj)) = defaults else {
        return false;
    };

    obj.props.iter().all(|prop_or_spread| {
        let PropOrSpread::Prop(prop) = prop_or_spread else {
            return false;
        };

        let key = match **prop {
            Prop::KeyValue(ref kv) => &kv.key,
            Prop::Getter(ref getter) => &getter.key,
            Prop::Setter(ref setter) => &setter.key,
            Prop::Method(ref method) => &method.key,
            // Shorthand keys are always static
            Prop::Shorthand(_) => return true,
            // This is not in the ObjectLit
            Prop::Assign(_) => return true,
        };

        match key {
            PropName::Computed(computed_prop_name) => {
                matches!(*computed_prop_name.expr, Expr::Lit(Lit::Str(_) | Lit::Num(_)))
            }
            _ => true,
        }
    })
}
