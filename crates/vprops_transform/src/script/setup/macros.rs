use swc_core::ecma::ast::{Callee, Expr, Pat};
use vprops_core::IntoIdent;

use crate::{
    atoms::{DEFINE_PROPS, PROPS_HELPER, WITH_DEFAULTS},
    error::ScriptError,
    PropsContext,
};

use super::define_props::{process_define_props, process_with_defaults};

pub enum TransformMacroResult {
    NotAMacro,
    ValidMacro(Option<Box<Expr>>),
    Error(ScriptError),
}

/// Tries to process a props macro (`defineProps` or `withDefaults`).
///
/// `decl_id` is the variable pattern the macro is assigned to, if any.
/// In this case the valid macro is substituted with `__props`.
///
/// See https://vuejs.org/api/sfc-script-setup.html#defineprops-defineemits
pub fn transform_script_setup_macro_expr<'s>(
    ctx: &mut PropsContext<'s>,
    expr: &'s Expr,
    decl_id: Option<&'s Pat>,
) -> TransformMacroResult {
    // Script setup macros are calls
    let Expr::Call(ref call_expr) = *expr else {
        return TransformMacroResult::NotAMacro;
    };

    // Callee is an expression
    let Callee::Expr(ref callee_expr) = call_expr.callee else {
        return TransformMacroResult::NotAMacro;
    };

    let Expr::Ident(ref callee_ident) = **callee_expr else {
        return TransformMacroResult::NotAMacro;
    };

    let sym = &callee_ident.sym;
    let result = if DEFINE_PROPS.eq(sym) {
        process_define_props(ctx, call_expr, decl_id)
    } else if WITH_DEFAULTS.eq(sym) {
        process_with_defaults(ctx, call_expr, decl_id)
    } else {
        return TransformMacroResult::NotAMacro;
    };

    if let Err(e) = result {
        return TransformMacroResult::Error(e);
    }

    // Return `__props` when in var mode. None otherwise - still a valid macro
    if decl_id.is_some() {
        TransformMacroResult::ValidMacro(Some(Box::new(Expr::Ident(
            PROPS_HELPER.to_owned().into_ident_spanned(call_expr.span),
        ))))
    } else {
        TransformMacroResult::ValidMacro(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ScriptErrorKind,
        test_utils::{to_str, ts},
        TransformOptions,
    };
    use vprops_core::PropsAtom;

    #[test]
    fn it_ignores_non_macros() {
        for input in ["foo()", "defineEmits()", "props.defineProps()", "defineProps", "1"] {
            let expr = ts(input);
            let mut ctx = PropsContext::new(&TransformOptions::default());
            assert!(matches!(
                transform_script_setup_macro_expr(&mut ctx, &expr, None),
                TransformMacroResult::NotAMacro
            ));
            assert!(!ctx.has_define_props_call);
        }
    }

    #[test]
    fn it_substitutes_props_helper() {
        let expr = ts("defineProps(['foo'])");
        let mut ctx = PropsContext::new(&TransformOptions::default());
        let TransformMacroResult::ValidMacro(None) =
            transform_script_setup_macro_expr(&mut ctx, &expr, None)
        else {
            panic!("expected a valid macro without substitution");
        };
        assert!(ctx.has_define_props_call);

        let expr = ts("withDefaults(defineProps<{ foo?: string }>(), { foo: 'bar' })");
        let pat = Pat::Ident(PropsAtom::from("props").into_ident().into());
        let mut ctx = PropsContext::new(&TransformOptions::default());
        let TransformMacroResult::ValidMacro(Some(substitution)) =
            transform_script_setup_macro_expr(&mut ctx, &expr, Some(&pat))
        else {
            panic!("expected a valid macro with substitution");
        };
        assert_eq!(to_str(&*substitution), "__props");
        assert!(ctx.props_runtime_defaults.is_some());
    }

    #[test]
    fn it_reports_errors() {
        let expr = ts("withDefaults(foo(), {})");
        let mut ctx = PropsContext::new(&TransformOptions::default());
        let TransformMacroResult::Error(e) = transform_script_setup_macro_expr(&mut ctx, &expr, None)
        else {
            panic!("expected an error");
        };
        assert_eq!(e.kind, ScriptErrorKind::WithDefaultsWithoutDefineProps);
    }
}
