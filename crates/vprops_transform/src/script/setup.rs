use swc_core::ecma::ast::{Decl, Expr, Module, ModuleItem, Pat, Stmt};
use tracing::debug;

use crate::{
    script::{
        resolve_type::{record_types, ResolutionResult},
        utils::unwrap_ts_node_expr,
    },
    GeneratedProps, PropsContext, TransformOptions,
};

mod define_props;
pub mod define_props_destructure;
pub mod macros;
mod utils;

pub use define_props::{
    gen_runtime_props, process_define_props, process_with_defaults,
    resolve_runtime_props_from_type,
};

use self::macros::{transform_script_setup_macro_expr, TransformMacroResult};

pub struct TransformPropsResult<'s> {
    /// Recorded props declaration, destructure and bindings
    pub context: PropsContext<'s>,
    /// `None` when the component declares no props
    pub runtime_props: Option<GeneratedProps>,
}

/// Walks the top-level statements of `<script setup>` and records the props declaration.
/// Stops at the first declaration error.
pub fn analyze_script_setup<'s>(
    module: &'s Module,
    options: &TransformOptions,
) -> ResolutionResult<PropsContext<'s>> {
    let mut ctx = PropsContext::new(options);
    record_types(&mut ctx.scope, module);

    for module_item in module.body.iter() {
        let ModuleItem::Stmt(stmt) = module_item else {
            continue;
        };

        match stmt {
            // `defineProps()`
            Stmt::Expr(expr_stmt) => {
                check_macro(&mut ctx, &expr_stmt.expr, None)?;
            }

            // `const props = defineProps()`
            Stmt::Decl(Decl::Var(var_decl)) => {
                for var_declarator in var_decl.decls.iter() {
                    let Some(ref init) = var_declarator.init else {
                        continue;
                    };

                    check_macro(&mut ctx, init, Some(&var_declarator.name))?;
                }
            }

            _ => {}
        }
    }

    debug!(
        has_define_props_call = ctx.has_define_props_call,
        declared_props = ctx.declared_props.len(),
        destructured = ctx.props_destructured_bindings.len(),
        "Analyzed script setup"
    );

    Ok(ctx)
}

fn check_macro<'s>(
    ctx: &mut PropsContext<'s>,
    expr: &'s Expr,
    decl_id: Option<&'s Pat>,
) -> ResolutionResult<()> {
    match transform_script_setup_macro_expr(ctx, unwrap_ts_node_expr(expr), decl_id) {
        TransformMacroResult::Error(e) => Err(e),
        TransformMacroResult::NotAMacro | TransformMacroResult::ValidMacro(_) => Ok(()),
    }
}

/// Records the props declaration of `<script setup>` and generates the runtime props.
///
/// `model_props` are the props generated for `defineModel` calls, if any.
pub fn transform_script_setup_props<'s>(
    module: &'s Module,
    options: &TransformOptions,
    model_props: Option<Box<Expr>>,
) -> ResolutionResult<TransformPropsResult<'s>> {
    let mut context = analyze_script_setup(module, options)?;
    context.model_props = model_props;

    let runtime_props = gen_runtime_props(&context)?;

    Ok(TransformPropsResult {
        context,
        runtime_props,
    })
}
