use itertools::Itertools;
use swc_core::{
    common::DUMMY_SP,
    ecma::ast::{
        ArrayLit, Bool, CallExpr, Callee, Expr, ExprOrSpread, KeyValueProp, Lit, Null, ObjectLit,
        Prop, PropName, PropOrSpread,
    },
};
use vprops_core::{IntoIdent, PropsAtom, VueImports};

use crate::script::resolve_type::{Types, TypesSet};

/// Converts types to a runtime value, e.g. `String` or `[String, Number]`.
/// The `null` type becomes the `null` literal.
pub fn to_runtime_type_string(types: &TypesSet) -> Box<Expr> {
    let mut type_exprs = types.iter().map(runtime_type_expr).collect_vec();

    if type_exprs.len() == 1 {
        if let Some(single) = type_exprs.pop() {
            return single;
        }
    }

    let array_elems = type_exprs
        .into_iter()
        .map(|expr| Some(ExprOrSpread { spread: None, expr }))
        .collect_vec();

    Box::new(Expr::Array(ArrayLit {
        span: DUMMY_SP,
        elems: array_elems,
    }))
}

fn runtime_type_expr(t: Types) -> Box<Expr> {
    if let Types::Null = t {
        return Box::new(Expr::Lit(Lit::Null(Null { span: DUMMY_SP })));
    }

    let name: &'static str = t.into();
    Box::new(Expr::Ident(PropsAtom::from(name).into_ident()))
}

/// `_helper(arg1, arg2)`
pub fn call_helper(helper: VueImports, args: Vec<Box<Expr>>) -> Box<Expr> {
    // TODO /*#__PURE__*/ comment
    Box::new(Expr::Call(CallExpr {
        span: DUMMY_SP,
        ctxt: Default::default(),
        callee: Callee::Expr(Box::new(Expr::Ident(helper.as_atom().into_ident()))),
        args: args
            .into_iter()
            .map(|expr| ExprOrSpread { spread: None, expr })
            .collect(),
        type_args: None,
    }))
}

#[inline]
pub fn key_value(key: PropName, value: Box<Expr>) -> PropOrSpread {
    PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp { key, value })))
}

#[inline]
pub fn bool_lit(value: bool) -> Box<Expr> {
    Box::new(Expr::Lit(Lit::Bool(Bool {
        span: DUMMY_SP,
        value,
    })))
}

#[inline]
pub fn object_lit(props: Vec<PropOrSpread>) -> Box<Expr> {
    Box::new(Expr::Object(ObjectLit {
        span: DUMMY_SP,
        props,
    }))
}
