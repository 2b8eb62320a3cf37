use swc_core::ecma::ast::{
    ArrayLit, CallExpr, Callee, Expr, Lit, ObjectLit, Prop, PropName, PropOrSpread,
};
use vprops_core::PropsAtom;

/// Returns the call expression if `expr` is a call of a function named `name`,
/// e.g. `defineProps()` for `name == "defineProps"`
pub fn is_call_of<'e>(expr: &'e Expr, name: &PropsAtom) -> Option<&'e CallExpr> {
    let Expr::Call(call_expr) = expr else {
        return None;
    };

    let Callee::Expr(ref callee_expr) = call_expr.callee else {
        return None;
    };

    match **callee_expr {
        Expr::Ident(ref callee_ident) if &callee_ident.sym == name => Some(call_expr),
        _ => None,
    }
}

/// Strips TypeScript-only wrappers and parentheses,
/// e.g. `(foo as Bar)!` becomes `foo`
pub fn unwrap_ts_node_expr(expr: &Expr) -> &Expr {
    match expr {
        Expr::TsConstAssertion(ts_const_assertion) => unwrap_ts_node_expr(&ts_const_assertion.expr),
        Expr::TsNonNull(ts_non_null_expr) => unwrap_ts_node_expr(&ts_non_null_expr.expr),
        Expr::TsAs(ts_as_expr) => unwrap_ts_node_expr(&ts_as_expr.expr),
        Expr::TsInstantiation(ts_instantiation) => unwrap_ts_node_expr(&ts_instantiation.expr),
        Expr::TsSatisfies(ts_satisfies_expr) => unwrap_ts_node_expr(&ts_satisfies_expr.expr),
        Expr::TsTypeAssertion(ts_type_assertion) => unwrap_ts_node_expr(&ts_type_assertion.expr),
        Expr::Paren(paren_expr) => unwrap_ts_node_expr(&paren_expr.expr),
        _ => expr,
    }
}

/// Gets the static name of an object key.
/// Computed keys are only supported when they are string or number literals.
pub fn resolve_object_key(key: &PropName) -> Option<PropsAtom> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_owned()),
        PropName::Str(s) => Some(s.value.to_owned()),
        PropName::Num(n) => Some(PropsAtom::from(n.value.to_string())),
        PropName::Computed(computed) => match *computed.expr {
            Expr::Lit(Lit::Str(ref s)) => Some(s.value.to_owned()),
            Expr::Lit(Lit::Num(ref n)) => Some(PropsAtom::from(n.value.to_string())),
            _ => None,
        },
        PropName::BigInt(_) => None,
    }
}

/// Collects the static keys of an object, e.g. `foo` and `bar` in `{ foo: String, bar() {} }`
pub fn collect_obj_fields(obj: &ObjectLit, out: &mut Vec<PropsAtom>) {
    for prop in obj.props.iter() {
        let PropOrSpread::Prop(prop) = prop else {
            continue;
        };

        let key = match **prop {
            Prop::Shorthand(ref ident) => Some(ident.sym.to_owned()),
            Prop::KeyValue(ref kv) => resolve_object_key(&kv.key),
            Prop::Getter(ref getter) => resolve_object_key(&getter.key),
            Prop::Setter(ref setter) => resolve_object_key(&setter.key),
            Prop::Method(ref method) => resolve_object_key(&method.key),
            Prop::Assign(_) => None,
        };

        if let Some(key) = key {
            out.push(key);
        }
    }
}

/// Collects string literals of an array, e.g. `foo` and `bar` in `['foo', 'bar']`
pub fn collect_string_arr(arr: &ArrayLit, out: &mut Vec<PropsAtom>) {
    for elem in arr.elems.iter().flatten() {
        if let (None, Expr::Lit(Lit::Str(s))) = (elem.spread, &*elem.expr) {
            out.push(s.value.to_owned());
        }
    }
}

/// Literal values are safe to be used as prop defaults without a factory
pub fn is_literal_node(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Lit(_) | Expr::Tpl(_) | Expr::Array(_) | Expr::Object(_)
    )
}

#[inline]
pub fn is_function_expr(expr: &Expr) -> bool {
    matches!(expr, Expr::Fn(_) | Expr::Arrow(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ts;

    fn object_keys(raw: &str) -> Vec<PropsAtom> {
        let expr = ts(raw);
        let Expr::Object(ref obj) = *expr else {
            panic!("expected an object");
        };

        let mut out = Vec::new();
        collect_obj_fields(obj, &mut out);
        out
    }

    #[test]
    fn it_recognizes_calls() {
        let name = PropsAtom::from("defineProps");
        assert!(is_call_of(&ts("defineProps()"), &name).is_some());
        assert!(is_call_of(&ts("defineProps<{ foo: string }>()"), &name).is_some());
        assert!(is_call_of(&ts("withDefaults(defineProps())"), &name).is_none());
        assert!(is_call_of(&ts("foo.defineProps()"), &name).is_none());
        assert!(is_call_of(&ts("defineProps"), &name).is_none());
    }

    #[test]
    fn it_unwraps_ts_nodes() {
        let expr = ts("((foo as any)! satisfies Bar)");
        assert!(matches!(unwrap_ts_node_expr(&expr), Expr::Ident(i) if i.sym == "foo"));

        let expr = ts("[1] as const");
        assert!(matches!(unwrap_ts_node_expr(&expr), Expr::Array(_)));
    }

    #[test]
    fn it_collects_object_keys() {
        assert_eq!(
            object_keys("{ foo: String, 'bar-baz': Number, 1: Object, ['qux']: null, [dynamic]: 1, ...rest, shorthand, method() {}, get g() { return 1 } }"),
            vec![
                PropsAtom::from("foo"),
                PropsAtom::from("bar-baz"),
                PropsAtom::from("1"),
                PropsAtom::from("qux"),
                PropsAtom::from("shorthand"),
                PropsAtom::from("method"),
                PropsAtom::from("g"),
            ]
        );
    }

    #[test]
    fn it_collects_array_strings() {
        let expr = ts("['foo', 'bar', baz, ...qux]");
        let Expr::Array(ref arr) = *expr else {
            panic!("expected an array");
        };

        let mut out = Vec::new();
        collect_string_arr(arr, &mut out);
        assert_eq!(out, vec![PropsAtom::from("foo"), PropsAtom::from("bar")]);
    }

    #[test]
    fn it_classifies_literals() {
        assert!(is_literal_node(&ts("1")));
        assert!(is_literal_node(&ts("'foo'")));
        assert!(is_literal_node(&ts("`foo${bar}`")));
        assert!(is_literal_node(&ts("[1, 2]")));
        assert!(is_literal_node(&ts("{ a: 1 }")));
        assert!(!is_literal_node(&ts("foo()")));
        assert!(!is_literal_node(&ts("foo")));

        assert!(is_function_expr(&ts("() => 1")));
        assert!(is_function_expr(&ts("function () {}")));
        assert!(!is_function_expr(&ts("foo")));
    }
}
