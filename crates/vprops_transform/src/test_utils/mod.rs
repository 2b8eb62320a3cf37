pub mod parser;

use swc_core::ecma::ast::Expr;
use swc_ecma_codegen::Node;

use self::parser::parse_typescript_expr;

pub fn ts(raw: &str) -> Box<Expr> {
    parse_typescript_expr(raw).expect("ts expects the input to be parseable")
}

/// Installs a log subscriber controlled by `RUST_LOG`, once per test binary
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn to_str(swc_node: &impl Node) -> String {
    crate::emit::to_source_minified(swc_node)
}
