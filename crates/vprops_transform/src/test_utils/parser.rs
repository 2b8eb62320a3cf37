use swc_core::{
    common::BytePos,
    ecma::ast::{EsVersion, Expr, Module},
};
use swc_ecma_parser::{lexer::Lexer, Parser, StringInput, Syntax};

pub fn parse_typescript_module(input: &str) -> Result<Module, swc_ecma_parser::error::Error> {
    parse_module(input, Syntax::Typescript(Default::default()))
}

pub fn parse_javascript_module(input: &str) -> Result<Module, swc_ecma_parser::error::Error> {
    parse_module(input, Syntax::Es(Default::default()))
}

pub fn parse_typescript_expr(input: &str) -> Result<Box<Expr>, swc_ecma_parser::error::Error> {
    let lexer = Lexer::new(
        Syntax::Typescript(Default::default()),
        EsVersion::EsNext,
        string_input(input),
        None,
    );

    let mut parser = Parser::new_from(lexer);
    parser.parse_expr()
}

pub fn ts_module(input: &str) -> Module {
    parse_typescript_module(input).expect("ts_module expects the input to be parseable")
}

pub fn js_module(input: &str) -> Module {
    parse_javascript_module(input).expect("js_module expects the input to be parseable")
}

fn parse_module(input: &str, syntax: Syntax) -> Result<Module, swc_ecma_parser::error::Error> {
    let lexer = Lexer::new(syntax, EsVersion::EsNext, string_input(input), None);
    let mut parser = Parser::new_from(lexer);
    parser.parse_module()
}

fn string_input(input: &str) -> StringInput {
    StringInput::new(input, BytePos(0), BytePos(input.len() as u32))
}
