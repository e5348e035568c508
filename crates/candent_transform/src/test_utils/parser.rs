use swc_core::common::{comments::SingleThreadedComments, BytePos, Span};
use swc_core::ecma::ast::{EsVersion, Module};
use swc_ecma_parser::{lexer::Lexer, EsConfig, Parser, StringInput, Syntax};

pub fn parse_jsx_module(
    input: &str,
    span_start: u32,
) -> Result<(Module, SingleThreadedComments), swc_ecma_parser::error::Error> {
    let span = Span::new(
        BytePos(span_start),
        BytePos(span_start + input.len() as u32),
    );

    let comments = SingleThreadedComments::default();

    let lexer = Lexer::new(
        Syntax::Es(EsConfig {
            jsx: true,
            ..Default::default()
        }),
        EsVersion::EsNext,
        StringInput::new(input, span.lo, span.hi),
        Some(&comments),
    );

    let mut parser = Parser::new_from(lexer);

    parser.parse_module().map(|module| (module, comments))
}
