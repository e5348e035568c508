pub mod parser;

use swc_core::common::comments::Comment;
use swc_core::common::{sync::Lrc, SourceMap};
use swc_core::ecma::ast::Module;
use swc_ecma_codegen::{text_writer::JsWriter, Emitter, Node};

use crate::options::JsxOptions;
use crate::{collect_comments, error::TransformError, transform_jsx};

/// Parses a JSX-enabled module together with its comments.
pub fn jsx(raw: &str) -> (Module, Vec<Comment>) {
    let (module, comments) = parser::parse_jsx_module(raw, 0).expect("test input must parse");
    (module, collect_comments(comments))
}

/// Runs the whole pass over `raw` and returns the minified output.
pub fn transform_str(raw: &str, options: &JsxOptions) -> Result<String, TransformError> {
    let (mut module, comments) = jsx(raw);
    transform_jsx(&mut module, &comments, options)?;
    Ok(to_str(&module))
}

/// Normalizes expected output through the same parse-then-emit path, so
/// comparisons are insensitive to formatting.
pub fn normalize(raw: &str) -> String {
    let (module, _) = jsx(raw);
    to_str(&module)
}

pub fn to_str(swc_node: &impl Node) -> String {
    // Emitting the result requires some setup with SWC
    let cm: Lrc<SourceMap> = Default::default();
    let mut buff: Vec<u8> = Vec::with_capacity(128);
    let writer: JsWriter<&mut Vec<u8>> = JsWriter::new(cm.clone(), "\n", &mut buff, None);

    let mut emitter_cfg = swc_ecma_codegen::Config::default();
    emitter_cfg.minify = true;

    let mut emitter = Emitter {
        cfg: emitter_cfg,
        comments: None,
        wr: writer,
        cm,
    };

    let _ = swc_node.emit_with(&mut emitter);

    String::from_utf8(buff).unwrap()
}
