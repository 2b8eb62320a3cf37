//! Serialization of the generated declarations to source text

use swc_core::common::{sync::Lrc, SourceMap};
use swc_ecma_codegen::{text_writer::JsWriter, Emitter, Node};
use tracing::warn;

/// Emits the node as regular JavaScript code
pub fn to_source(swc_node: &impl Node) -> String {
    emit(swc_node, false)
}

/// Emits the node without insignificant whitespace
pub fn to_source_minified(swc_node: &impl Node) -> String {
    emit(swc_node, true)
}

fn emit(swc_node: &impl Node, minify: bool) -> String {
    // Emitting the result requires some setup with SWC
    let cm: Lrc<SourceMap> = Default::default();
    let mut buff: Vec<u8> = Vec::with_capacity(128);
    let writer: JsWriter<&mut Vec<u8>> = JsWriter::new(cm.clone(), "\n", &mut buff, None);

    let mut emitter_cfg = swc_ecma_codegen::Config::default();
    emitter_cfg.minify = minify;

    let mut emitter = Emitter {
        cfg: emitter_cfg,
        comments: None,
        wr: writer,
        cm,
    };

    if let Err(e) = swc_node.emit_with(&mut emitter) {
        warn!(error = %e, "Failed to emit node");
    }

    String::from_utf8_lossy(&buff).into_owned()
}
