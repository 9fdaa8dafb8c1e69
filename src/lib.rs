//! JSON 对象图库
//!
//! 把任意 JSON 文档加载为动态字段的 Node 树，支持按字段名读写，并无损导出回 JSON。

pub mod model;
pub mod utils;

// 重新导出主要类型
pub use model::graph::{
    derive_label, wrap_array, wrap_object, wrap_value, DocumentGraph, ExportOptions, GraphError,
};
pub use model::node::{Field, FieldKind, Node};
pub use model::outline::{build_outline, OutlineEntry};
pub use model::parser::ObjectiveParser;
