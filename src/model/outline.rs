//! 大纲（Outline）：按前序平铺整棵对象图，只存结构、路径与类型标签

use serde::Serialize;
use serde_json::Value;

use crate::model::graph::DocumentGraph;
use crate::model::node::{Field, FieldKind};

#[derive(Debug, Clone, Serialize)]
pub struct OutlineEntry {
    /// 字段名或 `[i]` 形式的下标
    pub name: String,
    /// RFC 9535 JSONPath，可直接用于 `DocumentGraph::query`
    pub path: String,
    pub kind: FieldKind,
    /// Node 的类型标签
    pub label: Option<String>,
    /// 子元素数量（字段数 / 序列长度）
    pub children: u32,
    pub preview: String,
    pub depth: u32,
}

fn preview_of(field: &Field) -> String {
    match field {
        Field::Value(Value::String(s)) => {
            let s = s.trim();
            if s.chars().count() > 32 {
                let truncated: String = s.chars().take(32).collect();
                format!("\"{}...\"", truncated)
            } else {
                format!("\"{}\"", s)
            }
        }
        Field::Value(Value::Object(m)) => format!("{{..}} ({} keys, raw)", m.len()),
        Field::Value(Value::Array(a)) => format!("[..] ({} items, raw)", a.len()),
        Field::Value(v) => v.to_string(),
        Field::Node(n) => format!("{} {{..}} ({} keys)", n.label(), n.len()),
        Field::Seq(items) => format!("[..] ({} items)", items.len()),
    }
}

/// 键名含特殊字符时使用 bracket-notation
fn field_path(parent: &str, key: &str) -> String {
    if !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        format!("{}.{}", parent, key)
    } else {
        format!("{}['{}']", parent, key.replace('\'', "\\'"))
    }
}

fn walk(out: &mut Vec<OutlineEntry>, field: &Field, path: String, name: String, depth: u32) {
    let (label, children) = match field {
        Field::Node(n) => (Some(n.label().to_string()), n.len() as u32),
        Field::Seq(items) => (None, items.len() as u32),
        Field::Value(_) => (None, 0),
    };
    out.push(OutlineEntry {
        name,
        path: path.clone(),
        kind: field.kind(),
        label,
        children,
        preview: preview_of(field),
        depth,
    });
    match field {
        Field::Node(n) => {
            for (k, child) in n.objects() {
                walk(out, child, field_path(&path, k), k.clone(), depth + 1);
            }
        }
        Field::Seq(items) => {
            for (idx, child) in items.iter().enumerate() {
                walk(out, child, format!("{}[{}]", path, idx), format!("[{}]", idx), depth + 1);
            }
        }
        Field::Value(_) => {}
    }
}

pub fn build_outline(graph: &DocumentGraph) -> Vec<OutlineEntry> {
    let mut out = Vec::with_capacity(64);
    out.push(OutlineEntry {
        name: "$".into(),
        path: "$".into(),
        kind: FieldKind::Node,
        label: None,
        children: graph.len() as u32,
        preview: format!("{{..}} ({} keys)", graph.len()),
        depth: 0,
    });
    for (k, field) in graph.objects() {
        walk(&mut out, field, field_path("$", k), k.clone(), 1);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn graph_of(v: Value) -> DocumentGraph {
        DocumentGraph::from_value(v).expect("构建失败")
    }

    #[test]
    fn test_simple_outline() {
        let graph = graph_of(json!({"name": "测试", "age": 30}));
        let outline = build_outline(&graph);

        assert_eq!(outline.len(), 3);
        assert_eq!(outline[0].path, "$");
        assert_eq!(outline[0].children, 2);
        assert_eq!(outline[1].path, "$.name");
        assert_eq!(outline[1].kind, FieldKind::String);
        assert_eq!(outline[2].path, "$.age");
        assert_eq!(outline[2].preview, "30");
    }

    #[test]
    fn test_labels_and_paths() {
        let graph = graph_of(json!({
            "items": [{"id": 1}, [2, 3]],
            "owner": {"profile": {"name": "张三"}}
        }));
        let outline = build_outline(&graph);
        let find = |p: &str| outline.iter().find(|e| e.path == p).unwrap_or_else(|| panic!("缺少 {}", p));

        assert_eq!(find("$.items").kind, FieldKind::Seq);
        assert_eq!(find("$.items").children, 2);
        assert_eq!(find("$.items[0]").label.as_deref(), Some("item"));
        assert_eq!(find("$.items[0].id").depth, 3);
        assert_eq!(find("$.items[1][1]").name, "[1]");
        assert_eq!(find("$.owner.profile").label.as_deref(), Some("profile"));
        assert_eq!(find("$.owner.profile.name").preview, "\"张三\"");
    }

    #[test]
    fn test_special_characters_in_keys() {
        let graph = graph_of(json!({
            "key with spaces": 1,
            "key'with'quotes": 2,
            "": 3
        }));
        let paths: Vec<String> = build_outline(&graph).into_iter().map(|e| e.path).collect();
        assert!(paths.contains(&"$['key with spaces']".to_string()));
        assert!(paths.contains(&"$['key\\'with\\'quotes']".to_string()));
        assert!(paths.contains(&"$['']".to_string()));
    }

    #[test]
    fn test_outline_paths_resolve_with_query() {
        let graph = graph_of(json!({"users": [{"name": "李四"}]}));
        for entry in build_outline(&graph) {
            let hits = graph.query(&entry.path).expect("路径应可查询");
            assert_eq!(hits.len(), 1, "路径 {} 应命中一个节点", entry.path);
        }
    }

    #[test]
    fn test_long_string_preview_truncated() {
        let graph = graph_of(json!({"text": "a".repeat(100)}));
        let outline = build_outline(&graph);
        assert!(outline[1].preview.ends_with("...\""));
    }
}
