//! DocumentGraph：整个 JSON 文档的根容器
//!
//! 加载时把每个嵌套对象/数组递归包装为 Node / 序列，导出时按相同的三路分派还原。

use std::path::{Path, PathBuf};
use std::time::Instant;

use indexmap::IndexMap;
use jsonpath_rust::JsonPath;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::node::{Field, FieldKind, Node};
use crate::utils::fs::{read_json_file, write_json_file};

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("路径不可访问: {path}: {source}")]
    Path {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("IO失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON解析失败: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("结构错误: {0}")]
    Shape(String),
    #[error("JSONPath错误: {0}")]
    JsonPath(String),
    #[error("状态错误: {0}")]
    State(String),
}

/// 写出选项
#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    /// 每级缩进的空格数
    pub indent: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { indent: 4 }
    }
}

/// 派生类型标签：仅当值为序列且键以 `s` 结尾时去掉末尾的 `s`
pub fn derive_label(key: &str, is_sequence: bool) -> String {
    match key.strip_suffix('s') {
        Some(stem) if is_sequence => stem.to_string(),
        _ => key.to_string(),
    }
}

/// 包装一个键值对的值，标签由该键重新派生
pub fn wrap_value(key: &str, value: &Value) -> Field {
    let label = derive_label(key, value.is_array());
    match value {
        Value::Object(map) => Field::Node(wrap_object(&label, map)),
        Value::Array(items) => Field::Seq(wrap_array(&label, items)),
        other => Field::Value(other.clone()),
    }
}

pub fn wrap_object(label: &str, map: &Map<String, Value>) -> Node {
    let mut node = Node::new(label);
    for (k, v) in map {
        node.set(k.clone(), wrap_value(k, v));
    }
    node
}

/// 数组元素沿用同一个标签
pub fn wrap_array(label: &str, items: &[Value]) -> Vec<Field> {
    items
        .iter()
        .map(|item| match item {
            Value::Object(map) => Field::Node(wrap_object(label, map)),
            Value::Array(inner) => Field::Seq(wrap_array(label, inner)),
            other => Field::Value(other.clone()),
        })
        .collect()
}

fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

pub(crate) fn export_node(node: &Node, path: &str) -> Result<Value, GraphError> {
    let mut map = Map::with_capacity(node.len());
    for (k, v) in node.objects() {
        map.insert(k.clone(), export_field(v, &join_path(path, k))?);
    }
    Ok(Value::Object(map))
}

pub(crate) fn export_field(field: &Field, path: &str) -> Result<Value, GraphError> {
    match field {
        Field::Value(v @ (Value::Object(_) | Value::Array(_))) => Err(GraphError::Shape(format!(
            "字段 {} 持有未包装的{:?}值",
            path,
            FieldKind::of_value(v)
        ))),
        Field::Value(v) => Ok(v.clone()),
        Field::Node(n) => export_node(n, path),
        Field::Seq(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| export_field(item, &format!("{}[{}]", path, i)))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
    }
}

fn wrap_document(raw: &Value) -> Result<IndexMap<String, Field>, GraphError> {
    let Value::Object(map) = raw else {
        return Err(GraphError::Shape(format!(
            "顶层必须是对象，实际为 {:?}",
            FieldKind::of_value(raw)
        )));
    };
    let mut fields = IndexMap::with_capacity(map.len());
    for (k, v) in map {
        let field = wrap_value(k, v);
        tracing::debug!("包装顶层字段 {} -> {:?}", k, field.kind());
        fields.insert(k.clone(), field);
    }
    Ok(fields)
}

#[derive(Debug, Default, Clone)]
pub struct DocumentGraph {
    /// 原始解析结果，仅用于诊断，不参与导出
    raw: Option<Value>,
    fields: IndexMap<String, Field>,
    source_path: Option<PathBuf>,
}

impl DocumentGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从内存中的 JSON 值构建
    pub fn from_value(raw: Value) -> Result<Self, GraphError> {
        let fields = wrap_document(&raw)?;
        Ok(Self {
            raw: Some(raw),
            fields,
            source_path: None,
        })
    }

    /// 读取并包装 JSON 文件；失败时保持原状态不变
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, GraphError> {
        let path = path.as_ref();
        let start = Instant::now();
        let raw = read_json_file(path)?;
        let fields = wrap_document(&raw)?;
        tracing::info!(
            "文件加载完成: {}，{} 个顶层字段，耗时: {}ms",
            path.display(),
            fields.len(),
            start.elapsed().as_millis()
        );
        self.fields = fields;
        self.raw = Some(raw);
        self.source_path = Some(path.to_path_buf());
        Ok(self)
    }

    pub fn raw(&self) -> Option<&Value> {
        self.raw.as_ref()
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.raw.is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.get_mut(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Field>) -> Option<Field> {
        self.fields.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<Field> {
        self.fields.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 顶层字段名（独立副本）
    pub fn keys(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }

    pub fn objects(&self) -> &IndexMap<String, Field> {
        &self.fields
    }

    /// 按点分路径取字段，如 `schema.comment`、`items.1.x`
    pub fn lookup(&self, path: &str) -> Option<&Field> {
        let mut segments = path.split('.');
        let mut cur = self.fields.get(segments.next()?)?;
        for seg in segments {
            cur = cur.child(seg)?;
        }
        Some(cur)
    }

    pub fn lookup_mut(&mut self, path: &str) -> Option<&mut Field> {
        let mut segments = path.split('.');
        let mut cur = self.fields.get_mut(segments.next()?)?;
        for seg in segments {
            cur = cur.child_mut(seg)?;
        }
        Some(cur)
    }

    /// 递归导出为 JSON 对象；顶层的原始对象值原样透传
    pub fn to_dict(&self) -> Result<Value, GraphError> {
        let mut out = Map::with_capacity(self.fields.len());
        for (k, v) in &self.fields {
            let exported = match v {
                Field::Value(Value::Object(m)) => Value::Object(m.clone()),
                other => export_field(other, k)?,
            };
            out.insert(k.clone(), exported);
        }
        Ok(Value::Object(out))
    }

    pub fn to_json(&self, path: impl AsRef<Path>) -> Result<(), GraphError> {
        self.to_json_with(path, ExportOptions::default())
    }

    pub fn to_json_with(&self, path: impl AsRef<Path>, opts: ExportOptions) -> Result<(), GraphError> {
        let path = path.as_ref();
        let start = Instant::now();
        let dom = self.to_dict()?;
        write_json_file(path, &dom, opts)?;
        tracing::info!(
            "JSON文件已保存到: {}，耗时: {}ms",
            path.display(),
            start.elapsed().as_millis()
        );
        Ok(())
    }

    /// 写回加载时的源文件
    pub fn save(&self) -> Result<(), GraphError> {
        let path = self
            .source_path
            .as_ref()
            .ok_or_else(|| GraphError::State("源文件路径未设置".into()))?;
        self.to_json(path)
    }

    /// 在导出结果上执行 JSONPath 查询，返回全部命中
    pub fn query(&self, json_path: &str) -> Result<Vec<Value>, GraphError> {
        let dom = self.to_dict()?;
        let hits: Vec<&Value> = dom
            .query(json_path)
            .map_err(|e| GraphError::JsonPath(e.to_string()))?;
        if hits.is_empty() {
            tracing::warn!("JSONPath 未匹配到任何节点: {}", json_path);
        }
        Ok(hits.into_iter().cloned().collect())
    }

    /// 第一个命中节点的 pretty 字符串
    pub fn query_pretty(&self, json_path: &str) -> Result<String, GraphError> {
        let first = self
            .query(json_path)?
            .into_iter()
            .next()
            .ok_or_else(|| GraphError::JsonPath("未匹配到任何节点".into()))?;
        Ok(serde_json::to_string_pretty(&first)?)
    }
}
