//! Node：动态字段对象，一个 JSON 对象对应一个 Node
//!
//! 字段表按插入顺序保存（IndexMap），形状完全由来源 JSON 决定。

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Number, Value};

use crate::model::graph::{export_node, GraphError};

/// 字段类型（与展示解耦）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    Node,
    Seq,
    String,
    Number,
    Bool,
    Null,
    /// 未包装的原始对象
    Object,
    /// 未包装的原始数组
    Array,
}

impl FieldKind {
    pub fn of_value(v: &Value) -> Self {
        match v {
            Value::Object(_) => FieldKind::Object,
            Value::Array(_) => FieldKind::Array,
            Value::String(_) => FieldKind::String,
            Value::Number(_) => FieldKind::Number,
            Value::Bool(_) => FieldKind::Bool,
            Value::Null => FieldKind::Null,
        }
    }
}

/// 字段值：标量 / 嵌套 Node / 有序序列
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Value(Value),
    Node(Node),
    Seq(Vec<Field>),
}

impl Field {
    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Value(v) => FieldKind::of_value(v),
            Field::Node(_) => FieldKind::Node,
            Field::Seq(_) => FieldKind::Seq,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Field::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Field::Node(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_node_mut(&mut self) -> Option<&mut Node> {
        match self {
            Field::Node(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Field]> {
        match self {
            Field::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_seq_mut(&mut self) -> Option<&mut Vec<Field>> {
        match self {
            Field::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// 按单个路径段取子字段：Node 按字段名，序列按十进制下标
    pub fn child(&self, segment: &str) -> Option<&Field> {
        match self {
            Field::Node(n) => n.get(segment),
            Field::Seq(items) => items.get(segment.parse::<usize>().ok()?),
            Field::Value(_) => None,
        }
    }

    pub fn child_mut(&mut self, segment: &str) -> Option<&mut Field> {
        match self {
            Field::Node(n) => n.get_mut(segment),
            Field::Seq(items) => items.get_mut(segment.parse::<usize>().ok()?),
            Field::Value(_) => None,
        }
    }
}

impl From<Value> for Field {
    fn from(v: Value) -> Self {
        Field::Value(v)
    }
}

impl From<Node> for Field {
    fn from(n: Node) -> Self {
        Field::Node(n)
    }
}

impl From<Vec<Field>> for Field {
    fn from(items: Vec<Field>) -> Self {
        Field::Seq(items)
    }
}

impl From<&str> for Field {
    fn from(s: &str) -> Self {
        Field::Value(Value::String(s.to_string()))
    }
}

impl From<String> for Field {
    fn from(s: String) -> Self {
        Field::Value(Value::String(s))
    }
}

impl From<bool> for Field {
    fn from(b: bool) -> Self {
        Field::Value(Value::Bool(b))
    }
}

impl From<i64> for Field {
    fn from(n: i64) -> Self {
        Field::Value(Value::Number(n.into()))
    }
}

impl From<f64> for Field {
    /// NaN / 无穷大无法表示为 JSON 数字，退化为 null
    fn from(f: f64) -> Self {
        Field::Value(
            Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
        )
    }
}

/// 一个 JSON 对象的动态包装
#[derive(Debug, Clone, Default)]
pub struct Node {
    /// 诊断用类型标签，不参与导出与比较
    label: String,
    fields: IndexMap<String, Field>,
}

impl Node {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            fields: IndexMap::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.get_mut(name)
    }

    /// 设置字段，已存在时原位替换并返回旧值（保持字段顺序）
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

    /// 递归导出为 JSON 值
    pub fn data(&self) -> Result<Value, GraphError> {
        export_node(self, "")
    }

    /// 字段表本身（不做递归转换）
    pub fn objects(&self) -> &IndexMap<String, Field> {
        &self.fields
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{:?}]", self.label, self.fields)
    }
}
