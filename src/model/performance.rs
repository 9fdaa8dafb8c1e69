//! 性能基准模块
//!
//! 用于测量大文档的包装、导出与大纲构建耗时

use std::time::Instant;

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::model::{graph::DocumentGraph, outline::build_outline};

/// 性能测试结果
#[derive(Debug, Serialize)]
pub struct PerformanceResult {
    pub operation: String,
    pub duration_ms: u128,
    pub success: bool,
    pub details: String,
}

impl PerformanceResult {
    pub fn new(operation: &str, duration_ms: u128, success: bool, details: &str) -> Self {
        Self {
            operation: operation.to_string(),
            duration_ms,
            success,
            details: details.to_string(),
        }
    }
}

/// 生成测试用大型文档，顶层始终是对象
pub fn generate_large_json(depth: usize, width: usize) -> Value {
    fn nested(level: usize, max_depth: usize, width: usize) -> Value {
        if level >= max_depth {
            return json!("leaf");
        }
        let mut obj = Map::new();
        for i in 0..width {
            let value = match i % 5 {
                0 => json!(format!("value_{}", i)),
                1 => json!(-(i as i64)),
                2 => json!(i as f64 / 4.0),
                3 => json!([i, null, [true, false]]),
                _ => nested(level + 1, max_depth, (width / 2).max(1)),
            };
            obj.insert(format!("field_{}", i), value);
        }
        Value::Object(obj)
    }

    let records: Vec<Value> = (0..width * 10)
        .map(|i| {
            json!({
                "id": i,
                "name": format!("record_{}", i),
                "tags": ["a", "b"],
                "active": i % 3 == 0
            })
        })
        .collect();

    json!({
        "metadata": {"depth": depth, "width": width, "description": "生成的测试文档"},
        "data": nested(0, depth, width),
        "records": records
    })
}

pub fn benchmark_wrap(doc: &Value) -> (PerformanceResult, Option<DocumentGraph>) {
    let start = Instant::now();
    let result = DocumentGraph::from_value(doc.clone());
    let duration = start.elapsed().as_millis();
    match result {
        Ok(graph) => {
            let details = format!("包装了 {} 个顶层字段", graph.len());
            (PerformanceResult::new("对象图包装", duration, true, &details), Some(graph))
        }
        Err(e) => (
            PerformanceResult::new("对象图包装", duration, false, &format!("包装失败: {}", e)),
            None,
        ),
    }
}

pub fn benchmark_export(graph: &DocumentGraph) -> PerformanceResult {
    let start = Instant::now();
    let result = graph.to_dict();
    let duration = start.elapsed().as_millis();
    match result {
        Ok(v) => {
            let bytes = serde_json::to_string(&v).map(|s| s.len()).unwrap_or(0);
            PerformanceResult::new("对象图导出", duration, true, &format!("导出了 {} 字节", bytes))
        }
        Err(e) => PerformanceResult::new("对象图导出", duration, false, &format!("导出失败: {}", e)),
    }
}

pub fn benchmark_outline(graph: &DocumentGraph) -> PerformanceResult {
    let start = Instant::now();
    let outline = build_outline(graph);
    let duration = start.elapsed().as_millis();
    PerformanceResult::new(
        "大纲构建",
        duration,
        !outline.is_empty(),
        &format!("构建了 {} 个条目", outline.len()),
    )
}

/// 运行综合性能测试
pub fn run_performance_suite() -> Vec<PerformanceResult> {
    let mut results = Vec::new();
    let test_cases = [(3, 10), (4, 20), (5, 30)];

    for (depth, width) in test_cases {
        tracing::info!("测试规模：深度{}，宽度{}", depth, width);
        let doc = generate_large_json(depth, width);

        let (wrap_result, graph) = benchmark_wrap(&doc);
        results.push(wrap_result);
        if let Some(graph) = graph {
            results.push(benchmark_export(&graph));
            results.push(benchmark_outline(&graph));
        }
    }

    results
}
