//! 程序入口：初始化日志，加载 JSON 为对象图，按需修改字段后写出

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use tracing_subscriber::fmt::SubscriberBuilder;

use objective_parser::model::performance::run_performance_suite;
use objective_parser::{
    build_outline, derive_label, wrap_array, wrap_object, wrap_value, Field, ObjectiveParser,
};

#[derive(Parser, Debug)]
#[command(
    name = "objective-parser",
    about = "Load a JSON document as an object graph, edit fields and write it back",
    version
)]
struct Args {
    /// Input JSON file (required unless --bench)
    #[arg(required_unless_present = "bench")]
    input: Option<PathBuf>,
    /// Optional output .json path; otherwise prints to stdout
    output: Option<PathBuf>,
    /// Set a field by dotted path, value as raw JSON (e.g. schema.comment="b")
    #[arg(long = "set", value_name = "PATH=JSON", value_parser = parse_set_pair)]
    sets: Vec<(String, Value)>,
    /// Print the graph outline instead of the document
    #[arg(long, default_value_t = false)]
    outline: bool,
    /// Run the built-in benchmark suite
    #[arg(long, default_value_t = false)]
    bench: bool,
    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn parse_set_pair(s: &str) -> Result<(String, Value), String> {
    let (path, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("参数格式应为 PATH=JSON: {}", s))?;
    if path.is_empty() {
        return Err("路径不能为空".into());
    }
    let value = serde_json::from_str(raw).map_err(|e| format!("无效的 JSON 值 {}: {}", raw, e))?;
    Ok((path.to_string(), value))
}

/// 按目标路径包装新值：末段为下标时沿用所在序列的标签
fn wrap_for_path(path: &str, value: &Value) -> Field {
    let last = path.rsplit('.').next().unwrap_or(path);
    if last.parse::<usize>().is_err() {
        return wrap_value(last, value);
    }
    let seq_key = path
        .split('.')
        .rev()
        .find(|seg| seg.parse::<usize>().is_err())
        .unwrap_or("");
    let label = derive_label(seq_key, true);
    match value {
        Value::Object(map) => Field::Node(wrap_object(&label, map)),
        Value::Array(items) => Field::Seq(wrap_array(&label, items)),
        other => Field::Value(other.clone()),
    }
}

fn run(args: Args) -> Result<()> {
    if args.bench {
        let results = run_performance_suite();
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    let input = args.input.context("缺少输入文件")?;
    let mut parser = ObjectiveParser::new();
    let graph = parser
        .parse(&input)
        .with_context(|| format!("加载失败: {}", input.display()))?;

    for (path, value) in &args.sets {
        let slot = graph
            .lookup_mut(path)
            .with_context(|| format!("路径不存在: {}", path))?;
        *slot = wrap_for_path(path, value);
        tracing::info!("已修改字段: {}", path);
    }

    if args.outline {
        for entry in build_outline(graph) {
            println!(
                "{}{}\t{:?}{}\t{}",
                "  ".repeat(entry.depth as usize),
                entry.name,
                entry.kind,
                entry.label.map(|l| format!("<{}>", l)).unwrap_or_default(),
                entry.preview
            );
        }
        return Ok(());
    }

    match args.output {
        Some(out) => graph
            .to_json(&out)
            .with_context(|| format!("写出失败: {}", out.display()))?,
        None => println!("{}", serde_json::to_string_pretty(&graph.to_dict()?)?),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 初始化日志输出
    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let _ = SubscriberBuilder::default()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();

    run(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_set_pair() {
        let (path, value) = parse_set_pair(r#"schema.comment="b""#).unwrap();
        assert_eq!(path, "schema.comment");
        assert_eq!(value, json!("b"));

        let (_, value) = parse_set_pair(r#"a={"x": [1, 2]}"#).unwrap();
        assert_eq!(value, json!({"x": [1, 2]}));

        assert!(parse_set_pair("no-equals").is_err(), "缺少等号应该失败");
        assert!(parse_set_pair("a=not json").is_err(), "无效JSON应该失败");
        assert!(parse_set_pair("=1").is_err(), "空路径应该失败");
    }

    #[test]
    fn test_args_from_command_line() {
        let args = Args::try_parse_from([
            "objective-parser",
            "-v",
            "--set",
            "a.b=1",
            "--set",
            "c=true",
            "in.json",
            "out.json",
        ])
        .expect("参数解析失败");
        assert!(args.verbose);
        assert_eq!(args.input, Some(PathBuf::from("in.json")));
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
        assert_eq!(args.sets.len(), 2);
        assert_eq!(args.sets[1], ("c".to_string(), json!(true)));

        assert!(Args::try_parse_from(["objective-parser"]).is_err(), "缺少输入文件应该失败");
        assert!(Args::try_parse_from(["objective-parser", "--bench"]).is_ok());
    }

    #[test]
    fn test_wrap_for_index_path_uses_sequence_label() {
        let field = wrap_for_path("items.1", &json!({"x": 3}));
        assert_eq!(field.as_node().map(|n| n.label()), Some("item"));

        let nested = wrap_for_path("groups.0.members.2", &json!({"id": 1}));
        assert_eq!(nested.as_node().map(|n| n.label()), Some("member"));

        let field = wrap_for_path("schema.owner", &json!({"id": 1}));
        assert_eq!(field.as_node().map(|n| n.label()), Some("owner"));

        assert_eq!(wrap_for_path("items.0", &json!(5)), Field::from(5i64));
    }
}
