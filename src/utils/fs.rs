//! IO helper: safe file read/write for JSON

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Serializer, Value};

use crate::model::graph::{ExportOptions, GraphError};

fn path_error(p: &Path, source: std::io::Error) -> GraphError {
    GraphError::Path {
        path: p.to_path_buf(),
        source,
    }
}

/// 从文件读取JSON数据
pub fn read_json_file(p: &Path) -> Result<Value, GraphError> {
    let data = fs::read(p).map_err(|e| path_error(p, e))?;
    let v: Value = serde_json::from_slice(&data)?;
    Ok(v)
}

/// 将JSON数据保存到文件（按选项缩进，非ASCII字符原样输出）
pub fn write_json_file(p: &Path, value: &Value, opts: ExportOptions) -> Result<(), GraphError> {
    let f = File::create(p).map_err(|e| path_error(p, e))?;
    let mut w = BufWriter::new(f);
    let indent = vec![b' '; opts.indent];
    let mut ser = Serializer::with_formatter(&mut w, PrettyFormatter::with_indent(&indent));
    value.serialize(&mut ser)?;
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("data.json");
        let value = json!({"名称": "测试", "list": [1, 2.5, null]});
        write_json_file(&p, &value, ExportOptions::default()).expect("写入失败");

        let text = std::fs::read_to_string(&p).unwrap();
        assert!(text.contains("测试"), "非ASCII字符不应被转义");
        assert!(text.contains("\n    \"list\""));
        assert_eq!(read_json_file(&p).unwrap(), value);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_json_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_read_directory_is_path_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_json_file(dir.path()).unwrap_err();
        assert!(matches!(err, GraphError::Path { .. }), "目录应返回路径错误: {}", err);
    }

    #[test]
    fn test_read_invalid_utf8_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("bad.json");
        std::fs::write(&p, b"{\"a\": \"\xff\"}").unwrap();
        assert!(matches!(read_json_file(&p), Err(GraphError::Parse(_))));
    }
}
