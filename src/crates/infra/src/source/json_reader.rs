use application::command::stage_records::SourceReader;
use application::error::SourceError;
use domain::record::{FlatRecord, RawValue};
use serde_json::Value;
use std::path::PathBuf;

/// 读取 JSON 形式的单曲记录
///
/// 顶层是对象，每个字段是一个值数组（通常只有一个元素）。裸标量按长度为 1
/// 的数组处理，数组长度不对的字段留给提取阶段报错。
#[derive(Debug, Clone, Default)]
pub struct JsonRecordReader;

impl JsonRecordReader {
    pub fn new() -> Self {
        Self
    }
}

fn raw_value(field: &str, value: &Value) -> Result<RawValue, SourceError> {
    match value {
        Value::Null => Ok(RawValue::Null),
        Value::String(s) => Ok(RawValue::Bytes(s.as_bytes().to_vec())),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(RawValue::Int(i)),
            None => n
                .as_f64()
                .map(RawValue::Float)
                .ok_or_else(|| SourceError::Undecodable(format!("{}: bad number {}", field, n))),
        },
        other => Err(SourceError::Undecodable(format!(
            "{}: unsupported value {}",
            field, other
        ))),
    }
}

pub fn parse_record(bytes: &[u8]) -> Result<FlatRecord, SourceError> {
    let root: Value =
        serde_json::from_slice(bytes).map_err(|e| SourceError::Undecodable(e.to_string()))?;
    let Value::Object(map) = root else {
        return Err(SourceError::Undecodable(
            "top level is not an object".to_string(),
        ));
    };

    let mut record = FlatRecord::new();
    for (field, value) in &map {
        let values = match value {
            Value::Array(items) => items
                .iter()
                .map(|item| raw_value(field, item))
                .collect::<Result<Vec<_>, _>>()?,
            scalar => vec![raw_value(field, scalar)?],
        };
        record.insert(field.as_str(), values);
    }
    Ok(record)
}

#[async_trait::async_trait]
impl SourceReader for JsonRecordReader {
    async fn read(&self, path: PathBuf) -> Result<FlatRecord, SourceError> {
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| SourceError::Unreadable(format!("{}: {}", path.display(), e)))?;
        parse_record(&bytes)
    }
}
