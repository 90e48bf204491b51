use std::collections::HashMap;
use thiserror::Error;

/// 源文件中一个字段的原始值
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// 字节串（数据集中的字符串字段都以字节形式存储）
    Bytes(Vec<u8>),
    Int(i64),
    Float(f64),
    /// 缺失值哨兵
    Null,
}

/// 提取后的标量
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
}

impl Scalar {
    fn kind(&self) -> &'static str {
        match self {
            Scalar::Text(_) => "text",
            Scalar::Int(_) => "integer",
            Scalar::Float(_) => "float",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecordError {
    #[error("missing field: {0}")]
    MissingField(String),
    #[error("field {field} holds {len} values, expected exactly 1")]
    Cardinality { field: String, len: usize },
    #[error("field {field} is not valid utf-8")]
    InvalidText { field: String },
    #[error("field {field}: expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Reduce a length-1 raw container to one nullable scalar.
///
/// NaN and the null sentinel become `None`, byte strings are decoded as UTF-8
/// and an empty decoded string is treated as missing.
pub fn extract_scalar(field: &str, values: &[RawValue]) -> Result<Option<Scalar>, RecordError> {
    let [value] = values else {
        return Err(RecordError::Cardinality {
            field: field.to_string(),
            len: values.len(),
        });
    };
    match value {
        RawValue::Null => Ok(None),
        RawValue::Float(f) if f.is_nan() => Ok(None),
        RawValue::Float(f) => Ok(Some(Scalar::Float(*f))),
        RawValue::Int(i) => Ok(Some(Scalar::Int(*i))),
        RawValue::Bytes(bytes) => {
            let text = std::str::from_utf8(bytes).map_err(|_| RecordError::InvalidText {
                field: field.to_string(),
            })?;
            if text.is_empty() {
                Ok(None)
            } else {
                Ok(Some(Scalar::Text(text.to_string())))
            }
        }
    }
}

/// 一个源文件读出的扁平记录：字段名 -> 长度为 1 的原始值容器
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatRecord {
    fields: HashMap<String, Vec<RawValue>>,
}

impl FlatRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, values: Vec<RawValue>) {
        self.fields.insert(field.into(), values);
    }

    pub fn with(mut self, field: impl Into<String>, value: RawValue) -> Self {
        self.insert(field, vec![value]);
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn scalar(&self, field: &str) -> Result<Option<Scalar>, RecordError> {
        let values = self
            .fields
            .get(field)
            .ok_or_else(|| RecordError::MissingField(field.to_string()))?;
        extract_scalar(field, values)
    }

    pub fn text(&self, field: &str) -> Result<Option<String>, RecordError> {
        match self.scalar(field)? {
            None => Ok(None),
            Some(Scalar::Text(s)) => Ok(Some(s)),
            Some(other) => Err(mismatch(field, "text", &other)),
        }
    }

    /// Integers widen to float.
    pub fn float(&self, field: &str) -> Result<Option<f64>, RecordError> {
        match self.scalar(field)? {
            None => Ok(None),
            Some(Scalar::Float(f)) => Ok(Some(f)),
            Some(Scalar::Int(i)) => Ok(Some(i as f64)),
            Some(other) => Err(mismatch(field, "float", &other)),
        }
    }

    /// Integral floats narrow to integer, anything else with a fraction is rejected.
    pub fn int(&self, field: &str) -> Result<Option<i64>, RecordError> {
        match self.scalar(field)? {
            None => Ok(None),
            Some(Scalar::Int(i)) => Ok(Some(i)),
            Some(Scalar::Float(f)) if f.fract() == 0.0 && f.is_finite() => Ok(Some(f as i64)),
            Some(other) => Err(mismatch(field, "integer", &other)),
        }
    }
}

fn mismatch(field: &str, expected: &'static str, found: &Scalar) -> RecordError {
    RecordError::TypeMismatch {
        field: field.to_string(),
        expected,
        found: found.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_null_and_nan() {
        assert_eq!(extract_scalar("f", &[RawValue::Null]).unwrap(), None);
        assert_eq!(extract_scalar("f", &[RawValue::Float(f64::NAN)]).unwrap(), None);
    }

    #[test]
    fn test_extract_bytes() {
        let value = RawValue::Bytes(b"Casual".to_vec());
        assert_eq!(
            extract_scalar("title", &[value]).unwrap(),
            Some(Scalar::Text("Casual".to_string()))
        );
    }

    #[test]
    fn test_empty_bytes_are_missing() {
        let value = RawValue::Bytes(Vec::new());
        assert_eq!(extract_scalar("artist_location", &[value]).unwrap(), None);
    }

    #[test]
    fn test_extract_numbers_keep_kind() {
        assert_eq!(
            extract_scalar("year", &[RawValue::Int(1994)]).unwrap(),
            Some(Scalar::Int(1994))
        );
        assert_eq!(
            extract_scalar("tempo", &[RawValue::Float(92.198)]).unwrap(),
            Some(Scalar::Float(92.198))
        );
    }

    #[test]
    fn test_extract_wrong_cardinality() {
        let err = extract_scalar("year", &[]).unwrap_err();
        assert_eq!(
            err,
            RecordError::Cardinality {
                field: "year".to_string(),
                len: 0
            }
        );
        let err = extract_scalar("year", &[RawValue::Int(1), RawValue::Int(2)]).unwrap_err();
        assert!(matches!(err, RecordError::Cardinality { len: 2, .. }));
    }

    #[test]
    fn test_extract_invalid_utf8() {
        let err = extract_scalar("title", &[RawValue::Bytes(vec![0xff, 0xfe])]).unwrap_err();
        assert!(matches!(err, RecordError::InvalidText { .. }));
    }

    #[test]
    fn test_extract_is_idempotent() {
        let input = [RawValue::Bytes("Björk".as_bytes().to_vec())];
        let first = extract_scalar("artist_name", &input).unwrap();
        let second = extract_scalar("artist_name", &input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_typed_accessors() {
        let record = FlatRecord::new()
            .with("year", RawValue::Float(2004.0))
            .with("duration", RawValue::Int(218))
            .with("title", RawValue::Bytes(b"Intro".to_vec()))
            .with("loudness", RawValue::Float(-9.5));

        assert_eq!(record.int("year").unwrap(), Some(2004));
        assert_eq!(record.float("duration").unwrap(), Some(218.0));
        assert_eq!(record.text("title").unwrap(), Some("Intro".to_string()));
        assert!(matches!(
            record.int("loudness"),
            Err(RecordError::TypeMismatch { .. })
        ));
        assert!(matches!(
            record.text("duration"),
            Err(RecordError::TypeMismatch { .. })
        ));
        assert_eq!(
            record.text("release"),
            Err(RecordError::MissingField("release".to_string()))
        );
    }
}
