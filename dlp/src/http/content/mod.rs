//! Content items, inspection settings and findings.
use time::OffsetDateTime;

pub mod deidentify;
pub mod inspect;
pub mod redact_image;
pub mod reidentify;

/// A detector, built in such as `EMAIL_ADDRESS` or custom.
#[derive(Clone, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct InfoType {
    pub name: String,
}

impl InfoType {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Likelihood {
    #[default]
    LikelihoodUnspecified,
    VeryUnlikely,
    Unlikely,
    Possible,
    Likely,
    VeryLikely,
}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentOption {
    #[default]
    ContentUnspecified,
    ContentText,
    ContentImage,
}

/// A column of a [`Table`] or a field of a record.
#[derive(Clone, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct FieldId {
    pub name: String,
}

impl FieldId {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Date {
    pub year: i32,
    pub month: i32,
    pub day: i32,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TimeOfDay {
    #[serde(default)]
    pub hours: i32,
    #[serde(default)]
    pub minutes: i32,
    #[serde(default)]
    pub seconds: i32,
    #[serde(default)]
    pub nanos: i32,
}

/// A primitive cell value.
#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    /// int64 travels as a JSON string.
    IntegerValue(#[serde(with = "int64")] i64),
    FloatValue(f64),
    StringValue(String),
    BooleanValue(bool),
    TimestampValue(#[serde(with = "time::serde::rfc3339")] OffsetDateTime),
    TimeValue(TimeOfDay),
    DateValue(Date),
    /// `MONDAY` to `SUNDAY`.
    DayOfWeekValue(String),
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::StringValue(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::StringValue(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::IntegerValue(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::FloatValue(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::BooleanValue(v)
    }
}

pub(crate) mod int64 {
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        google_cloud_gax::http::from_str(deserializer)
    }
}

#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    #[serde(default)]
    pub values: Vec<Value>,
}

/// Structured content. Up to 50,000 values per request.
#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    #[serde(default)]
    pub headers: Vec<FieldId>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BytesType {
    #[default]
    BytesTypeUnspecified,
    Image,
    ImageJpeg,
    ImageBmp,
    ImagePng,
    ImageSvg,
    TextUtf8,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ByteContentItem {
    /// `TEXT_UTF8` when unspecified.
    #[serde(rename = "type", default)]
    pub bytes_type: BytesType,
    #[serde(default, with = "google_cloud_gax::http::base64")]
    pub data: Vec<u8>,
}

/// The content to inspect or transform.
#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub enum ContentItem {
    Value(String),
    Table(Table),
    ByteItem(ByteContentItem),
}

impl ContentItem {
    pub fn text(value: impl Into<String>) -> Self {
        ContentItem::Value(value.into())
    }
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct InfoTypeLimit {
    /// Applies to every type without a limit of its own when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_type: Option<InfoType>,
    pub max_findings: i32,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct FindingLimits {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_findings_per_item: Option<i32>,
    /// At most 1000 for content inspection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_findings_per_request: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub max_findings_per_info_type: Vec<InfoTypeLimit>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct WordList {
    pub words: Vec<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub enum Dictionary {
    WordList(WordList),
    CloudStoragePath(CloudStoragePath),
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CloudStoragePath {
    /// `gs://bucket/path/to/words.txt`.
    pub path: String,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Regex {
    pub pattern: String,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SurrogateType {}

/// A detector defined by the caller.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CustomInfoType {
    pub info_type: InfoType,
    /// `VERY_LIKELY` when unspecified.
    #[serde(default)]
    pub likelihood: Likelihood,
    #[serde(flatten)]
    pub kind: CustomInfoTypeKind,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub enum CustomInfoTypeKind {
    Dictionary(Dictionary),
    Regex(Regex),
    /// Matches the output of a `surrogate_info_type` of [`CryptoReplaceFfxFpeConfig`](crate::http::transformations::CryptoReplaceFfxFpeConfig).
    SurrogateType(SurrogateType),
}

/// What to look for and how much to report.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct InspectConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub info_types: Vec<InfoType>,
    /// `POSSIBLE` when unspecified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_likelihood: Option<Likelihood>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits: Option<FindingLimits>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub include_quote: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub exclude_info_types: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_info_types: Vec<CustomInfoType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content_options: Vec<ContentOption>,
}

/// Half-open interval `[start, end)`.
#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    #[serde(default, with = "int64")]
    pub start: i64,
    #[serde(default, with = "int64")]
    pub end: i64,
}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    #[serde(default)]
    pub top: i32,
    #[serde(default)]
    pub left: i32,
    #[serde(default)]
    pub width: i32,
    #[serde(default)]
    pub height: i32,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImageLocation {
    #[serde(default)]
    pub bounding_boxes: Vec<BoundingBox>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TableLocation {
    #[serde(default, with = "int64")]
    pub row_index: i64,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecordLocation {
    pub field_id: Option<FieldId>,
    pub table_location: Option<TableLocation>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContentLocation {
    /// The file or table name at the top level.
    #[serde(default)]
    pub container_name: String,
    pub record_location: Option<RecordLocation>,
    pub image_location: Option<ImageLocation>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub container_timestamp: Option<OffsetDateTime>,
    #[serde(default)]
    pub container_version: String,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Byte offsets in the UTF-8 form of the content. Absent for images.
    pub byte_range: Option<Range>,
    /// Unicode character offsets, set for text.
    pub codepoint_range: Option<Range>,
    #[serde(default)]
    pub content_locations: Vec<ContentLocation>,
}

/// A piece of potentially sensitive content.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Set when `include_quote` was requested and the finding is at most 4096 bytes.
    pub quote: Option<String>,
    /// Absent when `exclude_info_types` was requested.
    pub info_type: Option<InfoType>,
    #[serde(default)]
    pub likelihood: Likelihood,
    pub location: Option<Location>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub create_time: Option<OffsetDateTime>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct InspectResult {
    #[serde(default)]
    pub findings: Vec<Finding>,
    /// More findings may exist than were returned.
    #[serde(default)]
    pub findings_truncated: bool,
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use crate::http::content::{
        ByteContentItem, BytesType, ContentItem, CustomInfoType, CustomInfoTypeKind, Dictionary, FieldId, InfoType,
        InspectConfig, InspectResult, Likelihood, Row, Table, Value, WordList,
    };

    #[test]
    fn test_content_item_json() {
        assert_eq!(
            serde_json::to_value(ContentItem::text("call 555-0100")).unwrap(),
            json!({"value": "call 555-0100"})
        );
        let table = ContentItem::Table(Table {
            headers: vec![FieldId::new("id"), FieldId::new("email")],
            rows: vec![Row {
                values: vec![Value::from(7_i64), Value::from("a@example.com")],
            }],
        });
        assert_eq!(
            serde_json::to_value(table).unwrap(),
            json!({"table": {
                "headers": [{"name": "id"}, {"name": "email"}],
                "rows": [{"values": [{"integerValue": "7"}, {"stringValue": "a@example.com"}]}]
            }})
        );
        let bytes = ContentItem::ByteItem(ByteContentItem {
            bytes_type: BytesType::ImagePng,
            data: b"png".to_vec(),
        });
        assert_eq!(
            serde_json::to_value(bytes).unwrap(),
            json!({"byteItem": {"type": "IMAGE_PNG", "data": "cG5n"}})
        );
    }

    #[test]
    fn test_inspect_config_json() {
        let config = InspectConfig {
            info_types: vec![InfoType::new("EMAIL_ADDRESS")],
            min_likelihood: Some(Likelihood::Likely),
            include_quote: true,
            custom_info_types: vec![CustomInfoType {
                info_type: InfoType::new("CODENAME"),
                likelihood: Likelihood::VeryLikely,
                kind: CustomInfoTypeKind::Dictionary(Dictionary::WordList(WordList {
                    words: vec!["falcon".to_string()],
                })),
            }],
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(config).unwrap(),
            json!({
                "infoTypes": [{"name": "EMAIL_ADDRESS"}],
                "minLikelihood": "LIKELY",
                "includeQuote": true,
                "customInfoTypes": [{
                    "infoType": {"name": "CODENAME"},
                    "likelihood": "VERY_LIKELY",
                    "dictionary": {"wordList": {"words": ["falcon"]}}
                }]
            })
        );
    }

    #[test]
    fn test_decode_findings() {
        let result: InspectResult = serde_json::from_value(json!({
            "findings": [{
                "quote": "a@example.com",
                "infoType": {"name": "EMAIL_ADDRESS"},
                "likelihood": "LIKELY",
                "location": {
                    "byteRange": {"start": "8", "end": "21"},
                    "codepointRange": {"start": "8", "end": "21"}
                },
                "createTime": "2024-05-01T10:00:00.120Z"
            }]
        }))
        .unwrap();
        let finding = &result.findings[0];
        assert_eq!(finding.likelihood, Likelihood::Likely);
        assert!(finding.likelihood > Likelihood::Possible);
        assert_eq!(finding.location.as_ref().and_then(|l| l.byte_range).map(|r| r.end), Some(21));
        assert!(!result.findings_truncated);
    }
}
