use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::http::types::EncryptionConfiguration;
use crate::http::ParseError;

pub mod delete;
pub mod get;
pub mod insert;
pub mod list;
pub mod patch;

#[derive(Clone, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TableReference {
    /// Required. The ID of the project containing this table.
    pub project_id: String,
    /// Required. The ID of the dataset containing this table.
    pub dataset_id: String,
    /// Required. The ID of the table.
    /// The ID can contain Unicode characters in category L (letter), M (mark), N (number),
    /// Pc (connector, including underscore), Pd (dash), and Zs (space).
    /// The maximum length is 1,024 characters.
    pub table_id: String,
}

impl TableReference {
    pub fn new(project_id: impl Into<String>, dataset_id: impl Into<String>, table_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset_id: dataset_id.into(),
            table_id: table_id.into(),
        }
    }

    /// Parses `table`, `dataset.table` or `project:dataset.table`.
    /// The parts that are not written are taken from `default`.
    ///
    /// ```
    /// use gcloud_rest_bigquery::http::table::TableReference;
    ///
    /// let default = TableReference::new("my-project", "my_dataset", "");
    /// let table = TableReference::parse("other_dataset.events", &default).unwrap();
    /// assert_eq!(table, TableReference::new("my-project", "other_dataset", "events"));
    /// ```
    pub fn parse(value: &str, default: &TableReference) -> Result<Self, ParseError> {
        let invalid = || ParseError::TableReference(value.to_string());
        if value.is_empty() || value.chars().any(char::is_whitespace) {
            return Err(invalid());
        }
        let mut parsed = default.clone();
        let table = match value.rsplit_once('.') {
            None => value,
            Some((prefix, table)) => {
                let dataset = match prefix.rsplit_once(':') {
                    None => prefix,
                    Some((project, dataset)) => {
                        parsed.project_id = project.to_string();
                        dataset
                    }
                };
                parsed.dataset_id = dataset.to_string();
                table
            }
        };
        if table.is_empty() || parsed.dataset_id.is_empty() || table.contains(':') {
            return Err(invalid());
        }
        parsed.table_id = table.to_string();
        Ok(parsed)
    }
}

/// Renders the legacy SQL form `project:dataset.table`.
impl fmt::Display for TableReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}.{}", self.project_id, self.dataset_id, self.table_id)
    }
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableFieldMode {
    #[default]
    Nullable,
    Required,
    Repeated,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableFieldType {
    #[default]
    String,
    Bytes,
    Integer,
    Float,
    Boolean,
    Timestamp,
    Record,
    Date,
    Time,
    Datetime,
    Numeric,
    Bignumeric,
    Geography,
    Interval,
    Json,
    // aliases
    Int64,
    Float64,
    Bool,
    Struct,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TableFieldSchema {
    /// Required. The field name.
    /// The name must contain only letters (a-z, A-Z), numbers (0-9), or underscores (_),
    /// and must start with a letter or underscore. The maximum length is 300 characters.
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: TableFieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<TableFieldMode>,
    /// Describes the nested schema fields if the type property is set to RECORD.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<TableFieldSchema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Maximum length of values of this field for STRINGS or BYTES.
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<i64>,
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value_expression: Option<String>,
}

impl TableFieldSchema {
    pub fn new(name: impl Into<String>, data_type: TableFieldType) -> Self {
        Self {
            name: name.into(),
            data_type,
            ..Default::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.mode = Some(TableFieldMode::Required);
        self
    }

    pub fn repeated(mut self) -> Self {
        self.mode = Some(TableFieldMode::Repeated);
        self
    }
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TableSchema {
    pub fields: Vec<TableFieldSchema>,
}

impl TableSchema {
    /// Field names in order, nested fields written as `parent.child`.
    pub fn headers(&self) -> Vec<String> {
        fn walk(prefix: &str, fields: &[TableFieldSchema], out: &mut Vec<String>) {
            for field in fields {
                let name = if prefix.is_empty() {
                    field.name.clone()
                } else {
                    format!("{prefix}.{}", field.name)
                };
                match &field.fields {
                    Some(children) if !children.is_empty() => walk(&name, children, out),
                    _ => out.push(name),
                }
            }
        }
        let mut out = vec![];
        walk("", &self.fields, &mut out);
        out
    }
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimePartitionType {
    Hour,
    #[default]
    Day,
    Month,
    Year,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TimePartitioning {
    #[serde(rename = "type")]
    pub partition_type: TimePartitionType,
    /// Number of milliseconds for which to keep the storage for a partition.
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_ms: Option<i64>,
    /// If not set, the table is partitioned by pseudo column `_PARTITIONTIME`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PartitionRange {
    pub start: String,
    pub end: String,
    pub interval: String,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RangePartitioning {
    pub field: String,
    pub range: PartitionRange,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Clustering {
    pub fields: Vec<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceFormat {
    #[default]
    Csv,
    NewlineDelimitedJson,
    Avro,
    DatastoreBackup,
    Parquet,
    Orc,
    GoogleSheets,
    Bigtable,
}

impl SourceFormat {
    /// Resolves the format from an explicit alias, falling back to the file suffix of `path`.
    /// Returns `None` when neither tells the format, leaving the default to the service.
    pub fn infer(path: &str, format: Option<&str>) -> Result<Option<SourceFormat>, ParseError> {
        if let Some(format) = format {
            return format.parse().map(Some);
        }
        let path = path.to_ascii_lowercase();
        let format = if path.ends_with(".csv") {
            Some(SourceFormat::Csv)
        } else if path.ends_with(".json") {
            Some(SourceFormat::NewlineDelimitedJson)
        } else if path.ends_with(".avro") {
            Some(SourceFormat::Avro)
        } else if path.ends_with(".backup_info") {
            Some(SourceFormat::DatastoreBackup)
        } else if path.ends_with(".parquet") {
            Some(SourceFormat::Parquet)
        } else if path.ends_with(".orc") {
            Some(SourceFormat::Orc)
        } else {
            None
        };
        Ok(format)
    }
}

impl FromStr for SourceFormat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(SourceFormat::Csv),
            "json" | "newline_delimited_json" => Ok(SourceFormat::NewlineDelimitedJson),
            "avro" => Ok(SourceFormat::Avro),
            "datastore" | "backup" | "datastore_backup" => Ok(SourceFormat::DatastoreBackup),
            "parquet" => Ok(SourceFormat::Parquet),
            "orc" => Ok(SourceFormat::Orc),
            _ => Err(ParseError::UnknownOption {
                kind: "source format",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DestinationFormat {
    #[default]
    Csv,
    NewlineDelimitedJson,
    Avro,
    Parquet,
}

impl DestinationFormat {
    /// Format named by the file suffix of `path`.
    pub fn infer(path: &str) -> Option<DestinationFormat> {
        let path = path.to_ascii_lowercase();
        if path.ends_with(".csv") {
            Some(DestinationFormat::Csv)
        } else if path.ends_with(".json") {
            Some(DestinationFormat::NewlineDelimitedJson)
        } else if path.ends_with(".avro") {
            Some(DestinationFormat::Avro)
        } else if path.ends_with(".parquet") {
            Some(DestinationFormat::Parquet)
        } else {
            None
        }
    }
}

impl FromStr for DestinationFormat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(DestinationFormat::Csv),
            "json" | "newline_delimited_json" => Ok(DestinationFormat::NewlineDelimitedJson),
            "avro" => Ok(DestinationFormat::Avro),
            "parquet" => Ok(DestinationFormat::Parquet),
            _ => Err(ParseError::UnknownOption {
                kind: "destination format",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CsvOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_delimiter: Option<String>,
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_leading_rows: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_quoted_newlines: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_jagged_rows: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
}

/// Data stored outside BigQuery and queried in place.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExternalDataConfiguration {
    pub source_uris: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<TableSchema>,
    pub source_format: SourceFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bad_records: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autodetect: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_unknown_values: Option<bool>,
    /// `GZIP` or `NONE`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv_options: Option<CsvOptions>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserDefinedFunctionResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_code: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ViewDefinition {
    /// Required. A query that BigQuery executes when the view is referenced.
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_defined_function_resources: Option<Vec<UserDefinedFunctionResource>>,
    /// Defaults to `true` on the service side. Set `Some(false)` for standard SQL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_legacy_sql: Option<bool>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Streamingbuffer {
    #[serde(deserialize_with = "google_cloud_gax::http::from_str_option")]
    pub estimated_bytes: Option<u64>,
    #[serde(deserialize_with = "google_cloud_gax::http::from_str_option")]
    pub estimated_rows: Option<u64>,
    #[serde(deserialize_with = "google_cloud_gax::http::from_str_option")]
    pub oldest_entry_time: Option<u64>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    /// Output only. A hash of this resource. Sent back as `If-Match` on patch.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub etag: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub self_link: String,
    pub table_reference: TableReference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<TableSchema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_partitioning: Option<TimePartitioning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_partitioning: Option<RangePartitioning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clustering: Option<Clustering>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_partition_filter: Option<bool>,
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str_option")]
    #[serde(skip_serializing)]
    pub num_bytes: Option<i64>,
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str_option")]
    #[serde(skip_serializing)]
    pub num_rows: Option<u64>,
    /// Milliseconds since the epoch.
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str_option")]
    #[serde(skip_serializing)]
    pub creation_time: Option<i64>,
    /// Milliseconds since the epoch. The table is deleted at this time.
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<i64>,
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str_option")]
    #[serde(skip_serializing)]
    pub last_modified_time: Option<i64>,
    /// Output only. `TABLE`, `VIEW`, `EXTERNAL`, `MATERIALIZED_VIEW` or `SNAPSHOT`.
    #[serde(rename = "type", default, skip_serializing)]
    pub table_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<ViewDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_data_configuration: Option<ExternalDataConfiguration>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,
    #[serde(default, skip_serializing)]
    pub streaming_buffer: Option<Streamingbuffer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_configuration: Option<EncryptionConfiguration>,
}

impl Table {
    pub fn is_view(&self) -> bool {
        self.table_type == "VIEW"
    }
}
