use std::collections::HashMap;
use std::str::FromStr;

use base64::prelude::*;

use crate::http::dataset::DatasetReference;
use crate::http::table::{
    Clustering, DestinationFormat, ExternalDataConfiguration, SourceFormat, TableReference, TableSchema,
    TimePartitioning, UserDefinedFunctionResource,
};
use crate::http::types::{EncryptionConfiguration, ErrorProto, QueryParameter};
use crate::http::ParseError;

pub mod cancel;
pub mod delete;
pub mod get;
pub mod get_query_results;
pub mod insert;
pub mod list;
pub mod query;
pub mod upload;

/// Specifies whether the job is allowed to create new tables.
#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreateDisposition {
    /// If the table does not exist, BigQuery creates the table.
    #[default]
    CreateIfNeeded,
    /// The table must already exist. If it does not, a 'notFound' error is returned in the job result.
    CreateNever,
}

impl FromStr for CreateDisposition {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "create_if_needed" | "createifneeded" | "if_needed" | "needed" => Ok(CreateDisposition::CreateIfNeeded),
            "create_never" | "createnever" | "never" => Ok(CreateDisposition::CreateNever),
            _ => Err(ParseError::UnknownOption {
                kind: "create disposition",
                value: s.to_string(),
            }),
        }
    }
}

/// Specifies the action that occurs if the destination table already exists.
#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WriteDisposition {
    /// BigQuery overwrites the table data and uses the schema from the query result.
    WriteTruncate,
    /// BigQuery appends the data to the table.
    WriteAppend,
    /// If the table already exists and contains data, a 'duplicate' error is returned in the job result.
    #[default]
    WriteEmpty,
}

impl FromStr for WriteDisposition {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "write_truncate" | "writetruncate" | "truncate" => Ok(WriteDisposition::WriteTruncate),
            "write_append" | "writeappend" | "append" => Ok(WriteDisposition::WriteAppend),
            "write_empty" | "writeempty" | "empty" => Ok(WriteDisposition::WriteEmpty),
            _ => Err(ParseError::UnknownOption {
                kind: "write disposition",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    #[default]
    Interactive,
    /// Queued and started as soon as idle resources are available.
    Batch,
}

impl FromStr for Priority {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "interactive" => Ok(Priority::Interactive),
            "batch" => Ok(Priority::Batch),
            _ => Err(ParseError::UnknownOption {
                kind: "priority",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchemaUpdateOption {
    AllowFieldAddition,
    AllowFieldRelaxation,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct JobConfigurationQuery {
    /// SQL query text to execute.
    pub query: String,
    /// Describes the table where the query results should be stored.
    /// If not present, a new table will be created in an anonymous dataset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_table: Option<TableReference>,
    /// External tables the query refers to, keyed by the name used in the query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_definitions: Option<HashMap<String, ExternalDataConfiguration>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_defined_function_resources: Option<Vec<UserDefinedFunctionResource>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_disposition: Option<CreateDisposition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_disposition: Option<WriteDisposition>,
    /// Specifies the default dataset to use for unqualified table names in the query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_dataset: Option<DatasetReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Legacy SQL only. Requires a destination table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_large_results: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_query_cache: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flatten_results: Option<bool>,
    /// Queries that would bill more bytes fail without incurring a charge.
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_bytes_billed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_legacy_sql: Option<bool>,
    /// `NAMED` or `POSITIONAL`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query_parameters: Vec<QueryParameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_update_options: Option<Vec<SchemaUpdateOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_partitioning: Option<TimePartitioning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clustering: Option<Clustering>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_encryption_configuration: Option<EncryptionConfiguration>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct JobConfigurationLoad {
    /// The fully-qualified URIs that point to your data in Google Cloud. Empty for media uploads.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_uris: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<TableSchema>,
    pub destination_table: TableReference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_disposition: Option<CreateDisposition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_disposition: Option<WriteDisposition>,
    /// Specifies a string that represents a null value in a CSV file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub null_marker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_delimiter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_leading_rows: Option<i64>,
    /// `UTF-8` or `ISO-8859-1`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bad_records: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_quoted_newlines: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_format: Option<SourceFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_jagged_rows: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_unknown_values: Option<bool>,
    /// Cloud Datastore backups only: which entity properties to load.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autodetect: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_update_options: Option<Vec<SchemaUpdateOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_partitioning: Option<TimePartitioning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clustering: Option<Clustering>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_encryption_configuration: Option<EncryptionConfiguration>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct JobConfigurationTableCopy {
    pub source_tables: Vec<TableReference>,
    pub destination_table: TableReference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_disposition: Option<CreateDisposition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_disposition: Option<WriteDisposition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_encryption_configuration: Option<EncryptionConfiguration>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct JobConfigurationExtract {
    /// Fully-qualified Cloud Storage URIs where the extracted table should be written.
    /// A single `*` wildcard splits large tables into several files.
    pub destination_uris: Vec<String>,
    pub source_table: TableReference,
    /// Whether to print out a header row in the results. Default is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_header: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_delimiter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_format: Option<DestinationFormat>,
    /// `GZIP`, `DEFLATE`, `SNAPPY` or `NONE`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<String>,
}

/// Exactly one of `query`, `load`, `copy` and `extract` is expected to be set.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct JobConfiguration {
    /// Output only. The type of the job, such as `QUERY`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub job_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<JobConfigurationQuery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load: Option<JobConfigurationLoad>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy: Option<JobConfigurationTableCopy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extract: Option<JobConfigurationExtract>,
    /// If set, don't actually run this job.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_timeout_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct JobReference {
    pub project_id: String,
    /// The ID of the job. The ID must contain only letters (a-z, A-Z), numbers (0-9), underscores (_), or dashes (-).
    /// The maximum length is 1,024 characters.
    pub job_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Prefix of the ids generated by [`generate_job_id`].
pub const DEFAULT_JOB_ID_PREFIX: &str = "job_";

/// `prefix` (or `job_`) followed by 28 url-safe random characters.
///
/// Jobs are always inserted with an id chosen on this side, so a retried insert can't start the job twice.
pub fn generate_job_id(prefix: Option<&str>) -> String {
    let random: [u8; 21] = rand::random();
    format!(
        "{}{}",
        prefix.unwrap_or(DEFAULT_JOB_ID_PREFIX),
        BASE64_URL_SAFE_NO_PAD.encode(random)
    )
}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobState {
    #[default]
    Pending,
    Running,
    Done,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct JobStatus {
    /// Final error result of the job. If present, indicates that the job has completed and was unsuccessful.
    pub error_result: Option<ErrorProto>,
    /// All errors encountered during the running of the job.
    /// The presence of errors does not necessarily mean that the job has completed or was unsuccessful.
    pub errors: Option<Vec<ErrorProto>>,
    pub state: JobState,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct JobStatisticsQuery {
    #[serde(deserialize_with = "google_cloud_gax::http::from_str_option")]
    pub total_bytes_processed: Option<i64>,
    #[serde(deserialize_with = "google_cloud_gax::http::from_str_option")]
    pub total_bytes_billed: Option<i64>,
    pub cache_hit: Option<bool>,
    #[serde(deserialize_with = "google_cloud_gax::http::from_str_option")]
    pub num_dml_affected_rows: Option<i64>,
    /// `SELECT`, `INSERT`, `CREATE_TABLE` ...
    pub statement_type: Option<String>,
    pub referenced_tables: Vec<TableReference>,
    pub schema: Option<TableSchema>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct JobStatisticsLoad {
    #[serde(deserialize_with = "google_cloud_gax::http::from_str_option")]
    pub input_files: Option<i64>,
    #[serde(deserialize_with = "google_cloud_gax::http::from_str_option")]
    pub input_file_bytes: Option<i64>,
    #[serde(deserialize_with = "google_cloud_gax::http::from_str_option")]
    pub output_rows: Option<i64>,
    #[serde(deserialize_with = "google_cloud_gax::http::from_str_option")]
    pub output_bytes: Option<i64>,
    #[serde(deserialize_with = "google_cloud_gax::http::from_str_option")]
    pub bad_records: Option<i64>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct JobStatisticsExtract {
    /// Number of files per destination URI, in the same order as the URIs.
    #[serde(deserialize_with = "crate::http::from_str_vec")]
    pub destination_uri_file_counts: Vec<i64>,
    #[serde(deserialize_with = "google_cloud_gax::http::from_str_option")]
    pub input_bytes: Option<i64>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct JobStatisticsCopy {
    #[serde(deserialize_with = "google_cloud_gax::http::from_str_option")]
    pub copied_rows: Option<i64>,
    #[serde(deserialize_with = "google_cloud_gax::http::from_str_option")]
    pub copied_logical_bytes: Option<i64>,
}

/// Output only. Times are milliseconds since the epoch.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct JobStatistics {
    #[serde(deserialize_with = "google_cloud_gax::http::from_str_option")]
    pub creation_time: Option<i64>,
    #[serde(deserialize_with = "google_cloud_gax::http::from_str_option")]
    pub start_time: Option<i64>,
    #[serde(deserialize_with = "google_cloud_gax::http::from_str_option")]
    pub end_time: Option<i64>,
    #[serde(deserialize_with = "google_cloud_gax::http::from_str_option")]
    pub total_bytes_processed: Option<i64>,
    pub query: Option<JobStatisticsQuery>,
    pub load: Option<JobStatisticsLoad>,
    pub extract: Option<JobStatisticsExtract>,
    pub copy: Option<JobStatisticsCopy>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub etag: String,
    /// Output only. Opaque ID field of the job.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub self_link: String,
    /// Output only. Email address of the user who ran the job.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_email: String,
    pub configuration: JobConfiguration,
    pub job_reference: JobReference,
    #[serde(default, skip_serializing)]
    pub statistics: Option<JobStatistics>,
    #[serde(default, skip_serializing)]
    pub status: JobStatus,
}

impl Job {
    pub fn is_done(&self) -> bool {
        self.status.state == JobState::Done
    }

    /// The final error of a finished job.
    pub fn error(&self) -> Option<&ErrorProto> {
        self.status.error_result.as_ref()
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use crate::http::job::{
        generate_job_id, CreateDisposition, Job, JobConfiguration, JobConfigurationQuery, JobReference, JobState,
        JobStatistics, Priority, WriteDisposition,
    };

    #[test]
    fn test_option_aliases() {
        assert_eq!("needed".parse::<CreateDisposition>().unwrap(), CreateDisposition::CreateIfNeeded);
        assert_eq!("IF_NEEDED".parse::<CreateDisposition>().unwrap(), CreateDisposition::CreateIfNeeded);
        assert_eq!("never".parse::<CreateDisposition>().unwrap(), CreateDisposition::CreateNever);
        assert_eq!("truncate".parse::<WriteDisposition>().unwrap(), WriteDisposition::WriteTruncate);
        assert_eq!("append".parse::<WriteDisposition>().unwrap(), WriteDisposition::WriteAppend);
        assert_eq!("writeempty".parse::<WriteDisposition>().unwrap(), WriteDisposition::WriteEmpty);
        assert_eq!("batch".parse::<Priority>().unwrap(), Priority::Batch);
        assert!("sometimes".parse::<CreateDisposition>().is_err());
        assert!("overwrite".parse::<WriteDisposition>().is_err());
    }

    #[test]
    fn test_generate_job_id() {
        let id = generate_job_id(None);
        assert!(id.starts_with("job_"));
        assert_eq!(id.len(), 4 + 28);
        assert!(id[4..].chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_ne!(id, generate_job_id(None));
        assert!(generate_job_id(Some("daily_")).starts_with("daily_"));
    }

    #[test]
    fn test_job_body() {
        let job = Job {
            job_reference: JobReference {
                project_id: "p".to_string(),
                job_id: "job_1".to_string(),
                location: None,
            },
            configuration: JobConfiguration {
                query: Some(JobConfigurationQuery {
                    query: "SELECT 1".to_string(),
                    use_legacy_sql: Some(false),
                    priority: Some(Priority::Batch),
                    ..Default::default()
                }),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&job).unwrap(),
            json!({
                "configuration": {"query": {"query": "SELECT 1", "priority": "BATCH", "useLegacySql": false}},
                "jobReference": {"projectId": "p", "jobId": "job_1"}
            })
        );

        let done: Job = serde_json::from_value(json!({
            "id": "p:US.job_1",
            "configuration": {"jobType": "QUERY", "query": {"query": "SELECT 1"}},
            "jobReference": {"projectId": "p", "jobId": "job_1", "location": "US"},
            "statistics": {"creationTime": "1700000000000", "query": {"totalBytesProcessed": "10", "cacheHit": true}},
            "status": {"state": "DONE", "errorResult": {"reason": "invalidQuery", "message": "bad"}}
        }))
        .unwrap();
        assert!(done.is_done());
        assert_eq!(done.status.state, JobState::Done);
        assert_eq!(done.error().unwrap().reason.as_deref(), Some("invalidQuery"));
        let statistics = done.statistics.unwrap();
        assert_eq!(statistics.creation_time, Some(1700000000000));
        assert_eq!(statistics.query.unwrap().total_bytes_processed, Some(10));
    }

    #[test]
    fn test_extract_statistics() {
        let statistics: JobStatistics = serde_json::from_value(json!({
            "extract": {"destinationUriFileCounts": ["3", "1"], "inputBytes": "2048"}
        }))
        .unwrap();
        let extract = statistics.extract.unwrap();
        assert_eq!(extract.destination_uri_file_counts, vec![3, 1]);
        assert_eq!(extract.input_bytes, Some(2048));
    }
}
