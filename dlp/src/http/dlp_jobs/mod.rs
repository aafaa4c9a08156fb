use time::OffsetDateTime;

use crate::http::content::{FieldId, InfoType, InspectConfig};
use crate::http::inspect_templates::InspectTemplate;

pub mod cancel;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DlpJobType {
    #[default]
    DlpJobTypeUnspecified,
    InspectJob,
    RiskAnalysisJob,
}

impl DlpJobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DlpJobType::DlpJobTypeUnspecified => "DLP_JOB_TYPE_UNSPECIFIED",
            DlpJobType::InspectJob => "INSPECT_JOB",
            DlpJobType::RiskAnalysisJob => "RISK_ANALYSIS_JOB",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobState {
    #[default]
    JobStateUnspecified,
    Pending,
    Running,
    Done,
    Canceled,
    Failed,
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Done | JobState::Canceled | JobState::Failed)
    }
}

/// A BigQuery table outside of the bigquery crate's types.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct BigQueryTable {
    pub project_id: String,
    pub dataset_id: String,
    /// Generated for output tables when empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub table_id: String,
}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SampleMethod {
    #[default]
    SampleMethodUnspecified,
    Top,
    RandomStart,
}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileType {
    #[default]
    FileTypeUnspecified,
    BinaryFile,
    TextFile,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct FileSet {
    /// `gs://bucket/path/*` scans every object under `path`.
    pub url: String,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CloudStorageOptions {
    pub file_set: FileSet,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "google_cloud_gax::http::from_str_option"
    )]
    pub bytes_limit_per_file: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_types: Vec<FileType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_method: Option<SampleMethod>,
    /// `[0, 100]`. Every file when 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files_limit_percent: Option<i32>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct BigQueryOptions {
    pub table_reference: BigQueryTable,
    /// Copied into the findings to identify the row.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifying_fields: Vec<FieldId>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "google_cloud_gax::http::from_str_option"
    )]
    pub rows_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_method: Option<SampleMethod>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PartitionId {
    pub project_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace_id: String,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct KindExpression {
    pub name: String,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct DatastoreOptions {
    pub partition_id: PartitionId,
    pub kind: KindExpression,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub enum StorageOptions {
    DatastoreOptions(DatastoreOptions),
    CloudStorageOptions(CloudStorageOptions),
    BigQueryOptions(BigQueryOptions),
}

/// Limits a scan to the content changed within a time span.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TimespanConfig {
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<OffsetDateTime>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<OffsetDateTime>,
    /// Required for BigQuery and Datastore.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_field: Option<FieldId>,
    /// With a job trigger, each run scans from the previous run's start.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub enable_auto_population_of_timespan_config: bool,
}

/// Where an inspection job reads from.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StorageConfig {
    #[serde(flatten)]
    pub storage: StorageOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timespan_config: Option<TimespanConfig>,
}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutputSchema {
    #[default]
    OutputSchemaUnspecified,
    BasicColumns,
    GcsColumns,
    DatastoreColumns,
    BigQueryColumns,
    AllColumns,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct OutputStorageConfig {
    pub table: BigQueryTable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<OutputSchema>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SaveFindings {
    pub output_config: OutputStorageConfig,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PublishToPubSub {
    /// `projects/{project}/topics/{topic}`. Receives a `DlpJobName` attribute on completion.
    pub topic: String,
}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
pub struct PublishSummaryToCscc {}

/// Runs when a job completes.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    SaveFindings(SaveFindings),
    PubSub(PublishToPubSub),
    PublishSummaryToCscc(PublishSummaryToCscc),
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InspectJobConfig {
    pub storage_config: StorageConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspect_config: Option<InspectConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspect_template_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct EntityId {
    pub field: FieldId,
}

/// The metric computed by a risk analysis job.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub enum PrivacyMetric {
    NumericalStatsConfig {
        field: FieldId,
    },
    CategoricalStatsConfig {
        field: FieldId,
    },
    #[serde(rename_all = "camelCase")]
    KAnonymityConfig {
        quasi_ids: Vec<FieldId>,
        #[serde(skip_serializing_if = "Option::is_none")]
        entity_id: Option<EntityId>,
    },
    #[serde(rename_all = "camelCase")]
    LDiversityConfig {
        quasi_ids: Vec<FieldId>,
        sensitive_attribute: FieldId,
    },
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RiskAnalysisJobConfig {
    pub privacy_metric: PrivacyMetric,
    pub source_table: BigQueryTable,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct InfoTypeStats {
    pub info_type: InfoType,
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str")]
    pub count: i64,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct InspectDataSourceResult {
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str")]
    pub processed_bytes: i64,
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str")]
    pub total_estimated_bytes: i64,
    #[serde(default)]
    pub info_type_stats: Vec<InfoTypeStats>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RequestedOptions {
    /// The template as it was when the job started.
    pub snapshot_inspect_template: Option<InspectTemplate>,
    pub job_config: Option<InspectJobConfig>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct InspectDataSourceDetails {
    pub requested_options: Option<RequestedOptions>,
    pub result: Option<InspectDataSourceResult>,
}

/// `google.rpc.Status`.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Vec<serde_json::Value>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct DlpError {
    pub details: Option<Status>,
    /// When the error occurred, most recent last.
    #[serde(default, with = "timestamps")]
    pub timestamps: Vec<OffsetDateTime>,
}

mod timestamps {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use time::format_description::well_known::Rfc3339;
    use time::OffsetDateTime;

    pub fn serialize<S: Serializer>(value: &[OffsetDateTime], serializer: S) -> Result<S::Ok, S::Error> {
        let formatted = value
            .iter()
            .map(|t| t.format(&Rfc3339))
            .collect::<Result<Vec<_>, _>>()
            .map_err(serde::ser::Error::custom)?;
        formatted.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<OffsetDateTime>, D::Error> {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|s| OffsetDateTime::parse(s, &Rfc3339).map_err(serde::de::Error::custom))
            .collect()
    }
}

/// A long running inspection or risk analysis.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct DlpJob {
    /// `projects/{project}/dlpJobs/{id}`.
    pub name: String,
    #[serde(rename = "type", default)]
    pub job_type: DlpJobType,
    #[serde(default)]
    pub state: JobState,
    /// Set for risk analysis jobs. Kept as JSON, its shape depends on the privacy metric.
    pub risk_details: Option<serde_json::Value>,
    pub inspect_details: Option<InspectDataSourceDetails>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub create_time: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start_time: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub end_time: Option<OffsetDateTime>,
    /// Set when the job was started by a trigger.
    #[serde(default)]
    pub job_trigger_name: String,
    #[serde(default)]
    pub errors: Vec<DlpError>,
}

#[cfg(test)]
mod test {
    use serde_json::json;
    use time::macros::datetime;

    use crate::http::dlp_jobs::{
        Action, CloudStorageOptions, DlpJob, DlpJobType, FileSet, InspectJobConfig, JobState,
        PublishToPubSub, StorageConfig, StorageOptions,
    };

    #[test]
    fn test_inspect_job_json() {
        let config = InspectJobConfig {
            storage_config: StorageConfig {
                storage: StorageOptions::CloudStorageOptions(CloudStorageOptions {
                    file_set: FileSet {
                        url: "gs://uploads/*".to_string(),
                    },
                    bytes_limit_per_file: Some(1 << 20),
                    ..Default::default()
                }),
                timespan_config: None,
            },
            inspect_config: None,
            inspect_template_name: Some("projects/p/inspectTemplates/pii".to_string()),
            actions: vec![Action::PubSub(PublishToPubSub {
                topic: "projects/p/topics/dlp".to_string(),
            })],
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(
            value,
            json!({
                "storageConfig": {"cloudStorageOptions": {
                    "fileSet": {"url": "gs://uploads/*"},
                    "bytesLimitPerFile": 1048576
                }},
                "inspectTemplateName": "projects/p/inspectTemplates/pii",
                "actions": [{"pubSub": {"topic": "projects/p/topics/dlp"}}]
            })
        );
        let decoded: InspectJobConfig = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, config);
    }

    #[test]
    fn test_decode_job() {
        let job: DlpJob = serde_json::from_value(json!({
            "name": "projects/p/dlpJobs/i-1",
            "type": "INSPECT_JOB",
            "state": "FAILED",
            "inspectDetails": {"result": {
                "processedBytes": "2048",
                "totalEstimatedBytes": "4096",
                "infoTypeStats": [{"infoType": {"name": "EMAIL_ADDRESS"}, "count": "3"}]
            }},
            "errors": [{
                "details": {"code": 7, "message": "permission denied on bucket"},
                "timestamps": ["2024-05-01T10:00:00Z"]
            }]
        }))
        .unwrap();
        assert_eq!(job.job_type, DlpJobType::InspectJob);
        assert!(job.state.is_terminal());
        let result = job.inspect_details.and_then(|d| d.result).unwrap();
        assert_eq!(result.processed_bytes, 2048);
        assert_eq!(result.info_type_stats[0].count, 3);
        assert_eq!(job.errors[0].timestamps, vec![datetime!(2024-05-01 10:00:00 UTC)]);
    }
}
