use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::job::JobReference;
use crate::http::table::TableSchema;
use crate::http::tabledata::list::Tuple;
use crate::http::types::ErrorProto;

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetQueryResultsRequest {
    /// Zero-based index of the starting row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i64>,
    /// How long to wait for the query to complete, in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetQueryResultsResponse {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub etag: String,
    pub schema: Option<TableSchema>,
    pub job_reference: JobReference,
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str_option")]
    pub total_rows: Option<i64>,
    pub page_token: Option<String>,
    pub rows: Option<Vec<Tuple>>,
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str_option")]
    pub total_bytes_processed: Option<i64>,
    /// Rows and schema are absent until the job completes.
    #[serde(default)]
    pub job_complete: bool,
    pub errors: Option<Vec<ErrorProto>>,
    pub cache_hit: Option<bool>,
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str_option")]
    pub num_dml_affected_rows: Option<i64>,
}

pub(crate) fn build(
    base_url: &str,
    client: &Client,
    project_id: &str,
    job_id: &str,
    data: &GetQueryResultsRequest,
) -> RequestBuilder {
    let url = format!("{base_url}/projects/{project_id}/queries/{job_id}");
    client.get(url).query(data)
}
