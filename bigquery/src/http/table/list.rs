use std::collections::HashMap;

use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use google_cloud_gax::paging::Paginated;

use crate::http::table::{Clustering, RangePartitioning, TableReference, TimePartitioning};

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListTablesRequest {
    /// The maximum number of results to return in a single response page.
    pub max_results: Option<i64>,
    pub page_token: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TableOverview {
    pub kind: String,
    pub id: String,
    pub table_reference: TableReference,
    pub friendly_name: Option<String>,
    pub labels: Option<HashMap<String, String>>,
    pub time_partitioning: Option<TimePartitioning>,
    pub range_partitioning: Option<RangePartitioning>,
    pub clustering: Option<Clustering>,
    #[serde(deserialize_with = "google_cloud_gax::http::from_str_option")]
    pub creation_time: Option<i64>,
    #[serde(deserialize_with = "google_cloud_gax::http::from_str_option")]
    pub expiration_time: Option<i64>,
    #[serde(rename = "type")]
    pub table_type: String,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ListTablesResponse {
    pub kind: String,
    pub etag: String,
    pub tables: Vec<TableOverview>,
    pub next_page_token: Option<String>,
    pub total_items: i32,
}

impl Paginated for ListTablesResponse {
    type Item = TableOverview;

    fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }

    fn into_items(self) -> Vec<Self::Item> {
        self.tables
    }
}

pub(crate) fn build(
    base_url: &str,
    client: &Client,
    project_id: &str,
    dataset_id: &str,
    req: &ListTablesRequest,
) -> RequestBuilder {
    let url = format!("{base_url}/projects/{project_id}/datasets/{dataset_id}/tables");
    client.get(url).query(req)
}
