use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::table::TableReference;

/// Subset of table information to return.
#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableMetadataView {
    /// Only the basic fields, no storage statistics.
    Basic,
    StorageStats,
    Full,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetTableRequest {
    /// Comma separated list of schema fields to return.
    pub selected_fields: Option<String>,
    pub view: Option<TableMetadataView>,
}

pub(crate) fn build(base_url: &str, client: &Client, table: &TableReference, req: &GetTableRequest) -> RequestBuilder {
    let url = format!(
        "{}/projects/{}/datasets/{}/tables/{}",
        base_url, table.project_id, table.dataset_id, table.table_id
    );
    client.get(url).query(req)
}
