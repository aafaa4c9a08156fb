use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use google_cloud_gax::paging::Paginated;

use crate::http::table::TableReference;

/// A cell value of the `f`/`v` row format.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(untagged)]
pub enum Value {
    Null,
    String(String),
    Array(Vec<Cell>),
    Struct(Tuple),
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub v: Value,
}

/// One row, cells in schema order.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Tuple {
    pub f: Vec<Cell>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct FetchDataRequest {
    /// Start row index of the table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u64>,
    /// Row limit of the table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
    /// To retrieve the next page of table data, set this field to the string provided in the pageToken field of the response body from your previous call to tabledata.list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
    /// Subset of fields to return, supports select into sub fields. Example: selectedFields = "a,e.d.f";
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_fields: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct FetchDataResponse {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub etag: String,
    /// Total rows of the entire table. In order to show default value 0 we have to present it as string.
    #[serde(deserialize_with = "google_cloud_gax::http::from_str")]
    pub total_rows: u64,
    /// When this field is non-empty, it indicates that additional results are available.
    /// To request the next page of data, set the pageToken field of your next tabledata.list call to the string returned in this field.
    pub page_token: Option<String>,
    pub rows: Option<Vec<Tuple>>,
}

impl Paginated for FetchDataResponse {
    type Item = Tuple;

    fn next_page_token(&self) -> Option<&str> {
        self.page_token.as_deref()
    }

    fn into_items(self) -> Vec<Self::Item> {
        self.rows.unwrap_or_default()
    }
}

pub(crate) fn build(base_url: &str, client: &Client, table: &TableReference, data: &FetchDataRequest) -> RequestBuilder {
    let url = format!(
        "{}/projects/{}/datasets/{}/tables/{}/data",
        base_url, table.project_id, table.dataset_id, table.table_id
    );
    client.get(url).query(&data)
}
