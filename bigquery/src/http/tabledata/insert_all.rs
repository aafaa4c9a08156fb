use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};
use serde::Serialize;

use crate::http::table::TableReference;
use crate::http::types::ErrorProto;

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Row<T: Serialize> {
    /// Used to detect duplicate insertion requests on a best-effort basis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_id: Option<String>,
    /// The row, serialized as a JSON object keyed by column name.
    pub json: T,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InsertAllRequest<T: Serialize> {
    /// Insert all valid rows of a request, even if invalid rows exist.
    /// The default value is false, which causes the entire request to fail if any invalid rows exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_invalid_rows: Option<bool>,
    /// Accept rows that contain values that do not match the schema.
    /// The unknown values are ignored. Default is false, which treats unknown values as errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_unknown_values: Option<bool>,
    /// Create the table `{destination}{templateSuffix}` from the destination's schema if it does not exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_suffix: Option<String>,
    pub rows: Vec<Row<T>>,
}

impl<T: Serialize> Default for InsertAllRequest<T> {
    fn default() -> Self {
        Self {
            skip_invalid_rows: None,
            ignore_unknown_values: None,
            template_suffix: None,
            rows: vec![],
        }
    }
}

impl<T: Serialize> InsertAllRequest<T> {
    /// Every row carries an insert id, so sending the request again can't duplicate rows.
    pub fn is_deduplicated(&self) -> bool {
        self.rows.iter().all(|r| r.insert_id.is_some())
    }
}

/// Errors of the row at `index` in the request.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct InsertError {
    pub index: i32,
    pub errors: Vec<ErrorProto>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InsertAllResponse {
    #[serde(default)]
    pub kind: String,
    /// Absent when every row was inserted.
    pub insert_errors: Option<Vec<InsertError>>,
}

impl InsertAllResponse {
    pub fn is_success(&self) -> bool {
        self.insert_errors.as_ref().is_none_or(|e| e.is_empty())
    }
}

pub(crate) fn build<T: Serialize>(
    base_url: &str,
    client: &Client,
    table: &TableReference,
    data: &InsertAllRequest<T>,
) -> RequestBuilder {
    let url = format!(
        "{}/projects/{}/datasets/{}/tables/{}/insertAll",
        base_url, table.project_id, table.dataset_id, table.table_id
    );
    client.post(url).json(data)
}
