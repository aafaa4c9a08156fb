use std::collections::HashMap;

use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use google_cloud_gax::paging::Paginated;

use crate::http::dataset::DatasetReference;

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListDatasetsRequest {
    /// The maximum number of results to return in a single response page.
    /// Leverage the page tokens to iterate through the entire collection.
    pub max_results: Option<i32>,
    /// Whether to list all datasets, including hidden ones.
    pub all: bool,
    /// An expression for filtering the results of the request by label.
    /// The syntax is "labels.<name>[:<value>]".
    /// Multiple filters can be ANDed together by connecting with a space.
    /// Example: "labels.department:receiving labels.active".
    pub filter: Option<String>,
    pub page_token: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DatasetOverview {
    /// The resource type.
    /// This property always returns the value "bigquery#dataset"
    pub kind: String,
    /// The fully-qualified, unique, opaque ID of the dataset.
    pub id: String,
    pub dataset_reference: DatasetReference,
    pub labels: Option<HashMap<String, String>>,
    pub friendly_name: Option<String>,
    pub location: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ListDatasetsResponse {
    pub kind: String,
    pub etag: String,
    /// This property is omitted when there are no datasets in the project.
    pub datasets: Vec<DatasetOverview>,
    /// This property is omitted on the final results page.
    pub next_page_token: Option<String>,
}

impl Paginated for ListDatasetsResponse {
    type Item = DatasetOverview;

    fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }

    fn into_items(self) -> Vec<Self::Item> {
        self.datasets
    }
}

pub(crate) fn build(base_url: &str, client: &Client, project_id: &str, req: &ListDatasetsRequest) -> RequestBuilder {
    let url = format!("{base_url}/projects/{project_id}/datasets");
    client.get(url).query(req)
}
