use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use google_cloud_gax::paging::Paginated;

use crate::http::project::ProjectReference;

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListProjectsRequest {
    /// `maxResults` unset or 0 will return all results, up to 50 per page.
    pub max_results: Option<i32>,
    pub page_token: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectOverview {
    /// The resource type, always "bigquery#project".
    pub kind: String,
    /// An opaque ID of this project.
    pub id: String,
    /// The numeric ID of this project.
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str_option")]
    pub numeric_id: Option<u64>,
    pub project_reference: ProjectReference,
    /// A descriptive name for this project.
    pub friendly_name: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ListProjectsResponse {
    pub kind: String,
    pub etag: String,
    pub projects: Vec<ProjectOverview>,
    /// The total number of projects in the page.
    pub total_items: Option<i32>,
    pub next_page_token: Option<String>,
}

impl Paginated for ListProjectsResponse {
    type Item = ProjectOverview;

    fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }

    fn into_items(self) -> Vec<Self::Item> {
        self.projects
    }
}

pub(crate) fn build(base_url: &str, client: &Client, req: &ListProjectsRequest) -> RequestBuilder {
    let url = format!("{base_url}/projects");
    client.get(url).query(req)
}
