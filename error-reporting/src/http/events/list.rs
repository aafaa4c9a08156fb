use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};
use time::OffsetDateTime;

use google_cloud_gax::paging::Paginated;

use crate::http::events::ErrorEvent;
use crate::http::{QueryTimeRange, ServiceContextFilter};

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ListEventsRequest {
    /// `projects/{project}`. A bare project id is accepted too.
    pub project_name: String,
    /// Required. The group whose events are returned.
    pub group_id: String,
    pub service_filter: Option<ServiceContextFilter>,
    /// Defaults to the last 30 days on the service side.
    pub time_range: Option<QueryTimeRange>,
    pub page_size: Option<i32>,
    pub page_token: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsResponse {
    #[serde(default)]
    pub error_events: Vec<ErrorEvent>,
    pub next_page_token: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub time_range_begin: Option<OffsetDateTime>,
}

impl Paginated for ListEventsResponse {
    type Item = ErrorEvent;

    fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }

    fn into_items(self) -> Vec<Self::Item> {
        self.error_events
    }
}

pub(crate) fn build(base_url: &str, client: &Client, req: &ListEventsRequest) -> RequestBuilder {
    let url = format!("{}/{}/events", base_url, req.project_name);
    let mut query = vec![("groupId", req.group_id.clone())];
    if let Some(filter) = &req.service_filter {
        filter.append_to(&mut query);
    }
    if let Some(range) = &req.time_range {
        range.append_to(&mut query);
    }
    if let Some(page_size) = req.page_size {
        query.push(("pageSize", page_size.to_string()));
    }
    if let Some(page_token) = &req.page_token {
        query.push(("pageToken", page_token.clone()));
    }
    client.get(url).query(&query)
}
