use std::time::Duration;

use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use google_cloud_gax::paging::Paginated;

use crate::http::group_stats::{ErrorGroupOrder, ErrorGroupStats, TimedCountAlignment};
use crate::http::{duration_param, Error, QueryTimeRange, ServiceContextFilter};

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ListGroupStatsRequest {
    /// `projects/{project}`. A bare project id is accepted too.
    pub project_name: String,
    /// Defaults to the last 30 days on the service side.
    pub time_range: Option<QueryTimeRange>,
    /// Restricts the result to these groups.
    pub group_id: Vec<String>,
    pub service_filter: Option<ServiceContextFilter>,
    /// Bucket width of `timed_counts`. No buckets are returned when unset.
    pub timed_count_duration: Option<Duration>,
    pub alignment: Option<TimedCountAlignment>,
    /// Start of the first bucket with [`TimedCountAlignment::EqualRounded`].
    pub alignment_time: Option<OffsetDateTime>,
    pub order: Option<ErrorGroupOrder>,
    pub page_size: Option<i32>,
    pub page_token: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListGroupStatsResponse {
    #[serde(default)]
    pub error_group_stats: Vec<ErrorGroupStats>,
    pub next_page_token: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub time_range_begin: Option<OffsetDateTime>,
}

impl Paginated for ListGroupStatsResponse {
    type Item = ErrorGroupStats;

    fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }

    fn into_items(self) -> Vec<Self::Item> {
        self.error_group_stats
    }
}

pub(crate) fn build(base_url: &str, client: &Client, req: &ListGroupStatsRequest) -> Result<RequestBuilder, Error> {
    let url = format!("{}/{}/groupStats", base_url, req.project_name);
    let mut query = vec![];
    if let Some(range) = &req.time_range {
        range.append_to(&mut query);
    }
    for group_id in &req.group_id {
        query.push(("groupId", group_id.clone()));
    }
    if let Some(filter) = &req.service_filter {
        filter.append_to(&mut query);
    }
    if let Some(duration) = req.timed_count_duration {
        query.push(("timedCountDuration", duration_param(duration)));
    }
    if let Some(alignment) = req.alignment {
        query.push(("alignment", alignment.as_str().to_string()));
    }
    if let Some(alignment_time) = req.alignment_time {
        let formatted = alignment_time
            .format(&Rfc3339)
            .map_err(|e| Error::InvalidArgument(format!("alignment_time: {e}")))?;
        query.push(("alignmentTime", formatted));
    }
    if let Some(order) = req.order {
        query.push(("order", order.as_str().to_string()));
    }
    if let Some(page_size) = req.page_size {
        query.push(("pageSize", page_size.to_string()));
    }
    if let Some(page_token) = &req.page_token {
        query.push(("pageToken", page_token.clone()));
    }
    Ok(client.get(url).query(&query))
}
