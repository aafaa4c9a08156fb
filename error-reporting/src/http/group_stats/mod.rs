use time::OffsetDateTime;

use crate::http::events::{ErrorEvent, ServiceContext};
use crate::http::groups::ErrorGroup;

pub mod list;

/// How the buckets of `timed_counts` are laid out.
#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
pub enum TimedCountAlignment {
    #[default]
    #[serde(rename = "ERROR_COUNT_ALIGNMENT_UNSPECIFIED")]
    Unspecified,
    /// Buckets start at `alignment_time` and the last one may be partial.
    #[serde(rename = "ALIGNMENT_EQUAL_ROUNDED")]
    EqualRounded,
    /// Buckets end at the end of the time range and the first one may be partial.
    #[serde(rename = "ALIGNMENT_EQUAL_AT_END")]
    EqualAtEnd,
}

impl TimedCountAlignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimedCountAlignment::Unspecified => "ERROR_COUNT_ALIGNMENT_UNSPECIFIED",
            TimedCountAlignment::EqualRounded => "ALIGNMENT_EQUAL_ROUNDED",
            TimedCountAlignment::EqualAtEnd => "ALIGNMENT_EQUAL_AT_END",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorGroupOrder {
    #[default]
    GroupOrderUnspecified,
    CountDesc,
    LastSeenDesc,
    CreatedDesc,
    AffectedUsersDesc,
}

impl ErrorGroupOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorGroupOrder::GroupOrderUnspecified => "GROUP_ORDER_UNSPECIFIED",
            ErrorGroupOrder::CountDesc => "COUNT_DESC",
            ErrorGroupOrder::LastSeenDesc => "LAST_SEEN_DESC",
            ErrorGroupOrder::CreatedDesc => "CREATED_DESC",
            ErrorGroupOrder::AffectedUsersDesc => "AFFECTED_USERS_DESC",
        }
    }
}

/// The number of events in one bucket of the requested time range.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TimedCount {
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str")]
    pub count: i64,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start_time: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub end_time: Option<OffsetDateTime>,
}

/// Statistics of one group within the requested time range.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ErrorGroupStats {
    #[serde(default)]
    pub group: ErrorGroup,
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str")]
    pub count: i64,
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str")]
    pub affected_users_count: i64,
    /// Set only when `timed_count_duration` was requested.
    #[serde(default)]
    pub timed_counts: Vec<TimedCount>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub first_seen_time: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub last_seen_time: Option<OffsetDateTime>,
    /// At most 20 services, see `num_affected_services`.
    #[serde(default)]
    pub affected_services: Vec<ServiceContext>,
    #[serde(default)]
    pub num_affected_services: i32,
    pub representative: Option<ErrorEvent>,
}
