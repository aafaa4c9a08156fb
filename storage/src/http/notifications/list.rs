use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::notifications::Notification;
use crate::http::{Escape, UserProject};

/// Request message for ListNotifications.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ListNotificationsRequest {
    /// Required. Name of a Google Cloud Storage bucket.
    pub bucket: String,
    /// The project to be billed for a requester pays bucket.
    pub user_project: Option<String>,
}

/// The result of a call to Notifications.ListNotifications
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ListNotificationsResponse {
    #[serde(default)]
    pub items: Vec<Notification>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &ListNotificationsRequest) -> RequestBuilder {
    let url = format!("{}/b/{}/notificationConfigs", base_url, req.bucket.escape());
    client.get(url).user_project(&req.user_project)
}
