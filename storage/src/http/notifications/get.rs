use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::{Escape, UserProject};

/// Request message for GetNotification.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GetNotificationRequest {
    /// Required. The parent bucket of the notification.
    pub bucket: String,
    /// Required. Notification ID.
    pub notification: String,
    /// The project to be billed for a requester pays bucket.
    pub user_project: Option<String>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &GetNotificationRequest) -> RequestBuilder {
    let url = format!(
        "{}/b/{}/notificationConfigs/{}",
        base_url,
        req.bucket.escape(),
        req.notification.escape()
    );
    client.get(url).user_project(&req.user_project)
}
