use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::groups::ErrorGroup;

/// Replaces the group. Tracking issues and resolution status are the mutable parts.
pub(crate) fn build(base_url: &str, client: &Client, group: &ErrorGroup) -> RequestBuilder {
    let url = format!("{}/{}", base_url, group.name);
    client.put(url).json(group)
}
