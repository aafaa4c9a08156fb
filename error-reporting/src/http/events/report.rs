use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::events::ReportedErrorEvent;

pub(crate) fn build(base_url: &str, client: &Client, project_name: &str, event: &ReportedErrorEvent) -> RequestBuilder {
    let url = format!("{base_url}/{project_name}/events:report");
    client.post(url).json(event)
}
