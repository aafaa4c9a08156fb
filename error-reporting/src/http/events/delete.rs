use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

/// Deletes every error event of the project.
pub(crate) fn build(base_url: &str, client: &Client, project_name: &str) -> RequestBuilder {
    let url = format!("{base_url}/{project_name}/events");
    client.delete(url)
}
