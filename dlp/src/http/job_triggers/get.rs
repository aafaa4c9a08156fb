use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

/// `name` is `projects/{project}/jobTriggers/{id}`.
pub(crate) fn build(base_url: &str, client: &Client, name: &str) -> RequestBuilder {
    let url = format!("{base_url}/{name}");
    client.get(url)
}
