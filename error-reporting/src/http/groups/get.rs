use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

/// `group_name` is `projects/{project}/groups/{group}`.
pub(crate) fn build(base_url: &str, client: &Client, group_name: &str) -> RequestBuilder {
    let url = format!("{base_url}/{group_name}");
    client.get(url)
}
