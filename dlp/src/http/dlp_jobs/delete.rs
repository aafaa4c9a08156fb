use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

/// Deletes the job and its results. A running job is cancelled first.
pub(crate) fn build(base_url: &str, client: &Client, name: &str) -> RequestBuilder {
    let url = format!("{base_url}/{name}");
    client.delete(url)
}
