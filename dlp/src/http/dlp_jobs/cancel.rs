use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

pub(crate) fn build(base_url: &str, client: &Client, name: &str) -> RequestBuilder {
    let url = format!("{base_url}/{name}:cancel");
    client.post(url).json(&serde_json::json!({}))
}
