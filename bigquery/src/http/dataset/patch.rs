use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::dataset::{Dataset, DatasetReference};

/// Sends every set field of `data`. A non empty etag makes the patch conditional.
pub(crate) fn build(base_url: &str, client: &Client, data: &Dataset) -> RequestBuilder {
    patch(base_url, client, &data.dataset_reference, data.etag.as_str()).json(data)
}

/// Sends `body` as is, so attributes can also be cleared with `null`.
pub(crate) fn build_raw(
    base_url: &str,
    client: &Client,
    dataset: &DatasetReference,
    etag: &str,
    body: &serde_json::Value,
) -> RequestBuilder {
    patch(base_url, client, dataset, etag).json(body)
}

fn patch(base_url: &str, client: &Client, dataset: &DatasetReference, etag: &str) -> RequestBuilder {
    let url = format!(
        "{}/projects/{}/datasets/{}",
        base_url, dataset.project_id, dataset.dataset_id
    );
    let builder = client.patch(url);
    if etag.is_empty() {
        builder
    } else {
        builder.header(reqwest::header::IF_MATCH, etag)
    }
}
