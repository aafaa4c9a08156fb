use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::table::{Table, TableReference};

/// Sends every set field of `data`. A non empty etag makes the patch conditional.
pub(crate) fn build(base_url: &str, client: &Client, data: &Table) -> RequestBuilder {
    patch(base_url, client, &data.table_reference, data.etag.as_str()).json(data)
}

/// Sends `body` as is, so attributes can also be cleared with `null`.
pub(crate) fn build_raw(
    base_url: &str,
    client: &Client,
    table: &TableReference,
    etag: &str,
    body: &serde_json::Value,
) -> RequestBuilder {
    patch(base_url, client, table, etag).json(body)
}

fn patch(base_url: &str, client: &Client, table: &TableReference, etag: &str) -> RequestBuilder {
    let url = format!(
        "{}/projects/{}/datasets/{}/tables/{}",
        base_url, table.project_id, table.dataset_id, table.table_id
    );
    let builder = client.patch(url);
    if etag.is_empty() {
        builder
    } else {
        builder.header(reqwest::header::IF_MATCH, etag)
    }
}
