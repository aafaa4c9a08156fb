use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::table::TableReference;

pub(crate) fn build(base_url: &str, client: &Client, table: &TableReference) -> RequestBuilder {
    let url = format!(
        "{}/projects/{}/datasets/{}/tables/{}",
        base_url, table.project_id, table.dataset_id, table.table_id
    );
    client.delete(url)
}
