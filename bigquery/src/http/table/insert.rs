use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::table::Table;

pub(crate) fn build(base_url: &str, client: &Client, data: &Table) -> RequestBuilder {
    let url = format!(
        "{}/projects/{}/datasets/{}/tables",
        base_url, data.table_reference.project_id, data.table_reference.dataset_id
    );
    client.post(url).json(data)
}
