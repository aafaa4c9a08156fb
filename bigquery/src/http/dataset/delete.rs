use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDatasetRequest {
    /// Deletes all the tables of the dataset too. Without it a non empty dataset can't be deleted.
    pub delete_contents: bool,
}

pub(crate) fn build(
    base_url: &str,
    client: &Client,
    project_id: &str,
    dataset_id: &str,
    req: &DeleteDatasetRequest,
) -> RequestBuilder {
    let url = format!("{base_url}/projects/{project_id}/datasets/{dataset_id}");
    client.delete(url).query(req)
}
