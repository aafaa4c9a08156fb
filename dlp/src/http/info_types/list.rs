use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::info_types::InfoTypeDescription;

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ListInfoTypesRequest {
    /// BCP-47 code of the display names, `en-US` when unset.
    pub language_code: Option<String>,
    /// e.g. `supported_by=INSPECT`.
    pub filter: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListInfoTypesResponse {
    #[serde(default)]
    pub info_types: Vec<InfoTypeDescription>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &ListInfoTypesRequest) -> RequestBuilder {
    let url = format!("{base_url}/infoTypes");
    let mut query = vec![];
    if let Some(language_code) = &req.language_code {
        query.push(("languageCode", language_code.as_str()));
    }
    if let Some(filter) = &req.filter {
        query.push(("filter", filter.as_str()));
    }
    client.get(url).query(&query)
}
