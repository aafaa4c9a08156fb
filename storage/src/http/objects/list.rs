use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use google_cloud_gax::paging::Paginated;

use crate::http::object_access_controls::Projection;
use crate::http::objects::Object;
use crate::http::Escape;

/// Request message for ListObjects.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListObjectsRequest {
    /// Name of the bucket in which to look for objects.
    #[serde(skip_serializing)]
    pub bucket: String,
    /// Returns results in a directory-like mode. `items` will contain
    /// only objects whose names, aside from the `prefix`, do not
    /// contain `delimiter`. Objects whose names, aside from the
    /// `prefix`, contain `delimiter` will have their name,
    /// truncated after the `delimiter`, returned in
    /// `prefixes`. Duplicate `prefixes` are omitted.
    pub delimiter: Option<String>,
    /// Filter results to objects whose names are lexicographically before `end_offset`.
    pub end_offset: Option<String>,
    /// If true, objects that end in exactly one instance of `delimiter`
    /// will have their metadata included in `items` in addition to
    /// `prefixes`.
    pub include_trailing_delimiter: Option<bool>,
    /// Maximum number of `items` plus `prefixes` to return
    /// in a single page of responses.
    pub max_results: Option<i32>,
    /// A previously-returned page token representing part of the larger set of
    /// results to view.
    pub page_token: Option<String>,
    /// Filter results to objects whose names begin with this prefix.
    pub prefix: Option<String>,
    /// Set of properties to return. Defaults to `NO_ACL`.
    pub projection: Option<Projection>,
    /// Filter results to objects whose names are lexicographically equal to or
    /// after `start_offset`.
    pub start_offset: Option<String>,
    /// If `true`, lists all versions of an object as distinct results.
    pub versions: Option<bool>,
    /// A glob pattern used to filter results, e.g. `**/*.csv`.
    pub match_glob: Option<String>,
    /// The project to be billed for a requester pays bucket.
    pub user_project: Option<String>,
}

/// The result of a call to Objects.ListObjects
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListObjectsResponse {
    /// The list of prefixes of objects matching-but-not-listed up to and including
    /// the requested delimiter.
    pub prefixes: Option<Vec<String>>,
    /// The list of items.
    pub items: Option<Vec<Object>>,
    /// The continuation token, used to page through large result sets. Provide
    /// this value in a subsequent request to return the next page of results.
    pub next_page_token: Option<String>,
}

impl Paginated for ListObjectsResponse {
    type Item = Object;

    fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }

    fn into_items(self) -> Vec<Object> {
        self.items.unwrap_or_default()
    }
}

pub(crate) fn build(base_url: &str, client: &Client, req: &ListObjectsRequest) -> RequestBuilder {
    let url = format!("{}/b/{}/o", base_url, req.bucket.escape());
    client.get(url).query(&req)
}
