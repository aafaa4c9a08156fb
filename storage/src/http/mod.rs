pub use google_cloud_gax::cancel::CancellationToken;
pub use google_cloud_gax::error::Error;
pub(crate) use google_cloud_gax::http::Escape;

use reqwest_middleware::RequestBuilder;

pub mod bucket_access_controls;
pub mod buckets;
pub mod default_object_access_controls;
pub mod notifications;
pub mod object_access_controls;
pub mod objects;
pub mod resumable_upload_client;
pub mod storage_client;

/// Adds `userProject` to requests whose other parameters travel in the path or the body.
pub(crate) trait UserProject {
    fn user_project(self, user_project: &Option<String>) -> Self;
}

impl UserProject for RequestBuilder {
    fn user_project(self, user_project: &Option<String>) -> Self {
        match user_project {
            Some(project) => self.query(&[("userProject", project)]),
            None => self,
        }
    }
}

// Lifecycle conditions carry plain `YYYY-MM-DD` dates.
time::serde::format_description!(date, Date, "[year]-[month]-[day]");

/// Checksum mismatch detected by [`storage_client::StorageClient::download_and_verify`].
#[derive(thiserror::Error, Debug)]
pub enum VerifyError {
    #[error(transparent)]
    Http(#[from] Error),
    #[error("md5 mismatch: expected={expected} actual={actual}")]
    Md5Mismatch { expected: String, actual: String },
    #[error("crc32c mismatch: expected={expected} actual={actual}")]
    Crc32cMismatch { expected: String, actual: String },
}

/// Which hash [`storage_client::StorageClient::download_and_verify`] compares.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Verification {
    Md5,
    Crc32c,
    /// Both hashes, whichever the object carries.
    #[default]
    All,
    None,
}
