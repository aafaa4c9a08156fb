//! # gcloud-rest-gax
//!
//! Transport pieces shared by the REST clients in this workspace:
//!
//! * [`http::HttpClient`] adds the authorization and client headers and decodes
//!   Google JSON error bodies into [`error::Error`].
//! * [`retry`] runs a call again according to a caller supplied [`retry::RetrySetting`].
//! * [`paging`] walks `nextPageToken` based list methods.
//! * [`cancel::CancellationToken`] aborts an in-flight call.
//! * [`upload`] holds the chunk arithmetic and the session client of resumable media uploads.
pub mod cancel;
pub mod error;
pub mod http;
pub mod paging;
pub mod path;
pub mod retry;
pub mod status;
pub mod upload;
