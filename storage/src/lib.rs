#![allow(clippy::result_large_err)]
//! # gcloud-rest-storage
//!
//! Google Cloud Storage client over the JSON API.
//!
//! * [About Cloud Storage](https://cloud.google.com/storage/)
//! * [JSON API Documentation](https://cloud.google.com/storage/docs/json_api/v1)
//!
//! ## Quick Start
//!
//! ### Authentication
//!
//! `with_auth()` reads the credentials from the file named by `GOOGLE_APPLICATION_CREDENTIALS`,
//! from `GOOGLE_APPLICATION_CREDENTIALS_JSON` or from the metadata server.
//!
//! ```
//! use gcloud_rest_storage::client::{ClientConfig, Client};
//!
//! async fn run() {
//!     let config = ClientConfig::default().with_auth().await.unwrap();
//!     let client = Client::new(config).unwrap();
//! }
//! ```
//!
//! A parsed credentials file can be passed instead.
//!
//! ```
//! use gcloud_rest_storage::client::google_cloud_auth::credentials::CredentialsFile;
//! use gcloud_rest_storage::client::{ClientConfig, Client};
//!
//! async fn run(cred: CredentialsFile) {
//!     let config = ClientConfig::default().with_credentials(cred).await.unwrap();
//!     let client = Client::new(config).unwrap();
//! }
//! ```
//!
//! ### Anonymous Access
//!
//! ```
//! use gcloud_rest_storage::client::{ClientConfig, Client};
//!
//! async fn run() {
//!     let config = ClientConfig::default().anonymous();
//!     let client = Client::new(config).unwrap();
//! }
//! ```
//!
//! ### Usage
//!
//! ```
//! use gcloud_rest_storage::client::Client;
//! use gcloud_rest_storage::http::objects::download::Range;
//! use gcloud_rest_storage::http::objects::get::GetObjectRequest;
//! use gcloud_rest_storage::http::objects::upload::{Media, UploadObjectRequest, UploadType};
//! use gcloud_rest_storage::http::{Verification, VerifyError};
//!
//! async fn run(client: Client) -> Result<(), VerifyError> {
//!     let upload_type = UploadType::Simple(Media::new("file.png"));
//!     let uploaded = client.upload_object(&UploadObjectRequest {
//!         bucket: "bucket".to_string(),
//!         ..Default::default()
//!     }, "hello world", &upload_type, None).await?;
//!
//!     let req = GetObjectRequest {
//!         bucket: "bucket".to_string(),
//!         object: "file.png".to_string(),
//!         ..Default::default()
//!     };
//!     let head = client.download_object(&req, &Range(Some(0), Some(4)), None).await?;
//!     let data = client.download_and_verify(&req, Verification::All, None).await?;
//!
//!     // Only the changed attribute is sent.
//!     client.update_object(&uploaded, |o| o.set_cache_control(Some("no-cache".to_string()))).await?;
//!     Ok(())
//! }
//! ```
//!
//! Large files go through a resumable session.
//!
//! ```
//! use gcloud_rest_storage::client::Client;
//! use gcloud_rest_storage::http::objects::upload::{Media, UploadObjectRequest, UploadType};
//! use gcloud_rest_storage::http::Error;
//!
//! async fn run(client: Client, data: Vec<u8>) -> Result<(), Error> {
//!     let req = UploadObjectRequest {
//!         bucket: "bucket".to_string(),
//!         ..Default::default()
//!     };
//!     let uploader = client
//!         .prepare_resumable_upload(&req, &UploadType::Simple(Media::new("dump.tar")), None)
//!         .await?;
//!     let object = uploader.upload_all(data, 8 * 1024 * 1024).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;
pub mod updater;
