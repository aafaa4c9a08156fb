#![allow(clippy::result_large_err)]
//! # gcloud-rest-dlp
//!
//! Google Cloud Sensitive Data Protection (DLP) client over the REST API.
//!
//! * [About Sensitive Data Protection](https://cloud.google.com/sensitive-data-protection/)
//! * [REST API Documentation](https://cloud.google.com/sensitive-data-protection/docs/reference/rest)
//!
//! ## Quick Start
//!
//! ```
//! use gcloud_rest_dlp::client::{Client, ClientConfig};
//!
//! async fn run() {
//!     let config = ClientConfig::default().with_auth().await.unwrap();
//!     let client = Client::new(config).unwrap();
//! }
//! ```
//!
//! ### Inspecting text
//!
//! ```
//! use gcloud_rest_dlp::client::Client;
//! use gcloud_rest_dlp::http::content::{InfoType, InspectConfig, Likelihood};
//! use gcloud_rest_dlp::http::Error;
//!
//! async fn run(client: Client) -> Result<(), Error> {
//!     let config = InspectConfig {
//!         info_types: vec![InfoType::new("EMAIL_ADDRESS"), InfoType::new("PHONE_NUMBER")],
//!         min_likelihood: Some(Likelihood::Likely),
//!         include_quote: true,
//!         ..Default::default()
//!     };
//!     for finding in client.inspect_text("mail me at a@example.com", config, None).await? {
//!         println!("{:?} {:?}", finding.info_type, finding.quote);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### De-identification
//!
//! ```
//! use gcloud_rest_dlp::client::Client;
//! use gcloud_rest_dlp::http::content::deidentify::DeidentifyContentRequest;
//! use gcloud_rest_dlp::http::content::ContentItem;
//! use gcloud_rest_dlp::http::transformations::{
//!     DeidentifyConfig, InfoTypeTransformation, InfoTypeTransformations, PrimitiveTransformation,
//! };
//! use gcloud_rest_dlp::http::{project_path, Error};
//!
//! async fn run(client: Client) -> Result<ContentItem, Error> {
//!     let req = DeidentifyContentRequest {
//!         parent: project_path("my-project"),
//!         deidentify_config: Some(DeidentifyConfig::InfoTypeTransformations(InfoTypeTransformations {
//!             transformations: vec![InfoTypeTransformation {
//!                 info_types: vec![],
//!                 primitive_transformation: PrimitiveTransformation::replace_with_info_type(),
//!             }],
//!         })),
//!         item: Some(ContentItem::text("mail me at a@example.com")),
//!         ..Default::default()
//!     };
//!     Ok(client.deidentify_content(&req, None).await?.item)
//! }
//! ```
//!
//! ### Storage inspection jobs
//!
//! ```
//! use gcloud_rest_dlp::client::Client;
//! use gcloud_rest_dlp::http::dlp_jobs::create::{CreateDlpJobRequest, JobConfig};
//! use gcloud_rest_dlp::http::dlp_jobs::{
//!     CloudStorageOptions, FileSet, InspectJobConfig, StorageConfig, StorageOptions,
//! };
//! use gcloud_rest_dlp::http::Error;
//!
//! async fn run(client: Client) -> Result<(), Error> {
//!     let req = CreateDlpJobRequest {
//!         parent: "projects/my-project".to_string(),
//!         job: JobConfig::InspectJob(InspectJobConfig {
//!             storage_config: StorageConfig {
//!                 storage: StorageOptions::CloudStorageOptions(CloudStorageOptions {
//!                     file_set: FileSet { url: "gs://uploads/*".to_string() },
//!                     ..Default::default()
//!                 }),
//!                 timespan_config: None,
//!             },
//!             inspect_config: None,
//!             inspect_template_name: Some("projects/my-project/inspectTemplates/pii".to_string()),
//!             actions: vec![],
//!         }),
//!         job_id: None,
//!     };
//!     let job = client.create_dlp_job(&req, None).await?;
//!     let job = client.wait_for_dlp_job(&job, None).await?;
//!     println!("{:?}", job.inspect_details);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;
