#![allow(clippy::result_large_err)]
//! # gcloud-rest-error-reporting
//!
//! Google Cloud Error Reporting client over the REST API.
//!
//! * [About Error Reporting](https://cloud.google.com/error-reporting/)
//! * [REST API Documentation](https://cloud.google.com/error-reporting/reference/rest)
//!
//! ## Quick Start
//!
//! ```
//! use gcloud_rest_error_reporting::client::{Client, ClientConfig};
//!
//! async fn run() {
//!     let config = ClientConfig::default().with_auth().await.unwrap();
//!     let client = Client::new(config).unwrap();
//! }
//! ```
//!
//! ### Reporting
//!
//! ```
//! use gcloud_rest_error_reporting::client::Client;
//!
//! async fn run(client: Client) {
//!     let reporter = client.reporter("checkout", Some("1.4.2".to_string())).unwrap();
//!     let err = std::io::Error::other("payment gateway timed out");
//!     reporter.report(&err).await.unwrap();
//! }
//! ```
//!
//! ### Reading groups
//!
//! ```
//! use gcloud_rest_error_reporting::client::Client;
//! use gcloud_rest_error_reporting::http::group_stats::list::ListGroupStatsRequest;
//! use gcloud_rest_error_reporting::http::group_stats::ErrorGroupOrder;
//! use gcloud_rest_error_reporting::http::groups::ResolutionStatus;
//! use gcloud_rest_error_reporting::http::{Error, Period, QueryTimeRange};
//!
//! async fn run(client: Client) -> Result<(), Error> {
//!     let req = ListGroupStatsRequest {
//!         project_name: "my-project".to_string(),
//!         time_range: Some(QueryTimeRange::new(Period::OneWeek)),
//!         order: Some(ErrorGroupOrder::CountDesc),
//!         ..Default::default()
//!     };
//!     for stats in client.list_group_stats_all(&req, None).await? {
//!         let mut group = stats.group;
//!         group.resolution_status = ResolutionStatus::Acknowledged;
//!         client.update_group(&group, None).await?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;
pub mod reporter;
