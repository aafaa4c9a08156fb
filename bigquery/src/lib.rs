#![allow(clippy::result_large_err)]
//! # gcloud-rest-bigquery
//!
//! Google Cloud BigQuery client over the REST API v2.
//!
//! * [About BigQuery](https://cloud.google.com/bigquery/)
//! * [REST API Documentation](https://cloud.google.com/bigquery/docs/reference/rest)
//!
//! ## Quick Start
//!
//! ### Authentication
//!
//! `with_auth()` reads the credentials from the file named by `GOOGLE_APPLICATION_CREDENTIALS`,
//! from `GOOGLE_APPLICATION_CREDENTIALS_JSON` or from the metadata server. The project of the
//! credentials becomes the project of the client.
//!
//! ```
//! use gcloud_rest_bigquery::client::{ClientConfig, Client};
//!
//! async fn run() {
//!     let config = ClientConfig::default().with_auth().await.unwrap();
//!     let client = Client::new(config).unwrap();
//! }
//! ```
//!
//! ### Query
//!
//! ```
//! use gcloud_rest_bigquery::client::Client;
//! use gcloud_rest_bigquery::http::job::query::QueryRequest;
//! use gcloud_rest_bigquery::query::row::Row;
//! use gcloud_rest_bigquery::query::Error;
//!
//! async fn run(client: &Client) -> Result<(), Error> {
//!     let request = QueryRequest {
//!         query: "SELECT word, word_count FROM `bigquery-public-data.samples.shakespeare` LIMIT 10".to_string(),
//!         ..Default::default()
//!     };
//!     let mut iter = client.query(&request, None).await?;
//!     while let Some(row) = iter.next::<Row>().await? {
//!         let word: &str = row.column(0)?;
//!         let count: i64 = row.column(1)?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Columns decode into `&str`, `String` (STRING, NUMERIC), `i64` (INT64), `f64` (FLOAT64),
//! `bool` (BOOL), `Vec<u8>` (BYTES), `time::OffsetDateTime` (TIMESTAMP) and
//! [`Row`](query::row::Row) (STRUCT), `Option` of those for NULLABLE columns and `Vec` for REPEATED ones.
//!
//! ### Load
//!
//! ```
//! use gcloud_rest_bigquery::client::{Client, LoadOptions};
//! use gcloud_rest_bigquery::http::table::TableReference;
//! use gcloud_rest_bigquery::http::Error;
//!
//! async fn run(client: &Client, csv: Vec<u8>) -> Result<(), Error> {
//!     let default = TableReference::new(client.project_id().unwrap_or_default(), "", "");
//!     let table = TableReference::parse("dataset.people", &default)?;
//!     let options = LoadOptions {
//!         file_name: Some("people.csv".to_string()),
//!         write: Some("truncate".to_string()),
//!         skip_leading_rows: Some(1),
//!         ..Default::default()
//!     };
//!     let job = client.load_file(&table, csv, &options, None).await?;
//!     let job = client.wait_for_job(&job, None).await?;
//!     if let Some(error) = job.error() {
//!         println!("load failed: {:?}", error.message);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Streaming insert
//!
//! ```
//! use gcloud_rest_bigquery::client::Client;
//! use gcloud_rest_bigquery::http::table::TableReference;
//! use gcloud_rest_bigquery::http::tabledata::insert_all::{InsertAllRequest, Row};
//! use gcloud_rest_bigquery::http::Error;
//!
//! #[derive(serde::Serialize)]
//! struct Visit {
//!     page: String,
//!     #[serde(with = "time::serde::rfc3339")]
//!     at: time::OffsetDateTime,
//! }
//!
//! async fn run(client: &Client, table: &TableReference, visit: Visit) -> Result<(), Error> {
//!     let request = InsertAllRequest {
//!         rows: vec![Row {
//!             insert_id: Some("visit-1".to_string()),
//!             json: visit,
//!         }],
//!         ..Default::default()
//!     };
//!     let response = client.tabledata().insert(table, &request, None).await?;
//!     for error in response.insert_errors.unwrap_or_default() {
//!         println!("row {} rejected: {:?}", error.index, error.errors);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;
pub mod query;
pub mod updater;
