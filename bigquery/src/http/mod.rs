use std::fmt::Display;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer};

pub use google_cloud_gax::cancel::CancellationToken;
pub use google_cloud_gax::error::Error;

pub mod bigquery_client;
pub mod bigquery_dataset_client;
pub mod bigquery_job_client;
pub mod bigquery_project_client;
pub mod bigquery_table_client;
pub mod bigquery_tabledata_client;
pub mod dataset;
pub mod job;
pub mod project;
pub mod resumable_upload_client;
pub mod table;
pub mod tabledata;
pub mod types;

/// Input that could not be turned into a request.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unable to identify table from {0:?}")]
    TableReference(String),
    #[error("unknown {kind}: {value:?}")]
    UnknownOption { kind: &'static str, value: String },
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::InvalidArgument(e.to_string())
    }
}

/// Int64 lists arrive as lists of JSON strings.
fn from_str_vec<'de, T, D>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    T: FromStr,
    T::Err: Display,
    D: Deserializer<'de>,
{
    let s: Result<Vec<String>, _> = Vec::deserialize(deserializer);
    match s {
        Ok(vec) => {
            let mut result = Vec::with_capacity(vec.len());
            for v in vec {
                result.push(T::from_str(&v).map_err(de::Error::custom)?);
            }
            Ok(result)
        }
        Err(_) => Ok(vec![]),
    }
}
