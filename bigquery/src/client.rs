use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use token_source::TokenSourceProvider;

use google_cloud_gax::cancel::with_cancel;
use google_cloud_gax::http::HttpClient;
use google_cloud_gax::retry::RetrySetting;

use crate::http::bigquery_client::BigqueryClient;
use crate::http::bigquery_dataset_client::BigqueryDatasetClient;
use crate::http::bigquery_project_client::BigqueryProjectClient;
use crate::http::bigquery_job_client::BigqueryJobClient;
use crate::http::bigquery_table_client::BigqueryTableClient;
use crate::http::bigquery_tabledata_client::BigqueryTabledataClient;
use crate::http::job::get::GetJobRequest;
use crate::http::job::query::QueryRequest;
use crate::http::job::{
    generate_job_id, CreateDisposition, Job, JobConfiguration, JobConfigurationExtract, JobConfigurationLoad,
    JobConfigurationTableCopy, JobReference, WriteDisposition,
};
use crate::http::table::{DestinationFormat, SourceFormat, TableReference, TableSchema};
use crate::http::{CancellationToken, Error};
use crate::query::QueryIterator;

const USER_AGENT: &str = concat!("gcloud-rest-bigquery/", env!("CARGO_PKG_VERSION"));

/// Upper bound of the delay between two polls of [`Client::wait_for_job`].
const MAX_POLL_INTERVAL: Duration = Duration::from_secs(32);

#[derive(Debug)]
pub struct ClientConfig {
    /// Shared HTTP client. When `None` one is built with `timeout`.
    pub http: Option<ClientWithMiddleware>,
    pub bigquery_endpoint: String,
    /// `None` sends unauthenticated requests.
    pub token_source_provider: Option<Box<dyn TokenSourceProvider>>,
    /// Project of the jobs started by [`Client::query`] and the load, copy and extract helpers.
    pub project_id: Option<String>,
    pub retry: RetrySetting,
    pub timeout: Option<Duration>,
    pub debug: bool,
    /// First delay of [`Client::wait_for_job`]. Doubled after every poll.
    pub job_poll_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            http: None,
            bigquery_endpoint: "https://bigquery.googleapis.com".to_string(),
            token_source_provider: None,
            project_id: None,
            retry: RetrySetting::bigquery(),
            timeout: Some(Duration::from_secs(60)),
            debug: false,
            job_poll_interval: Duration::from_secs(1),
        }
    }
}

#[cfg(feature = "auth")]
pub use google_cloud_auth;

#[cfg(feature = "auth")]
impl ClientConfig {
    pub async fn with_auth(self) -> Result<Self, google_cloud_auth::error::Error> {
        let ts = google_cloud_auth::token::DefaultTokenSourceProvider::new(Self::auth_config()).await?;
        Ok(self.with_token_source(ts).await)
    }

    pub async fn with_credentials(
        self,
        credentials: google_cloud_auth::credentials::CredentialsFile,
    ) -> Result<Self, google_cloud_auth::error::Error> {
        let ts = google_cloud_auth::token::DefaultTokenSourceProvider::new_with_credentials(
            Self::auth_config(),
            Box::new(credentials),
        )
        .await?;
        Ok(self.with_token_source(ts).await)
    }

    async fn with_token_source(mut self, ts: google_cloud_auth::token::DefaultTokenSourceProvider) -> Self {
        if self.project_id.is_none() {
            self.project_id = match &ts.source_credentials {
                Some(cred) => cred.project_id.clone(),
                None => Some(google_cloud_metadata::project_id().await),
            };
        }
        self.token_source_provider = Some(Box::new(ts));
        self
    }

    fn auth_config() -> google_cloud_auth::project::Config<'static> {
        google_cloud_auth::project::Config::default().with_scopes(&crate::http::bigquery_client::SCOPES)
    }
}

/// Options of [`Client::load_file`] and [`Client::load_from_uris`].
///
/// `format`, `create` and `write` take the short aliases accepted by
/// [`SourceFormat`], [`CreateDisposition`] and [`WriteDisposition`], e.g. `json`, `needed`, `append`.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    /// Inferred from `file_name` or the first URI when not given.
    pub format: Option<String>,
    /// Name of the uploaded data, only used to infer the format.
    pub file_name: Option<String>,
    pub create: Option<String>,
    pub write: Option<String>,
    pub schema: Option<TableSchema>,
    pub autodetect: Option<bool>,
    pub projection_fields: Option<Vec<String>>,
    pub field_delimiter: Option<String>,
    pub quote: Option<String>,
    pub encoding: Option<String>,
    pub null_marker: Option<String>,
    pub skip_leading_rows: Option<i64>,
    pub max_bad_records: Option<i64>,
    pub allow_jagged_rows: Option<bool>,
    pub allow_quoted_newlines: Option<bool>,
    pub ignore_unknown_values: Option<bool>,
    pub job_id: Option<String>,
    /// Prefix of the generated job id. Ignored when `job_id` is set.
    pub prefix: Option<String>,
    pub labels: Option<HashMap<String, String>>,
    pub location: Option<String>,
    pub dry_run: Option<bool>,
    /// Chunk size of the resumable upload of [`Client::load_file`].
    pub chunk_size: Option<usize>,
}

#[derive(Clone, Debug, Default)]
pub struct CopyOptions {
    pub create: Option<String>,
    pub write: Option<String>,
    pub job_id: Option<String>,
    pub prefix: Option<String>,
    pub labels: Option<HashMap<String, String>>,
    pub location: Option<String>,
    pub dry_run: Option<bool>,
}

#[derive(Clone, Debug, Default)]
pub struct ExtractOptions {
    /// Inferred from the first URI when not given.
    pub format: Option<String>,
    /// `GZIP`, `DEFLATE`, `SNAPPY` or `NONE`.
    pub compression: Option<String>,
    pub field_delimiter: Option<String>,
    pub print_header: Option<bool>,
    pub job_id: Option<String>,
    pub prefix: Option<String>,
    pub labels: Option<HashMap<String, String>>,
    pub location: Option<String>,
    pub dry_run: Option<bool>,
}

const DEFAULT_CHUNK_SIZE: usize = 10 * 1024 * 1024;

fn job_reference(
    project_id: &str,
    job_id: &Option<String>,
    prefix: &Option<String>,
    location: &Option<String>,
) -> JobReference {
    JobReference {
        project_id: project_id.to_string(),
        job_id: job_id.clone().unwrap_or_else(|| generate_job_id(prefix.as_deref())),
        location: location.clone(),
    }
}

fn dispositions(
    create: &Option<String>,
    write: &Option<String>,
) -> Result<(Option<CreateDisposition>, Option<WriteDisposition>), Error> {
    let create: Option<CreateDisposition> = create.as_deref().map(str::parse).transpose()?;
    let write: Option<WriteDisposition> = write.as_deref().map(str::parse).transpose()?;
    Ok((create, write))
}

impl LoadOptions {
    fn into_job(self, project_id: &str, table: &TableReference, source_uris: Vec<String>) -> Result<Job, Error> {
        let path = self
            .file_name
            .as_deref()
            .or(source_uris.first().map(String::as_str))
            .unwrap_or_default();
        let source_format = SourceFormat::infer(path, self.format.as_deref())?;
        let (create_disposition, write_disposition) = dispositions(&self.create, &self.write)?;
        Ok(Job {
            job_reference: job_reference(project_id, &self.job_id, &self.prefix, &self.location),
            configuration: JobConfiguration {
                load: Some(JobConfigurationLoad {
                    source_uris,
                    schema: self.schema,
                    destination_table: table.clone(),
                    create_disposition,
                    write_disposition,
                    null_marker: self.null_marker,
                    field_delimiter: self.field_delimiter,
                    skip_leading_rows: self.skip_leading_rows,
                    encoding: self.encoding,
                    quote: self.quote,
                    max_bad_records: self.max_bad_records,
                    allow_quoted_newlines: self.allow_quoted_newlines,
                    source_format,
                    allow_jagged_rows: self.allow_jagged_rows,
                    ignore_unknown_values: self.ignore_unknown_values,
                    projection_fields: self.projection_fields,
                    autodetect: self.autodetect,
                    ..Default::default()
                }),
                dry_run: self.dry_run,
                labels: self.labels,
                ..Default::default()
            },
            ..Default::default()
        })
    }
}

#[derive(Clone, Debug)]
pub struct Client {
    project_client: BigqueryProjectClient,
    dataset_client: BigqueryDatasetClient,
    table_client: BigqueryTableClient,
    tabledata_client: BigqueryTabledataClient,
    job_client: BigqueryJobClient,
    project_id: Option<String>,
    job_poll_interval: Duration,
}

impl Client {
    /// Fails only when the underlying HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let ts = match config.token_source_provider {
            Some(tsp) => Some(tsp.token_source()),
            None => {
                tracing::trace!("Use anonymous access due to lack of token");
                None
            }
        };
        let http = match config.http {
            Some(http) => http,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = config.timeout {
                    builder = builder.timeout(timeout);
                }
                ClientBuilder::new(builder.build()?).build()
            }
        };
        let http = HttpClient::new(ts, config.bigquery_endpoint, http, USER_AGENT, config.debug);
        let client = Arc::new(BigqueryClient::new(http, config.retry));
        Ok(Self {
            project_client: BigqueryProjectClient::new(client.clone()),
            dataset_client: BigqueryDatasetClient::new(client.clone()),
            table_client: BigqueryTableClient::new(client.clone()),
            tabledata_client: BigqueryTabledataClient::new(client.clone()),
            job_client: BigqueryJobClient::new(client),
            project_id: config.project_id,
            job_poll_interval: config.job_poll_interval,
        })
    }

    pub fn project(&self) -> &BigqueryProjectClient {
        &self.project_client
    }

    pub fn dataset(&self) -> &BigqueryDatasetClient {
        &self.dataset_client
    }

    pub fn table(&self) -> &BigqueryTableClient {
        &self.table_client
    }

    pub fn tabledata(&self) -> &BigqueryTabledataClient {
        &self.tabledata_client
    }

    pub fn job(&self) -> &BigqueryJobClient {
        &self.job_client
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    fn job_project(&self) -> Result<&str, Error> {
        self.project_id()
            .ok_or_else(|| Error::InvalidArgument("project_id is required".to_string()))
    }

    /// Runs `request` in the client's project and iterates over the result rows.
    ///
    /// ```
    /// use gcloud_rest_bigquery::client::Client;
    /// use gcloud_rest_bigquery::http::job::query::QueryRequest;
    /// use gcloud_rest_bigquery::query::row::Row;
    /// use gcloud_rest_bigquery::query::Error;
    ///
    /// async fn run(client: &Client) -> Result<(), Error> {
    ///     let request = QueryRequest {
    ///         query: "SELECT name, age FROM dataset.people".to_string(),
    ///         ..Default::default()
    ///     };
    ///     let mut iter = client.query(&request, None).await?;
    ///     while let Some(row) = iter.next::<Row>().await? {
    ///         let name: String = row.column(0)?;
    ///         let age: Option<i64> = row.column(1)?;
    ///     }
    ///     Ok(())
    /// }
    /// ```
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn query(
        &self,
        request: &QueryRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<QueryIterator, Error> {
        let response = self.job_client.query(self.job_project()?, request, cancel).await?;
        Ok(QueryIterator::new(self.job_client.clone(), request, response))
    }

    /// Uploads `data` into `table` with a load job and returns the job as inserted.
    /// Use [`Client::wait_for_job`] to wait for the load to finish.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn load_file(
        &self,
        table: &TableReference,
        data: impl Into<Bytes>,
        options: &LoadOptions,
        cancel: Option<CancellationToken>,
    ) -> Result<Job, Error> {
        let chunk_size = options.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE);
        let job = options.clone().into_job(self.job_project()?, table, vec![])?;
        self.job_client.upload(&job, data, chunk_size, cancel).await
    }

    /// Loads `gs://` objects into `table`.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn load_from_uris(
        &self,
        table: &TableReference,
        uris: &[&str],
        options: &LoadOptions,
        cancel: Option<CancellationToken>,
    ) -> Result<Job, Error> {
        let uris = uris.iter().map(|u| u.to_string()).collect();
        let job = options.clone().into_job(self.job_project()?, table, uris)?;
        self.job_client.create(&job, cancel).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn copy_table(
        &self,
        sources: &[TableReference],
        destination: &TableReference,
        options: &CopyOptions,
        cancel: Option<CancellationToken>,
    ) -> Result<Job, Error> {
        let (create_disposition, write_disposition) = dispositions(&options.create, &options.write)?;
        let job = Job {
            job_reference: job_reference(self.job_project()?, &options.job_id, &options.prefix, &options.location),
            configuration: JobConfiguration {
                copy: Some(JobConfigurationTableCopy {
                    source_tables: sources.to_vec(),
                    destination_table: destination.clone(),
                    create_disposition,
                    write_disposition,
                    ..Default::default()
                }),
                dry_run: options.dry_run,
                labels: options.labels.clone(),
                ..Default::default()
            },
            ..Default::default()
        };
        self.job_client.create(&job, cancel).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn extract_table(
        &self,
        source: &TableReference,
        destination_uris: &[&str],
        options: &ExtractOptions,
        cancel: Option<CancellationToken>,
    ) -> Result<Job, Error> {
        let destination_format = match options.format.as_deref() {
            Some(format) => Some(format.parse::<DestinationFormat>()?),
            None => destination_uris.first().and_then(|uri| DestinationFormat::infer(uri)),
        };
        let job = Job {
            job_reference: job_reference(self.job_project()?, &options.job_id, &options.prefix, &options.location),
            configuration: JobConfiguration {
                extract: Some(JobConfigurationExtract {
                    destination_uris: destination_uris.iter().map(|u| u.to_string()).collect(),
                    source_table: source.clone(),
                    print_header: options.print_header,
                    field_delimiter: options.field_delimiter.clone(),
                    destination_format,
                    compression: options.compression.clone(),
                }),
                dry_run: options.dry_run,
                labels: options.labels.clone(),
                ..Default::default()
            },
            ..Default::default()
        };
        self.job_client.create(&job, cancel).await
    }

    /// Polls the job until it is `DONE`. The delay starts at `job_poll_interval` and doubles up to 32 seconds.
    /// A job that finished with an error is returned as `Ok`, see [`Job::error`].
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn wait_for_job(&self, job: &Job, cancel: Option<CancellationToken>) -> Result<Job, Error> {
        if job.is_done() {
            return Ok(job.clone());
        }
        let reference = &job.job_reference;
        let req = GetJobRequest {
            location: reference.location.clone(),
        };
        let mut delay = self.job_poll_interval;
        let action = async {
            loop {
                tokio::time::sleep(delay).await;
                let job = self
                    .job_client
                    .get(&reference.project_id, &reference.job_id, &req, None)
                    .await?;
                if job.is_done() {
                    return Ok(job);
                }
                tracing::debug!("job {} is {:?}", reference.job_id, job.status.state);
                delay = (delay * 2).min(MAX_POLL_INTERVAL);
            }
        };
        with_cancel(cancel.as_ref(), action).await
    }
}
