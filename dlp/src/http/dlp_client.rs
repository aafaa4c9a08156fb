use futures_util::Stream;

use google_cloud_gax::http::HttpClient;
use google_cloud_gax::paging;
use google_cloud_gax::retry::{invoke, RetrySetting};

use crate::http::content::deidentify::{DeidentifyContentRequest, DeidentifyContentResponse};
use crate::http::content::inspect::{InspectContentRequest, InspectContentResponse};
use crate::http::content::redact_image::{RedactImageRequest, RedactImageResponse};
use crate::http::content::reidentify::{ReidentifyContentRequest, ReidentifyContentResponse};
use crate::http::deidentify_templates::create::CreateDeidentifyTemplateRequest;
use crate::http::deidentify_templates::list::{ListDeidentifyTemplatesRequest, ListDeidentifyTemplatesResponse};
use crate::http::deidentify_templates::patch::UpdateDeidentifyTemplateRequest;
use crate::http::deidentify_templates::DeidentifyTemplate;
use crate::http::dlp_jobs::create::CreateDlpJobRequest;
use crate::http::dlp_jobs::list::{ListDlpJobsRequest, ListDlpJobsResponse};
use crate::http::dlp_jobs::DlpJob;
use crate::http::info_types::list::{ListInfoTypesRequest, ListInfoTypesResponse};
use crate::http::inspect_templates::create::CreateInspectTemplateRequest;
use crate::http::inspect_templates::list::{ListInspectTemplatesRequest, ListInspectTemplatesResponse};
use crate::http::inspect_templates::patch::UpdateInspectTemplateRequest;
use crate::http::inspect_templates::InspectTemplate;
use crate::http::job_triggers::create::CreateJobTriggerRequest;
use crate::http::job_triggers::list::{ListJobTriggersRequest, ListJobTriggersResponse};
use crate::http::job_triggers::patch::UpdateJobTriggerRequest;
use crate::http::job_triggers::JobTrigger;
use crate::http::{
    content, deidentify_templates, dlp_jobs, info_types, inspect_templates, job_triggers, require, update_mask,
    CancellationToken, Error,
};

pub const SCOPES: [&str; 1] = ["https://www.googleapis.com/auth/cloud-platform"];

/// Data Loss Prevention API v2.
///
/// Creations are sent once since a retried create may fail with `409` after the first attempt succeeded.
/// Everything else is retried with the configured [`RetrySetting`].
#[derive(Clone, Debug)]
pub struct DlpClient {
    http: HttpClient,
    endpoint: String,
    retry: RetrySetting,
}

impl DlpClient {
    /// `http` must point at the service root, such as `https://dlp.googleapis.com`.
    pub fn new(http: HttpClient, retry: RetrySetting) -> Self {
        let endpoint = format!("{}/v2", http.endpoint().trim_end_matches('/'));
        Self { http, endpoint, retry }
    }

    /// Finds sensitive data in a string, a table or a file held in memory.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn inspect_content(
        &self,
        req: &InspectContentRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<InspectContentResponse, Error> {
        require(&req.parent, "parent")?;
        let action = || async move {
            let builder = content::inspect::build(self.endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    /// Covers the findings of an image with boxes.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn redact_image(
        &self,
        req: &RedactImageRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<RedactImageResponse, Error> {
        require(&req.parent, "parent")?;
        let action = || async move {
            let builder = content::redact_image::build(self.endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn deidentify_content(
        &self,
        req: &DeidentifyContentRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<DeidentifyContentResponse, Error> {
        require(&req.parent, "parent")?;
        let action = || async move {
            let builder = content::deidentify::build(self.endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    /// Reverses a reversible de-identification such as FPE or a deterministic crypto replacement.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn reidentify_content(
        &self,
        req: &ReidentifyContentRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<ReidentifyContentResponse, Error> {
        require(&req.parent, "parent")?;
        let action = || async move {
            let builder = content::reidentify::build(self.endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    /// Built-in info types. Not paged.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list_info_types(
        &self,
        req: &ListInfoTypesRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<ListInfoTypesResponse, Error> {
        let action = || async move {
            let builder = info_types::list::build(self.endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn create_inspect_template(
        &self,
        req: &CreateInspectTemplateRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<InspectTemplate, Error> {
        require(&req.parent, "parent")?;
        let action = || async move {
            let builder = inspect_templates::create::build(self.endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&RetrySetting::none()), action).await
    }

    /// Changes the attributes named by `req.update_mask`, or every attribute set in the template.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn update_inspect_template(
        &self,
        req: &UpdateInspectTemplateRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<InspectTemplate, Error> {
        require(&req.name, "template name")?;
        let mask = &match &req.update_mask {
            Some(paths) => paths.join(","),
            None => update_mask(&req.inspect_template, &inspect_templates::OUTPUT_ONLY)?,
        };
        let action = || async move {
            let builder = inspect_templates::patch::build(self.endpoint.as_str(), self.http.http(), req, mask);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn get_inspect_template(
        &self,
        name: &str,
        cancel: Option<CancellationToken>,
    ) -> Result<InspectTemplate, Error> {
        require(name, "template name")?;
        let action = || async move {
            let builder = inspect_templates::get::build(self.endpoint.as_str(), self.http.http(), name);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list_inspect_templates(
        &self,
        req: &ListInspectTemplatesRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<ListInspectTemplatesResponse, Error> {
        require(&req.parent, "parent")?;
        let action = || async move {
            let builder = inspect_templates::list::build(self.endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    pub async fn list_inspect_templates_all(
        &self,
        req: &ListInspectTemplatesRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<Vec<InspectTemplate>, Error> {
        paging::collect_all(req.page_token.clone(), |page_token| {
            let req = ListInspectTemplatesRequest {
                page_token,
                ..req.clone()
            };
            let cancel = cancel.clone();
            async move { self.list_inspect_templates(&req, cancel).await }
        })
        .await
    }

    pub fn list_inspect_templates_stream<'a>(
        &'a self,
        req: &'a ListInspectTemplatesRequest,
    ) -> impl Stream<Item = Result<InspectTemplate, Error>> + 'a {
        paging::stream(req.page_token.clone(), move |page_token| async move {
            let req = ListInspectTemplatesRequest {
                page_token,
                ..req.clone()
            };
            self.list_inspect_templates(&req, None).await
        })
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn delete_inspect_template(&self, name: &str, cancel: Option<CancellationToken>) -> Result<(), Error> {
        require(name, "template name")?;
        let action = || async move {
            let builder = inspect_templates::delete::build(self.endpoint.as_str(), self.http.http(), name);
            self.http.send_get_empty(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn create_deidentify_template(
        &self,
        req: &CreateDeidentifyTemplateRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<DeidentifyTemplate, Error> {
        require(&req.parent, "parent")?;
        let action = || async move {
            let builder = deidentify_templates::create::build(self.endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&RetrySetting::none()), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn update_deidentify_template(
        &self,
        req: &UpdateDeidentifyTemplateRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<DeidentifyTemplate, Error> {
        require(&req.name, "template name")?;
        let mask = &match &req.update_mask {
            Some(paths) => paths.join(","),
            None => update_mask(&req.deidentify_template, &deidentify_templates::OUTPUT_ONLY)?,
        };
        let action = || async move {
            let builder = deidentify_templates::patch::build(self.endpoint.as_str(), self.http.http(), req, mask);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn get_deidentify_template(
        &self,
        name: &str,
        cancel: Option<CancellationToken>,
    ) -> Result<DeidentifyTemplate, Error> {
        require(name, "template name")?;
        let action = || async move {
            let builder = deidentify_templates::get::build(self.endpoint.as_str(), self.http.http(), name);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list_deidentify_templates(
        &self,
        req: &ListDeidentifyTemplatesRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<ListDeidentifyTemplatesResponse, Error> {
        require(&req.parent, "parent")?;
        let action = || async move {
            let builder = deidentify_templates::list::build(self.endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    pub async fn list_deidentify_templates_all(
        &self,
        req: &ListDeidentifyTemplatesRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<Vec<DeidentifyTemplate>, Error> {
        paging::collect_all(req.page_token.clone(), |page_token| {
            let req = ListDeidentifyTemplatesRequest {
                page_token,
                ..req.clone()
            };
            let cancel = cancel.clone();
            async move { self.list_deidentify_templates(&req, cancel).await }
        })
        .await
    }

    pub fn list_deidentify_templates_stream<'a>(
        &'a self,
        req: &'a ListDeidentifyTemplatesRequest,
    ) -> impl Stream<Item = Result<DeidentifyTemplate, Error>> + 'a {
        paging::stream(req.page_token.clone(), move |page_token| async move {
            let req = ListDeidentifyTemplatesRequest {
                page_token,
                ..req.clone()
            };
            self.list_deidentify_templates(&req, None).await
        })
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn delete_deidentify_template(&self, name: &str, cancel: Option<CancellationToken>) -> Result<(), Error> {
        require(name, "template name")?;
        let action = || async move {
            let builder = deidentify_templates::delete::build(self.endpoint.as_str(), self.http.http(), name);
            self.http.send_get_empty(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    /// Starts an inspection or a risk analysis. The job runs asynchronously.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn create_dlp_job(
        &self,
        req: &CreateDlpJobRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<DlpJob, Error> {
        require(&req.parent, "parent")?;
        let action = || async move {
            let builder = dlp_jobs::create::build(self.endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&RetrySetting::none()), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list_dlp_jobs(
        &self,
        req: &ListDlpJobsRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<ListDlpJobsResponse, Error> {
        require(&req.parent, "parent")?;
        let action = || async move {
            let builder = dlp_jobs::list::build(self.endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    pub async fn list_dlp_jobs_all(
        &self,
        req: &ListDlpJobsRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<Vec<DlpJob>, Error> {
        paging::collect_all(req.page_token.clone(), |page_token| {
            let req = ListDlpJobsRequest {
                page_token,
                ..req.clone()
            };
            let cancel = cancel.clone();
            async move { self.list_dlp_jobs(&req, cancel).await }
        })
        .await
    }

    pub fn list_dlp_jobs_stream<'a>(
        &'a self,
        req: &'a ListDlpJobsRequest,
    ) -> impl Stream<Item = Result<DlpJob, Error>> + 'a {
        paging::stream(req.page_token.clone(), move |page_token| async move {
            let req = ListDlpJobsRequest {
                page_token,
                ..req.clone()
            };
            self.list_dlp_jobs(&req, None).await
        })
    }

    /// `name` is `projects/{project}/dlpJobs/{id}`, see [`dlp_job_path`](crate::http::dlp_job_path).
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn get_dlp_job(&self, name: &str, cancel: Option<CancellationToken>) -> Result<DlpJob, Error> {
        require(name, "job name")?;
        let action = || async move {
            let builder = dlp_jobs::get::build(self.endpoint.as_str(), self.http.http(), name);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn delete_dlp_job(&self, name: &str, cancel: Option<CancellationToken>) -> Result<(), Error> {
        require(name, "job name")?;
        let action = || async move {
            let builder = dlp_jobs::delete::build(self.endpoint.as_str(), self.http.http(), name);
            self.http.send_get_empty(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    /// Requests cancellation. The job may still finish before the request is honored.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn cancel_dlp_job(&self, name: &str, cancel: Option<CancellationToken>) -> Result<(), Error> {
        require(name, "job name")?;
        let action = || async move {
            let builder = dlp_jobs::cancel::build(self.endpoint.as_str(), self.http.http(), name);
            self.http.send_get_empty(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn create_job_trigger(
        &self,
        req: &CreateJobTriggerRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<JobTrigger, Error> {
        require(&req.parent, "parent")?;
        let action = || async move {
            let builder = job_triggers::create::build(self.endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&RetrySetting::none()), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn update_job_trigger(
        &self,
        req: &UpdateJobTriggerRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<JobTrigger, Error> {
        require(&req.name, "trigger name")?;
        let mask = &match &req.update_mask {
            Some(paths) => paths.join(","),
            None => update_mask(&req.job_trigger, &job_triggers::OUTPUT_ONLY)?,
        };
        let action = || async move {
            let builder = job_triggers::patch::build(self.endpoint.as_str(), self.http.http(), req, mask);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    /// `name` is `projects/{project}/jobTriggers/{id}`, see
    /// [`project_job_trigger_path`](crate::http::project_job_trigger_path).
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn get_job_trigger(&self, name: &str, cancel: Option<CancellationToken>) -> Result<JobTrigger, Error> {
        require(name, "trigger name")?;
        let action = || async move {
            let builder = job_triggers::get::build(self.endpoint.as_str(), self.http.http(), name);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list_job_triggers(
        &self,
        req: &ListJobTriggersRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<ListJobTriggersResponse, Error> {
        require(&req.parent, "parent")?;
        let action = || async move {
            let builder = job_triggers::list::build(self.endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    pub async fn list_job_triggers_all(
        &self,
        req: &ListJobTriggersRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<Vec<JobTrigger>, Error> {
        paging::collect_all(req.page_token.clone(), |page_token| {
            let req = ListJobTriggersRequest {
                page_token,
                ..req.clone()
            };
            let cancel = cancel.clone();
            async move { self.list_job_triggers(&req, cancel).await }
        })
        .await
    }

    pub fn list_job_triggers_stream<'a>(
        &'a self,
        req: &'a ListJobTriggersRequest,
    ) -> impl Stream<Item = Result<JobTrigger, Error>> + 'a {
        paging::stream(req.page_token.clone(), move |page_token| async move {
            let req = ListJobTriggersRequest {
                page_token,
                ..req.clone()
            };
            self.list_job_triggers(&req, None).await
        })
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn delete_job_trigger(&self, name: &str, cancel: Option<CancellationToken>) -> Result<(), Error> {
        require(name, "trigger name")?;
        let action = || async move {
            let builder = job_triggers::delete::build(self.endpoint.as_str(), self.http.http(), name);
            self.http.send_get_empty(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }
}

#[cfg(test)]
pub(crate) mod test {
    use std::time::Duration;

    use futures_util::{pin_mut, StreamExt};
    use serde_json::json;
    use serial_test::serial;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use google_cloud_gax::http::HttpClient;
    use google_cloud_gax::retry::RetrySetting;

    use crate::http::content::deidentify::DeidentifyContentRequest;
    use crate::http::content::inspect::InspectContentRequest;
    use crate::http::content::{ContentItem, InfoType, InspectConfig, Likelihood};
    use crate::http::dlp_client::DlpClient;
    use crate::http::dlp_jobs::list::ListDlpJobsRequest;
    use crate::http::dlp_jobs::{DlpJobType, JobState};
    use crate::http::info_types::list::ListInfoTypesRequest;
    use crate::http::info_types::InfoTypeSupportedBy;
    use crate::http::inspect_templates::create::CreateInspectTemplateRequest;
    use crate::http::inspect_templates::patch::UpdateInspectTemplateRequest;
    use crate::http::inspect_templates::InspectTemplate;
    use crate::http::job_triggers::list::ListJobTriggersRequest;
    use crate::http::job_triggers::patch::UpdateJobTriggerRequest;
    use crate::http::job_triggers::{JobTrigger, JobTriggerStatus};
    use crate::http::transformations::{
        DeidentifyConfig, InfoTypeTransformation, InfoTypeTransformations, PrimitiveTransformation,
    };
    use crate::http::{dlp_job_path, project_inspect_template_path, project_path, CancellationToken, Error};

    #[ctor::ctor]
    fn init() {
        let filter = tracing_subscriber::filter::EnvFilter::from_default_env()
            .add_directive("gcloud_rest_dlp=trace".parse().unwrap());
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }

    pub fn fast_retry() -> RetrySetting {
        RetrySetting {
            from_millis: 1,
            max_delay: Some(Duration::from_millis(10)),
            factor: 1,
            take: 3,
            ..Default::default()
        }
    }

    pub fn mock_client(endpoint: &str) -> DlpClient {
        let http = HttpClient::new(
            None,
            endpoint,
            reqwest_middleware::ClientBuilder::new(reqwest::Client::new()).build(),
            "gcloud-rest-dlp",
            false,
        );
        DlpClient::new(http, fast_retry())
    }

    #[tokio::test]
    #[serial]
    async fn test_inspect_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/projects/p/content:inspect"))
            .and(body_json(json!({
                "inspectConfig": {"infoTypes": [{"name": "PHONE_NUMBER"}], "includeQuote": true},
                "item": {"value": "call 206-555-0123"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {
                    "findings": [{
                        "quote": "206-555-0123",
                        "infoType": {"name": "PHONE_NUMBER"},
                        "likelihood": "VERY_LIKELY",
                        "location": {"byteRange": {"start": "5", "end": "17"}}
                    }]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server.uri());
        let req = InspectContentRequest {
            parent: project_path("p"),
            inspect_config: Some(InspectConfig {
                info_types: vec![InfoType::new("PHONE_NUMBER")],
                include_quote: true,
                ..Default::default()
            }),
            item: Some(ContentItem::text("call 206-555-0123")),
            ..Default::default()
        };
        let res = client.inspect_content(&req, None).await.unwrap();
        let finding = &res.result.findings[0];
        assert_eq!(finding.quote.as_deref(), Some("206-555-0123"));
        assert!(finding.likelihood >= Likelihood::Likely);
        assert!(!res.result.findings_truncated);
    }

    #[tokio::test]
    #[serial]
    async fn test_deidentify_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/projects/p/content:deidentify"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({
                "error": {"code": 503, "message": "unavailable"}
            })))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v2/projects/p/content:deidentify"))
            .and(body_json(json!({
                "deidentifyConfig": {"infoTypeTransformations": {"transformations": [
                    {"primitiveTransformation": {"replaceWithInfoTypeConfig": {}}}
                ]}},
                "item": {"value": "mail a@example.com"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "item": {"value": "mail [EMAIL_ADDRESS]"},
                "overview": {"transformedBytes": "13"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server.uri());
        let req = DeidentifyContentRequest {
            parent: "projects/p".to_string(),
            deidentify_config: Some(DeidentifyConfig::InfoTypeTransformations(InfoTypeTransformations {
                transformations: vec![InfoTypeTransformation {
                    info_types: vec![],
                    primitive_transformation: PrimitiveTransformation::replace_with_info_type(),
                }],
            })),
            item: Some(ContentItem::text("mail a@example.com")),
            ..Default::default()
        };
        let res = client.deidentify_content(&req, None).await.unwrap();
        assert_eq!(res.item, ContentItem::text("mail [EMAIL_ADDRESS]"));
        assert_eq!(res.overview.unwrap().transformed_bytes, 13);
    }

    #[tokio::test]
    #[serial]
    async fn test_list_info_types() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/infoTypes"))
            .and(query_param("languageCode", "ja-JP"))
            .and(query_param("filter", "supported_by=INSPECT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "infoTypes": [{"name": "JAPAN_INDIVIDUAL_NUMBER", "displayName": "個人番号", "supportedBy": ["INSPECT"]}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server.uri());
        let req = ListInfoTypesRequest {
            language_code: Some("ja-JP".to_string()),
            filter: Some("supported_by=INSPECT".to_string()),
        };
        let res = client.list_info_types(&req, None).await.unwrap();
        assert_eq!(res.info_types[0].supported_by, vec![InfoTypeSupportedBy::Inspect]);
    }

    #[tokio::test]
    #[serial]
    async fn test_create_template_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/projects/p/inspectTemplates"))
            .and(body_json(json!({
                "inspectTemplate": {"displayName": "emails"},
                "templateId": "emails"
            })))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({
                "error": {"code": 503, "message": "unavailable"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server.uri());
        let req = CreateInspectTemplateRequest {
            parent: "projects/p".to_string(),
            inspect_template: InspectTemplate {
                display_name: Some("emails".to_string()),
                ..Default::default()
            },
            template_id: Some("emails".to_string()),
        };
        let err = client.create_inspect_template(&req, None).await.unwrap_err();
        assert_eq!(err.http_status(), Some(503));
    }

    #[tokio::test]
    #[serial]
    async fn test_update_template_mask() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/v2/projects/p/inspectTemplates/emails"))
            .and(body_json(json!({
                "inspectTemplate": {
                    "displayName": "mails",
                    "inspectConfig": {"infoTypes": [{"name": "EMAIL_ADDRESS"}]}
                },
                "updateMask": "displayName,inspectConfig"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "projects/p/inspectTemplates/emails",
                "displayName": "mails",
                "updateTime": "2024-05-01T00:00:00Z"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/v2/projects/p/inspectTemplates/emails"))
            .and(body_json(json!({
                "inspectTemplate": {"description": "d"},
                "updateMask": "description,displayName"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "projects/p/inspectTemplates/emails",
                "description": "d"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server.uri());
        let name = project_inspect_template_path("p", "emails");
        let req = UpdateInspectTemplateRequest {
            name: name.clone(),
            inspect_template: InspectTemplate {
                display_name: Some("mails".to_string()),
                inspect_config: Some(InspectConfig {
                    info_types: vec![InfoType::new("EMAIL_ADDRESS")],
                    ..Default::default()
                }),
                ..Default::default()
            },
            update_mask: None,
        };
        let updated = client.update_inspect_template(&req, None).await.unwrap();
        assert_eq!(updated.display_name.as_deref(), Some("mails"));

        // An explicit mask clears the attributes it names but leaves out.
        let req = UpdateInspectTemplateRequest {
            name,
            inspect_template: InspectTemplate {
                description: Some("d".to_string()),
                ..Default::default()
            },
            update_mask: Some(vec!["description".to_string(), "displayName".to_string()]),
        };
        let updated = client.update_inspect_template(&req, None).await.unwrap();
        assert_eq!(updated.display_name, None);

        let req = UpdateInspectTemplateRequest {
            name: "projects/p/inspectTemplates/emails".to_string(),
            ..Default::default()
        };
        let err = client.update_inspect_template(&req, None).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[tokio::test]
    #[serial]
    async fn test_list_dlp_jobs_all() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/projects/p/dlpJobs"))
            .and(query_param("type", "RISK_ANALYSIS_JOB"))
            .and(query_param("pageToken", "t2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jobs": [{"name": "projects/p/dlpJobs/r-3", "type": "RISK_ANALYSIS_JOB", "state": "FAILED"}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/projects/p/dlpJobs"))
            .and(query_param("type", "RISK_ANALYSIS_JOB"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jobs": [
                    {"name": "projects/p/dlpJobs/r-1", "type": "RISK_ANALYSIS_JOB", "state": "DONE"},
                    {"name": "projects/p/dlpJobs/r-2", "type": "RISK_ANALYSIS_JOB", "state": "RUNNING"}
                ],
                "nextPageToken": "t2"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server.uri());
        let req = ListDlpJobsRequest {
            parent: "projects/p".to_string(),
            job_type: Some(DlpJobType::RiskAnalysisJob),
            ..Default::default()
        };
        let jobs = client.list_dlp_jobs_all(&req, None).await.unwrap();
        let states: Vec<_> = jobs.iter().map(|j| j.state).collect();
        assert_eq!(states, vec![JobState::Done, JobState::Running, JobState::Failed]);
    }

    #[tokio::test]
    #[serial]
    async fn test_cancel_and_delete_job() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/projects/p/dlpJobs/i-1:cancel"))
            .and(body_json(json!({})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/v2/projects/p/dlpJobs/i-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server.uri());
        let name = dlp_job_path("p", "i-1");
        client.cancel_dlp_job(&name, None).await.unwrap();
        client.delete_dlp_job(&name, None).await.unwrap();
        let err = client.get_dlp_job("", None).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[tokio::test]
    #[serial]
    async fn test_pause_job_trigger() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/v2/projects/p/jobTriggers/daily"))
            .and(body_json(json!({
                "jobTrigger": {"status": "PAUSED"},
                "updateMask": "status"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "projects/p/jobTriggers/daily",
                "status": "PAUSED"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server.uri());
        let req = UpdateJobTriggerRequest {
            name: "projects/p/jobTriggers/daily".to_string(),
            job_trigger: JobTrigger {
                status: Some(JobTriggerStatus::Paused),
                ..Default::default()
            },
            update_mask: None,
        };
        let trigger = client.update_job_trigger(&req, None).await.unwrap();
        assert_eq!(trigger.status, Some(JobTriggerStatus::Paused));
    }

    #[tokio::test]
    #[serial]
    async fn test_list_job_triggers_stream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/projects/p/jobTriggers"))
            .and(query_param("orderBy", "create_time desc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jobTriggers": [
                    {"name": "projects/p/jobTriggers/b"},
                    {"name": "projects/p/jobTriggers/a"}
                ],
                "nextPageToken": ""
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server.uri());
        let req = ListJobTriggersRequest {
            parent: "projects/p".to_string(),
            order_by: Some("create_time desc".to_string()),
            ..Default::default()
        };
        let stream = client.list_job_triggers_stream(&req);
        pin_mut!(stream);
        let mut names = vec![];
        while let Some(trigger) = stream.next().await {
            names.push(trigger.unwrap().name);
        }
        assert_eq!(names, vec!["projects/p/jobTriggers/b", "projects/p/jobTriggers/a"]);
    }

    #[tokio::test]
    #[serial]
    async fn test_cancelled_inspect() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/projects/p/content:inspect"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let client = mock_client(&server.uri());
        let cancel = CancellationToken::new();
        let child = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            child.cancel();
        });
        let req = InspectContentRequest {
            parent: "projects/p".to_string(),
            item: Some(ContentItem::text("x")),
            ..Default::default()
        };
        let err = client.inspect_content(&req, Some(cancel)).await.unwrap_err();
        assert!(matches!(err, Error::Cancelled));
    }
}
