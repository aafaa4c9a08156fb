use base64::prelude::*;
use bytes::Bytes;
use futures_util::{Stream, TryStream, TryStreamExt};
use reqwest::header::LOCATION;
use reqwest::Body;

use google_cloud_gax::http::HttpClient;
use google_cloud_gax::paging;
use google_cloud_gax::retry::{invoke, RetrySetting};

use crate::http::bucket_access_controls::delete::DeleteBucketAccessControlRequest;
use crate::http::bucket_access_controls::insert::InsertBucketAccessControlRequest;
use crate::http::bucket_access_controls::list::{ListBucketAccessControlsRequest, ListBucketAccessControlsResponse};
use crate::http::bucket_access_controls::BucketAccessControl;
use crate::http::buckets::delete::DeleteBucketRequest;
use crate::http::buckets::get::GetBucketRequest;
use crate::http::buckets::get_iam_policy::GetIamPolicyRequest;
use crate::http::buckets::insert::InsertBucketRequest;
use crate::http::buckets::list::{ListBucketsRequest, ListBucketsResponse};
use crate::http::buckets::patch::PatchBucketRequest;
use crate::http::buckets::set_iam_policy::SetIamPolicyRequest;
use crate::http::buckets::test_iam_permissions::{TestIamPermissionsRequest, TestIamPermissionsResponse};
use crate::http::buckets::{Bucket, Policy};
use crate::http::default_object_access_controls::delete::DeleteDefaultObjectAccessControlRequest;
use crate::http::default_object_access_controls::insert::InsertDefaultObjectAccessControlRequest;
use crate::http::default_object_access_controls::list::{
    ListDefaultObjectAccessControlsRequest, ListDefaultObjectAccessControlsResponse,
};
use crate::http::notifications::delete::DeleteNotificationRequest;
use crate::http::notifications::get::GetNotificationRequest;
use crate::http::notifications::insert::InsertNotificationRequest;
use crate::http::notifications::list::{ListNotificationsRequest, ListNotificationsResponse};
use crate::http::notifications::{topic_path, Notification};
use crate::http::object_access_controls::delete::DeleteObjectAccessControlRequest;
use crate::http::object_access_controls::insert::InsertObjectAccessControlRequest;
use crate::http::object_access_controls::list::{ListObjectAccessControlsRequest, ListObjectAccessControlsResponse};
use crate::http::object_access_controls::ObjectAccessControl;
use crate::http::objects::copy::CopyObjectRequest;
use crate::http::objects::delete::DeleteObjectRequest;
use crate::http::objects::download::Range;
use crate::http::objects::get::GetObjectRequest;
use crate::http::objects::list::{ListObjectsRequest, ListObjectsResponse};
use crate::http::objects::patch::PatchObjectRequest;
use crate::http::objects::rewrite::{RewriteObjectRequest, RewriteObjectResponse};
use crate::http::objects::upload::{Media, UploadObjectRequest, UploadType};
use crate::http::objects::Object;
use crate::http::resumable_upload_client::ResumableUploadClient;
use crate::http::{
    bucket_access_controls, buckets, default_object_access_controls, notifications, object_access_controls, objects,
    CancellationToken, Error, Verification, VerifyError,
};
use crate::updater::{BucketUpdater, ObjectUpdater};

pub const SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/cloud-platform",
    "https://www.googleapis.com/auth/devstorage.full_control",
];

/// Cloud Storage JSON API v1.
///
/// Reads, deletes and patches guarded by preconditions are retried with the configured
/// [`RetrySetting`]. Inserts and uploads are sent once.
#[derive(Clone, Debug)]
pub struct StorageClient {
    http: HttpClient,
    v1_endpoint: String,
    v1_upload_endpoint: String,
    project_id: Option<String>,
    retry: RetrySetting,
}

impl StorageClient {
    /// `http` must point at the service root, such as `https://storage.googleapis.com`.
    pub fn new(http: HttpClient, project_id: Option<String>, retry: RetrySetting) -> Self {
        let endpoint = http.endpoint().trim_end_matches('/').to_string();
        Self {
            v1_endpoint: format!("{endpoint}/storage/v1"),
            v1_upload_endpoint: format!("{endpoint}/upload/storage/v1"),
            http,
            project_id,
            retry,
        }
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    fn retry_if(&self, idempotent: bool) -> RetrySetting {
        if idempotent {
            self.retry.clone()
        } else {
            RetrySetting::none()
        }
    }

    fn project_or(&self, project: &str) -> Result<String, Error> {
        if !project.is_empty() {
            return Ok(project.to_string());
        }
        self.project_id
            .clone()
            .ok_or_else(|| Error::InvalidArgument("project id is required".to_string()))
    }

    /// Lists the buckets of a project. An empty `project` falls back to the client's project.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list_buckets(
        &self,
        req: &ListBucketsRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<ListBucketsResponse, Error> {
        let req = &ListBucketsRequest {
            project: self.project_or(&req.project)?,
            ..req.clone()
        };
        let action = || async move {
            let builder = buckets::list::build(self.v1_endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    /// Yields every bucket, requesting the next page only when the current one is drained.
    pub fn list_buckets_stream<'a>(
        &'a self,
        req: &'a ListBucketsRequest,
    ) -> impl Stream<Item = Result<Bucket, Error>> + 'a {
        paging::stream(req.page_token.clone(), move |page_token| async move {
            let req = ListBucketsRequest {
                page_token,
                ..req.clone()
            };
            self.list_buckets(&req, None).await
        })
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn get_bucket(&self, req: &GetBucketRequest, cancel: Option<CancellationToken>) -> Result<Bucket, Error> {
        let action = || async move {
            let builder = buckets::get::build(self.v1_endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    /// Creates a bucket. An empty `param.project` falls back to the client's project.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn insert_bucket(
        &self,
        req: &InsertBucketRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<Bucket, Error> {
        let mut req = req.clone();
        req.param.project = self.project_or(&req.param.project)?;
        let req = &req;
        let action = || async move {
            let builder = buckets::insert::build(self.v1_endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&RetrySetting::none()), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn patch_bucket(
        &self,
        req: &PatchBucketRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<Bucket, Error> {
        let retry = self.retry_if(req.if_metageneration_match.is_some());
        let action = || async move {
            let builder = buckets::patch::build(self.v1_endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&retry), action).await
    }

    /// Applies the changes made by `f` with a single PATCH carrying only the changed attributes.
    /// Returns `bucket` unchanged without any request when nothing changed.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn update_bucket<F>(&self, bucket: &Bucket, f: F) -> Result<Bucket, Error>
    where
        F: FnOnce(&mut BucketUpdater),
    {
        let mut updater = BucketUpdater::new(bucket);
        f(&mut updater);
        if updater.updates().is_empty() {
            return Ok(bucket.clone());
        }
        tracing::debug!("patching bucket {} with {:?}", bucket.name, updater.updates());
        let body = &updater.into_patch()?;
        let req = &PatchBucketRequest {
            bucket: bucket.name.clone(),
            ..Default::default()
        };
        let action = || async move {
            let builder = buckets::patch::build_raw(self.v1_endpoint.as_str(), self.http.http(), req, body);
            self.http.send(builder).await
        };
        invoke(None, Some(&RetrySetting::none()), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn delete_bucket(&self, req: &DeleteBucketRequest, cancel: Option<CancellationToken>) -> Result<(), Error> {
        let action = || async move {
            let builder = buckets::delete::build(self.v1_endpoint.as_str(), self.http.http(), req);
            self.http.send_get_empty(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn get_iam_policy(
        &self,
        req: &GetIamPolicyRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<Policy, Error> {
        let action = || async move {
            let builder = buckets::get_iam_policy::build(self.v1_endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    /// Replaces the policy. Retried only when the policy carries an etag.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn set_iam_policy(
        &self,
        req: &SetIamPolicyRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<Policy, Error> {
        let retry = self.retry_if(!req.policy.etag.is_empty());
        let action = || async move {
            let builder = buckets::set_iam_policy::build(self.v1_endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&retry), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn test_iam_permissions(
        &self,
        req: &TestIamPermissionsRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<TestIamPermissionsResponse, Error> {
        let action = || async move {
            let builder = buckets::test_iam_permissions::build(self.v1_endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list_bucket_acls(
        &self,
        req: &ListBucketAccessControlsRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<ListBucketAccessControlsResponse, Error> {
        let action = || async move {
            let builder = bucket_access_controls::list::build(self.v1_endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn insert_bucket_acl(
        &self,
        req: &InsertBucketAccessControlRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<BucketAccessControl, Error> {
        let action = || async move {
            let builder = bucket_access_controls::insert::build(self.v1_endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&RetrySetting::none()), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn delete_bucket_acl(
        &self,
        req: &DeleteBucketAccessControlRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<(), Error> {
        let action = || async move {
            let builder = bucket_access_controls::delete::build(self.v1_endpoint.as_str(), self.http.http(), req);
            self.http.send_get_empty(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list_default_object_acls(
        &self,
        req: &ListDefaultObjectAccessControlsRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<ListDefaultObjectAccessControlsResponse, Error> {
        let action = || async move {
            let builder =
                default_object_access_controls::list::build(self.v1_endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn insert_default_object_acl(
        &self,
        req: &InsertDefaultObjectAccessControlRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<ObjectAccessControl, Error> {
        let action = || async move {
            let builder =
                default_object_access_controls::insert::build(self.v1_endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&RetrySetting::none()), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn delete_default_object_acl(
        &self,
        req: &DeleteDefaultObjectAccessControlRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<(), Error> {
        let action = || async move {
            let builder =
                default_object_access_controls::delete::build(self.v1_endpoint.as_str(), self.http.http(), req);
            self.http.send_get_empty(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list_notifications(
        &self,
        req: &ListNotificationsRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<ListNotificationsResponse, Error> {
        let action = || async move {
            let builder = notifications::list::build(self.v1_endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    /// Creates a notification. A bare topic name is expanded with the client's project.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn insert_notification(
        &self,
        req: &InsertNotificationRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<Notification, Error> {
        let mut req = req.clone();
        if !req.notification.topic.contains('/') {
            let project = self.project_or("")?;
            req.notification.topic = topic_path(&project, &req.notification.topic);
        }
        let req = &req;
        let action = || async move {
            let builder = notifications::insert::build(self.v1_endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&RetrySetting::none()), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn get_notification(
        &self,
        req: &GetNotificationRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<Notification, Error> {
        let action = || async move {
            let builder = notifications::get::build(self.v1_endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn delete_notification(
        &self,
        req: &DeleteNotificationRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<(), Error> {
        let action = || async move {
            let builder = notifications::delete::build(self.v1_endpoint.as_str(), self.http.http(), req);
            self.http.send_get_empty(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list_objects(
        &self,
        req: &ListObjectsRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<ListObjectsResponse, Error> {
        let action = || async move {
            let builder = objects::list::build(self.v1_endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    pub fn list_objects_stream<'a>(
        &'a self,
        req: &'a ListObjectsRequest,
    ) -> impl Stream<Item = Result<Object, Error>> + 'a {
        paging::stream(req.page_token.clone(), move |page_token| async move {
            let req = ListObjectsRequest {
                page_token,
                ..req.clone()
            };
            self.list_objects(&req, None).await
        })
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn get_object(&self, req: &GetObjectRequest, cancel: Option<CancellationToken>) -> Result<Object, Error> {
        let action = || async move {
            let builder = objects::get::build(self.v1_endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    /// Downloads the data of an object, or the part of it selected by `range`.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn download_object(
        &self,
        req: &GetObjectRequest,
        range: &Range,
        cancel: Option<CancellationToken>,
    ) -> Result<Vec<u8>, Error> {
        let action = || async move {
            let builder = objects::download::build(self.v1_endpoint.as_str(), self.http.http(), req, range);
            let response = self.http.send_raw(builder).await?;
            Ok(response.bytes().await?.to_vec())
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    /// Like [`download_object`](Self::download_object) but yields the body as it arrives.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn download_streamed_object(
        &self,
        req: &GetObjectRequest,
        range: &Range,
        cancel: Option<CancellationToken>,
    ) -> Result<impl Stream<Item = Result<Bytes, Error>>, Error> {
        let action = || async move {
            let builder = objects::download::build(self.v1_endpoint.as_str(), self.http.http(), req, range);
            self.http.send_raw(builder).await
        };
        let response = invoke(cancel.as_ref(), Some(&self.retry), action).await?;
        Ok(response.bytes_stream().map_err(Error::from))
    }

    /// Downloads the whole object and checks the data against the hashes in its metadata.
    ///
    /// The download is pinned to the generation whose metadata was read. Hashes the object
    /// does not carry, such as the MD5 of a composite object, are skipped.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn download_and_verify(
        &self,
        req: &GetObjectRequest,
        verification: Verification,
        cancel: Option<CancellationToken>,
    ) -> Result<Vec<u8>, VerifyError> {
        let object = self.get_object(req, cancel.clone()).await?;
        let pinned = GetObjectRequest {
            generation: Some(object.generation),
            ..req.clone()
        };
        let data = self.download_object(&pinned, &Range::default(), cancel).await?;
        verify(&object, &data, verification)?;
        Ok(data)
    }

    /// Uploads `data` in one request, either as bare media or together with metadata.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn upload_object(
        &self,
        req: &UploadObjectRequest,
        data: impl Into<Bytes>,
        upload_type: &UploadType,
        cancel: Option<CancellationToken>,
    ) -> Result<Object, Error> {
        let data = &data.into();
        let action = || async move {
            let builder = match upload_type {
                UploadType::Simple(media) => objects::upload::build(
                    self.v1_upload_endpoint.as_str(),
                    self.http.http(),
                    req,
                    media,
                    data.clone(),
                ),
                UploadType::Multipart(metadata) => objects::upload::build_multipart(
                    self.v1_upload_endpoint.as_str(),
                    self.http.http(),
                    req,
                    metadata,
                    data.clone(),
                )?,
            };
            self.http.send(builder).await
        };
        let retry = self.retry_if(req.if_generation_match.is_some());
        invoke(cancel.as_ref(), Some(&retry), action).await
    }

    /// Uploads a stream of bytes as bare media. The stream is consumed, so the request is never retried.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn upload_streamed_object<S>(
        &self,
        req: &UploadObjectRequest,
        data: S,
        media: &Media,
        cancel: Option<CancellationToken>,
    ) -> Result<Object, Error>
    where
        S: TryStream + Send + Sync + 'static,
        S::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
        Bytes: From<S::Ok>,
    {
        let builder = objects::upload::build(
            self.v1_upload_endpoint.as_str(),
            self.http.http(),
            req,
            media,
            Body::wrap_stream(data),
        );
        google_cloud_gax::cancel::with_cancel(cancel.as_ref(), self.http.send(builder)).await
    }

    /// Starts a resumable upload session. The returned client sends the data.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn prepare_resumable_upload(
        &self,
        req: &UploadObjectRequest,
        upload_type: &UploadType,
        cancel: Option<CancellationToken>,
    ) -> Result<ResumableUploadClient, Error> {
        let action = || async move {
            let builder = match upload_type {
                UploadType::Simple(media) => objects::upload::build_resumable_session_simple(
                    self.v1_upload_endpoint.as_str(),
                    self.http.http(),
                    req,
                    media,
                ),
                UploadType::Multipart(metadata) => objects::upload::build_resumable_session_metadata(
                    self.v1_upload_endpoint.as_str(),
                    self.http.http(),
                    req,
                    metadata,
                ),
            };
            let response = self.http.send_raw(builder).await?;
            match response.headers().get(LOCATION).map(|v| v.to_str()) {
                Some(Ok(url)) => Ok(url.to_string()),
                _ => Err(Error::UnexpectedResponse(
                    "resumable session response has no Location header".to_string(),
                )),
            }
        };
        let session_url = invoke(cancel.as_ref(), Some(&self.retry), action).await?;
        Ok(ResumableUploadClient::new(session_url, self.http.http().clone()))
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn patch_object(
        &self,
        req: &PatchObjectRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<Object, Error> {
        let retry = self.retry_if(req.if_metageneration_match.is_some());
        let action = || async move {
            let builder = objects::patch::build(self.v1_endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&retry), action).await
    }

    /// Applies the changes made by `f` with a single PATCH, pinned to the generation of `object`.
    /// Returns `object` unchanged without any request when nothing changed.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn update_object<F>(&self, object: &Object, f: F) -> Result<Object, Error>
    where
        F: FnOnce(&mut ObjectUpdater),
    {
        let mut updater = ObjectUpdater::new(object);
        f(&mut updater);
        if updater.updates().is_empty() {
            return Ok(object.clone());
        }
        tracing::debug!("patching object {}/{} with {:?}", object.bucket, object.name, updater.updates());
        let body = &updater.into_patch()?;
        let req = &PatchObjectRequest {
            bucket: object.bucket.clone(),
            object: object.name.clone(),
            generation: (object.generation != 0).then_some(object.generation),
            ..Default::default()
        };
        let action = || async move {
            let builder = objects::patch::build_raw(self.v1_endpoint.as_str(), self.http.http(), req, body);
            self.http.send(builder).await
        };
        invoke(None, Some(&RetrySetting::none()), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn delete_object(&self, req: &DeleteObjectRequest, cancel: Option<CancellationToken>) -> Result<(), Error> {
        let action = || async move {
            let builder = objects::delete::build(self.v1_endpoint.as_str(), self.http.http(), req);
            self.http.send_get_empty(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn copy_object(&self, req: &CopyObjectRequest, cancel: Option<CancellationToken>) -> Result<Object, Error> {
        let retry = self.retry_if(req.if_generation_match.is_some());
        let action = || async move {
            let builder = objects::copy::build(self.v1_endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&retry), action).await
    }

    /// One step of a rewrite. Call again with the returned `rewrite_token` until `done`.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn rewrite_object(
        &self,
        req: &RewriteObjectRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<RewriteObjectResponse, Error> {
        let retry = self.retry_if(req.if_generation_match.is_some());
        let action = || async move {
            let builder = objects::rewrite::build(self.v1_endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&retry), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list_object_acls(
        &self,
        req: &ListObjectAccessControlsRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<ListObjectAccessControlsResponse, Error> {
        let action = || async move {
            let builder = object_access_controls::list::build(self.v1_endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn insert_object_acl(
        &self,
        req: &InsertObjectAccessControlRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<ObjectAccessControl, Error> {
        let action = || async move {
            let builder = object_access_controls::insert::build(self.v1_endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&RetrySetting::none()), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn delete_object_acl(
        &self,
        req: &DeleteObjectAccessControlRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<(), Error> {
        let action = || async move {
            let builder = object_access_controls::delete::build(self.v1_endpoint.as_str(), self.http.http(), req);
            self.http.send_get_empty(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }
}

/// Compares `data` with the hashes recorded in `object`.
pub(crate) fn verify(object: &Object, data: &[u8], verification: Verification) -> Result<(), VerifyError> {
    let check_md5 = matches!(verification, Verification::Md5 | Verification::All);
    let check_crc32c = matches!(verification, Verification::Crc32c | Verification::All);
    if let (true, Some(expected)) = (check_md5, &object.md5_hash) {
        let actual = BASE64_STANDARD.encode(md5::compute(data).0);
        if &actual != expected {
            return Err(VerifyError::Md5Mismatch {
                expected: expected.clone(),
                actual,
            });
        }
    }
    if let (true, Some(expected)) = (check_crc32c, &object.crc32c) {
        let actual = BASE64_STANDARD.encode(crc32c::crc32c(data).to_be_bytes());
        if &actual != expected {
            return Err(VerifyError::Crc32cMismatch {
                expected: expected.clone(),
                actual,
            });
        }
    }
    Ok(())
}
