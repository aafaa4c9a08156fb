//! Batches attribute changes of a bucket or an object into a single PATCH.
//!
//! ```
//! use gcloud_rest_storage::client::Client;
//! use gcloud_rest_storage::http::buckets::Bucket;
//! use gcloud_rest_storage::http::Error;
//!
//! async fn run(client: Client, bucket: &Bucket) -> Result<Bucket, Error> {
//!     client
//!         .update_bucket(bucket, |b| {
//!             b.set_storage_class("NEARLINE");
//!             b.labels_mut().insert("env".to_string(), "prod".to_string());
//!         })
//!         .await
//! }
//! ```
use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::http::buckets::{Billing, Bucket, Cors, Logging, Versioning, Website};
use crate::http::objects::Object;

/// Ordered set of pending attribute names, each recorded once.
#[derive(Clone, Debug, Default)]
struct Pending(Vec<&'static str>);

impl Pending {
    fn record(&mut self, name: &'static str) {
        if !self.0.contains(&name) {
            self.0.push(name);
        }
    }
}

/// Copies `names` out of the serialized `source`. Missing keys become `null`, clearing the attribute.
fn select<T: Serialize>(source: &T, names: &[&'static str]) -> Result<Value, serde_json::Error> {
    let source = serde_json::to_value(source)?;
    let mut patch = Map::new();
    for name in names {
        patch.insert(name.to_string(), source.get(*name).cloned().unwrap_or(Value::Null));
    }
    Ok(Value::Object(patch))
}

pub struct BucketUpdater {
    original: Bucket,
    bucket: Bucket,
    pending: Pending,
}

impl BucketUpdater {
    pub fn new(bucket: &Bucket) -> Self {
        Self {
            original: bucket.clone(),
            bucket: bucket.clone(),
            pending: Pending::default(),
        }
    }

    pub fn set_storage_class(&mut self, storage_class: impl Into<String>) {
        self.bucket.storage_class = storage_class.into();
        self.pending.record("storageClass");
    }

    pub fn set_versioning(&mut self, enabled: bool) {
        self.bucket.versioning = Some(Versioning { enabled });
        self.pending.record("versioning");
    }

    pub fn set_website_main(&mut self, main_page_suffix: Option<String>) {
        self.bucket.website.get_or_insert_with(Website::default).main_page_suffix = main_page_suffix;
        self.pending.record("website");
    }

    pub fn set_website_not_found(&mut self, not_found_page: Option<String>) {
        self.bucket.website.get_or_insert_with(Website::default).not_found_page = not_found_page;
        self.pending.record("website");
    }

    pub fn set_logging_bucket(&mut self, log_bucket: impl Into<String>) {
        self.bucket.logging.get_or_insert_with(Logging::default).log_bucket = log_bucket.into();
        self.pending.record("logging");
    }

    pub fn set_logging_prefix(&mut self, log_object_prefix: impl Into<String>) {
        self.bucket.logging.get_or_insert_with(Logging::default).log_object_prefix = log_object_prefix.into();
        self.pending.record("logging");
    }

    /// Replaces every label. `None` removes them all.
    pub fn set_labels(&mut self, labels: Option<HashMap<String, String>>) {
        self.bucket.labels = labels;
        self.pending.record("labels");
    }

    pub fn set_default_event_based_hold(&mut self, hold: bool) {
        self.bucket.default_event_based_hold = Some(hold);
        self.pending.record("defaultEventBasedHold");
    }

    pub fn set_requester_pays(&mut self, requester_pays: bool) {
        self.bucket.billing = Some(Billing { requester_pays });
        self.pending.record("billing");
    }

    /// Editable copy of the CORS rules. Recorded only if it differs from the original at the end.
    pub fn cors_mut(&mut self) -> &mut Vec<Cors> {
        self.bucket.cors.get_or_insert_with(Vec::new)
    }

    /// Editable copy of the labels. Recorded only if it differs from the original at the end.
    pub fn labels_mut(&mut self) -> &mut HashMap<String, String> {
        self.bucket.labels.get_or_insert_with(HashMap::new)
    }

    /// Attribute names that will be sent, in the order they were first changed.
    pub fn updates(&self) -> Vec<&'static str> {
        let mut pending = self.pending.clone();
        if self.bucket.cors.clone().unwrap_or_default() != self.original.cors.clone().unwrap_or_default() {
            pending.record("cors");
        }
        if self.bucket.labels.clone().unwrap_or_default() != self.original.labels.clone().unwrap_or_default() {
            pending.record("labels");
        }
        pending.0
    }

    /// JSON body holding only the pending attributes.
    pub fn into_patch(self) -> Result<Value, serde_json::Error> {
        select(&self.bucket, &self.updates())
    }
}

pub struct ObjectUpdater {
    original: Object,
    object: Object,
    pending: Pending,
}

impl ObjectUpdater {
    pub fn new(object: &Object) -> Self {
        Self {
            original: object.clone(),
            object: object.clone(),
            pending: Pending::default(),
        }
    }

    pub fn set_cache_control(&mut self, value: Option<String>) {
        self.object.cache_control = value;
        self.pending.record("cacheControl");
    }

    pub fn set_content_disposition(&mut self, value: Option<String>) {
        self.object.content_disposition = value;
        self.pending.record("contentDisposition");
    }

    pub fn set_content_encoding(&mut self, value: Option<String>) {
        self.object.content_encoding = value;
        self.pending.record("contentEncoding");
    }

    pub fn set_content_language(&mut self, value: Option<String>) {
        self.object.content_language = value;
        self.pending.record("contentLanguage");
    }

    pub fn set_content_type(&mut self, value: Option<String>) {
        self.object.content_type = value;
        self.pending.record("contentType");
    }

    /// Replaces the custom metadata. `None` removes it.
    pub fn set_metadata(&mut self, metadata: Option<HashMap<String, String>>) {
        self.object.metadata = metadata;
        self.pending.record("metadata");
    }

    /// Editable copy of the custom metadata. Recorded only if it differs from the original at the end.
    pub fn metadata_mut(&mut self) -> &mut HashMap<String, String> {
        self.object.metadata.get_or_insert_with(HashMap::new)
    }

    pub fn set_event_based_hold(&mut self, hold: bool) {
        self.object.event_based_hold = Some(hold);
        self.pending.record("eventBasedHold");
    }

    pub fn set_temporary_hold(&mut self, hold: bool) {
        self.object.temporary_hold = Some(hold);
        self.pending.record("temporaryHold");
    }

    pub fn updates(&self) -> Vec<&'static str> {
        let mut pending = self.pending.clone();
        if self.object.metadata.clone().unwrap_or_default() != self.original.metadata.clone().unwrap_or_default() {
            pending.record("metadata");
        }
        pending.0
    }

    pub fn into_patch(self) -> Result<Value, serde_json::Error> {
        select(&self.object, &self.updates())
    }
}
