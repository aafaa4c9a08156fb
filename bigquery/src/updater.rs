//! Batches attribute changes of a dataset or a table into a single PATCH.
//!
//! ```
//! use gcloud_rest_bigquery::client::Client;
//! use gcloud_rest_bigquery::http::table::{Table, TableFieldSchema, TableFieldType};
//! use gcloud_rest_bigquery::http::Error;
//!
//! async fn run(client: Client, table: &Table) -> Result<Table, Error> {
//!     client
//!         .table()
//!         .update(
//!             table,
//!             |t| {
//!                 t.set_description(Some("page views".to_string()));
//!                 t.schema_mut().push(TableFieldSchema::new("referrer", TableFieldType::String));
//!             },
//!             None,
//!         )
//!         .await
//! }
//! ```
use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::http::dataset::Dataset;
use crate::http::table::{Table, TableFieldSchema, TableSchema, TimePartitioning};

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

pub struct DatasetUpdater {
    original: Dataset,
    dataset: Dataset,
    pending: Pending,
}

impl DatasetUpdater {
    pub fn new(dataset: &Dataset) -> Self {
        Self {
            original: dataset.clone(),
            dataset: dataset.clone(),
            pending: Pending::default(),
        }
    }

    /// Sets the descriptive name of the dataset.
    pub fn set_name(&mut self, name: Option<String>) {
        self.dataset.friendly_name = name;
        self.pending.record("friendlyName");
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.dataset.description = description;
        self.pending.record("description");
    }

    /// Default lifetime in milliseconds of the tables created in the dataset. `None` keeps tables forever.
    pub fn set_default_expiration(&mut self, expiration_ms: Option<i64>) {
        self.dataset.default_table_expiration_ms = expiration_ms;
        self.pending.record("defaultTableExpirationMs");
    }

    /// Replaces every label. `None` removes them all.
    pub fn set_labels(&mut self, labels: Option<HashMap<String, String>>) {
        self.dataset.labels = labels;
        self.pending.record("labels");
    }

    /// Editable copy of the labels. Recorded only if it differs from the original at the end.
    pub fn labels_mut(&mut self) -> &mut HashMap<String, String> {
        self.dataset.labels.get_or_insert_with(HashMap::new)
    }

    pub fn updates(&self) -> Vec<&'static str> {
        let mut pending = self.pending.clone();
        if self.dataset.labels.clone().unwrap_or_default() != self.original.labels.clone().unwrap_or_default() {
            pending.record("labels");
        }
        pending.0
    }

    pub fn into_patch(self) -> Result<Value, serde_json::Error> {
        select(&self.dataset, &self.updates())
    }
}

pub struct TableUpdater {
    original: Table,
    table: Table,
    pending: Pending,
}

impl TableUpdater {
    pub fn new(table: &Table) -> Self {
        Self {
            original: table.clone(),
            table: table.clone(),
            pending: Pending::default(),
        }
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.table.friendly_name = name;
        self.pending.record("friendlyName");
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.table.description = description;
        self.pending.record("description");
    }

    /// Milliseconds since the epoch at which the table is deleted. `None` keeps it forever.
    pub fn set_expiration(&mut self, expiration_time: Option<i64>) {
        self.table.expiration_time = expiration_time;
        self.pending.record("expirationTime");
    }

    pub fn set_time_partitioning(&mut self, partitioning: Option<TimePartitioning>) {
        self.table.time_partitioning = partitioning;
        self.pending.record("timePartitioning");
    }

    pub fn set_require_partition_filter(&mut self, required: bool) {
        self.table.require_partition_filter = Some(required);
        self.pending.record("requirePartitionFilter");
    }

    /// Changes the SQL of a view.
    pub fn set_view_query(&mut self, query: impl Into<String>) {
        self.table.view.get_or_insert_with(Default::default).query = query.into();
        self.pending.record("view");
    }

    pub fn set_labels(&mut self, labels: Option<HashMap<String, String>>) {
        self.table.labels = labels;
        self.pending.record("labels");
    }

    pub fn labels_mut(&mut self) -> &mut HashMap<String, String> {
        self.table.labels.get_or_insert_with(HashMap::new)
    }

    /// Replaces the whole schema.
    pub fn set_schema(&mut self, fields: Vec<TableFieldSchema>) {
        self.table.schema = Some(TableSchema { fields });
        self.pending.record("schema");
    }

    /// Editable copy of the schema fields. Recorded only if it differs from the original at the end.
    /// BigQuery only accepts added columns and relaxed modes.
    pub fn schema_mut(&mut self) -> &mut Vec<TableFieldSchema> {
        &mut self.table.schema.get_or_insert_with(TableSchema::default).fields
    }

    pub fn updates(&self) -> Vec<&'static str> {
        let mut pending = self.pending.clone();
        if self.table.labels.clone().unwrap_or_default() != self.original.labels.clone().unwrap_or_default() {
            pending.record("labels");
        }
        if self.table.schema.clone().unwrap_or_default() != self.original.schema.clone().unwrap_or_default() {
            pending.record("schema");
        }
        pending.0
    }

    pub fn into_patch(self) -> Result<Value, serde_json::Error> {
        select(&self.table, &self.updates())
    }
}
