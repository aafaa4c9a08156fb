/// Customer managed encryption key of a dataset, table or job destination.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct EncryptionConfiguration {
    /// Describes the Cloud KMS encryption key that will be used to protect destination BigQuery table.
    /// The BigQuery Service Account associated with your project requires access to this encryption key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kms_key_name: Option<String>,
}

/// Error information returned inside job statuses and insert results.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ErrorProto {
    /// A short error code that summarizes the error, such as `invalid` or `backendError`.
    pub reason: Option<String>,
    /// Specifies where the error occurred, if present.
    pub location: Option<String>,
    /// Debugging information. This property is internal to Google and should not be used.
    pub debug_info: Option<String>,
    /// A human-readable description of the error.
    pub message: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct QueryParameterStructType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub field_type: QueryParameterType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Type of a query parameter, such as `STRING`, `ARRAY` or `STRUCT`.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct QueryParameterType {
    #[serde(rename = "type")]
    pub parameter_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array_type: Option<Box<QueryParameterType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub struct_types: Option<Vec<QueryParameterStructType>>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct QueryParameterValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array_values: Option<Vec<QueryParameterValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub struct_values: Option<std::collections::HashMap<String, QueryParameterValue>>,
}

/// A parameter referenced by `@name` (named mode) or `?` (positional mode) in a standard SQL query.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct QueryParameter {
    /// Must be set for named parameters and left empty for positional ones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub parameter_type: QueryParameterType,
    pub parameter_value: QueryParameterValue,
}

impl QueryParameter {
    /// A named scalar parameter.
    pub fn named(name: impl Into<String>, parameter_type: &str, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            parameter_type: QueryParameterType {
                parameter_type: parameter_type.to_string(),
                ..Default::default()
            },
            parameter_value: QueryParameterValue {
                value: Some(value.into()),
                ..Default::default()
            },
        }
    }
}
