//! De-identification rules.
//!
//! Only [`PrimitiveTransformation::CryptoReplaceFfxFpeConfig`] and
//! [`PrimitiveTransformation::DateShiftConfig`] with a crypto key can be reversed by
//! re-identification.
use crate::http::content::{FieldId, InfoType, Value};

/// How content is changed.
#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub enum DeidentifyConfig {
    /// Applied to findings in free text.
    InfoTypeTransformations(InfoTypeTransformations),
    /// Applied to table columns.
    RecordTransformations(RecordTransformations),
}

#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct InfoTypeTransformations {
    pub transformations: Vec<InfoTypeTransformation>,
}

#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InfoTypeTransformation {
    /// Every finding not matched by another transformation when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub info_types: Vec<InfoType>,
    pub primitive_transformation: PrimitiveTransformation,
}

#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecordTransformations {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_transformations: Vec<FieldTransformation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub record_suppressions: Vec<RecordSuppression>,
}

#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FieldTransformation {
    pub fields: Vec<FieldId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<RecordCondition>,
    #[serde(flatten)]
    pub transformation: FieldTransformationKind,
}

#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub enum FieldTransformationKind {
    /// Applied to the whole cell.
    PrimitiveTransformation(PrimitiveTransformation),
    /// Applied to findings within the cell.
    InfoTypeTransformations(InfoTypeTransformations),
}

/// Drops rows matching the condition.
#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecordSuppression {
    pub condition: Option<RecordCondition>,
}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationalOperator {
    #[default]
    RelationalOperatorUnspecified,
    EqualTo,
    NotEqualTo,
    GreaterThan,
    LessThan,
    GreaterThanOrEquals,
    LessThanOrEquals,
    Exists,
}

#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub field: FieldId,
    pub operator: RelationalOperator,
    /// Required except for [`RelationalOperator::Exists`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Conditions {
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

/// Conditions joined with `AND`, the only supported operator.
#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Expressions {
    #[serde(default = "and", skip_serializing_if = "String::is_empty")]
    pub logical_operator: String,
    pub conditions: Conditions,
}

fn and() -> String {
    "AND".to_string()
}

#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecordCondition {
    pub expressions: Expressions,
}

impl RecordCondition {
    /// Every condition must hold.
    pub fn all(conditions: Vec<Condition>) -> Self {
        Self {
            expressions: Expressions {
                logical_operator: and(),
                conditions: Conditions { conditions },
            },
        }
    }
}

/// A rule for transforming one value.
#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub enum PrimitiveTransformation {
    ReplaceConfig(ReplaceValueConfig),
    RedactConfig(RedactConfig),
    CharacterMaskConfig(CharacterMaskConfig),
    CryptoReplaceFfxFpeConfig(CryptoReplaceFfxFpeConfig),
    FixedSizeBucketingConfig(FixedSizeBucketingConfig),
    BucketingConfig(BucketingConfig),
    ReplaceWithInfoTypeConfig(ReplaceWithInfoTypeConfig),
    TimePartConfig(TimePartConfig),
    CryptoHashConfig(CryptoHashConfig),
    DateShiftConfig(DateShiftConfig),
}

impl PrimitiveTransformation {
    pub fn replace(value: impl Into<Value>) -> Self {
        PrimitiveTransformation::ReplaceConfig(ReplaceValueConfig {
            new_value: value.into(),
        })
    }

    pub fn redact() -> Self {
        PrimitiveTransformation::RedactConfig(RedactConfig {})
    }

    pub fn replace_with_info_type() -> Self {
        PrimitiveTransformation::ReplaceWithInfoTypeConfig(ReplaceWithInfoTypeConfig {})
    }
}

#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceValueConfig {
    pub new_value: Value,
}

/// Removes the value, `My phone number is 206-555-0123` becomes `My phone number is `.
#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
pub struct RedactConfig {}

/// Replaces each finding with the name of its info type.
#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
pub struct ReplaceWithInfoTypeConfig {}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommonCharsToIgnore {
    #[default]
    CommonCharsToIgnoreUnspecified,
    Numeric,
    AlphaUpperCase,
    AlphaLowerCase,
    Punctuation,
    Whitespace,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub enum CharsToIgnore {
    CharactersToSkip(String),
    CommonCharactersToIgnore(CommonCharsToIgnore),
}

/// Masks a number of characters with a fixed one, `123-45-6789` becomes `***-**-6789`.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CharacterMaskConfig {
    /// `*` when empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub masking_character: String,
    /// Every character when 0. Negative values leave that many characters unmasked.
    #[serde(default)]
    pub number_to_mask: i32,
    /// Masks from the end.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub reverse_order: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub characters_to_ignore: Vec<CharsToIgnore>,
}

/// A data encryption key.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub enum CryptoKey {
    /// Generated by the service and discarded after the request.
    Transient(TransientCryptoKey),
    /// A raw 16, 24 or 32 byte AES key.
    Unwrapped(UnwrappedCryptoKey),
    /// A key wrapped by Cloud KMS.
    KmsWrapped(KmsWrappedCryptoKey),
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransientCryptoKey {
    /// The same name yields the same key within one request.
    pub name: String,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UnwrappedCryptoKey {
    #[serde(with = "google_cloud_gax::http::base64")]
    pub key: Vec<u8>,
}

impl std::fmt::Debug for UnwrappedCryptoKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnwrappedCryptoKey").field("key", &"<redacted>").finish()
    }
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct KmsWrappedCryptoKey {
    #[serde(with = "google_cloud_gax::http::base64")]
    pub wrapped_key: Vec<u8>,
    /// `projects/{project}/locations/{location}/keyRings/{ring}/cryptoKeys/{key}`.
    pub crypto_key_name: String,
}

/// SHA-256 HMAC of the value, output as an uppercase hex string.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CryptoHashConfig {
    pub crypto_key: CryptoKey,
}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FfxCommonNativeAlphabet {
    #[default]
    FfxCommonNativeAlphabetUnspecified,
    /// `[0-9]`, radix 10.
    Numeric,
    /// `[0-9A-F]`, radix 16.
    Hexadecimal,
    /// `[0-9A-Z]`, radix 36.
    UpperCaseAlphaNumeric,
    /// `[0-9A-Za-z]`, radix 62.
    AlphaNumeric,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub enum Alphabet {
    CommonAlphabet(FfxCommonNativeAlphabet),
    /// 2 to 62 unique ASCII characters.
    CustomAlphabet(String),
    /// `[2, 62]`.
    Radix(i32),
}

/// Format preserving encryption in FFX mode. Reversible by re-identification.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CryptoReplaceFfxFpeConfig {
    pub crypto_key: CryptoKey,
    /// Field whose value tweaks the encryption, making the surrogate depend on the row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<FieldId>,
    #[serde(flatten)]
    pub alphabet: Alphabet,
    /// Prefixes each surrogate with `NAME(LENGTH):` so that it can be found and reversed
    /// by a custom info type with a surrogate type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surrogate_info_type: Option<InfoType>,
}

/// Replaces a number with its `lower-upper` bucket, e.g. `10-20`.
#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FixedSizeBucketingConfig {
    pub lower_bound: Value,
    pub upper_bound: Value,
    pub bucket_size: f64,
}

#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Value>,
    pub replacement_value: Value,
}

/// Replaces values in `[min, max)` ranges, e.g. 1-30 with `LOW` and 31-65 with `MEDIUM`.
#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct BucketingConfig {
    pub buckets: Vec<Bucket>,
}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimePart {
    #[default]
    TimePartUnspecified,
    Year,
    Month,
    DayOfMonth,
    DayOfWeek,
    WeekOfYear,
    HourOfDay,
}

/// Keeps one part of a date, timestamp or time of day.
#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TimePartConfig {
    pub part_to_extract: TimePart,
}

/// Shifts dates by a random number of days within the bounds.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DateShiftConfig {
    /// At most 365250.
    pub upper_bound_days: i32,
    /// Negative.
    pub lower_bound_days: i32,
    /// Rows with the same context value are shifted by the same amount. Requires `crypto_key`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<FieldId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crypto_key: Option<CryptoKey>,
}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransformationResultCode {
    #[default]
    TransformationResultCodeUnspecified,
    Success,
    Error,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str")]
    pub count: i64,
    #[serde(default)]
    pub code: TransformationResultCode,
    /// Set for errors.
    #[serde(default)]
    pub details: String,
}

/// Outcome of one transformation.
#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransformationSummary {
    pub info_type: Option<InfoType>,
    pub field: Option<FieldId>,
    pub transformation: Option<PrimitiveTransformation>,
    #[serde(default)]
    pub results: Vec<SummaryResult>,
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str")]
    pub transformed_bytes: i64,
}

#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransformationOverview {
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str")]
    pub transformed_bytes: i64,
    #[serde(default)]
    pub transformation_summaries: Vec<TransformationSummary>,
}
