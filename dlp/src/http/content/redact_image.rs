use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::content::{ByteContentItem, InfoType, InspectConfig, InspectResult};

/// RGB components in `[0, 1]`.
#[derive(Clone, Copy, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    #[serde(default)]
    pub red: f32,
    #[serde(default)]
    pub green: f32,
    #[serde(default)]
    pub blue: f32,
}

#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImageRedactionConfig {
    /// One per info type. Applies to every other finding when unset and `redact_all_text` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_type: Option<InfoType>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub redact_all_text: bool,
    /// Black when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redaction_color: Option<Color>,
}

#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RedactImageRequest {
    #[serde(skip)]
    pub parent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspect_config: Option<InspectConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_redaction_configs: Vec<ImageRedactionConfig>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub include_findings: bool,
    /// PNG, JPEG, SVG or BMP.
    pub byte_item: ByteContentItem,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RedactImageResponse {
    /// Same format as the input image.
    #[serde(default, with = "google_cloud_gax::http::base64")]
    pub redacted_image: Vec<u8>,
    /// All text found in the image when `include_quote` was requested.
    #[serde(default)]
    pub extracted_text: String,
    /// Set when `include_findings` was requested.
    pub inspect_result: Option<InspectResult>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &RedactImageRequest) -> RequestBuilder {
    let url = format!("{}/{}/image:redact", base_url, req.parent);
    client.post(url).json(req)
}
