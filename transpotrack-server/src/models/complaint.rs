use garde::Validate;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintStatusRequest {
    #[garde(length(min = 1))]
    pub status: String,
    #[serde(default)]
    #[garde(skip)]
    pub resolution: Option<String>,
}
