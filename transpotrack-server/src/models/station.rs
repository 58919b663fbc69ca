use garde::Validate;
use serde::Deserialize;

use super::{optional_numeric, NumberOrText};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StationRequest {
    #[garde(length(min = 1, max = 20))]
    pub station_code: String,
    #[garde(length(min = 1, max = 100))]
    pub name: String,
    #[garde(length(min = 1))]
    pub location: String,
    #[garde(length(min = 1))]
    pub r#type: String,
    #[serde(default)]
    #[garde(custom(optional_numeric))]
    pub capacity: Option<NumberOrText>,
    #[serde(default)]
    #[garde(skip)]
    pub zone: Option<String>,
    #[serde(default)]
    #[garde(skip)]
    pub status: Option<String>,
}
