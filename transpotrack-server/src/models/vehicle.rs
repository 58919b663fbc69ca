use garde::Validate;
use serde::Deserialize;

use super::{numeric, NumberOrText};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRequest {
    #[garde(length(min = 1, max = 20))]
    pub vehicle_number: String,
    #[garde(length(min = 1))]
    pub r#type: String,
    #[serde(default)]
    #[garde(skip)]
    pub model: Option<String>,
    #[garde(custom(numeric))]
    pub capacity: NumberOrText,
    #[garde(length(min = 1, max = 20))]
    pub registration_number: String,
    #[serde(default)]
    #[garde(skip)]
    pub fuel_type: Option<String>,
    #[serde(default)]
    #[garde(skip)]
    pub status: Option<String>,
}
