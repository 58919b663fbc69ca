use garde::Validate;
use serde::Deserialize;

use super::iso_date;

/// Body of `POST /api/passengers` and `PUT /api/passengers/{id}`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PassengerRequest {
    #[garde(length(min = 1, max = 50))]
    pub first_name: String,
    #[garde(length(min = 1, max = 50))]
    pub last_name: String,
    #[garde(length(min = 3, max = 100))]
    pub email: String,
    #[garde(custom(iso_date))]
    pub date_of_birth: String,
    #[serde(default)]
    #[garde(skip)]
    pub address: Option<String>,
    #[serde(default)]
    #[garde(skip)]
    pub city: Option<String>,
    #[serde(default)]
    #[garde(skip)]
    pub status: Option<String>,
    /// Stored as the passenger's primary mobile number on create.
    #[serde(default)]
    #[garde(length(max = 20))]
    pub phone: Option<String>,
}

impl PassengerRequest {
    pub fn status_or_default(&self) -> &str {
        self.status.as_deref().unwrap_or("Active")
    }

    /// The phone number to record, if one was given.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref().map(str::trim).filter(|p| !p.is_empty())
    }
}
