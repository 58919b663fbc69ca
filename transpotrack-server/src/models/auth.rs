use garde::Validate;
use serde::{Deserialize, Serialize};
use transpotrack_data::Role;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[garde(length(min = 1))]
    pub username: String,
    #[garde(skip)]
    pub password: String,
    /// Checked by the verifier, which answers 401 for anything but
    /// `admin` or `user`.
    #[garde(skip)]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionUser {
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: SessionUser,
}

impl LoginResponse {
    pub fn new(username: String, role: Role) -> Self {
        Self {
            success: true,
            user: SessionUser { username, role },
        }
    }
}
