use crate::dtos::UserProfileDTO;
use eventura_domain::{Role, UserProfile};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct UserProfileResponse {
    pub profile: UserProfileDTO,
}

impl UserProfileResponse {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            profile: UserProfileDTO::new(profile),
        }
    }
}

pub mod create_profile {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct RequestBody {
        pub user_id: String,
        pub full_name: String,
        pub email: String,
        #[serde(default)]
        pub mobile_number: Option<String>,
        #[serde(default)]
        pub department: Option<String>,
        #[serde(default)]
        pub year_of_study: Option<String>,
        /// Ignored when the email is on the admin list
        #[serde(default)]
        pub role: Option<Role>,
    }

    pub type APIResponse = UserProfileResponse;
}
