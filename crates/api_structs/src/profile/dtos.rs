use eventura_domain::{Role, UserProfile, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct UserProfileDTO {
    pub id: ID,
    pub user_id: String,
    pub full_name: String,
    pub email: String,
    pub mobile_number: Option<String>,
    pub department: Option<String>,
    pub year_of_study: Option<String>,
    pub role: Role,
}

impl UserProfileDTO {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            user_id: profile.user_id,
            full_name: profile.full_name,
            email: profile.email,
            mobile_number: profile.mobile_number,
            department: profile.department,
            year_of_study: profile.year_of_study,
            role: profile.role,
        }
    }
}
