use super::IUserProfileRepo;
use crate::repos::shared::inmemory_repo::*;
use anyhow::anyhow;
use eventura_domain::UserProfile;

pub struct InMemoryUserProfileRepo {
    profiles: std::sync::Mutex<Vec<UserProfile>>,
}

impl InMemoryUserProfileRepo {
    pub fn new() -> Self {
        Self {
            profiles: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IUserProfileRepo for InMemoryUserProfileRepo {
    async fn insert(&self, profile: &UserProfile) -> anyhow::Result<()> {
        // Same guarantee as the unique constraint on user_id in postgres
        if !insert_unique(profile, &self.profiles, |p| p.user_id == profile.user_id) {
            return Err(anyhow!(
                "Profile for user: {} already exists",
                profile.user_id
            ));
        }
        Ok(())
    }

    async fn find_by_user_id(&self, user_id: &str) -> Option<UserProfile> {
        find_by(&self.profiles, |p| p.user_id == user_id)
            .into_iter()
            .next()
    }
}
