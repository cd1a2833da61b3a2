mod inmemory;
mod postgres;

use eventura_domain::UserProfile;
pub use inmemory::InMemoryUserProfileRepo;
pub use postgres::PostgresUserProfileRepo;

#[async_trait::async_trait]
pub trait IUserProfileRepo: Send + Sync {
    async fn insert(&self, profile: &UserProfile) -> anyhow::Result<()>;
    async fn find_by_user_id(&self, user_id: &str) -> Option<UserProfile>;
}
