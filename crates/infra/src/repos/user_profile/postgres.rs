use super::IUserProfileRepo;
use eventura_domain::{Role, UserProfile};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresUserProfileRepo {
    pool: PgPool,
}

impl PostgresUserProfileRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserProfileRaw {
    profile_uid: Uuid,
    user_id: String,
    full_name: String,
    email: String,
    mobile_number: Option<String>,
    department: Option<String>,
    year_of_study: Option<String>,
    role: String,
}

impl TryFrom<UserProfileRaw> for UserProfile {
    type Error = anyhow::Error;

    fn try_from(raw: UserProfileRaw) -> anyhow::Result<Self> {
        Ok(UserProfile {
            id: raw.profile_uid.into(),
            user_id: raw.user_id,
            full_name: raw.full_name,
            email: raw.email,
            mobile_number: raw.mobile_number,
            department: raw.department,
            year_of_study: raw.year_of_study,
            role: raw.role.parse::<Role>()?,
        })
    }
}

#[async_trait::async_trait]
impl IUserProfileRepo for PostgresUserProfileRepo {
    async fn insert(&self, p: &UserProfile) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_profiles
            (profile_uid, user_id, full_name, email, mobile_number, department, year_of_study, role)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(*p.id.inner_ref())
        .bind(&p.user_id)
        .bind(&p.full_name)
        .bind(&p.email)
        .bind(&p.mobile_number)
        .bind(&p.department)
        .bind(&p.year_of_study)
        .bind(p.role.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_user_id(&self, user_id: &str) -> Option<UserProfile> {
        let res = sqlx::query_as::<_, UserProfileRaw>(
            r#"
            SELECT * FROM user_profiles AS p
            WHERE p.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;

        match res {
            Ok(raw) => raw.and_then(|raw| match UserProfile::try_from(raw) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    error!("Stored profile for user {} is invalid: {:?}", user_id, e);
                    None
                }
            }),
            Err(e) => {
                error!("Unable to find profile for user {}: {:?}", user_id, e);
                None
            }
        }
    }
}
