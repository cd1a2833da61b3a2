use crate::{
    error::EventuraError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use eventura_api_structs::create_profile::{APIResponse, RequestBody};
use eventura_domain::{reminder_email::welcome_email, Role, UserProfile};
use eventura_infra::{EventuraContext, OutboundEmail, Recipient};
use tracing::{error, info};

pub async fn create_profile_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<EventuraContext>,
) -> Result<HttpResponse, EventuraError> {
    protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = CreateProfileUseCase {
        user_id: body.user_id,
        full_name: body.full_name,
        email: body.email,
        mobile_number: body.mobile_number,
        department: body.department,
        year_of_study: body.year_of_study,
        role: body.role.unwrap_or_default(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            let mut builder = if res.created {
                HttpResponse::Created()
            } else {
                HttpResponse::Ok()
            };
            builder.json(APIResponse::new(res.profile))
        })
        .map_err(EventuraError::from)
}

/// Registers the profile of a user signing in for the first time.
///
/// Users whose email is on the configured admin list always become admins.
#[derive(Debug)]
pub struct CreateProfileUseCase {
    pub user_id: String,
    pub full_name: String,
    pub email: String,
    pub mobile_number: Option<String>,
    pub department: Option<String>,
    pub year_of_study: Option<String>,
    /// Requested role, used unless the admin list decides otherwise
    pub role: Role,
}

#[derive(Debug)]
pub struct ProfileRegistration {
    pub profile: UserProfile,
    /// `false` when the user already had a profile
    pub created: bool,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidData(String),
    StorageError,
}

impl From<UseCaseError> for EventuraError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidData(msg) => Self::BadClientData(msg),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateProfileUseCase {
    type Response = ProfileRegistration;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateProfile";

    async fn execute(&mut self, ctx: &EventuraContext) -> Result<Self::Response, Self::Error> {
        if self.user_id.trim().is_empty() {
            return Err(UseCaseError::InvalidData(
                "The user id must not be empty".into(),
            ));
        }
        if !self.email.contains('@') {
            return Err(UseCaseError::InvalidData(format!(
                "The email: {} is not valid",
                self.email
            )));
        }

        if let Some(profile) = ctx.repos.user_profiles.find_by_user_id(&self.user_id).await {
            return Ok(ProfileRegistration {
                profile,
                created: false,
            });
        }

        let email = self.email.trim().to_string();
        let mut profile = UserProfile::new(self.user_id.clone(), self.full_name.clone(), email);
        profile.mobile_number = self.mobile_number.take();
        profile.department = self.department.take();
        profile.year_of_study = self.year_of_study.take();
        profile.role = ctx
            .config
            .admin_emails
            .resolve_role(&profile.email, self.role);

        ctx.repos
            .user_profiles
            .insert(&profile)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if profile.role == Role::Admin {
            info!("Profile for user {} was created as admin", profile.user_id);
        }
        send_welcome_email(&profile, ctx).await;

        Ok(ProfileRegistration {
            profile,
            created: true,
        })
    }
}

/// Failures are only logged, the profile is already stored at this point
async fn send_welcome_email(profile: &UserProfile, ctx: &EventuraContext) {
    let email = match profile.contact_email() {
        Some(email) => email.to_string(),
        None => return,
    };
    let content = welcome_email(profile);
    let outbound = OutboundEmail::new(
        Recipient {
            email: email.clone(),
            name: profile.full_name.clone(),
        },
        content.subject,
        content.html_body,
    );
    match ctx.mailer.send(&outbound).await {
        Ok(receipt) => info!("Welcome email to {}: {}", email, receipt.message),
        Err(e) => error!("Welcome email to {} failed: {}", email, e),
    }
}
