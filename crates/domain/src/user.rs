use crate::shared::{
    entity::{Entity, ID},
    errors::UnknownVariantError,
};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(UnknownVariantError::new("role", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: ID,
    /// Id of the user given by the authentication provider
    pub user_id: String,
    pub full_name: String,
    pub email: String,
    pub mobile_number: Option<String>,
    pub department: Option<String>,
    pub year_of_study: Option<String>,
    pub role: Role,
}

impl UserProfile {
    pub fn new(
        user_id: impl Into<String>,
        full_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: Default::default(),
            user_id: user_id.into(),
            full_name: full_name.into(),
            email: email.into(),
            mobile_number: None,
            department: None,
            year_of_study: None,
            role: Role::User,
        }
    }

    /// The address reminders go to, if the profile has one
    pub fn contact_email(&self) -> Option<&str> {
        let email = self.email.trim();
        if email.is_empty() {
            None
        } else {
            Some(email)
        }
    }
}

impl Entity for UserProfile {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Email addresses that are granted the `Admin` role when their profile is created.
/// Comparison ignores case.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminEmails(HashSet<String>);

impl AdminEmails {
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            emails
                .into_iter()
                .map(|email| email.as_ref().trim().to_lowercase())
                .filter(|email| !email.is_empty())
                .collect(),
        )
    }

    /// Parses a comma separated list like `a@campus.edu, b@campus.edu`
    pub fn from_csv(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    pub fn contains(&self, email: &str) -> bool {
        self.0.contains(&email.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn resolve_role(&self, email: &str, requested: Role) -> Role {
        if self.contains(email) {
            Role::Admin
        } else {
            requested
        }
    }
}
