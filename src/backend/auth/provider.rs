/**
 * Identity Providers
 *
 * The third-party providers users can log in with, their OAuth endpoints,
 * and the profile shape every provider is normalized into.
 */
use std::fmt;
use std::str::FromStr;

use crate::backend::auth::error::IdentityError;
use crate::shared::UserType;

/// Supported OAuth providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Github,
    Google,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Github, Provider::Google];

    /// Identifier used in URLs and user ids
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Github => "github",
            Provider::Google => "google",
        }
    }

    /// Human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            Provider::Github => "GitHub",
            Provider::Google => "Google",
        }
    }

    pub fn user_type(&self) -> UserType {
        match self {
            Provider::Github => UserType::Github,
            Provider::Google => UserType::Google,
        }
    }

    /// `"<provider>_<provider user id>"`
    pub fn user_id(&self, provider_user_id: &str) -> String {
        format!("{}_{}", self.as_str(), provider_user_id)
    }

    /// Display name used when the profile carries none
    pub fn fallback_name(&self) -> String {
        format!("{} User", self.label())
    }

    pub fn authorize_endpoint(&self) -> &'static str {
        match self {
            Provider::Github => "https://github.com/login/oauth/authorize",
            Provider::Google => "https://accounts.google.com/o/oauth2/v2/auth",
        }
    }

    pub fn token_endpoint(&self) -> &'static str {
        match self {
            Provider::Github => "https://github.com/login/oauth/access_token",
            Provider::Google => "https://oauth2.googleapis.com/token",
        }
    }

    pub fn scopes(&self) -> &'static [&'static str] {
        match self {
            Provider::Github => &["user:email"],
            Provider::Google => &["openid", "email", "profile"],
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "github" => Ok(Provider::Github),
            "google" => Ok(Provider::Google),
            other => Err(IdentityError::UnknownProvider(other.to_string())),
        }
    }
}

/// Profile returned by a provider after a successful login
///
/// `login` is only populated by GitHub and serves as the display-name
/// fallback when `name` is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderProfile {
    pub id: String,
    pub name: Option<String>,
    pub login: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}
