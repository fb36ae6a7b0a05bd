/**
 * Provider Profile Fetching
 *
 * After the token exchange, the caller's profile is read from the
 * provider's API and normalized into a `ProviderProfile`.
 *
 * # GitHub
 *
 * `GET {api}/user` returns `id`, `login`, `name`, `email`, `avatar_url`.
 * `email` is null when the user keeps it private; in that case
 * `GET {api}/user/emails` is queried and the entry flagged `primary` wins.
 *
 * # Google
 *
 * `GET https://www.googleapis.com/oauth2/v3/userinfo` returns `sub`, `name`,
 * `picture` and `email`.
 */
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::backend::auth::error::IdentityError;
use crate::backend::auth::provider::{Provider, ProviderProfile};

pub const GITHUB_API_BASE: &str = "https://api.github.com";
pub const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

const CLIENT_USER_AGENT: &str = concat!("flowspace/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct GithubUser {
    id: u64,
    login: String,
    name: Option<String>,
    email: Option<String>,
    avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GithubEmail {
    email: String,
    #[serde(default)]
    primary: bool,
}

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    sub: String,
    name: Option<String>,
    picture: Option<String>,
    email: Option<String>,
}

/// HTTP client for provider profile APIs
#[derive(Debug, Clone)]
pub struct ProfileClient {
    http: reqwest::Client,
    github_api: String,
    google_userinfo: String,
}

impl Default for ProfileClient {
    fn default() -> Self {
        Self::with_endpoints(GITHUB_API_BASE, GOOGLE_USERINFO_URL)
    }
}

impl ProfileClient {
    /// Client pointed at custom endpoints (used by tests)
    pub fn with_endpoints(github_api: impl Into<String>, google_userinfo: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            github_api: github_api.into().trim_end_matches('/').to_string(),
            google_userinfo: google_userinfo.into(),
        }
    }

    /// Fetch the profile belonging to `access_token`
    pub async fn fetch(
        &self,
        provider: Provider,
        access_token: &str,
    ) -> Result<ProviderProfile, IdentityError> {
        match provider {
            Provider::Github => self.fetch_github(access_token).await,
            Provider::Google => self.fetch_google(access_token).await,
        }
    }

    async fn fetch_github(&self, access_token: &str) -> Result<ProviderProfile, IdentityError> {
        let user: GithubUser = self
            .get_json(&format!("{}/user", self.github_api), access_token)
            .await?;

        let email = match user.email.filter(|e| !e.is_empty()) {
            Some(email) => Some(email),
            None => self.github_primary_email(access_token).await,
        };

        Ok(ProviderProfile {
            id: user.id.to_string(),
            name: user.name.filter(|n| !n.trim().is_empty()),
            login: Some(user.login),
            email,
            avatar_url: user.avatar_url,
        })
    }

    /// Primary address from `/user/emails`; failures only cost the email
    async fn github_primary_email(&self, access_token: &str) -> Option<String> {
        let url = format!("{}/user/emails", self.github_api);
        match self.get_json::<Vec<GithubEmail>>(&url, access_token).await {
            Ok(emails) => emails.into_iter().find(|e| e.primary).map(|e| e.email),
            Err(e) => {
                tracing::warn!("GitHub primary email lookup failed: {}", e);
                None
            }
        }
    }

    async fn fetch_google(&self, access_token: &str) -> Result<ProviderProfile, IdentityError> {
        let info: GoogleUserInfo = self.get_json(&self.google_userinfo, access_token).await?;
        Ok(ProviderProfile {
            id: info.sub,
            name: info.name.filter(|n| !n.trim().is_empty()),
            login: None,
            email: info.email,
            avatar_url: info.picture,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        access_token: &str,
    ) -> Result<T, IdentityError> {
        tracing::debug!("Requesting provider profile data from {}", url);
        self.http
            .get(url)
            .bearer_auth(access_token)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| IdentityError::Profile(e.to_string()))?
            .json::<T>()
            .await
            .map_err(|e| IdentityError::Profile(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ProfileClient {
        ProfileClient::with_endpoints(server.uri(), format!("{}/oauth2/v3/userinfo", server.uri()))
    }

    #[tokio::test]
    async fn test_github_profile_with_public_email() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .and(header("authorization", "Bearer gho_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 583231,
                "login": "octocat",
                "name": "The Octocat",
                "email": "octocat@github.com",
                "avatar_url": "https://avatars.githubusercontent.com/u/583231"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/user/emails"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let profile = client_for(&server)
            .fetch(Provider::Github, "gho_token")
            .await
            .unwrap();
        assert_eq!(profile.id, "583231");
        assert_eq!(profile.name.as_deref(), Some("The Octocat"));
        assert_eq!(profile.login.as_deref(), Some("octocat"));
        assert_eq!(profile.email.as_deref(), Some("octocat@github.com"));
    }

    #[tokio::test]
    async fn test_github_profile_falls_back_to_primary_email() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 42,
                "login": "hidden-mail",
                "name": null,
                "email": null,
                "avatar_url": null
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/user/emails"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "email": "old@example.com", "primary": false, "verified": true },
                { "email": "primary@example.com", "primary": true, "verified": true }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let profile = client_for(&server)
            .fetch(Provider::Github, "gho_token")
            .await
            .unwrap();
        assert_eq!(profile.id, "42");
        assert_eq!(profile.name, None);
        assert_eq!(profile.login.as_deref(), Some("hidden-mail"));
        assert_eq!(profile.email.as_deref(), Some("primary@example.com"));
    }

    #[tokio::test]
    async fn test_github_email_lookup_failure_is_not_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 7,
                "login": "nomail",
                "email": null
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/user/emails"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let profile = client_for(&server)
            .fetch(Provider::Github, "gho_token")
            .await
            .unwrap();
        assert_eq!(profile.id, "7");
        assert_eq!(profile.email, None);
    }

    #[tokio::test]
    async fn test_google_profile() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/oauth2/v3/userinfo"))
            .and(header("authorization", "Bearer ya29.token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sub": "110248495921238986420",
                "name": "Ada Lovelace",
                "picture": "https://lh3.googleusercontent.com/a/photo.jpg",
                "email": "ada@example.com"
            })))
            .mount(&server)
            .await;

        let profile = client_for(&server)
            .fetch(Provider::Google, "ya29.token")
            .await
            .unwrap();
        assert_eq!(profile.id, "110248495921238986420");
        assert_eq!(profile.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(
            profile.avatar_url.as_deref(),
            Some("https://lh3.googleusercontent.com/a/photo.jpg")
        );
        assert_eq!(profile.login, None);
    }

    #[tokio::test]
    async fn test_profile_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let result = client_for(&server).fetch(Provider::Github, "expired").await;
        assert!(matches!(result, Err(IdentityError::Profile(_))));
    }
}
