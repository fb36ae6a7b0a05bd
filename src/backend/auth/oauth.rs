/**
 * OAuth Collaborator
 *
 * The identity resolver never speaks OAuth itself. It asks an
 * `OAuthExchange` for an authorization URL and, on callback, for the
 * caller's profile. `OAuthClients` is the production implementation, built
 * on the `oauth2` crate's authorization-code flow.
 *
 * # Endpoints
 *
 * `OAuthEndpoints::for_provider` gives each provider's public authorize and
 * token URLs. `OAuthClients::with_endpoints` accepts others, together with a
 * matching `ProfileClient`.
 *
 * # Redirect URIs
 *
 * Each provider redirects back to
 * `{public_base_url}/api/auth/{provider}/callback`.
 */
use async_trait::async_trait;
use oauth2::basic::BasicClient;
use oauth2::reqwest::async_http_client;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, RedirectUrl, Scope,
    TokenResponse, TokenUrl,
};
use serde::Deserialize;

use crate::backend::auth::error::IdentityError;
use crate::backend::auth::profile::ProfileClient;
use crate::backend::auth::provider::{Provider, ProviderProfile};
use crate::backend::server::config::{ProviderCredentials, ServerConfig};

/// Query parameters of the provider callback
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Where to send the user and the CSRF state to expect back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    pub url: String,
    pub state: String,
}

/// Authorization and token URLs of one provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthEndpoints {
    pub authorize: String,
    pub token: String,
}

impl OAuthEndpoints {
    pub fn for_provider(provider: Provider) -> Self {
        Self {
            authorize: provider.authorize_endpoint().to_string(),
            token: provider.token_endpoint().to_string(),
        }
    }
}

/// Provider-facing half of the login flow
#[async_trait]
pub trait OAuthExchange: Send + Sync {
    /// Whether credentials for `provider` are available
    fn is_configured(&self, provider: Provider) -> bool;

    /// Build the authorization redirect for `provider`
    fn authorize_url(&self, provider: Provider) -> Result<AuthorizationRequest, IdentityError>;

    /// Exchange the callback's code for the caller's profile
    async fn exchange_code_for_profile(
        &self,
        provider: Provider,
        params: &CallbackParams,
    ) -> Result<ProviderProfile, IdentityError>;
}

/// `oauth2`-backed clients for every configured provider
#[derive(Debug, Clone)]
pub struct OAuthClients {
    github: Option<BasicClient>,
    google: Option<BasicClient>,
    profiles: ProfileClient,
}

impl OAuthClients {
    /// Build clients for every provider with credentials in `config`
    pub fn from_config(config: &ServerConfig) -> Result<Self, IdentityError> {
        Self::with_endpoints(config, OAuthEndpoints::for_provider, ProfileClient::default())
    }

    /// Build clients that talk to `endpoints` and read profiles through `profiles`
    pub fn with_endpoints<F>(
        config: &ServerConfig,
        endpoints: F,
        profiles: ProfileClient,
    ) -> Result<Self, IdentityError>
    where
        F: Fn(Provider) -> OAuthEndpoints,
    {
        let build = |provider: Provider| {
            config
                .credentials(provider)
                .map(|credentials| {
                    build_client(
                        provider,
                        credentials,
                        &endpoints(provider),
                        &config.public_base_url,
                    )
                })
                .transpose()
        };

        let clients = Self {
            github: build(Provider::Github)?,
            google: build(Provider::Google)?,
            profiles,
        };

        for provider in Provider::ALL {
            if clients.is_configured(provider) {
                tracing::info!("{} login enabled", provider.label());
            } else {
                tracing::warn!("{} OAuth credentials not set, login disabled", provider.label());
            }
        }
        Ok(clients)
    }

    fn client(&self, provider: Provider) -> Result<&BasicClient, IdentityError> {
        let client = match provider {
            Provider::Github => self.github.as_ref(),
            Provider::Google => self.google.as_ref(),
        };
        client.ok_or(IdentityError::ProviderNotConfigured(provider))
    }
}

fn build_client(
    provider: Provider,
    credentials: &ProviderCredentials,
    endpoints: &OAuthEndpoints,
    public_base_url: &str,
) -> Result<BasicClient, IdentityError> {
    let invalid = |e: oauth2::url::ParseError| IdentityError::OAuth(format!("{}: {}", provider, e));
    let redirect = format!(
        "{}/api/auth/{}/callback",
        public_base_url.trim_end_matches('/'),
        provider
    );

    Ok(BasicClient::new(
        ClientId::new(credentials.client_id.clone()),
        Some(ClientSecret::new(credentials.client_secret.clone())),
        AuthUrl::new(endpoints.authorize.clone()).map_err(invalid)?,
        Some(TokenUrl::new(endpoints.token.clone()).map_err(invalid)?),
    )
    .set_redirect_uri(RedirectUrl::new(redirect).map_err(invalid)?))
}

#[async_trait]
impl OAuthExchange for OAuthClients {
    fn is_configured(&self, provider: Provider) -> bool {
        self.client(provider).is_ok()
    }

    fn authorize_url(&self, provider: Provider) -> Result<AuthorizationRequest, IdentityError> {
        let client = self.client(provider)?;

        let mut request = client.authorize_url(CsrfToken::new_random);
        for scope in provider.scopes() {
            request = request.add_scope(Scope::new(scope.to_string()));
        }
        if provider == Provider::Google {
            request = request.add_extra_param("prompt", "select_account");
        }

        let (url, state) = request.url();
        Ok(AuthorizationRequest {
            url: url.to_string(),
            state: state.secret().clone(),
        })
    }

    async fn exchange_code_for_profile(
        &self,
        provider: Provider,
        params: &CallbackParams,
    ) -> Result<ProviderProfile, IdentityError> {
        let client = self.client(provider)?;
        let code = params.code.clone().ok_or(IdentityError::MissingCode)?;

        tracing::debug!("Exchanging {} authorization code", provider);
        let token = client
            .exchange_code(AuthorizationCode::new(code))
            .request_async(async_http_client)
            .await
            .map_err(|e| IdentityError::OAuth(e.to_string()))?;

        self.profiles
            .fetch(provider, token.access_token().secret())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_with_github() -> ServerConfig {
        ServerConfig {
            public_base_url: "http://localhost:5000/".to_string(),
            github: Some(ProviderCredentials {
                client_id: "gh-client".to_string(),
                client_secret: "gh-secret".to_string(),
            }),
            ..ServerConfig::default()
        }
    }

    #[test]
    fn test_unconfigured_provider() {
        let clients = OAuthClients::from_config(&config_with_github()).unwrap();
        assert!(clients.is_configured(Provider::Github));
        assert!(!clients.is_configured(Provider::Google));
        assert!(matches!(
            clients.authorize_url(Provider::Google),
            Err(IdentityError::ProviderNotConfigured(Provider::Google))
        ));
    }

    #[test]
    fn test_github_authorize_url() {
        let clients = OAuthClients::from_config(&config_with_github()).unwrap();
        let request = clients.authorize_url(Provider::Github).unwrap();

        assert!(request.url.starts_with("https://github.com/login/oauth/authorize?"));
        assert!(request.url.contains("client_id=gh-client"));
        assert!(request.url.contains("scope=user%3Aemail"));
        assert!(request
            .url
            .contains("redirect_uri=http%3A%2F%2Flocalhost%3A5000%2Fapi%2Fauth%2Fgithub%2Fcallback"));
        assert!(request.url.contains(&format!("state={}", request.state)));
        assert!(!request.state.is_empty());
    }

    #[test]
    fn test_each_authorize_url_gets_fresh_state() {
        let clients = OAuthClients::from_config(&config_with_github()).unwrap();
        let first = clients.authorize_url(Provider::Github).unwrap();
        let second = clients.authorize_url(Provider::Github).unwrap();
        assert_ne!(first.state, second.state);
    }

    #[tokio::test]
    async fn test_exchange_without_code() {
        let clients = OAuthClients::from_config(&config_with_github()).unwrap();
        let result = clients
            .exchange_code_for_profile(Provider::Github, &CallbackParams::default())
            .await;
        assert!(matches!(result, Err(IdentityError::MissingCode)));
    }

    fn github_clients(server: &MockServer) -> OAuthClients {
        let base = server.uri();
        OAuthClients::with_endpoints(
            &config_with_github(),
            |_| OAuthEndpoints {
                authorize: format!("{}/login/oauth/authorize", base),
                token: format!("{}/login/oauth/access_token", base),
            },
            ProfileClient::with_endpoints(base.clone(), format!("{}/userinfo", base)),
        )
        .unwrap()
    }

    fn callback(code: &str) -> CallbackParams {
        CallbackParams {
            code: Some(code.to_string()),
            ..CallbackParams::default()
        }
    }

    #[tokio::test]
    async fn test_exchange_code_for_github_profile() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login/oauth/access_token"))
            .and(body_string_contains("code=auth-code"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "gho_token",
                "token_type": "bearer",
                "scope": "user:email"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .and(header("authorization", "Bearer gho_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 583231,
                "login": "octocat",
                "name": "The Octocat",
                "email": "octocat@github.com",
                "avatar_url": "https://avatars.example/583231"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let clients = github_clients(&server);
        let request = clients.authorize_url(Provider::Github).unwrap();
        assert!(request
            .url
            .starts_with(&format!("{}/login/oauth/authorize?", server.uri())));

        let profile = clients
            .exchange_code_for_profile(Provider::Github, &callback("auth-code"))
            .await
            .unwrap();
        assert_eq!(
            profile,
            ProviderProfile {
                id: "583231".to_string(),
                name: Some("The Octocat".to_string()),
                login: Some("octocat".to_string()),
                email: Some("octocat@github.com".to_string()),
                avatar_url: Some("https://avatars.example/583231".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_exchange_rejected_by_token_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login/oauth/access_token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "invalid_grant",
                "error_description": "The code passed is incorrect or expired."
            })))
            .mount(&server)
            .await;

        let clients = github_clients(&server);
        let result = clients
            .exchange_code_for_profile(Provider::Github, &callback("stale"))
            .await;
        assert!(matches!(result, Err(IdentityError::OAuth(_))));
    }
}
