/**
 * Identity Resolver
 *
 * Decides who the caller is. Every session starts as the shared guest;
 * completing an OAuth login replaces the guest with a provider identity
 * whose workspace is provisioned on the spot. Logging out returns the
 * session to guest.
 *
 * # Identity Ids
 *
 * - guest: `guest`
 * - provider users: `github_<id>` / `google_<sub>`
 */
use std::sync::Arc;

use crate::backend::auth::error::IdentityError;
use crate::backend::auth::oauth::{CallbackParams, OAuthExchange};
use crate::backend::auth::provider::{Provider, ProviderProfile};
use crate::backend::auth::session::SessionContext;
use crate::backend::workspace::{WorkspaceError, WorkspaceStore};
use crate::shared::Identity;

/// Resolves and transitions the identity bound to a session
#[derive(Clone)]
pub struct IdentityResolver {
    oauth: Arc<dyn OAuthExchange>,
    workspaces: WorkspaceStore,
}

impl IdentityResolver {
    pub fn new(oauth: Arc<dyn OAuthExchange>, workspaces: WorkspaceStore) -> Self {
        Self { oauth, workspaces }
    }

    /// Identity of the session, establishing the guest if none is stored
    pub async fn ensure_session(
        &self,
        session: &dyn SessionContext,
    ) -> Result<Identity, IdentityError> {
        if let Some(identity) = session.identity().await? {
            return Ok(identity);
        }

        let guest = Identity::guest();
        session.set_identity(&guest).await?;
        tracing::debug!("New session established as guest");
        Ok(guest)
    }

    /// Current identity of the session
    pub async fn current_user(
        &self,
        session: &dyn SessionContext,
    ) -> Result<Identity, IdentityError> {
        self.ensure_session(session).await
    }

    /// Start a login, returning the URL to redirect the user to
    pub async fn begin_login(
        &self,
        session: &dyn SessionContext,
        provider: Provider,
    ) -> Result<String, IdentityError> {
        if !self.oauth.is_configured(provider) {
            return Err(IdentityError::ProviderNotConfigured(provider));
        }

        let request = self.oauth.authorize_url(provider)?;
        session.set_login_state(&request.state).await?;
        tracing::info!("Redirecting to {} for login", provider.label());
        Ok(request.url)
    }

    /// Finish a login from the provider callback
    ///
    /// The pending state is consumed whether or not the login succeeds, so a
    /// callback can never be replayed.
    pub async fn complete_login(
        &self,
        session: &dyn SessionContext,
        provider: Provider,
        params: &CallbackParams,
    ) -> Result<Identity, IdentityError> {
        let expected_state = session.take_login_state().await?;

        if let Some(error) = &params.error {
            tracing::warn!("{} login denied: {}", provider.label(), error);
            return Err(IdentityError::AuthorizationDenied(error.clone()));
        }

        match (&expected_state, &params.state) {
            (Some(expected), Some(received)) if expected == received => {}
            _ => {
                tracing::warn!("{} callback state mismatch", provider.label());
                return Err(IdentityError::StateMismatch);
            }
        }

        let profile = self.oauth.exchange_code_for_profile(provider, params).await?;
        let identity = identity_from_profile(provider, profile);

        let workspace = self.workspaces.workspace_path(&identity.user_id)?;
        tokio::fs::create_dir_all(&workspace)
            .await
            .map_err(WorkspaceError::from)?;

        session.set_identity(&identity).await?;
        tracing::info!(
            "User {} logged in via {}",
            identity.user_id,
            provider.label()
        );
        Ok(identity)
    }

    /// End a provider login
    ///
    /// Returns the id that was logged out, or `None` when the session holds
    /// the guest (or nothing), in which case the session is left untouched.
    pub async fn logout(
        &self,
        session: &dyn SessionContext,
    ) -> Result<Option<String>, IdentityError> {
        match session.identity().await? {
            Some(identity) if !identity.is_guest() => {
                session.clear().await?;
                tracing::info!("User {} logged out", identity.user_id);
                Ok(Some(identity.user_id))
            }
            _ => Ok(None),
        }
    }
}

fn identity_from_profile(provider: Provider, profile: ProviderProfile) -> Identity {
    let user_name = profile
        .name
        .or(profile.login)
        .unwrap_or_else(|| provider.fallback_name());

    Identity {
        user_id: provider.user_id(&profile.id),
        user_name,
        user_type: provider.user_type(),
        avatar_url: profile.avatar_url,
        email: profile.email,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::oauth::AuthorizationRequest;
    use crate::backend::auth::session::MemorySession;
    use crate::shared::{UserType, GUEST_USER_ID};
    use async_trait::async_trait;
    use tempfile::TempDir;

    struct FakeOAuth {
        configured: bool,
        profile: ProviderProfile,
    }

    #[async_trait]
    impl OAuthExchange for FakeOAuth {
        fn is_configured(&self, _provider: Provider) -> bool {
            self.configured
        }

        fn authorize_url(&self, provider: Provider) -> Result<AuthorizationRequest, IdentityError> {
            Ok(AuthorizationRequest {
                url: format!("https://auth.example/{}?state=s1", provider),
                state: "s1".to_string(),
            })
        }

        async fn exchange_code_for_profile(
            &self,
            _provider: Provider,
            _params: &CallbackParams,
        ) -> Result<ProviderProfile, IdentityError> {
            Ok(self.profile.clone())
        }
    }

    fn resolver(configured: bool, profile: ProviderProfile) -> (IdentityResolver, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = WorkspaceStore::new(dir.path());
        let oauth = Arc::new(FakeOAuth { configured, profile });
        (IdentityResolver::new(oauth, store), dir)
    }

    fn octocat() -> ProviderProfile {
        ProviderProfile {
            id: "42".to_string(),
            name: None,
            login: Some("octocat".to_string()),
            email: Some("octocat@github.com".to_string()),
            avatar_url: Some("https://avatars.example/42".to_string()),
        }
    }

    fn callback(state: &str) -> CallbackParams {
        CallbackParams {
            code: Some("code".to_string()),
            state: Some(state.to_string()),
            error: None,
        }
    }

    #[tokio::test]
    async fn test_fresh_session_is_guest() {
        let (resolver, _dir) = resolver(true, octocat());
        let session = MemorySession::new();

        let identity = resolver.current_user(&session).await.unwrap();
        assert_eq!(identity.user_id, GUEST_USER_ID);
        assert_eq!(identity.user_type, UserType::Guest);
        assert_eq!(session.identity().await.unwrap(), Some(identity));
    }

    #[tokio::test]
    async fn test_login_flow() {
        let (resolver, dir) = resolver(true, octocat());
        let session = MemorySession::new();

        let url = resolver.begin_login(&session, Provider::Github).await.unwrap();
        assert_eq!(url, "https://auth.example/github?state=s1");

        let identity = resolver
            .complete_login(&session, Provider::Github, &callback("s1"))
            .await
            .unwrap();
        assert_eq!(identity.user_id, "github_42");
        assert_eq!(identity.user_name, "octocat");
        assert_eq!(identity.user_type, UserType::Github);
        assert!(dir.path().join("github_42").is_dir());
        assert_eq!(resolver.current_user(&session).await.unwrap(), identity);
    }

    #[tokio::test]
    async fn test_name_falls_back_to_provider_label() {
        let profile = ProviderProfile {
            id: "sub-1".to_string(),
            ..ProviderProfile::default()
        };
        let (resolver, _dir) = resolver(true, profile);
        let session = MemorySession::new();

        resolver.begin_login(&session, Provider::Google).await.unwrap();
        let identity = resolver
            .complete_login(&session, Provider::Google, &callback("s1"))
            .await
            .unwrap();
        assert_eq!(identity.user_id, "google_sub-1");
        assert_eq!(identity.user_name, "Google User");
    }

    #[tokio::test]
    async fn test_state_mismatch_keeps_guest() {
        let (resolver, _dir) = resolver(true, octocat());
        let session = MemorySession::new();
        resolver.ensure_session(&session).await.unwrap();

        resolver.begin_login(&session, Provider::Github).await.unwrap();
        let result = resolver
            .complete_login(&session, Provider::Github, &callback("forged"))
            .await;
        assert!(matches!(result, Err(IdentityError::StateMismatch)));
        assert!(resolver.current_user(&session).await.unwrap().is_guest());

        // State is single use
        let replay = resolver
            .complete_login(&session, Provider::Github, &callback("s1"))
            .await;
        assert!(matches!(replay, Err(IdentityError::StateMismatch)));
    }

    #[tokio::test]
    async fn test_callback_error_is_denied() {
        let (resolver, _dir) = resolver(true, octocat());
        let session = MemorySession::new();
        resolver.begin_login(&session, Provider::Github).await.unwrap();

        let params = CallbackParams {
            error: Some("access_denied".to_string()),
            ..CallbackParams::default()
        };
        let result = resolver
            .complete_login(&session, Provider::Github, &params)
            .await;
        assert!(matches!(result, Err(IdentityError::AuthorizationDenied(e)) if e == "access_denied"));
    }

    #[tokio::test]
    async fn test_unconfigured_provider() {
        let (resolver, _dir) = resolver(false, octocat());
        let session = MemorySession::new();
        let result = resolver.begin_login(&session, Provider::Google).await;
        assert!(matches!(
            result,
            Err(IdentityError::ProviderNotConfigured(Provider::Google))
        ));
        assert_eq!(session.take_login_state().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_guest_logout_is_noop() {
        let (resolver, _dir) = resolver(true, octocat());
        let session = MemorySession::new();
        resolver.ensure_session(&session).await.unwrap();

        assert_eq!(resolver.logout(&session).await.unwrap(), None);
        assert!(session.identity().await.unwrap().unwrap().is_guest());
    }

    #[tokio::test]
    async fn test_logout_returns_to_guest() {
        let (resolver, _dir) = resolver(true, octocat());
        let session = MemorySession::new();
        resolver.begin_login(&session, Provider::Github).await.unwrap();
        resolver
            .complete_login(&session, Provider::Github, &callback("s1"))
            .await
            .unwrap();

        let logged_out = resolver.logout(&session).await.unwrap();
        assert_eq!(logged_out.as_deref(), Some("github_42"));
        assert!(resolver.current_user(&session).await.unwrap().is_guest());
    }
}
