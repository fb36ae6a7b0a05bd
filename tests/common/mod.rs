//! Common test utilities and helpers
//!
//! This module provides shared utilities for the integration tests:
//! - A test server over a temporary workspace root
//! - A deterministic OAuth collaborator
//! - Custom assertion macros

#![allow(dead_code)]

pub mod assertions;

use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use flowspace::backend::auth::{
    AuthorizationRequest, CallbackParams, IdentityError, OAuthExchange, Provider, ProviderProfile,
};
use flowspace::backend::server::{build_app, ServerConfig};
use tempfile::TempDir;

/// State handed out by `StaticOAuth` for every login
pub const FIXED_STATE: &str = "fixed-state";

/// Where the callback redirects after login
pub const CLIENT_APP_URL: &str = "http://localhost:3000/flows";

/// OAuth collaborator with canned answers
///
/// Every provider is configured (unless built with `unconfigured`) and every
/// code exchange yields the GitHub user `octocat` with id 42.
pub struct StaticOAuth {
    configured: bool,
}

impl StaticOAuth {
    pub fn configured() -> Self {
        Self { configured: true }
    }

    pub fn unconfigured() -> Self {
        Self { configured: false }
    }
}

#[async_trait]
impl OAuthExchange for StaticOAuth {
    fn is_configured(&self, _provider: Provider) -> bool {
        self.configured
    }

    fn authorize_url(&self, provider: Provider) -> Result<AuthorizationRequest, IdentityError> {
        Ok(AuthorizationRequest {
            url: format!("https://auth.example/{}?state={}", provider, FIXED_STATE),
            state: FIXED_STATE.to_string(),
        })
    }

    async fn exchange_code_for_profile(
        &self,
        _provider: Provider,
        params: &CallbackParams,
    ) -> Result<ProviderProfile, IdentityError> {
        if params.code.is_none() {
            return Err(IdentityError::MissingCode);
        }
        Ok(ProviderProfile {
            id: "42".to_string(),
            name: None,
            login: Some("octocat".to_string()),
            email: Some("octocat@github.com".to_string()),
            avatar_url: Some("https://avatars.example/42".to_string()),
        })
    }
}

/// Test server plus the temporary directory backing its workspaces
pub struct TestApp {
    pub server: TestServer,
    pub root: TempDir,
}

/// Spawn a test server that keeps cookies between requests
pub async fn spawn_app(oauth: StaticOAuth) -> TestApp {
    let root = TempDir::new().expect("Failed to create workspace root");
    let config = ServerConfig {
        workspace_root: root.path().to_path_buf(),
        client_app_url: CLIENT_APP_URL.to_string(),
        ..ServerConfig::default()
    };

    let app = build_app(config, Arc::new(oauth))
        .await
        .expect("Failed to build app");
    let server = TestServer::builder()
        .save_cookies()
        .build(app)
        .expect("Failed to start test server");

    TestApp { server, root }
}
