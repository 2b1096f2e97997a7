use crate::ports::outbound::{AuthProvider, Session};
use crate::shared::Result;
use anyhow::bail;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Supabase (GoTrue) auth provider
///
/// Password sign-in and sign-out against the hosted auth service. The
/// current session lives in a watch channel so subscribers observe
/// sign-in, sign-out and expiry as state changes.
pub struct SupabaseAuthProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    state: watch::Sender<Option<Session>>,
}

impl SupabaseAuthProvider {
    const TIMEOUT_SECONDS: u64 = 30;

    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("cyberguard/{}", version);
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        let base_url: String = base_url.into();
        let (state, _) = watch::channel(None);
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            state,
        })
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuthProvider {
    async fn current_session(&self) -> Result<Option<Session>> {
        let session = self.state.borrow().clone();
        match session {
            Some(session) if session.is_expired(Utc::now()) => {
                // Expiry notification: observed lazily, broadcast once
                let _ = self.state.send(None);
                Ok(None)
            }
            other => Ok(other),
        }
    }

    fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.state.subscribe()
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);
        let body = PasswordGrantRequest { email, password };

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            bail!("Sign-in failed: auth service returned HTTP {}", status);
        }

        let token: TokenResponse = response.json().await?;
        let session = Session {
            access_token: token.access_token,
            user_email: token.user.email.unwrap_or_else(|| email.to_string()),
            expires_at: token
                .expires_in
                .map(|seconds| Utc::now() + Duration::seconds(seconds)),
        };

        let _ = self.state.send(Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<()> {
        let session = self.state.borrow().clone();
        if let Some(session) = session {
            let url = format!("{}/auth/v1/logout", self.base_url);
            // Best effort: the local session is destroyed even if the
            // server-side revocation fails.
            let _ = self
                .client
                .post(&url)
                .header("apikey", &self.api_key)
                .bearer_auth(&session.access_token)
                .send()
                .await;
        }
        let _ = self.state.send(None);
        Ok(())
    }
}

// GoTrue wire structures

#[derive(Debug, Serialize)]
struct PasswordGrantRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    user: TokenUser,
}

#[derive(Debug, Default, Deserialize)]
struct TokenUser {
    #[serde(default)]
    email: Option<String>,
}
