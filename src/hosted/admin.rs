// src/hosted/admin.rs
use super::HostedError;
use crate::config::HostedConfig;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

const ADMIN_USERS_PATH: &str = "auth/v1/admin/users";

/// Client for the hosted auth admin API. Authenticates with the service-role
/// key, which bypasses row-level security; only operator tools build one.
pub struct AdminClient {
    base_url: Url,
    service_role_key: String,
    client: Client,
}

#[derive(Serialize)]
struct CreateUserPayload<'a> {
    email: &'a str,
    password: &'a str,
    email_confirm: bool,
}

/// The parts of the created user record we report back.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedUser {
    pub id: String,
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl AdminClient {
    pub fn new(config: &HostedConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            service_role_key: config.service_role_key.clone(),
            client: Client::new(),
        }
    }

    pub fn users_url(&self) -> Result<Url, HostedError> {
        self.base_url
            .join(ADMIN_USERS_PATH)
            .map_err(|e| HostedError::Request(format!("bad hosted url: {e}")))
    }

    /// Create a confirmed user with the given credentials.
    pub fn create_user(&self, email: &str, password: &str) -> Result<CreatedUser, HostedError> {
        let url = self.users_url()?;
        debug!(%url, email, "creating hosted user");

        let payload = CreateUserPayload {
            email,
            password,
            email_confirm: true,
        };

        let resp = self
            .client
            .post(url)
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .json(&payload)
            .send()
            .map_err(|e| HostedError::Request(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().unwrap_or_else(|_| "(no body)".to_string());

        if !status.is_success() {
            return Err(HostedError::Api {
                status: status.as_u16(),
                message: api_error_message(status.as_u16(), &body),
            });
        }

        let user: CreatedUser = serde_json::from_str(&body)
            .map_err(|e| HostedError::Request(format!("unexpected response body: {e}")))?;
        info!(id = %user.id, "hosted user created");
        Ok(user)
    }
}

/// Pull the human-readable message out of an error body. The service is not
/// consistent about which key it uses.
pub fn api_error_message(status: u16, body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    parsed
        .as_ref()
        .and_then(|v| {
            ["msg", "message", "error_description", "error"]
                .iter()
                .find_map(|key| v.get(key).and_then(Value::as_str))
        })
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {status}"))
}
