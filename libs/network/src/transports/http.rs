//! HTTP transport against `hes-gateway`
//!
//! ## Endpoints
//!
//! - `POST {base}hes-gateway/terminal/initialize/appUserOrInstallerLogin`
//!   (form encoded credentials) returns the session token
//! - `POST {base}hes-gateway/terminal/sendMqtt` (JSON envelope, `loginToken`
//!   header) returns the response envelope
//!
//! The HTTP status of a reply is not interpreted: the gateway reports its
//! verdict inside the envelope, which the validator classifies.

use async_trait::async_trait;
use config::{ClientSettings, Credentials};
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use tracing::{debug, info};
use types::{LoginResponse, DEFAULT_LANG};
use url::Url;

use super::EnvelopeExchange;
use crate::{Result, TransportError};

/// Login endpoint, relative to the base URL
pub const LOGIN_PATH: &str = "hes-gateway/terminal/initialize/appUserOrInstallerLogin";

/// Command endpoint, relative to the base URL
pub const SEND_PATH: &str = "hes-gateway/terminal/sendMqtt";

/// Header carrying the session token
const LOGIN_TOKEN_HEADER: &str = "loginToken";

/// Account type sent with the login form
const LOGIN_ACCOUNT_TYPE: &str = "1";

/// Resolved gateway endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    login: Url,
    send: Url,
}

impl Endpoints {
    /// Resolve endpoints under `base_url`; a missing trailing slash is added
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base = Url::parse(base_url).map_err(|e| {
            TransportError::configuration(format!("invalid base URL {}: {}", base_url, e), Some("base_url"))
        })?;

        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let join = |path: &str| {
            base.join(path).map_err(|e| {
                TransportError::configuration(format!("invalid endpoint {}: {}", path, e), Some("base_url"))
            })
        };

        Ok(Self {
            login: join(LOGIN_PATH)?,
            send: join(SEND_PATH)?,
        })
    }

    pub fn login(&self) -> &Url {
        &self.login
    }

    pub fn send(&self) -> &Url {
        &self.send
    }
}

/// Unauthenticated HTTP transport; produces sessions
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoints: Endpoints,
    user_agent: String,
}

impl HttpTransport {
    /// Create a transport from client settings
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            TransportError::configuration(format!("failed to create HTTP client: {}", e), None)
        })?;

        Ok(Self {
            client,
            endpoints: Endpoints::new(&settings.base_url)?,
            user_agent: settings.user_agent.clone(),
        })
    }

    /// Create a transport with default settings against `base_url`
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Self::new(&ClientSettings {
            base_url: base_url.to_string(),
            ..Default::default()
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Log in and open a session for the first configured device
    ///
    /// The token is trusted as issued; a token the server later rejects
    /// surfaces on the first exchange.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<Session> {
        let device_id = credentials
            .primary_device()
            .ok_or_else(|| TransportError::configuration("no device configured", Some("devices")))?
            .to_string();

        let form = [
            ("account", credentials.email.as_str()),
            ("password", credentials.password.as_str()),
            ("lang", DEFAULT_LANG),
            ("type", LOGIN_ACCOUNT_TYPE),
            ("user-agent", self.user_agent.as_str()),
        ];

        let response = self
            .client
            .post(self.endpoints.login.clone())
            .header(USER_AGENT, &self.user_agent)
            .form(&form)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest("login", e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::from_reqwest("login", e))?;

        debug!("Login response: HTTP {} ({} bytes)", status, body.len());

        let login: LoginResponse = serde_json::from_slice(&body).map_err(|e| {
            TransportError::authentication_with_source(
                format!("login response could not be decoded (HTTP {})", status),
                e,
            )
        })?;

        let token = login.token().ok_or_else(|| {
            TransportError::authentication(format!(
                "login response carried no token (code {}: {})",
                login.code, login.message
            ))
        })?;

        info!("Authenticated {} for device {}", credentials.email, device_id);

        Ok(Session {
            token: token.to_string(),
            device_id,
            client: self.client.clone(),
            endpoints: self.endpoints.clone(),
            user_agent: self.user_agent.clone(),
        })
    }
}

/// Authenticated context for one device
///
/// Read-only after login. One exchange at a time: the token is never
/// refreshed and the session is not meant to be driven concurrently.
#[derive(Debug)]
pub struct Session {
    token: String,
    device_id: String,
    client: reqwest::Client,
    endpoints: Endpoints,
    user_agent: String,
}

impl Session {
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Post a command envelope and return the raw reply
    pub async fn send(&self, envelope: &[u8]) -> Result<Vec<u8>> {
        let response = self
            .client
            .post(self.endpoints.send.clone())
            .header(LOGIN_TOKEN_HEADER, &self.token)
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, &self.user_agent)
            .body(envelope.to_vec())
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest("sendMqtt", e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::from_reqwest("sendMqtt", e))?;

        debug!(
            "sendMqtt: {} bytes out, HTTP {}, {} bytes back",
            envelope.len(),
            status,
            body.len()
        );

        Ok(body.to_vec())
    }
}

#[async_trait]
impl EnvelopeExchange for Session {
    fn device_id(&self) -> &str {
        &self.device_id
    }

    async fn exchange(&self, envelope: Vec<u8>) -> Result<Vec<u8>> {
        self.send(&envelope).await
    }
}
