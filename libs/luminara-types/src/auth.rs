use serde::{Deserialize, Serialize};

/// Body of `POST /auth/login`.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/signup`.
#[derive(Clone, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Body of `POST /auth/resend-verification`.
#[derive(Debug, Clone, Serialize)]
pub struct ResendVerificationRequest {
    pub email: String,
}

/// Bearer credential issued by `POST /auth/login`.
#[derive(Clone, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl std::fmt::Debug for AccessTokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessTokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// Response of `GET /auth/{provider}`.
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthInitResponse {
    pub auth_url: String,
}

/// Third-party identity providers supported by the API.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OAuthProvider {
    Github,
    Discord,
}

impl OAuthProvider {
    /// Human-readable provider name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Github => "GitHub",
            Self::Discord => "Discord",
        }
    }
}
