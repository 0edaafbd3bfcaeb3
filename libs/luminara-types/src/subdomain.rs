use serde::{Deserialize, Serialize};

/// A user's claimed subdomain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subdomain {
    pub id: i64,
    /// The chosen name, e.g. "ada" for `ada.myluminarasystem.pro`
    pub subdomain: String,
    /// Fully resolved URL of the claim
    pub full_url: String,
    /// When the claim was created (ISO 8601 format)
    pub created_at: String,
    pub owner_username: String,
}

/// Body of `POST /subdomains/`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSubdomainRequest {
    pub subdomain: String,
}

/// Body of `PUT /subdomains/my`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateSubdomainRequest {
    pub subdomain: Option<String>,
}

/// Response of `GET /subdomains/check/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubdomainAvailability {
    pub available: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

/// A freshly generated admin token. The secret is only ever returned here.
#[derive(Clone, Deserialize)]
pub struct AdminTokenResponse {
    pub token: String,
    pub created_at: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl std::fmt::Debug for AdminTokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminTokenResponse")
            .field("token", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Status projection of the admin token, safe to fetch at any time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminTokenStatus {
    pub has_token: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_without_reason() {
        let parsed: SubdomainAvailability =
            serde_json::from_str(r#"{"available":true,"reason":null}"#).unwrap();
        assert!(parsed.available);
        assert_eq!(parsed.reason, None);

        let parsed: SubdomainAvailability = serde_json::from_str(r#"{"available":true}"#).unwrap();
        assert_eq!(parsed.reason, None);
    }

    #[test]
    fn test_token_status_without_timestamp() {
        let status: AdminTokenStatus = serde_json::from_str(r#"{"has_token":false}"#).unwrap();
        assert_eq!(status, AdminTokenStatus::default());
    }
}
