use std::sync::Arc;

use async_trait::async_trait;
use luminara_types::{
    AccessTokenResponse, AdminTokenResponse, AdminTokenStatus, CreateSubdomainRequest,
    LoginRequest, OAuthInitResponse, OAuthProvider, ResendVerificationRequest, SignupRequest,
    Subdomain, SubdomainAvailability, UpdateSubdomainRequest, User,
};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::{
    adapters::http::error_mapping::{error_from_response, transport_error},
    app_error::{AppError, AppResult},
    application::ports::{
        api::{AuthApi, SubdomainApi, UserApi},
        storage::CredentialStore,
    },
};

/// Gateway to the Luminara REST API.
///
/// The stored credential (if any) is attached as a bearer token to every
/// request, read fresh from the store each time so login and logout take
/// effect immediately.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    credentials: Arc<dyn CredentialStore>,
}

impl ApiClient {
    pub fn new(client: Client, base_url: Url, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            client,
            base_url,
            credentials,
        }
    }

    /// Builds `base_url/seg1/seg2/...`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Internal("API base URL cannot be a base".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> AppResult<RequestBuilder> {
        let url = self.endpoint(segments)?;
        debug!(%method, path = url.path(), "api request");

        let builder = self.client.request(method, url);
        Ok(match self.credentials.load()? {
            Some(credential) => builder.bearer_auth(credential.expose()),
            None => builder,
        })
    }

    async fn send(&self, builder: RequestBuilder) -> AppResult<reqwest::Response> {
        let response = builder.send().await.map_err(transport_error)?;
        debug!(status = response.status().as_u16(), "api response");

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response).await)
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<T> {
        let response = self.send(builder).await?;
        decode(response).await
    }

    /// Like `send_json`, but a 404 is a valid "nothing there" answer.
    async fn send_optional<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> AppResult<Option<T>> {
        match self.send(builder).await {
            Ok(response) => decode(response).await.map(Some),
            Err(AppError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Sends a request whose response body (usually `{"message": ...}`) is not needed.
    async fn send_empty(&self, builder: RequestBuilder) -> AppResult<()> {
        self.send(builder).await.map(|_| ())
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
    let status = response.status();
    let body = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&body).map_err(|e| {
        AppError::Internal(format!(
            "unexpected response body (status {}): {}",
            status.as_u16(),
            e
        ))
    })
}

#[async_trait]
impl UserApi for ApiClient {
    #[instrument(skip(self))]
    async fn current_user(&self) -> AppResult<User> {
        let request = self.request(Method::GET, &["users", "me"])?;
        self.send_json(request).await
    }

    #[instrument(skip(self))]
    async fn update_email(&self, email: &str) -> AppResult<User> {
        let request = self
            .request(Method::PUT, &["users", "me"])?
            .query(&[("email", email)]);
        self.send_json(request).await
    }

    #[instrument(skip(self))]
    async fn delete_account(&self) -> AppResult<()> {
        let request = self.request(Method::DELETE, &["users", "me"])?;
        self.send_empty(request).await
    }

    #[instrument(skip(self))]
    async fn public_profile(&self, username: &str) -> AppResult<Option<User>> {
        let request = self.request(Method::GET, &["users", "profile", username])?;
        self.send_optional(request).await
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    #[instrument(skip_all)]
    async fn login(&self, request: &LoginRequest) -> AppResult<AccessTokenResponse> {
        let request = self.request(Method::POST, &["auth", "login"])?.json(request);
        self.send_json(request).await
    }

    #[instrument(skip_all, fields(username = %request.username))]
    async fn signup(&self, request: &SignupRequest) -> AppResult<()> {
        let request = self.request(Method::POST, &["auth", "signup"])?.json(request);
        self.send_empty(request).await
    }

    #[instrument(skip(self))]
    async fn oauth_url(&self, provider: OAuthProvider) -> AppResult<String> {
        let path = provider.to_string();
        let request = self.request(Method::GET, &["auth", path.as_str()])?;
        let response: OAuthInitResponse = self.send_json(request).await?;
        Ok(response.auth_url)
    }

    #[instrument(skip(self))]
    async fn resend_verification(&self, email: &str) -> AppResult<()> {
        let body = ResendVerificationRequest {
            email: email.to_string(),
        };
        let request = self
            .request(Method::POST, &["auth", "resend-verification"])?
            .json(&body);
        self.send_empty(request).await
    }
}

#[async_trait]
impl SubdomainApi for ApiClient {
    #[instrument(skip(self))]
    async fn my_subdomain(&self) -> AppResult<Option<Subdomain>> {
        let request = self.request(Method::GET, &["subdomains", "my"])?;
        self.send_optional(request).await
    }

    #[instrument(skip(self))]
    async fn check_availability(&self, name: &str) -> AppResult<SubdomainAvailability> {
        let request = self.request(Method::GET, &["subdomains", "check", name])?;
        self.send_json(request).await
    }

    #[instrument(skip(self))]
    async fn create_subdomain(&self, name: &str) -> AppResult<Subdomain> {
        let body = CreateSubdomainRequest {
            subdomain: name.to_string(),
        };
        // The collection route is registered with a trailing slash.
        let request = self.request(Method::POST, &["subdomains", ""])?.json(&body);
        self.send_json(request).await
    }

    #[instrument(skip(self))]
    async fn rename_subdomain(&self, name: &str) -> AppResult<Subdomain> {
        let body = UpdateSubdomainRequest {
            subdomain: Some(name.to_string()),
        };
        let request = self.request(Method::PUT, &["subdomains", "my"])?.json(&body);
        self.send_json(request).await
    }

    #[instrument(skip(self))]
    async fn delete_subdomain(&self) -> AppResult<()> {
        let request = self.request(Method::DELETE, &["subdomains", "my"])?;
        self.send_empty(request).await
    }

    #[instrument(skip(self))]
    async fn admin_token_status(&self) -> AppResult<AdminTokenStatus> {
        let request =
            self.request(Method::GET, &["subdomains", "my", "admin-token", "status"])?;
        self.send_json(request).await
    }

    #[instrument(skip(self))]
    async fn generate_admin_token(&self) -> AppResult<AdminTokenResponse> {
        let request = self.request(Method::POST, &["subdomains", "my", "admin-token"])?;
        self.send_json(request).await
    }

    #[instrument(skip(self))]
    async fn delete_admin_token(&self) -> AppResult<()> {
        let request = self.request(Method::DELETE, &["subdomains", "my", "admin-token"])?;
        self.send_empty(request).await
    }
}
