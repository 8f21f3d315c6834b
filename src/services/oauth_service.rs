use axum::http::StatusCode;
use oauth2::{
    basic::BasicClient, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, RedirectUrl,
    Scope, TokenResponse, TokenUrl,
};
use reqwest::Client as ReqwestClient;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;

use crate::config::Config;
use crate::entities::user;
use crate::services::identity_service::{AuthPrincipal, IdentityService};
use crate::utils::jwt_utils::JwtUtils;

pub struct OAuthService;

impl OAuthService {
    pub fn get_authorization_url() -> Result<String, (StatusCode, &'static str, String)> {
        let client = Self::create_client()?;

        let (auth_url, _csrf_token) = client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("email".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .url();

        Ok(auth_url.to_string())
    }

    /// Exchange the authorization code, fetch the Google profile and resolve
    /// it to a domain user (provisioning on first login), then issue a
    /// bearer token.
    pub async fn login_with_google(
        db: &DatabaseConnection,
        code: String,
    ) -> Result<(String, user::Model, Vec<String>), (StatusCode, &'static str, String)> {
        // 1. Exchange code
        let client = Self::create_client()?;
        let token_result = client
            .exchange_code(AuthorizationCode::new(code))
            .request_async(oauth2::reqwest::async_http_client)
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, "OAUTH_EXCHANGE_ERR", format!("Failed to exchange code: {}", e)))?;

        let access_token = token_result.access_token().secret();

        // 2. Fetch the verified attribute set
        let attributes = Self::fetch_profile(access_token).await?;

        // 3. Resolve to a domain user
        let (user, roles) = IdentityService::resolve(db, AuthPrincipal::Provider { attributes }).await?;

        // 4. Issue the session token
        let token = JwtUtils::generate_jwt(user.id, &user.username)
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "JWT_ERR", "Token generation failed".to_string()))?;

        Ok((token, user, roles))
    }

    fn create_client() -> Result<BasicClient, (StatusCode, &'static str, String)> {
        let cfg = Config::init();

        let auth_url = AuthUrl::new("https://accounts.google.com/o/oauth2/v2/auth".to_string())
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERR", "Invalid Google auth URL".to_string()))?;
        let token_url = TokenUrl::new("https://oauth2.googleapis.com/token".to_string())
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERR", "Invalid Google token URL".to_string()))?;
        let redirect_url = RedirectUrl::new(cfg.google_redirect_url)
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERR", "Invalid Google redirect URL".to_string()))?;

        Ok(BasicClient::new(
            ClientId::new(cfg.google_client_id),
            Some(ClientSecret::new(cfg.google_client_secret)),
            auth_url,
            Some(token_url),
        )
        .set_redirect_uri(redirect_url))
    }

    async fn fetch_profile(
        access_token: &str,
    ) -> Result<serde_json::Map<String, serde_json::Value>, (StatusCode, &'static str, String)> {
        #[derive(Deserialize)]
        struct GoogleUser {
            id: String,
            email: Option<String>,
            name: Option<String>,
            picture: Option<String>,
        }

        let http_client = ReqwestClient::new();
        let resp = http_client
            .get("https://www.googleapis.com/oauth2/v1/userinfo?alt=json")
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, "GOOGLE_API_ERR", format!("Failed to fetch Google profile: {}", e)))?;

        let profile: GoogleUser = resp.json().await
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, "JSON_ERR", format!("Failed to parse Google profile: {}", e)))?;

        let mut attributes = serde_json::Map::new();
        attributes.insert("sub".to_string(), json!(profile.id));
        if let Some(email) = profile.email {
            attributes.insert("email".to_string(), json!(email));
        }
        if let Some(name) = profile.name {
            attributes.insert("name".to_string(), json!(name));
        }
        if let Some(picture) = profile.picture {
            attributes.insert("picture".to_string(), json!(picture));
        }

        Ok(attributes)
    }
}
