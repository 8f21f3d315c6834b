use std::env;
use sea_orm::DatabaseConnection;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expires_in: i64,
    pub app_base_url: String,
    pub smtp_from: String,
    pub brevo_api_key: String,
    pub google_client_id: String,
    pub google_client_secret: String,
    pub google_redirect_url: String,
    pub max_image_bytes: usize,
    pub admin_password: String,
}

#[derive(Clone, axum::extract::FromRef)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub email_service: crate::services::email_service::EmailService,
}

impl Config {
    pub fn init() -> Config {
        let server_host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .expect("PORT must be a number");

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in .env");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set in .env");
        let jwt_expires_in = env::var("JWT_EXPIRATION_MINUTES")
            .unwrap_or_else(|_| "60".to_string())
            .parse::<i64>()
            .expect("JWT_EXPIRATION_MINUTES must be a number");

        let app_base_url =
            env::var("APP_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let smtp_from = env::var("SMTP_FROM").unwrap_or_else(|_| "admin@ohmyimage.dev".to_string());
        let brevo_api_key = env::var("BREVO_API_KEY").unwrap_or_default();

        let google_client_id = env::var("GOOGLE_CLIENT_ID").unwrap_or_default();
        let google_client_secret = env::var("GOOGLE_CLIENT_SECRET").unwrap_or_default();
        let google_redirect_url = env::var("GOOGLE_REDIRECT_URL").unwrap_or_else(|_| {
            "http://localhost:3000/api/auth/oauth/google/callback".to_string()
        });

        // Upload cap: pins are read fully into memory before persistence
        let max_image_bytes = env::var("MAX_IMAGE_BYTES")
            .unwrap_or_else(|_| (5 * 1024 * 1024).to_string())
            .parse::<usize>()
            .expect("MAX_IMAGE_BYTES must be a number");

        let admin_password = env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin12345".to_string());

        Config {
            server_host,
            server_port,
            database_url,
            jwt_secret,
            jwt_expires_in,
            app_base_url,
            smtp_from,
            brevo_api_key,
            google_client_id,
            google_client_secret,
            google_redirect_url,
            max_image_bytes,
            admin_password,
        }
    }
}
