mod config;
mod entities;
mod handlers;
mod middleware;
mod models;
mod repositories;
mod routes;
mod seeders;
mod services;
mod utils;

use std::net::SocketAddr;

use config::{AppState, Config};
use dotenvy::dotenv;
use sea_orm::Database;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt::init();

    let cfg = Config::init();
    println!("🚀 Starting OhMyImage Backend...");

    // 1. Database connection
    println!("📡 Connecting to Database...");
    let db = Database::connect(&cfg.database_url)
        .await
        .expect("🔥 Failed to connect to Database!");
    println!("✅ Database Connected!");

    // 2. Database seeding (roles + protected admin account)
    println!("🌱 Running Seeders...");
    if let Err(e) = seeders::run_seeders(&db).await {
        tracing::error!("❌ Seeding failed: {}", e);
    } else {
        println!("✅ Seeding Successful!");
    }

    // 3. Services
    let email_service = services::email_service::EmailService::new(&cfg);

    // 4. App state
    let state = AppState { db, email_service };

    // 5. Router
    let app = routes::create_routes(state.clone()).with_state(state);

    // 6. Start server
    let addr_str = format!("{}:{}", cfg.server_host, cfg.server_port);
    let addr: SocketAddr = addr_str.parse().expect("Invalid address");

    println!("🎯 Server ready! Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("🔥 Failed to bind address");
    axum::serve(listener, app).await.expect("Server error");
}
