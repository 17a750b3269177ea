//! # Skillboard Server
//!
//! Thin entry point that delegates to lib-web for server setup.

use lib_web::{start_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before reading the bind address
    dotenvy::dotenv().ok();

    start_server(ServerConfig::from_env()).await
}
