use crate::{web, Config};
use anyhow::Result;
use std::path::Path;

pub async fn run(config_path: &Path, host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = Config::load(config_path)?;

    if config.auth.admin_password.is_none() {
        tracing::warn!(
            "No admin password configured; set ADMIN_PASSWORD to enable admin login"
        );
    }

    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);
    let addr = format!("{}:{}", host, port);
    tracing::info!("Starting server at http://{}", addr);

    web::serve(config, &addr).await?;

    Ok(())
}
