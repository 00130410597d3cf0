//! `echoctl config ...`: inspect and edit the client config file.

use std::path::Path;

use anyhow::Result;

use crate::config::{ClientConfig, SERVER_ENV};

pub fn show(config_path: &Path) -> Result<()> {
    let config = ClientConfig::load(config_path)?;
    let mut shown = config.clone();
    if !shown.token.is_empty() {
        shown.token = "********".to_string();
    }
    println!("# {}", config_path.display());
    println!("# effective server: {}", config.server_url(std::env::var(SERVER_ENV).ok()));
    print!("{}", toml::to_string_pretty(&shown)?);
    Ok(())
}

pub fn set_server(url: &str, config_path: &Path) -> Result<()> {
    let url = url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        anyhow::bail!("Server URL must start with http:// or https://");
    }
    let mut config = ClientConfig::load(config_path)?;
    config.server = url.trim_end_matches('/').to_string();
    config.save(config_path)?;
    println!("Server set to {}.", config.server);
    Ok(())
}

pub fn set_token(token: &str, config_path: &Path) -> Result<()> {
    let mut config = ClientConfig::load(config_path)?;
    config.token = token.trim().to_string();
    config.save(config_path)?;
    if config.token.is_empty() {
        println!("Token cleared.");
    } else {
        println!("Token saved.");
    }
    Ok(())
}
