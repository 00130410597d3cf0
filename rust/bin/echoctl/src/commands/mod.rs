pub mod config;
pub mod feed;
pub mod suggest;

use std::sync::Arc;

use echo_client::{EchoClient, NoAuth, StaticToken, TokenSource};
use echo_inbox::{CommandClipboard, InteractionFeed};

use crate::config::{ClientConfig, SERVER_ENV};

/// HTTP client for the configured server and token.
pub fn build_client(config: &ClientConfig) -> Arc<EchoClient> {
    let server = config.server_url(std::env::var(SERVER_ENV).ok());
    let token_source: Arc<dyn TokenSource> = if config.token.is_empty() {
        Arc::new(NoAuth)
    } else {
        Arc::new(StaticToken::new(config.token.clone()))
    };
    tracing::debug!(%server, "using server");
    Arc::new(EchoClient::new(server, token_source))
}

pub fn build_feed(config: &ClientConfig, client: Arc<EchoClient>) -> InteractionFeed {
    InteractionFeed::new(client, Arc::new(CommandClipboard::detect()), config.feed.clone())
}
