use std::path::PathBuf;

use devproxy_core::config::load_config;
use devproxy_core::proxy::ProxyServer;

pub async fn run(
    config_path: Option<PathBuf>,
    port_override: Option<u16>,
    dev_server_override: Option<String>,
) -> anyhow::Result<()> {
    // Load configuration
    let mut config = load_config(config_path)?;

    // Apply overrides if provided
    if let Some(port) = port_override {
        config.server.port = port;
    }
    if let Some(url) = dev_server_override {
        config.dev_server.url = url;
    }

    let host = config.server.bind_host().to_string();

    tracing::info!("Starting dev proxy...");
    tracing::info!("  Port: {}", config.server.port);
    tracing::info!("  Host: {}", host);
    tracing::info!("  Dev server: {}", config.dev_server.url);
    tracing::info!("  Prefix: {}", config.dev_server.prefix);

    if !config.dev_server.has_absolute_url() {
        tracing::warn!(
            "Dev server URL {:?} is not an absolute URL; redirects will use it verbatim.",
            config.dev_server.url
        );
    }

    let server = ProxyServer::new(host.clone(), config.server.port, config.dev_server.redirector());

    tracing::info!("Proxy server starting on http://{}:{}", host, config.server.port);
    tracing::info!("Press Ctrl+C to stop");

    // Run server (blocks until shutdown)
    server.run().await?;

    Ok(())
}
