use crate::config::Config;
use crate::core_network::network;
use crate::core_storage::DiskDriver;
use anyhow::{Context, Result};
use log::info;
use std::sync::Arc;

/// Runs the FTP server with the provided configuration.
///
/// Creates the storage root if it does not exist, then hands off to the
/// network layer.
pub async fn run(config: Config) -> Result<()> {
    info!("Starting server with config: {:?}", config);

    let root = std::path::PathBuf::from(&config.server.chroot_dir);
    std::fs::create_dir_all(&root)
        .with_context(|| format!("Failed to create storage root: {:?}", root))?;
    let driver = Arc::new(DiskDriver::new(root));

    network::start_server(Arc::new(config), driver).await
}
