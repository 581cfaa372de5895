use crate::core_ftpcommand::utils::send_response;
use crate::core_storage::StorageDriver;
use crate::session::Session;
use log::{info, warn};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::Mutex;

/// Handles the RMD (Remove Directory) FTP command, and XRMD via the same
/// registry entry.
///
/// Non-recursive by contract: the driver is asked to remove exactly the
/// named directory and reports a bare boolean back.
pub async fn handle_rmd_command(
    writer: Arc<Mutex<TcpStream>>,
    session: Arc<Mutex<Session>>,
    driver: Arc<dyn StorageDriver>,
    arg: String,
) -> Result<(), std::io::Error> {
    let path = {
        let session = session.lock().await;
        session.build_path(&arg)
    };

    if driver.delete_dir(&path) {
        info!("Directory deleted: {}", path);
        send_response(&writer, 250, "Directory deleted").await
    } else {
        warn!("Directory deletion refused: {}", path);
        send_response(&writer, 550, "Action not taken").await
    }
}
