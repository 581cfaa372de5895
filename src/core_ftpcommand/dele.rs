use crate::core_ftpcommand::utils::send_response;
use crate::core_storage::StorageDriver;
use crate::session::Session;
use log::{info, warn};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::Mutex;

/// Handles the DELE (Delete File) FTP command.
///
/// The file name is resolved against the current directory and handed to the
/// storage driver. Whatever the reason for a refusal, the client only sees a
/// uniform 550; containment of the path is the driver's business, not ours.
///
/// # Arguments
///
/// * `writer` - A shared, locked TCP stream for writing responses to the client.
/// * `session` - A shared, locked session containing the user's current state.
/// * `driver` - The storage backend performing the deletion.
/// * `arg` - The file name to delete.
///
/// # Returns
///
/// Result<(), std::io::Error> indicating the success or failure of the operation.
pub async fn handle_dele_command(
    writer: Arc<Mutex<TcpStream>>,
    session: Arc<Mutex<Session>>,
    driver: Arc<dyn StorageDriver>,
    arg: String,
) -> Result<(), std::io::Error> {
    let path = {
        let session = session.lock().await;
        session.build_path(&arg)
    };

    if driver.delete_file(&path) {
        info!("File deleted: {}", path);
        send_response(&writer, 250, "File deleted").await
    } else {
        warn!("File deletion refused: {}", path);
        send_response(&writer, 550, "Action not taken").await
    }
}
