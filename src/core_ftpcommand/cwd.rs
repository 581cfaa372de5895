use crate::core_ftpcommand::utils::send_response;
use crate::core_storage::StorageDriver;
use crate::session::Session;
use log::{info, warn};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::Mutex;

/// Handles the CWD (Change Working Directory) FTP command, and XCWD via the
/// same registry entry.
///
/// The parameter is resolved against the session's current directory and
/// offered to the storage driver. Only on acceptance does the session's
/// `name_prefix` move, and it moves to exactly the path the driver accepted;
/// a rejected change leaves it untouched.
///
/// # Arguments
///
/// * `writer` - A shared, locked TCP stream for writing responses to the client.
/// * `session` - A shared, locked session containing the user's current state.
/// * `driver` - The storage backend deciding whether the directory exists.
/// * `arg` - The target directory, absolute or relative.
///
/// # Returns
///
/// Result<(), std::io::Error> indicating the success or failure of the operation.
pub async fn handle_cwd_command(
    writer: Arc<Mutex<TcpStream>>,
    session: Arc<Mutex<Session>>,
    driver: Arc<dyn StorageDriver>,
    arg: String,
) -> Result<(), std::io::Error> {
    let path = {
        let session = session.lock().await;
        session.build_path(&arg)
    };

    if driver.change_dir(&path) {
        {
            let mut session = session.lock().await;
            session.name_prefix = path.clone();
        }
        info!("Directory changed to {}", path);
        send_response(&writer, 250, &format!("Directory changed to {}", path)).await
    } else {
        warn!("Directory change to {} refused", path);
        send_response(&writer, 550, "Action not taken").await
    }
}
