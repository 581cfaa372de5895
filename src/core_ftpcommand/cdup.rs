use crate::core_ftpcommand::cwd::handle_cwd_command;
use crate::core_storage::StorageDriver;
use crate::session::Session;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::Mutex;

/// Handles the CDUP (Change to Parent Directory) FTP command, and XCUP via
/// the same registry entry.
///
/// CDUP carries no logic of its own: it is CWD with a fixed `..` parameter,
/// so responses and state changes are byte-identical to `CWD ..`.
pub async fn handle_cdup_command(
    writer: Arc<Mutex<TcpStream>>,
    session: Arc<Mutex<Session>>,
    driver: Arc<dyn StorageDriver>,
    _arg: String,
) -> Result<(), std::io::Error> {
    handle_cwd_command(writer, session, driver, String::from("..")).await
}
