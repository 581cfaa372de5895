use crate::core_ftpcommand::utils::send_response;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::Mutex;

/// Handles the NOOP FTP command: a keep-alive ping, nothing more.
pub async fn handle_noop_command(
    writer: Arc<Mutex<TcpStream>>,
    _arg: String,
) -> Result<(), std::io::Error> {
    send_response(&writer, 200, "OK").await
}
