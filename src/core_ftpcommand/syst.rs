use crate::core_ftpcommand::utils::send_response;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::Mutex;

/// Handles the SYST (System) FTP command.
///
/// Clients use the reply to pick a listing-format heuristic, so the canned
/// UNIX identification is what they expect; it implies no OS-specific
/// behavior on our side.
pub async fn handle_syst_command(writer: Arc<Mutex<TcpStream>>) -> Result<(), std::io::Error> {
    send_response(&writer, 215, "UNIX Type: L8").await
}
