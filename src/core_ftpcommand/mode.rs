use crate::core_ftpcommand::utils::send_response;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::Mutex;

/// Handles the MODE FTP command.
///
/// Only (S)tream mode survives in practice; the historical Block and
/// Compressed modes are refused.
pub async fn handle_mode_command(
    writer: Arc<Mutex<TcpStream>>,
    arg: String,
) -> Result<(), std::io::Error> {
    if arg.eq_ignore_ascii_case("S") {
        send_response(&writer, 200, "OK").await
    } else {
        send_response(&writer, 504, "MODE is an obsolete command").await
    }
}
