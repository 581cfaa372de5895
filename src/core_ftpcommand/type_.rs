use crate::core_ftpcommand::utils::send_response;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::Mutex;

/// Handles the TYPE FTP command.
///
/// ASCII and Image are acknowledged for protocol compliance only; transfers
/// treat everything as raw bytes, so the selection is not recorded anywhere.
pub async fn handle_type_command(
    writer: Arc<Mutex<TcpStream>>,
    arg: String,
) -> Result<(), std::io::Error> {
    if arg.eq_ignore_ascii_case("A") {
        send_response(&writer, 200, "Type set to ASCII").await
    } else if arg.eq_ignore_ascii_case("I") {
        send_response(&writer, 200, "Type set to binary").await
    } else {
        send_response(&writer, 500, "Invalid type").await
    }
}
