use crate::core_ftpcommand::utils::send_response;
use log::info;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::Mutex;

/// Handles the ALLO (Allocate) FTP command.
///
/// Storage pre-allocation is a relic; the request is acknowledged as
/// obsolete and otherwise ignored. No session state is touched.
pub async fn handle_allo_command(
    writer: Arc<Mutex<TcpStream>>,
    _arg: String,
) -> Result<(), std::io::Error> {
    info!("Received ALLO command, acknowledging as obsolete");
    send_response(&writer, 202, "Obsolete").await
}
