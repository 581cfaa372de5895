use crate::config::Config;
use crate::core_ftpcommand::utils::send_response;
use crate::core_network::active::{self, AddressParseError};
use crate::session::Session;
use log::{error, info, warn};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::Mutex;

/// Handles the EPRT (Extended Port) FTP command.
///
/// EPRT is PORT with protocol selection: the client advertises a listening
/// endpoint as `<d><family><d><host><d><port><d>` and the server dials out
/// to it. Family 1 is IPv4, family 2 is IPv6; anything else is refused with
/// 522 before any dial. A successful dial replaces the session's data
/// connection (closing the previous one); a failed dial leaves it untouched.
///
/// # Arguments
///
/// * `writer` - A shared, locked TCP stream for writing responses to the client.
/// * `config` - A shared server configuration (dial timeout).
/// * `session` - A shared, locked session owning the data connection.
/// * `arg` - The delimited address argument.
///
/// # Returns
///
/// Result<(), std::io::Error> indicating the success or failure of the operation.
pub async fn handle_eprt_command(
    writer: Arc<Mutex<TcpStream>>,
    config: Arc<Config>,
    session: Arc<Mutex<Session>>,
    arg: String,
) -> Result<(), std::io::Error> {
    let addr = match active::parse_eprt(&arg) {
        Ok(addr) => addr,
        Err(AddressParseError::UnsupportedProtocol(family)) => {
            warn!("EPRT with unsupported protocol {}", family);
            return send_response(&writer, 522, "Network protocol not supported, use (1,2)")
                .await;
        }
        Err(e) => {
            warn!("Malformed EPRT argument {:?}: {}", arg, e);
            return send_response(&writer, 501, "Syntax error in parameters").await;
        }
    };

    match active::dial_active(&addr.host, addr.port, config.dial_timeout()).await {
        Ok(conn) => {
            info!("EPRT data connection established to {}:{}", addr.host, addr.port);
            {
                let mut session = session.lock().await;
                session.install_data_conn(conn);
            }
            send_response(
                &writer,
                200,
                &format!("Connection established ({})", addr.port),
            )
            .await
        }
        Err(e) => {
            error!(
                "EPRT dial to {}:{} failed: {}",
                addr.host, addr.port, e
            );
            send_response(&writer, 425, "Data connection failed").await
        }
    }
}
