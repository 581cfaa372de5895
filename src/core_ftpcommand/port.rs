use crate::config::Config;
use crate::core_ftpcommand::utils::send_response;
use crate::core_network::active;
use crate::session::Session;
use log::{error, info, warn};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::Mutex;

/// Handles the PORT (Active Mode) FTP command.
///
/// The client has opened a listening socket and advertises it as six decimal
/// octets `h1,h2,h3,h4,p1,p2`; the server dials out to `h1.h2.h3.h4` on port
/// `p1*256 + p2`. IPv4 only. A successful dial replaces the session's data
/// connection (closing the previous one); a failed dial leaves it untouched.
pub async fn handle_port_command(
    writer: Arc<Mutex<TcpStream>>,
    config: Arc<Config>,
    session: Arc<Mutex<Session>>,
    arg: String,
) -> Result<(), std::io::Error> {
    let addr = match active::parse_port(&arg) {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Malformed PORT argument {:?}: {}", arg, e);
            return send_response(&writer, 501, "Syntax error in parameters").await;
        }
    };

    match active::dial_active(&addr.host, addr.port, config.dial_timeout()).await {
        Ok(conn) => {
            info!("PORT data connection established to {}:{}", addr.host, addr.port);
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
            error!("PORT dial to {}:{} failed: {}", addr.host, addr.port, e);
            send_response(&writer, 425, "Data connection failed").await
        }
    }
}
