use crate::config::Config;
use crate::core_ftpcommand::handlers::{initialize_command_handlers, CommandSpec};
use crate::core_ftpcommand::utils::send_response;
use crate::core_storage::StorageDriver;
use crate::session::Session;
use anyhow::Result;
use log::{error, info};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

pub async fn start_server(config: Arc<Config>, driver: Arc<dyn StorageDriver>) -> Result<()> {
    let listener = TcpListener::bind(format!(
        "{}:{}",
        config.server.listen_address, config.server.listen_port
    ))
    .await?;
    info!("Server listening on port {}", config.server.listen_port);

    // Built once, shared read-only across all connections.
    let handlers = Arc::new(initialize_command_handlers());

    loop {
        let (socket, addr) = listener.accept().await?;
        info!("New connection from {}", addr);

        let config = Arc::clone(&config);
        let driver = Arc::clone(&driver);
        let handlers = Arc::clone(&handlers);
        let session = Arc::new(Mutex::new(Session::new()));

        tokio::spawn(async move {
            if let Err(e) = handle_connection(socket, config, session, driver, handlers).await {
                error!("Connection error: {:?}", e);
            }
            info!("Connection closed for {}", addr);
        });
    }
}

/// Per-connection command loop.
///
/// Commands are strictly serialized: one line is read, its handler runs to
/// completion (including any active-mode dial), exactly one response goes
/// out, then the next line is read. The registry is injected so tests can
/// drive the loop with a custom command set.
pub async fn handle_connection(
    socket: TcpStream,
    config: Arc<Config>,
    session: Arc<Mutex<Session>>,
    driver: Arc<dyn StorageDriver>,
    handlers: Arc<HashMap<&'static str, CommandSpec>>,
) -> Result<()> {
    let socket = Arc::new(Mutex::new(socket));
    send_response(&socket, 220, "Service ready").await?;

    let mut buffer = String::new();

    loop {
        buffer.clear();
        {
            let mut locked_socket = socket.lock().await;
            let mut reader = BufReader::new(&mut *locked_socket);
            let n = reader.read_line(&mut buffer).await?;
            if n == 0 {
                info!("Client disconnected");
                break;
            }
        }

        let line = buffer.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            continue;
        }
        info!("Received command: {}", line);

        // Arguments may contain spaces (paths), so only the verb is split off.
        let (verb, arg) = match line.split_once(' ') {
            Some((verb, arg)) => (verb.to_ascii_uppercase(), arg.trim()),
            None => (line.to_ascii_uppercase(), ""),
        };

        if verb == "QUIT" {
            send_response(&socket, 221, "Goodbye").await?;
            break;
        }

        match handlers.get(verb.as_str()) {
            Some(spec) => {
                if spec.require_param && arg.is_empty() {
                    send_response(&socket, 501, "Syntax error in parameters").await?;
                    continue;
                }
                if spec.require_auth && !session.lock().await.authenticated {
                    send_response(&socket, 530, "Not logged in").await?;
                    continue;
                }
                if let Err(e) = (spec.execute)(
                    Arc::clone(&socket),
                    Arc::clone(&config),
                    Arc::clone(&session),
                    Arc::clone(&driver),
                    arg.to_string(),
                )
                .await
                {
                    error!("Error handling command {}: {:?}", verb, e);
                    break;
                }
            }
            None => {
                send_response(&socket, 500, "Command not found").await?;
            }
        }
    }
    Ok(())
}
