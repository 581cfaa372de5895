use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::Mutex;

/// Writes a single status line to the control channel:
/// `<3-digit code><space><text>\r\n`, in one write.
pub async fn send_response(
    writer: &Arc<Mutex<TcpStream>>,
    code: u16,
    text: &str,
) -> Result<(), std::io::Error> {
    let line = format!("{} {}\r\n", code, text);
    let mut writer = writer.lock().await;
    writer.write_all(line.as_bytes()).await?;
    Ok(())
}
