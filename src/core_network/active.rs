use log::debug;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpStream;

/// Failures while parsing an EPRT/PORT argument.
///
/// `Syntax` maps to 501 on the wire, `UnsupportedProtocol` to 522.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressParseError {
    #[error("malformed address argument: {0}")]
    Syntax(String),
    #[error("unsupported network protocol: {0}")]
    UnsupportedProtocol(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
}

/// Client-advertised endpoint for an active-mode data connection.
/// Produced per EPRT/PORT invocation and discarded after the dial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveAddress {
    pub family: AddressFamily,
    pub host: String,
    pub port: u16,
}

/// Parses an EPRT argument such as `|1|192.168.1.5|2121|`.
///
/// The first character is the field delimiter; splitting yields an empty
/// leading field, the address family, the host, and the port. The family is
/// checked before the port so an unsupported protocol is reported even when
/// the rest of the argument is junk. The host is kept verbatim.
pub fn parse_eprt(arg: &str) -> Result<ActiveAddress, AddressParseError> {
    let delim = arg
        .chars()
        .next()
        .ok_or_else(|| AddressParseError::Syntax(String::from("empty argument")))?;
    let parts: Vec<&str> = arg.split(delim).collect();
    if parts.len() < 4 || !parts[0].is_empty() {
        return Err(AddressParseError::Syntax(format!(
            "expected |family|host|port|, got {:?}",
            arg
        )));
    }

    let family = match parts[1] {
        "1" => AddressFamily::Ipv4,
        "2" => AddressFamily::Ipv6,
        other => return Err(AddressParseError::UnsupportedProtocol(other.to_string())),
    };

    let host = parts[2];
    if host.is_empty() {
        return Err(AddressParseError::Syntax(String::from("empty host field")));
    }

    let port: u16 = parts[3]
        .parse()
        .map_err(|_| AddressParseError::Syntax(format!("invalid port field: {:?}", parts[3])))?;

    Ok(ActiveAddress {
        family,
        host: host.to_string(),
        port,
    })
}

/// Parses a PORT argument: six decimal octets `h1,h2,h3,h4,p1,p2`.
///
/// The host is the dotted quad, the port is the big-endian split across the
/// last two octets. PORT is IPv4 only.
pub fn parse_port(arg: &str) -> Result<ActiveAddress, AddressParseError> {
    let parts: Vec<&str> = arg.split(',').collect();
    if parts.len() != 6 {
        return Err(AddressParseError::Syntax(format!(
            "expected 6 comma-separated octets, got {}",
            parts.len()
        )));
    }

    let octets: Vec<u8> = parts
        .iter()
        .map(|p| p.trim().parse::<u8>())
        .collect::<Result<_, _>>()
        .map_err(|_| AddressParseError::Syntax(format!("invalid octet in {:?}", arg)))?;

    let host = format!("{}.{}.{}.{}", octets[0], octets[1], octets[2], octets[3]);
    let port = (octets[4] as u16) << 8 | octets[5] as u16;

    Ok(ActiveAddress {
        family: AddressFamily::Ipv4,
        host,
        port,
    })
}

/// Dials out to the client's advertised data listener.
///
/// Active mode inverts the usual roles: the server connects to the client.
/// The dial is bounded by `timeout` so a dead listener cannot stall the
/// connection's command loop indefinitely.
pub async fn dial_active(host: &str, port: u16, timeout: Duration) -> std::io::Result<TcpStream> {
    let ip: IpAddr = host.parse().map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("invalid host {:?}: {}", host, e),
        )
    })?;
    let addr = SocketAddr::new(ip, port);
    debug!("Dialing active data connection to {}", addr);

    match tokio::time::timeout(timeout, TcpStream::connect(addr)).await {
        Ok(result) => result,
        Err(_) => Err(std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            format!("dial to {} timed out", addr),
        )),
    }
}
