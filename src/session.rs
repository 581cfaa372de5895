use tokio::net::TcpStream;

/// Per-connection control-channel state.
///
/// One `Session` exists per accepted client connection and dies with it.
/// Only two commands mutate it: CWD (and its aliases) rewrites `name_prefix`,
/// EPRT/PORT replace `data_conn`.
#[derive(Debug)]
pub struct Session {
    /// Current working directory, always an absolute virtual path.
    /// Invariant: equals the last path the storage driver accepted.
    pub name_prefix: String,
    /// Active-mode data connection awaiting a transfer command.
    pub data_conn: Option<TcpStream>,
    /// Reserved for handlers declaring `require_auth`; the login flow
    /// itself lives outside this core.
    pub authenticated: bool,
}

impl Session {
    pub fn new() -> Self {
        Self {
            name_prefix: String::from("/"),
            data_conn: None,
            authenticated: false,
        }
    }

    /// Resolves a command parameter against the current working directory.
    ///
    /// An empty parameter yields the current directory, an absolute parameter
    /// replaces it, anything else is joined onto it. `.` and `..` segments
    /// are normalized and never ascend above `/`.
    pub fn build_path(&self, param: &str) -> String {
        if param.is_empty() {
            clean_path(&self.name_prefix)
        } else if param.starts_with('/') {
            clean_path(param)
        } else {
            clean_path(&format!("{}/{}", self.name_prefix, param))
        }
    }

    /// Installs a freshly dialed data connection, closing any previous one
    /// first so a re-issued EPRT/PORT cannot leak the older socket.
    pub fn install_data_conn(&mut self, conn: TcpStream) {
        if let Some(old) = self.data_conn.take() {
            drop(old);
        }
        self.data_conn = Some(conn);
    }
}

/// Normalizes an absolute virtual path: collapses repeated slashes, resolves
/// `.` and `..`, clamps at the root.
fn clean_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    if segments.is_empty() {
        String::from("/")
    } else {
        format!("/{}", segments.join("/"))
    }
}
