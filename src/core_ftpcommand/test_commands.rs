use crate::config::Config;
use crate::core_ftpcommand::handlers::initialize_command_handlers;
use crate::core_storage::StorageDriver;
use crate::session::Session;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

/// Driver stub with fixed outcomes that records every path it was asked
/// about, so tests can check both the response and the path handed across
/// the storage seam.
struct StubDriver {
    accept: bool,
    calls: StdMutex<Vec<String>>,
}

impl StubDriver {
    fn accepting() -> Arc<Self> {
        Arc::new(Self {
            accept: true,
            calls: StdMutex::new(Vec::new()),
        })
    }

    fn refusing() -> Arc<Self> {
        Arc::new(Self {
            accept: false,
            calls: StdMutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, op: &str, path: &str) -> bool {
        self.calls.lock().unwrap().push(format!("{} {}", op, path));
        self.accept
    }
}

impl StorageDriver for StubDriver {
    fn change_dir(&self, path: &str) -> bool {
        self.record("change_dir", path)
    }

    fn delete_file(&self, path: &str) -> bool {
        self.record("delete_file", path)
    }

    fn delete_dir(&self, path: &str) -> bool {
        self.record("delete_dir", path)
    }
}

async fn socket_pair() -> (TcpStream, TcpStream) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let client = TcpStream::connect(addr).await.unwrap();
    let (server, _) = listener.accept().await.unwrap();
    (server, client)
}

async fn read_reply(client: &mut TcpStream) -> String {
    let mut reader = BufReader::new(client);
    let mut line = String::new();
    reader.read_line(&mut line).await.unwrap();
    line
}

/// Runs one verb through the registry against a fresh socket pair and
/// returns the wire reply.
async fn run_command(
    verb: &str,
    arg: &str,
    session: &Arc<Mutex<Session>>,
    driver: Arc<dyn StorageDriver>,
) -> String {
    let handlers = initialize_command_handlers();
    let spec = handlers.get(verb).expect("verb not registered");
    let (server, mut client) = socket_pair().await;
    let writer = Arc::new(Mutex::new(server));
    let config = Arc::new(Config::default());

    (spec.execute)(
        writer,
        config,
        Arc::clone(session),
        driver,
        arg.to_string(),
    )
    .await
    .unwrap();

    read_reply(&mut client).await
}

fn fresh_session() -> Arc<Mutex<Session>> {
    Arc::new(Mutex::new(Session::new()))
}

#[tokio::test]
async fn cwd_success_moves_name_prefix() {
    let session = fresh_session();
    let driver = StubDriver::accepting();

    let reply = run_command("CWD", "pub", &session, driver.clone()).await;
    assert_eq!(reply, "250 Directory changed to /pub\r\n");
    assert_eq!(session.lock().await.name_prefix, "/pub");
    assert_eq!(driver.calls(), vec!["change_dir /pub"]);
}

#[tokio::test]
async fn cwd_failure_leaves_name_prefix_untouched() {
    let session = fresh_session();
    session.lock().await.name_prefix = String::from("/files");
    let driver = StubDriver::refusing();

    let reply = run_command("CWD", "missing", &session, driver).await;
    assert_eq!(reply, "550 Action not taken\r\n");
    assert_eq!(session.lock().await.name_prefix, "/files");
}

#[tokio::test]
async fn cwd_accepts_absolute_paths() {
    let session = fresh_session();
    session.lock().await.name_prefix = String::from("/files/music");
    let driver = StubDriver::accepting();

    let reply = run_command("CWD", "/incoming", &session, driver.clone()).await;
    assert_eq!(reply, "250 Directory changed to /incoming\r\n");
    assert_eq!(driver.calls(), vec!["change_dir /incoming"]);
}

#[tokio::test]
async fn cdup_is_identical_to_cwd_dotdot() {
    for verb in ["CDUP", "XCUP"] {
        let session_a = fresh_session();
        session_a.lock().await.name_prefix = String::from("/files/music");
        let session_b = fresh_session();
        session_b.lock().await.name_prefix = String::from("/files/music");

        let reply_a = run_command(verb, "", &session_a, StubDriver::accepting()).await;
        let reply_b = run_command("CWD", "..", &session_b, StubDriver::accepting()).await;

        assert_eq!(reply_a, reply_b);
        assert_eq!(
            session_a.lock().await.name_prefix,
            session_b.lock().await.name_prefix
        );
        assert_eq!(session_a.lock().await.name_prefix, "/files");
    }
}

#[tokio::test]
async fn cdup_ignores_its_argument() {
    let session = fresh_session();
    session.lock().await.name_prefix = String::from("/files/music");

    let reply = run_command("CDUP", "somewhere", &session, StubDriver::accepting()).await;
    assert_eq!(reply, "250 Directory changed to /files\r\n");
}

#[tokio::test]
async fn xcwd_matches_cwd() {
    let session_a = fresh_session();
    let session_b = fresh_session();

    let reply_a = run_command("XCWD", "pub", &session_a, StubDriver::accepting()).await;
    let reply_b = run_command("CWD", "pub", &session_b, StubDriver::accepting()).await;
    assert_eq!(reply_a, reply_b);
}

#[tokio::test]
async fn dele_reports_outcomes() {
    let session = fresh_session();
    let driver = StubDriver::accepting();
    let reply = run_command("DELE", "old.txt", &session, driver.clone()).await;
    assert_eq!(reply, "250 File deleted\r\n");
    assert_eq!(driver.calls(), vec!["delete_file /old.txt"]);

    let reply = run_command("DELE", "old.txt", &session, StubDriver::refusing()).await;
    assert_eq!(reply, "550 Action not taken\r\n");
}

#[tokio::test]
async fn rmd_and_xrmd_report_identical_outcomes() {
    for verb in ["RMD", "XRMD"] {
        let session = fresh_session();
        let driver = StubDriver::accepting();
        let reply = run_command(verb, "stale", &session, driver.clone()).await;
        assert_eq!(reply, "250 Directory deleted\r\n");
        assert_eq!(driver.calls(), vec!["delete_dir /stale"]);

        let reply = run_command(verb, "stale", &session, StubDriver::refusing()).await;
        assert_eq!(reply, "550 Action not taken\r\n");
    }
}

#[tokio::test]
async fn mode_accepts_stream_only() {
    let session = fresh_session();
    for arg in ["S", "s"] {
        let reply = run_command("MODE", arg, &session, StubDriver::accepting()).await;
        assert_eq!(reply, "200 OK\r\n");
    }
    for arg in ["B", "C", "stream", ""] {
        let reply = run_command("MODE", arg, &session, StubDriver::accepting()).await;
        assert_eq!(reply, "504 MODE is an obsolete command\r\n");
    }
}

#[tokio::test]
async fn type_acknowledges_ascii_and_binary() {
    let session = fresh_session();
    for arg in ["A", "a"] {
        let reply = run_command("TYPE", arg, &session, StubDriver::accepting()).await;
        assert_eq!(reply, "200 Type set to ASCII\r\n");
    }
    for arg in ["I", "i"] {
        let reply = run_command("TYPE", arg, &session, StubDriver::accepting()).await;
        assert_eq!(reply, "200 Type set to binary\r\n");
    }
    let reply = run_command("TYPE", "X", &session, StubDriver::accepting()).await;
    assert_eq!(reply, "500 Invalid type\r\n");
}

#[tokio::test]
async fn syst_identifies_as_unix() {
    let session = fresh_session();
    let reply = run_command("SYST", "", &session, StubDriver::accepting()).await;
    assert_eq!(reply, "215 UNIX Type: L8\r\n");
}

#[tokio::test]
async fn noop_and_allo_never_mutate_session() {
    let session = fresh_session();
    session.lock().await.name_prefix = String::from("/files");
    let driver = StubDriver::accepting();

    for _ in 0..3 {
        let reply = run_command("NOOP", "", &session, driver.clone()).await;
        assert_eq!(reply, "200 OK\r\n");
        let reply = run_command("ALLO", "1024", &session, driver.clone()).await;
        assert_eq!(reply, "202 Obsolete\r\n");
    }

    let session = session.lock().await;
    assert_eq!(session.name_prefix, "/files");
    assert!(session.data_conn.is_none());
    assert!(driver.calls().is_empty());
}

#[tokio::test]
async fn port_dial_success_installs_data_conn() {
    let session = fresh_session();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let arg = format!("127,0,0,1,{},{}", port / 256, port % 256);

    let reply = run_command("PORT", &arg, &session, StubDriver::accepting()).await;
    assert_eq!(reply, format!("200 Connection established ({})\r\n", port));
    assert!(session.lock().await.data_conn.is_some());
}

#[tokio::test]
async fn port_dial_failure_keeps_existing_data_conn() {
    let session = fresh_session();

    // Preload a data connection, then aim PORT at a dead ephemeral port.
    let (existing, _peer) = socket_pair().await;
    session.lock().await.install_data_conn(existing);

    let dead_port = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    };
    let arg = format!("127,0,0,1,{},{}", dead_port / 256, dead_port % 256);

    let reply = run_command("PORT", &arg, &session, StubDriver::accepting()).await;
    assert_eq!(reply, "425 Data connection failed\r\n");
    assert!(session.lock().await.data_conn.is_some());
}

#[tokio::test]
async fn port_malformed_argument_is_a_syntax_error() {
    let session = fresh_session();
    for arg in ["127,0,0,1,80", "nonsense", "1,2,3,4,5,6,7"] {
        let reply = run_command("PORT", arg, &session, StubDriver::accepting()).await;
        assert_eq!(reply, "501 Syntax error in parameters\r\n");
    }
    assert!(session.lock().await.data_conn.is_none());
}

#[tokio::test]
async fn eprt_dial_success_installs_data_conn() {
    let session = fresh_session();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let arg = format!("|1|127.0.0.1|{}|", port);

    let reply = run_command("EPRT", &arg, &session, StubDriver::accepting()).await;
    assert_eq!(reply, format!("200 Connection established ({})\r\n", port));
    assert!(session.lock().await.data_conn.is_some());
}

#[tokio::test]
async fn eprt_replaces_and_closes_previous_data_conn() {
    let session = fresh_session();
    let (existing, mut old_peer) = socket_pair().await;
    session.lock().await.install_data_conn(existing);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let arg = format!("|1|127.0.0.1|{}|", port);

    let reply = run_command("EPRT", &arg, &session, StubDriver::accepting()).await;
    assert_eq!(reply, format!("200 Connection established ({})\r\n", port));

    // The replaced socket is closed, so its peer reads EOF.
    let mut buf = [0u8; 1];
    let n = old_peer.read(&mut buf).await.unwrap();
    assert_eq!(n, 0);
}

#[tokio::test]
async fn eprt_unsupported_family_never_dials() {
    let session = fresh_session();
    let reply = run_command("EPRT", "|3|192.168.1.5|2121|", &session, StubDriver::accepting())
        .await;
    assert_eq!(reply, "522 Network protocol not supported, use (1,2)\r\n");
    assert!(session.lock().await.data_conn.is_none());
}

#[tokio::test]
async fn eprt_malformed_argument_is_a_syntax_error() {
    let session = fresh_session();
    for arg in ["", "|1|", "|1|127.0.0.1", "|1|127.0.0.1|badport|"] {
        let reply = run_command("EPRT", arg, &session, StubDriver::accepting()).await;
        assert_eq!(reply, "501 Syntax error in parameters\r\n");
    }
    assert!(session.lock().await.data_conn.is_none());
}

#[tokio::test]
async fn eprt_dial_failure_keeps_existing_data_conn() {
    let session = fresh_session();
    let (existing, _peer) = socket_pair().await;
    session.lock().await.install_data_conn(existing);

    let dead_port = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    };
    let arg = format!("|1|127.0.0.1|{}|", dead_port);

    let reply = run_command("EPRT", &arg, &session, StubDriver::accepting()).await;
    assert_eq!(reply, "425 Data connection failed\r\n");
    assert!(session.lock().await.data_conn.is_some());
}
