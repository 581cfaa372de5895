use crate::config::Config;
use crate::core_storage::StorageDriver;
use crate::session::Session;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::Mutex;

pub type CommandHandler = Box<
    dyn Fn(
            Arc<Mutex<TcpStream>>,      // Control-channel writer
            Arc<Config>,                // Server configuration
            Arc<Mutex<Session>>,        // Per-connection session state
            Arc<dyn StorageDriver>,     // File-system backend
            String,                     // Command argument
        ) -> Pin<Box<dyn Future<Output = Result<(), std::io::Error>> + Send>>
        + Send
        + Sync,
>;

/// One registry entry: precondition flags plus the behavior.
///
/// The flags are enforced by the connection loop before `execute` runs, so
/// handler bodies never re-check them. Every current command has both flags
/// false; the contract still supports true for commands added later.
pub struct CommandSpec {
    pub require_param: bool,
    pub require_auth: bool,
    pub execute: CommandHandler,
}

impl CommandSpec {
    fn new(execute: CommandHandler) -> Self {
        Self {
            require_param: false,
            require_auth: false,
            execute,
        }
    }
}

/// Builds the immutable verb-to-handler table.
///
/// Lookup is by exact uppercase verb. Alias verbs (XCWD, XCUP, XRMD) are
/// separate entries sharing the aliased behavior, so the pairs cannot drift
/// apart; CDUP and XCUP go through the CWD handler with a fixed `..`.
pub fn initialize_command_handlers() -> HashMap<&'static str, CommandSpec> {
    let mut handlers: HashMap<&'static str, CommandSpec> = HashMap::new();

    handlers.insert(
        "ALLO",
        CommandSpec::new(Box::new(|writer, _config, _session, _driver, arg| {
            Box::pin(crate::core_ftpcommand::allo::handle_allo_command(
                writer, arg,
            ))
        })),
    );

    handlers.insert("CDUP", CommandSpec::new(cdup_handler()));
    handlers.insert("XCUP", CommandSpec::new(cdup_handler()));

    handlers.insert("CWD", CommandSpec::new(cwd_handler()));
    handlers.insert("XCWD", CommandSpec::new(cwd_handler()));

    handlers.insert(
        "DELE",
        CommandSpec::new(Box::new(|writer, _config, session, driver, arg| {
            Box::pin(crate::core_ftpcommand::dele::handle_dele_command(
                writer, session, driver, arg,
            ))
        })),
    );

    handlers.insert(
        "EPRT",
        CommandSpec::new(Box::new(|writer, config, session, _driver, arg| {
            Box::pin(crate::core_ftpcommand::eprt::handle_eprt_command(
                writer, config, session, arg,
            ))
        })),
    );

    handlers.insert(
        "MODE",
        CommandSpec::new(Box::new(|writer, _config, _session, _driver, arg| {
            Box::pin(crate::core_ftpcommand::mode::handle_mode_command(
                writer, arg,
            ))
        })),
    );

    handlers.insert(
        "NOOP",
        CommandSpec::new(Box::new(|writer, _config, _session, _driver, arg| {
            Box::pin(crate::core_ftpcommand::noop::handle_noop_command(
                writer, arg,
            ))
        })),
    );

    handlers.insert(
        "PORT",
        CommandSpec::new(Box::new(|writer, config, session, _driver, arg| {
            Box::pin(crate::core_ftpcommand::port::handle_port_command(
                writer, config, session, arg,
            ))
        })),
    );

    handlers.insert("RMD", CommandSpec::new(rmd_handler()));
    handlers.insert("XRMD", CommandSpec::new(rmd_handler()));

    handlers.insert(
        "SYST",
        CommandSpec::new(Box::new(|writer, _config, _session, _driver, _arg| {
            Box::pin(crate::core_ftpcommand::syst::handle_syst_command(writer))
        })),
    );

    handlers.insert(
        "TYPE",
        CommandSpec::new(Box::new(|writer, _config, _session, _driver, arg| {
            Box::pin(crate::core_ftpcommand::type_::handle_type_command(
                writer, arg,
            ))
        })),
    );

    handlers
}

fn cwd_handler() -> CommandHandler {
    Box::new(|writer, _config, session, driver, arg| {
        Box::pin(crate::core_ftpcommand::cwd::handle_cwd_command(
            writer, session, driver, arg,
        ))
    })
}

fn cdup_handler() -> CommandHandler {
    Box::new(|writer, _config, session, driver, arg| {
        Box::pin(crate::core_ftpcommand::cdup::handle_cdup_command(
            writer, session, driver, arg,
        ))
    })
}

fn rmd_handler() -> CommandHandler {
    Box::new(|writer, _config, session, driver, arg| {
        Box::pin(crate::core_ftpcommand::rmd::handle_rmd_command(
            writer, session, driver, arg,
        ))
    })
}
