// Here's the list of the FTP commands implemented
pub mod allo;
pub mod cdup;
pub mod cwd;
pub mod dele;
pub mod eprt;
pub mod handlers;
pub mod mode;
pub mod noop;
pub mod port;
pub mod rmd;
pub mod syst;
pub mod type_;

// The utils and common functions are here
pub mod utils;

#[cfg(test)]
mod test_commands;
