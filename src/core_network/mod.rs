pub mod active;
pub mod network;
