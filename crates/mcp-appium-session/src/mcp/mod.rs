pub mod rpc;
pub mod server;
pub mod tools;
pub mod transport;
