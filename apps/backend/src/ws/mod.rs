pub mod server;
pub mod session;

pub use server::{GameServer, GetSummary, ServerSummary};
