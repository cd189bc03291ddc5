pub mod websocket;
pub mod websocket_client;
