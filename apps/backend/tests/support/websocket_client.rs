// WebSocket client utilities for testing

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

/// WebSocket test client
pub struct WebSocketClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketClient {
    /// Connect to a WebSocket endpoint, retrying until success or timeout.
    pub async fn connect_retry(
        url: &str,
        timeout: Duration,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let start = tokio::time::Instant::now();
        loop {
            match connect_async(url).await {
                Ok((stream, _)) => return Ok(Self { stream }),
                Err(err) => {
                    if start.elapsed() >= timeout {
                        return Err(Box::new(err));
                    }
                    tokio::time::sleep(Duration::from_millis(5)).await;
                }
            }
        }
    }

    /// Receive the next message with a timeout
    pub async fn recv_timeout(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<Message>, Box<dyn std::error::Error>> {
        tokio::time::timeout(timeout, self.stream.next())
            .await
            .map_err(|_| "Timeout waiting for message")?
            .transpose()
            .map_err(|e| e.into())
    }

    /// Next text frame parsed as JSON; control frames are skipped.
    pub async fn recv_json_timeout(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<Value>, Box<dyn std::error::Error>> {
        loop {
            match self.recv_timeout(timeout).await? {
                Some(Message::Text(text)) => {
                    let json: Value = serde_json::from_str(text.as_str())?;
                    return Ok(Some(json));
                }
                Some(Message::Ping(_)) | Some(Message::Pong(_)) => continue,
                Some(_) | None => return Ok(None),
            }
        }
    }

    /// Read events until one of `kind` arrives, returning it and everything
    /// skipped on the way.
    pub async fn recv_until(
        &mut self,
        kind: &str,
        timeout: Duration,
    ) -> Result<(Value, Vec<Value>), Box<dyn std::error::Error>> {
        let mut skipped = Vec::new();
        loop {
            let Some(event) = self.recv_json_timeout(timeout).await? else {
                return Err(format!("connection closed while waiting for {kind}").into());
            };
            if event["type"] == kind {
                return Ok((event, skipped));
            }
            skipped.push(event);
        }
    }

    /// Payload of the next `kind` event.
    pub async fn expect(
        &mut self,
        kind: &str,
        timeout: Duration,
    ) -> Result<Value, Box<dyn std::error::Error>> {
        let (event, _) = self.recv_until(kind, timeout).await?;
        Ok(event["payload"].clone())
    }

    pub async fn send_json(&mut self, value: &Value) -> Result<(), Box<dyn std::error::Error>> {
        self.send(&value.to_string()).await
    }

    /// Send a text message
    pub async fn send(&mut self, text: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.send(Message::Text(text.to_string().into())).await?;
        Ok(())
    }

    pub async fn send_binary(&mut self, bytes: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.send(Message::Binary(bytes.to_vec().into())).await?;
        Ok(())
    }

    /// Close the connection
    pub async fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.close(None).await?;
        Ok(())
    }
}
