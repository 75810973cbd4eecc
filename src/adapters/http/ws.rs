use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;

use crate::adapters::http::state::HttpState;
use crate::application::ports::{FrameTransport, InboundMessage};
use crate::domain::errors::TransportError;

pub async fn ws_handler(ws: WebSocketUpgrade, State(st): State<HttpState>) -> impl axum::response::IntoResponse {
    ws.max_message_size(st.max_frame_bytes).on_upgrade(move |socket| async move {
        let mut transport = WebSocketTransport::new(socket);
        st.handler.run(&mut transport).await;
    })
}

/// `FrameTransport` over an upgraded axum WebSocket.
pub struct WebSocketTransport {
    socket: WebSocket,
}

impl WebSocketTransport {
    pub fn new(socket: WebSocket) -> Self {
        Self { socket }
    }
}

#[async_trait]
impl FrameTransport for WebSocketTransport {
    async fn recv(&mut self) -> Result<Option<InboundMessage>, TransportError> {
        loop {
            let msg = match self.socket.recv().await {
                Some(Ok(msg)) => msg,
                Some(Err(e)) => return Err(TransportError::Receive(e.to_string())),
                None => return Ok(None),
            };
            match msg {
                Message::Text(text) => return Ok(Some(InboundMessage::Text(text))),
                Message::Binary(data) => return Ok(Some(InboundMessage::Binary(data))),
                Message::Close(_) => return Ok(None),
                // axum answers pings itself
                Message::Ping(_) | Message::Pong(_) => continue,
            }
        }
    }

    async fn send(&mut self, record: String) -> Result<(), TransportError> {
        self.socket
            .send(Message::Text(record))
            .await
            .map_err(|e| TransportError::Send(e.to_string()))
    }

    async fn close(&mut self) {
        let _ = self.socket.send(Message::Close(None)).await;
    }
}
