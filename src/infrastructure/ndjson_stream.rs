// Newline-delimited JSON streaming for progressive dashboards
use crate::application::dashboard_view::StreamMessage;
use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use axum::response::IntoResponse;
use bytes::{BufMut, Bytes, BytesMut};
use tokio::sync::mpsc;

pub const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

/// Stream every message from `rx` as one JSON document per line.
pub fn stream_from_receiver(mut rx: mpsc::Receiver<StreamMessage>) -> impl IntoResponse {
    let stream = async_stream::stream! {
        while let Some(msg) = rx.recv().await {
            yield encode_line(&msg);
        }
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, NDJSON_CONTENT_TYPE)
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(stream))
        .map_err(|e| {
            tracing::error!("Response build error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

fn encode_line(msg: &StreamMessage) -> Result<Bytes, std::io::Error> {
    let mut buffer = BytesMut::with_capacity(256);
    serde_json::to_writer((&mut buffer).writer(), msg)?;
    buffer.put_u8(b'\n');
    Ok(buffer.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_line() {
        let line = encode_line(&StreamMessage::Complete {
            panels: 2,
            duration_ms: 5,
        })
        .unwrap();
        assert_eq!(
            &line[..],
            b"{\"type\":\"complete\",\"panels\":2,\"durationMs\":5}\n"
        );
    }
}
