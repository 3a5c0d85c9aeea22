//! Streaming channel contract between the capture client and the remote
//! detector.
//!
//! One `ClientMessage::Frame` per sampled frame carrying an opaque JPEG
//! payload; one `ServerMessage::FrameResult` per processed frame carrying
//! either landmarks or a per-frame error. No acknowledgments, no sequence
//! numbers: correlation is purely by arrival order, so a detector that
//! reorders or drops responses yields fewer or reordered results. Known
//! limitation, accepted by design.
//!
//! Self-contained: no imports from other holotrace modules except the
//! landmark types carried on the wire.

use bytes::Bytes;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio_util::codec::{Framed, LengthDelimitedCodec};

use crate::landmark::FrameLandmarks;

/// One sampled frame, JPEG-encoded.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FramePacket {
    pub timestamp_us: u64,
    pub width: u32,
    pub height: u32,
    pub jpeg_data: Vec<u8>,
}

/// Per-frame detector result: landmarks on success, a message on failure.
/// Absent landmark groups arrive omitted or null, never partially filled.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct DetectorReply {
    #[serde(default)]
    pub landmarks: Option<FrameLandmarks>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Client → detector
#[derive(Serialize, Deserialize, Debug)]
pub enum ClientMessage {
    Frame(FramePacket),
}

/// Detector → client
#[derive(Serialize, Deserialize, Debug)]
pub enum ServerMessage {
    FrameResult(DetectorReply),
}

// --- TCP codec helpers ---

pub type MessageStream = Framed<TcpStream, LengthDelimitedCodec>;
/// Send half after splitting; dispatch and receipt run in separate tasks.
pub type MessageSink = SplitSink<MessageStream, Bytes>;
/// Receive half after splitting.
pub type MessageSource = SplitStream<MessageStream>;

/// Create a framed message stream with length-delimited framing.
pub fn message_stream(stream: TcpStream) -> MessageStream {
    let codec = LengthDelimitedCodec::builder()
        .max_frame_length(16 * 1024 * 1024) // 16MB
        .new_codec();
    Framed::new(stream, codec)
}

/// Send a serializable message (bincode + length prefix).
pub async fn send_message<T: Serialize>(sink: &mut MessageSink, msg: &T) -> anyhow::Result<()> {
    let data = bincode::serialize(msg)?;
    sink.send(Bytes::from(data)).await?;
    Ok(())
}

/// Receive and deserialize a message. `None` when the peer closed the
/// connection.
pub async fn recv_message<T: DeserializeOwned>(
    reader: &mut MessageSource,
) -> anyhow::Result<Option<T>> {
    match reader.next().await {
        Some(Ok(bytes)) => Ok(Some(bincode::deserialize(&bytes)?)),
        Some(Err(e)) => Err(e.into()),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::LandmarkPoint;

    #[test]
    fn test_client_message_bincode_round_trip() {
        let msg = ClientMessage::Frame(FramePacket {
            timestamp_us: 1_234_567,
            width: 640,
            height: 480,
            jpeg_data: vec![0xFF, 0xD8, 0xFF],
        });
        let bytes = bincode::serialize(&msg).unwrap();
        let decoded: ClientMessage = bincode::deserialize(&bytes).unwrap();
        let ClientMessage::Frame(packet) = decoded;
        assert_eq!(packet.timestamp_us, 1_234_567);
        assert_eq!(packet.jpeg_data.len(), 3);
    }

    #[test]
    fn test_server_message_bincode_round_trip() {
        let reply = DetectorReply {
            landmarks: Some(FrameLandmarks {
                pose: Some(vec![LandmarkPoint::new(0.1, 0.2, 0.3); 33]),
                ..Default::default()
            }),
            error: None,
        };
        let bytes = bincode::serialize(&ServerMessage::FrameResult(reply)).unwrap();
        let ServerMessage::FrameResult(decoded) =
            bincode::deserialize::<ServerMessage>(&bytes).unwrap();
        assert_eq!(decoded.landmarks.unwrap().pose.unwrap().len(), 33);
        assert!(decoded.error.is_none());
    }

    #[tokio::test]
    async fn test_send_recv_round_trip_over_split_stream() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (client, accepted) = tokio::join!(TcpStream::connect(addr), listener.accept());
        let (server, _) = accepted.unwrap();

        let (mut client_sink, mut client_reader) = message_stream(client.unwrap()).split();
        let (mut server_sink, mut server_reader) = message_stream(server).split();

        let frame = ClientMessage::Frame(FramePacket {
            timestamp_us: 42,
            width: 4,
            height: 4,
            jpeg_data: vec![0xFF, 0xD8, 0xFF, 0xD9],
        });
        send_message(&mut client_sink, &frame).await.unwrap();

        let ClientMessage::Frame(got) = recv_message::<ClientMessage>(&mut server_reader)
            .await
            .unwrap()
            .expect("frame expected before close");
        assert_eq!(got.timestamp_us, 42);
        assert_eq!(got.jpeg_data, vec![0xFF, 0xD8, 0xFF, 0xD9]);

        let reply = ServerMessage::FrameResult(DetectorReply {
            landmarks: None,
            error: Some("no person in frame".to_string()),
        });
        send_message(&mut server_sink, &reply).await.unwrap();

        let ServerMessage::FrameResult(got) = recv_message::<ServerMessage>(&mut client_reader)
            .await
            .unwrap()
            .expect("result expected before close");
        assert_eq!(got.error.as_deref(), Some("no person in frame"));

        // peer hangup surfaces as None, not an error
        drop(server_sink);
        drop(server_reader);
        let closed = recv_message::<ServerMessage>(&mut client_reader).await.unwrap();
        assert!(closed.is_none());
    }

    #[test]
    fn test_detector_reply_error_variant() {
        let reply = DetectorReply {
            landmarks: None,
            error: Some("empty frame received".to_string()),
        };
        let bytes = bincode::serialize(&reply).unwrap();
        let decoded: DetectorReply = bincode::deserialize(&bytes).unwrap();
        assert!(decoded.landmarks.is_none());
        assert_eq!(decoded.error.as_deref(), Some("empty frame received"));
    }
}
