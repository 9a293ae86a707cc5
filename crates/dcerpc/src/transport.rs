//! PDU framing over a byte stream
//!
//! Connection-oriented DCE/RPC PDUs are self-delimiting via the frag_length
//! field in the common header, so framing is: read 16 header bytes, learn the
//! fragment length, read the remainder.

use crate::error::{Result, RpcError};
use crate::pdu::{Pdu, PduHeader};
use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Maximum accepted PDU size (64 KiB), guarding against hostile frag_length.
pub const DEFAULT_MAX_PDU_SIZE: usize = 65536;

/// Framed PDU transport over any async byte stream.
pub struct RpcTransport<T> {
    inner: T,
    max_pdu_size: usize,
    read_buf: BytesMut,
}

impl<T> RpcTransport<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            max_pdu_size: DEFAULT_MAX_PDU_SIZE,
            read_buf: BytesMut::with_capacity(8192),
        }
    }

    pub fn with_max_pdu_size(mut self, max_pdu_size: usize) -> Self {
        self.max_pdu_size = max_pdu_size;
        self
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: AsyncRead + Unpin> RpcTransport<T> {
    /// Read one complete PDU frame.
    pub async fn read_frame(&mut self) -> Result<Bytes> {
        while self.read_buf.len() < PduHeader::SIZE {
            if self.inner.read_buf(&mut self.read_buf).await? == 0 {
                return if self.read_buf.is_empty() {
                    Err(RpcError::ConnectionClosed)
                } else {
                    Err(RpcError::TruncatedPdu {
                        needed: PduHeader::SIZE,
                        have: self.read_buf.len(),
                    })
                };
            }
        }

        let header = PduHeader::decode(&self.read_buf)?;
        let frag_length = header.frag_length as usize;
        if frag_length < PduHeader::SIZE {
            return Err(RpcError::InvalidPdu(format!(
                "fragment length {frag_length} shorter than header"
            )));
        }
        if frag_length > self.max_pdu_size {
            return Err(RpcError::PduTooLarge {
                size: frag_length,
                max: self.max_pdu_size,
            });
        }

        while self.read_buf.len() < frag_length {
            if self.inner.read_buf(&mut self.read_buf).await? == 0 {
                return Err(RpcError::TruncatedPdu {
                    needed: frag_length,
                    have: self.read_buf.len(),
                });
            }
        }

        Ok(self.read_buf.split_to(frag_length).freeze())
    }

    /// Read and decode one PDU.
    pub async fn read_pdu(&mut self) -> Result<Pdu> {
        let frame = self.read_frame().await?;
        Pdu::decode(&frame)
    }
}

impl<T: AsyncWrite + Unpin> RpcTransport<T> {
    /// Write one already-encoded PDU and flush.
    pub async fn write_pdu(&mut self, data: &[u8]) -> Result<()> {
        self.inner.write_all(data).await?;
        self.inner.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdu::RequestPdu;
    use tokio::io::duplex;

    #[tokio::test]
    async fn test_frame_roundtrip() {
        let (client, server) = duplex(1024);
        let mut client_side = RpcTransport::new(client);
        let mut server_side = RpcTransport::new(server);

        let writer = tokio::spawn(async move {
            let request = RequestPdu::new(1, 0, Bytes::from_static(b"hello"));
            client_side.write_pdu(&request.encode()).await.unwrap();
        });

        match server_side.read_pdu().await.unwrap() {
            Pdu::Request(req) => {
                assert_eq!(req.header.call_id, 1);
                assert_eq!(req.stub_data.as_ref(), b"hello");
            }
            other => panic!("expected request, got {:?}", other),
        }
        writer.await.unwrap();
    }

    #[tokio::test]
    async fn test_multiple_frames() {
        let (client, server) = duplex(4096);
        let mut client_side = RpcTransport::new(client);
        let mut server_side = RpcTransport::new(server);

        let writer = tokio::spawn(async move {
            for i in 0..3u32 {
                let request = RequestPdu::new(i, i as u16, Bytes::from(format!("msg{i}")));
                client_side.write_pdu(&request.encode()).await.unwrap();
            }
        });

        for i in 0..3u32 {
            match server_side.read_pdu().await.unwrap() {
                Pdu::Request(req) => {
                    assert_eq!(req.header.call_id, i);
                    assert_eq!(req.opnum, i as u16);
                }
                other => panic!("expected request, got {:?}", other),
            }
        }
        writer.await.unwrap();
    }

    #[tokio::test]
    async fn test_closed_connection() {
        let (client, server) = duplex(64);
        drop(client);
        let mut server_side = RpcTransport::new(server);
        assert!(matches!(
            server_side.read_frame().await,
            Err(RpcError::ConnectionClosed)
        ));
    }

    #[tokio::test]
    async fn test_oversized_frame_rejected() {
        let (client, server) = duplex(1024);
        let mut client_side = RpcTransport::new(client);
        let mut server_side = RpcTransport::new(server).with_max_pdu_size(32);

        let request = RequestPdu::new(1, 0, Bytes::from(vec![0u8; 64]));
        tokio::spawn(async move {
            let _ = client_side.write_pdu(&request.encode()).await;
        });

        assert!(matches!(
            server_side.read_frame().await,
            Err(RpcError::PduTooLarge { .. })
        ));
    }
}
