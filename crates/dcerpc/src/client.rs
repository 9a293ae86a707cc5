//! Async DCE/RPC client

use crate::error::{Result, RpcError};
use crate::fragment::{fragment_request, FragmentAssembler};
use crate::pdu::{
    BindPdu, ContextResult, Pdu, SyntaxId, Uuid, DEFAULT_MAX_FRAG,
};
use crate::transport::{RpcTransport, DEFAULT_MAX_PDU_SIZE};
use bytes::Bytes;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tracing::{debug, trace};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection-oriented RPC client bound to one interface.
///
/// The transport is serialized behind a mutex for the duration of each call;
/// calls from multiple tasks interleave at call granularity.
pub struct RpcClient {
    transport: Mutex<RpcTransport<TcpStream>>,
    interface: SyntaxId,
    context_id: u16,
    max_xmit_frag: u16,
    timeout: Duration,
    call_id: AtomicU32,
}

impl RpcClient {
    /// Connect and bind with default settings.
    pub async fn connect(addr: SocketAddr, interface: SyntaxId) -> Result<Self> {
        RpcClientBuilder::new().connect(addr, interface).await
    }

    pub fn interface(&self) -> &SyntaxId {
        &self.interface
    }

    /// Negotiated max transmit fragment size.
    pub fn max_xmit_frag(&self) -> u16 {
        self.max_xmit_frag
    }

    /// Invoke an operation with no object UUID.
    pub async fn call(&self, opnum: u16, stub: Bytes) -> Result<Bytes> {
        self.call_object(opnum, None, stub).await
    }

    /// Invoke an operation, optionally addressed to an object (ORPC carries
    /// the IPID here). Returns the reassembled response stub.
    pub async fn call_object(
        &self,
        opnum: u16,
        object: Option<Uuid>,
        stub: Bytes,
    ) -> Result<Bytes> {
        let call_id = self.call_id.fetch_add(1, Ordering::SeqCst);
        let fragments = fragment_request(
            call_id,
            self.context_id,
            opnum,
            object,
            stub,
            self.max_xmit_frag,
        )?;
        debug!(call_id, opnum, n_fragments = fragments.len(), "issuing call");

        let exchange = async {
            let mut transport = self.transport.lock().await;
            for fragment in &fragments {
                trace!(
                    call_id,
                    len = fragment.stub_data.len(),
                    "sending request fragment"
                );
                transport.write_pdu(&fragment.encode()).await?;
            }

            let mut assembler = FragmentAssembler::new(call_id);
            loop {
                match transport.read_pdu().await? {
                    Pdu::Response(response) => {
                        if let Some(stub) = assembler.push(response)? {
                            return Ok(stub);
                        }
                    }
                    Pdu::Fault(fault) => {
                        if fault.header.call_id != call_id {
                            return Err(RpcError::CallIdMismatch {
                                expected: call_id,
                                got: fault.header.call_id,
                            });
                        }
                        debug!(call_id, status = %fault.status, "call faulted");
                        return Err(RpcError::Fault(fault.status));
                    }
                    Pdu::Shutdown(_) => return Err(RpcError::ConnectionClosed),
                    other => {
                        return Err(RpcError::InvalidPdu(format!(
                            "unexpected {:?} in response stream",
                            other.header().packet_type
                        )))
                    }
                }
            }
        };

        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(RpcError::Timeout),
        }
    }
}

/// Builder for [`RpcClient`].
pub struct RpcClientBuilder {
    timeout: Duration,
    max_pdu_size: usize,
    max_frag: u16,
}

impl RpcClientBuilder {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_pdu_size: DEFAULT_MAX_PDU_SIZE,
            max_frag: DEFAULT_MAX_FRAG,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn max_pdu_size(mut self, max_pdu_size: usize) -> Self {
        self.max_pdu_size = max_pdu_size;
        self
    }

    pub fn max_frag(mut self, max_frag: u16) -> Self {
        self.max_frag = max_frag;
        self
    }

    /// Connect over TCP and bind the given interface with presentation
    /// context 0 and the NDR transfer syntax.
    pub async fn connect(self, addr: SocketAddr, interface: SyntaxId) -> Result<RpcClient> {
        debug!(%addr, %interface, "connecting");
        let stream = TcpStream::connect(addr).await?;
        let mut transport = RpcTransport::new(stream).with_max_pdu_size(self.max_pdu_size);

        let bind_call_id = 1;
        let mut bind = BindPdu::new(bind_call_id, interface);
        bind.max_xmit_frag = self.max_frag;
        bind.max_recv_frag = self.max_frag;
        transport.write_pdu(&bind.encode()).await?;

        let ack = match tokio::time::timeout(self.timeout, transport.read_pdu()).await {
            Ok(pdu) => pdu?,
            Err(_) => return Err(RpcError::Timeout),
        };
        let ack = match ack {
            Pdu::BindAck(ack) => ack,
            Pdu::BindNak(nak) => {
                return Err(RpcError::BindFailed(format!(
                    "bind_nak, reject reason {}",
                    nak.reject_reason
                )))
            }
            Pdu::Fault(fault) => return Err(RpcError::Fault(fault.status)),
            other => {
                return Err(RpcError::InvalidPdu(format!(
                    "unexpected {:?} in reply to bind",
                    other.header().packet_type
                )))
            }
        };
        if ack.header.call_id != bind_call_id {
            return Err(RpcError::CallIdMismatch {
                expected: bind_call_id,
                got: ack.header.call_id,
            });
        }
        match ack.results.first() {
            Some((ContextResult::Acceptance, _)) => {}
            Some((result, _)) => {
                return Err(RpcError::BindFailed(format!(
                    "presentation context rejected: {result:?}"
                )))
            }
            None => return Err(RpcError::BindFailed("empty result list".into())),
        }

        let max_xmit_frag = self.max_frag.min(ack.max_recv_frag);
        debug!(
            %interface,
            max_xmit_frag,
            assoc_group_id = ack.assoc_group_id,
            "bound"
        );
        Ok(RpcClient {
            transport: Mutex::new(transport),
            interface,
            context_id: 0,
            max_xmit_frag,
            timeout: self.timeout,
            call_id: AtomicU32::new(bind_call_id + 1),
        })
    }
}

impl Default for RpcClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FaultStatus;
    use crate::pdu::{BindAckPdu, FaultPdu, ResponsePdu};
    use tokio::net::TcpListener;

    async fn serve_one<F>(handler: F) -> SocketAddr
    where
        F: FnOnce(Pdu) -> Vec<Bytes> + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut transport = RpcTransport::new(stream);
            // accept the bind
            let bind = transport.read_pdu().await.unwrap();
            let ack = BindAckPdu::new(bind.header().call_id, 1);
            transport.write_pdu(&ack.encode()).await.unwrap();
            // answer one call
            let request = transport.read_pdu().await.unwrap();
            for reply in handler(request) {
                transport.write_pdu(&reply).await.unwrap();
            }
        });
        addr
    }

    fn test_interface() -> SyntaxId {
        SyntaxId::new(
            Uuid::parse("eba96b1a-2168-11d3-898c-00e02c074f6b").unwrap(),
            0,
            0,
        )
    }

    #[tokio::test]
    async fn test_bind_and_call() {
        let addr = serve_one(|pdu| match pdu {
            Pdu::Request(req) => {
                let response =
                    ResponsePdu::new(req.header.call_id, req.context_id, req.stub_data);
                vec![response.encode()]
            }
            other => panic!("expected request, got {:?}", other),
        })
        .await;

        let client = RpcClient::connect(addr, test_interface()).await.unwrap();
        let echoed = client.call(7, Bytes::from_static(b"ping")).await.unwrap();
        assert_eq!(echoed.as_ref(), b"ping");
    }

    #[tokio::test]
    async fn test_object_uuid_reaches_server() {
        let object = Uuid::parse("12345678-1234-1234-1234-123456789abc").unwrap();
        let addr = serve_one(move |pdu| match pdu {
            Pdu::Request(req) => {
                assert_eq!(req.object, Some(object));
                vec![ResponsePdu::new(req.header.call_id, req.context_id, Bytes::new()).encode()]
            }
            other => panic!("expected request, got {:?}", other),
        })
        .await;

        let client = RpcClient::connect(addr, test_interface()).await.unwrap();
        client
            .call_object(12, Some(object), Bytes::new())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_fault_surfaces_as_error() {
        let addr = serve_one(|pdu| match pdu {
            Pdu::Request(req) => {
                vec![FaultPdu::new(req.header.call_id, req.context_id, FaultStatus::OP_RNG_ERROR)
                    .encode()]
            }
            other => panic!("expected request, got {:?}", other),
        })
        .await;

        let client = RpcClient::connect(addr, test_interface()).await.unwrap();
        match client.call(99, Bytes::new()).await {
            Err(RpcError::Fault(status)) => assert_eq!(status.0, FaultStatus::OP_RNG_ERROR),
            other => panic!("expected fault, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fragmented_response_reassembled() {
        let addr = serve_one(|pdu| match pdu {
            Pdu::Request(req) => {
                let mut first =
                    ResponsePdu::new(req.header.call_id, req.context_id, Bytes::from_static(b"he"));
                first.header.flags = crate::pdu::PacketFlags(crate::pdu::PacketFlags::FIRST_FRAG);
                let mut last =
                    ResponsePdu::new(req.header.call_id, req.context_id, Bytes::from_static(b"llo"));
                last.header.flags = crate::pdu::PacketFlags(crate::pdu::PacketFlags::LAST_FRAG);
                vec![first.encode(), last.encode()]
            }
            other => panic!("expected request, got {:?}", other),
        })
        .await;

        let client = RpcClient::connect(addr, test_interface()).await.unwrap();
        let stub = client.call(7, Bytes::new()).await.unwrap();
        assert_eq!(stub.as_ref(), b"hello");
    }

    #[tokio::test]
    async fn test_bind_rejection() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut transport = RpcTransport::new(stream);
            let bind = transport.read_pdu().await.unwrap();
            let mut ack = BindAckPdu::new(bind.header().call_id, 1);
            ack.results = vec![(ContextResult::ProviderRejection, SyntaxId::ndr())];
            transport.write_pdu(&ack.encode()).await.unwrap();
        });

        match RpcClient::connect(addr, test_interface()).await {
            Err(RpcError::BindFailed(msg)) => assert!(msg.contains("rejected")),
            other => panic!("expected bind failure, got {:?}", other.map(|_| ())),
        }
    }
}
