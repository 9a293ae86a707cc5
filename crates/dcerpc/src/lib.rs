//! Connection-oriented DCE/RPC (MS-RPCE) client
//!
//! Wire-compatible with the DCE 1.1 RPC connection-oriented protocol as
//! profiled by MS-RPCE: bind negotiation, frag_length-delimited framing over
//! TCP, request fragmentation and response reassembly, and the optional
//! object UUID that ORPC layers use to address interface instances.
//!
//! # Example
//!
//! ```no_run
//! use dcerpc::{RpcClient, SyntaxId, Uuid};
//! use bytes::Bytes;
//!
//! #[tokio::main]
//! async fn main() -> dcerpc::Result<()> {
//!     let interface = SyntaxId::new(
//!         Uuid::parse("eba96b1a-2168-11d3-898c-00e02c074f6b")?,
//!         0,
//!         0,
//!     );
//!     let client = RpcClient::connect("127.0.0.1:2103".parse().unwrap(), interface).await?;
//!     let response = client.call(7, Bytes::new()).await?;
//!     println!("{} response bytes", response.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod fragment;
pub mod pdu;
pub mod transport;

pub use client::{RpcClient, RpcClientBuilder};
pub use error::{FaultStatus, Result, RpcError};
pub use fragment::{fragment_request, max_stub_size, FragmentAssembler};
pub use pdu::{
    BindAckPdu, BindNakPdu, BindPdu, ContextElement, ContextResult, DataRepresentation, FaultPdu,
    PacketFlags, PacketType, Pdu, PduHeader, RequestPdu, ResponsePdu, SyntaxId, Uuid,
    DCE_RPC_VERSION, DCE_RPC_VERSION_MINOR, DEFAULT_MAX_FRAG, NDR_SYNTAX_UUID, NDR_SYNTAX_VERSION,
};
pub use transport::{RpcTransport, DEFAULT_MAX_PDU_SIZE};
