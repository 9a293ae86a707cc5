//! DCE/RPC error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RPC version mismatch: expected {expected}, got {got}")]
    VersionMismatch { expected: u8, got: u8 },

    #[error("invalid packet type: {0}")]
    InvalidPacketType(u8),

    #[error("truncated PDU: needed {needed} bytes, have {have}")]
    TruncatedPdu { needed: usize, have: usize },

    #[error("invalid PDU: {0}")]
    InvalidPdu(String),

    #[error("PDU too large: {size} bytes exceeds maximum {max}")]
    PduTooLarge { size: usize, max: usize },

    #[error("bind failed: {0}")]
    BindFailed(String),

    #[error("call ID mismatch: expected {expected}, got {got}")]
    CallIdMismatch { expected: u32, got: u32 },

    #[error("context ID mismatch: expected {expected}, got {got}")]
    ContextIdMismatch { expected: u16, got: u16 },

    #[error("fragment out of order: {0}")]
    FragmentOutOfOrder(String),

    #[error("fault: {0}")]
    Fault(FaultStatus),

    #[error("connection closed")]
    ConnectionClosed,

    #[error("call timed out")]
    Timeout,
}

/// Fault status from a `fault` PDU, with names for the codes a client is
/// likely to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaultStatus(pub u32);

impl FaultStatus {
    pub const OP_RNG_ERROR: u32 = 0x1c01_0002;
    pub const UNKNOWN_IF: u32 = 0x1c01_0003;
    pub const PROTO_ERROR: u32 = 0x1c01_000b;
    pub const INVALID_TAG: u32 = 0x1c00_0006;
    pub const REMOTE_NO_MEMORY: u32 = 0x1c01_0014;
    pub const ACCESS_DENIED: u32 = 0x0000_0005;

    pub fn name(&self) -> Option<&'static str> {
        match self.0 {
            Self::OP_RNG_ERROR => Some("nca_s_op_rng_error"),
            Self::UNKNOWN_IF => Some("nca_s_unk_if"),
            Self::PROTO_ERROR => Some("nca_s_proto_error"),
            Self::INVALID_TAG => Some("nca_s_fault_invalid_tag"),
            Self::REMOTE_NO_MEMORY => Some("nca_s_fault_remote_no_memory"),
            Self::ACCESS_DENIED => Some("nca_s_fault_access_denied"),
            _ => None,
        }
    }
}

impl std::fmt::Display for FaultStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} (0x{:08x})", name, self.0),
            None => write!(f, "status 0x{:08x}", self.0),
        }
    }
}

pub type Result<T> = std::result::Result<T, RpcError>;
