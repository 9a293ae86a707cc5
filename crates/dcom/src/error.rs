//! DCOM error types and HRESULT values

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DcomError {
    #[error(transparent)]
    Rpc(#[from] dcerpc::RpcError),

    #[error(transparent)]
    Ndr(#[from] ndr::NdrError),

    #[error("{method}: no IPID attached to proxy")]
    MissingIpid { method: &'static str },

    #[error("invalid OBJREF: {0}")]
    InvalidObjRef(String),
}

pub type Result<T> = std::result::Result<T, DcomError>;

/// Well-known HRESULT values.
pub mod hresult {
    pub const S_OK: i32 = 0;
    pub const S_FALSE: i32 = 1;
    pub const E_NOTIMPL: i32 = 0x8000_4001_u32 as i32;
    pub const E_NOINTERFACE: i32 = 0x8000_4002_u32 as i32;
    pub const E_POINTER: i32 = 0x8000_4003_u32 as i32;
    pub const E_FAIL: i32 = 0x8000_4005_u32 as i32;
    pub const E_ACCESSDENIED: i32 = 0x8007_0005_u32 as i32;
    pub const E_OUTOFMEMORY: i32 = 0x8007_000e_u32 as i32;
    pub const E_INVALIDARG: i32 = 0x8007_0057_u32 as i32;
    pub const CO_E_OBJNOTCONNECTED: i32 = 0x8004_01fd_u32 as i32;
    /// Generic MSMQ failure (MQ_ERROR).
    pub const MQ_ERROR: i32 = 0xc00e_0001_u32 as i32;
    pub const MQ_ERROR_PROPERTY: i32 = 0xc00e_0002_u32 as i32;

    /// Strict success test: the automation methods return S_OK on success,
    /// so any other value, positive informational codes like S_FALSE
    /// included, counts as failure.
    pub fn succeeded(hr: i32) -> bool {
        hr == S_OK
    }
}
