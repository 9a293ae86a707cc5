//! MSMQ COM automation (MS-MQAC) client bindings
//!
//! Hand-maintained bindings for the MSMQ automation interfaces, currently
//! covering `IMSMQMessage3`. Each operation gets a request/response struct
//! pair with NDR codecs and an async client method; calls go through a bound
//! [`dcerpc::RpcClient`] with the instance IPID attached.
//!
//! ```no_run
//! use mqac::message3::Message3Client;
//! use dcom::{Ipid, Variant};
//!
//! # async fn example(ipid: Ipid) -> mqac::Result<()> {
//! let mut client = Message3Client::connect("127.0.0.1:135".parse().unwrap()).await?;
//! client.set_ipid(ipid);
//! client.put_body(Some(Variant::ByteArray(b"hello".to_vec()))).await?;
//! client.send(None, None).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod message3;

use dcerpc::Uuid;

pub use error::{check_hresult, MqacError, Result};
pub use message3::Message3Client;

/// IIDs of the automation interfaces an `IMSMQMessage3` exchange can hand
/// back inside marshaled interface pointers.
pub mod iid {
    use super::Uuid;

    /// `IDispatch`, the automation base interface.
    pub const DISPATCH: Uuid = Uuid {
        time_low: 0x0002_0400,
        time_mid: 0x0000,
        time_hi_and_version: 0x0000,
        clock_seq_hi_and_reserved: 0xc0,
        clock_seq_low: 0x00,
        node: [0x00, 0x00, 0x00, 0x00, 0x00, 0x46],
    };

    pub const MSMQ_QUEUE_INFO: Uuid = Uuid {
        time_low: 0xd7d6_e07b,
        time_mid: 0xdccd,
        time_hi_and_version: 0x11d0,
        clock_seq_hi_and_reserved: 0xaa,
        clock_seq_low: 0x4b,
        node: [0x00, 0x60, 0x97, 0x0d, 0xeb, 0xae],
    };

    pub const MSMQ_QUEUE_INFO2: Uuid = Uuid {
        time_low: 0xfd17_4a80,
        time_mid: 0x89cf,
        time_hi_and_version: 0x11d2,
        clock_seq_hi_and_reserved: 0xb0,
        clock_seq_low: 0xf2,
        node: [0x00, 0xe0, 0x2c, 0x07, 0x4f, 0x6b],
    };

    pub const MSMQ_QUEUE_INFO3: Uuid = Uuid {
        time_low: 0xeba9_6b1d,
        time_mid: 0x2168,
        time_hi_and_version: 0x11d3,
        clock_seq_hi_and_reserved: 0x89,
        clock_seq_low: 0x8c,
        node: [0x00, 0xe0, 0x2c, 0x07, 0x4f, 0x6b],
    };

    pub const MSMQ_MESSAGE3: Uuid = crate::message3::IID;
}
