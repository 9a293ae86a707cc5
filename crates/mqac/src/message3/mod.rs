//! `IMSMQMessage3` client binding
//!
//! The interface exposes MSMQ message properties through COM automation
//! getters and setters plus the `Send` and security-context operations.
//! Opnums start at 7; 0..=6 belong to the inherited `IUnknown`/`IDispatch`
//! slots, which this binding does not carry.

pub mod client;
pub mod ops;

use dcerpc::{SyntaxId, Uuid};

/// IID of `IMSMQMessage3`: `eba96b1a-2168-11d3-898c-00e02c074f6b`.
pub const IID: Uuid = Uuid {
    time_low: 0xeba9_6b1a,
    time_mid: 0x2168,
    time_hi_and_version: 0x11d3,
    clock_seq_hi_and_reserved: 0x89,
    clock_seq_low: 0x8c,
    node: [0x00, 0xe0, 0x2c, 0x07, 0x4f, 0x6b],
};

pub const INTERFACE_VERSION: (u16, u16) = (0, 0);

/// Abstract syntax presented at bind time.
pub fn interface_syntax() -> SyntaxId {
    SyntaxId::new(IID, INTERFACE_VERSION.0, INTERFACE_VERSION.1)
}

/// Operation numbers, in declaration order.
pub mod opnum {
    pub const GET_CLASS: u16 = 7;
    pub const GET_PRIV_LEVEL: u16 = 8;
    pub const PUT_PRIV_LEVEL: u16 = 9;
    pub const GET_AUTH_LEVEL: u16 = 10;
    pub const PUT_AUTH_LEVEL: u16 = 11;
    pub const GET_IS_AUTHENTICATED: u16 = 12;
    pub const GET_DELIVERY: u16 = 13;
    pub const PUT_DELIVERY: u16 = 14;
    pub const GET_TRACE: u16 = 15;
    pub const PUT_TRACE: u16 = 16;
    pub const GET_PRIORITY: u16 = 17;
    pub const PUT_PRIORITY: u16 = 18;
    pub const GET_JOURNAL: u16 = 19;
    pub const PUT_JOURNAL: u16 = 20;
    pub const GET_RESPONSE_QUEUE_INFO_V1: u16 = 21;
    pub const PUTREF_RESPONSE_QUEUE_INFO_V1: u16 = 22;
    pub const GET_APP_SPECIFIC: u16 = 23;
    pub const PUT_APP_SPECIFIC: u16 = 24;
    pub const GET_SOURCE_MACHINE_GUID: u16 = 25;
    pub const GET_BODY_LENGTH: u16 = 26;
    pub const GET_BODY: u16 = 27;
    pub const PUT_BODY: u16 = 28;
    pub const GET_ADMIN_QUEUE_INFO_V1: u16 = 29;
    pub const PUTREF_ADMIN_QUEUE_INFO_V1: u16 = 30;
    pub const GET_ID: u16 = 31;
    pub const GET_CORRELATION_ID: u16 = 32;
    pub const PUT_CORRELATION_ID: u16 = 33;
    pub const GET_ACK: u16 = 34;
    pub const PUT_ACK: u16 = 35;
    pub const GET_LABEL: u16 = 36;
    pub const PUT_LABEL: u16 = 37;
    pub const GET_MAX_TIME_TO_REACH_QUEUE: u16 = 38;
    pub const PUT_MAX_TIME_TO_REACH_QUEUE: u16 = 39;
    pub const GET_MAX_TIME_TO_RECEIVE: u16 = 40;
    pub const PUT_MAX_TIME_TO_RECEIVE: u16 = 41;
    pub const GET_HASH_ALGORITHM: u16 = 42;
    pub const PUT_HASH_ALGORITHM: u16 = 43;
    pub const GET_ENCRYPT_ALGORITHM: u16 = 44;
    pub const PUT_ENCRYPT_ALGORITHM: u16 = 45;
    pub const GET_SENT_TIME: u16 = 46;
    pub const GET_ARRIVED_TIME: u16 = 47;
    pub const GET_DESTINATION_QUEUE_INFO: u16 = 48;
    pub const GET_SENDER_CERTIFICATE: u16 = 49;
    pub const PUT_SENDER_CERTIFICATE: u16 = 50;
    pub const GET_SENDER_ID: u16 = 51;
    pub const GET_SENDER_ID_TYPE: u16 = 52;
    pub const PUT_SENDER_ID_TYPE: u16 = 53;
    pub const SEND: u16 = 54;
    pub const ATTACH_CURRENT_SECURITY_CONTEXT: u16 = 55;
    pub const GET_SENDER_VERSION: u16 = 56;
    pub const GET_EXTENSION: u16 = 57;
    pub const PUT_EXTENSION: u16 = 58;
    pub const GET_CONNECTOR_TYPE_GUID: u16 = 59;
    pub const PUT_CONNECTOR_TYPE_GUID: u16 = 60;
    pub const GET_TRANSACTION_STATUS_QUEUE_INFO: u16 = 61;
    pub const GET_DESTINATION_SYMMETRIC_KEY: u16 = 62;
    pub const PUT_DESTINATION_SYMMETRIC_KEY: u16 = 63;
    pub const GET_SIGNATURE: u16 = 64;
    pub const PUT_SIGNATURE: u16 = 65;
    pub const GET_AUTHENTICATION_PROVIDER_TYPE: u16 = 66;
    pub const PUT_AUTHENTICATION_PROVIDER_TYPE: u16 = 67;
    pub const GET_AUTHENTICATION_PROVIDER_NAME: u16 = 68;
    pub const PUT_AUTHENTICATION_PROVIDER_NAME: u16 = 69;
    pub const PUT_SENDER_ID: u16 = 70;
    pub const GET_MSG_CLASS: u16 = 71;
    pub const PUT_MSG_CLASS: u16 = 72;
    pub const GET_PROPERTIES: u16 = 73;
    pub const GET_TRANSACTION_ID: u16 = 74;
    pub const GET_IS_FIRST_IN_TRANSACTION: u16 = 75;
    pub const GET_IS_LAST_IN_TRANSACTION: u16 = 76;
    pub const GET_RESPONSE_QUEUE_INFO_V2: u16 = 77;
    pub const PUTREF_RESPONSE_QUEUE_INFO_V2: u16 = 78;
    pub const GET_ADMIN_QUEUE_INFO_V2: u16 = 79;
    pub const PUTREF_ADMIN_QUEUE_INFO_V2: u16 = 80;
    pub const GET_RECEIVED_AUTHENTICATION_LEVEL: u16 = 81;
    pub const GET_RESPONSE_QUEUE_INFO: u16 = 82;
    pub const PUTREF_RESPONSE_QUEUE_INFO: u16 = 83;
    pub const GET_ADMIN_QUEUE_INFO: u16 = 84;
    pub const PUTREF_ADMIN_QUEUE_INFO: u16 = 85;
    pub const GET_RESPONSE_DESTINATION: u16 = 86;
    pub const PUTREF_RESPONSE_DESTINATION: u16 = 87;
    pub const GET_DESTINATION: u16 = 88;
    pub const GET_LOOKUP_ID: u16 = 89;
    pub const GET_IS_AUTHENTICATED2: u16 = 90;
    pub const GET_IS_FIRST_IN_TRANSACTION2: u16 = 91;
    pub const GET_IS_LAST_IN_TRANSACTION2: u16 = 92;
    pub const ATTACH_CURRENT_SECURITY_CONTEXT2: u16 = 93;
    pub const GET_SOAP_ENVELOPE: u16 = 94;
    pub const GET_COMPOUND_MESSAGE: u16 = 95;
    pub const PUT_SOAP_HEADER: u16 = 96;
    pub const PUT_SOAP_BODY: u16 = 97;
}

pub use client::Message3Client;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iid_string_form() {
        assert_eq!(IID.to_string(), "eba96b1a-2168-11d3-898c-00e02c074f6b");
    }

    #[test]
    fn test_interface_syntax_version() {
        let syntax = interface_syntax();
        assert_eq!(syntax.major(), 0);
        assert_eq!(syntax.minor(), 0);
    }
}
