//! Request/response structs and NDR codecs for every `IMSMQMessage3`
//! operation.
//!
//! Every request stub is ORPCTHIS followed by the in-parameters; every
//! response stub is ORPCTHAT, the out-parameters, then the HRESULT. Deferred
//! pointees are drained after each parameter, so referent ids are immediately
//! followed by their payloads on the wire. The shapes repeat across the
//! interface, so each shape is stamped by a macro; only `Send` is written out
//! by hand.

use crate::error::Result;
use bytes::Bytes;
use dcom::{BString, InterfacePointer, OrpcThat, OrpcThis, Variant};
use ndr::{NdrMarshal, NdrReader, NdrUnmarshal, NdrWriter};

macro_rules! this_only_request {
    ($($req:ident),+ $(,)?) => {$(
        #[derive(Debug, Clone, PartialEq, Default)]
        pub struct $req {
            pub this: OrpcThis,
        }

        impl $req {
            pub fn marshal(&self) -> Result<Bytes> {
                let mut w = NdrWriter::new();
                self.this.ndr_marshal(&mut w)?;
                w.write_deferred()?;
                Ok(w.finish())
            }

            pub fn unmarshal(stub: &[u8]) -> Result<Self> {
                let mut r = NdrReader::new(stub);
                let this = OrpcThis::ndr_unmarshal(&mut r)?;
                Ok(Self { this })
            }
        }
    )+};
}

macro_rules! scalar_put_request {
    ($ty:ty, $write:ident, $read:ident; $($req:ident),+ $(,)?) => {$(
        #[derive(Debug, Clone, PartialEq, Default)]
        pub struct $req {
            pub this: OrpcThis,
            pub value: $ty,
        }

        impl $req {
            pub fn marshal(&self) -> Result<Bytes> {
                let mut w = NdrWriter::new();
                self.this.ndr_marshal(&mut w)?;
                w.write_deferred()?;
                w.$write(self.value);
                Ok(w.finish())
            }

            pub fn unmarshal(stub: &[u8]) -> Result<Self> {
                let mut r = NdrReader::new(stub);
                let this = OrpcThis::ndr_unmarshal(&mut r)?;
                let value = r.$read()?;
                Ok(Self { this, value })
            }
        }
    )+};
}

macro_rules! ptr_put_request {
    ($ty:ty; $($req:ident),+ $(,)?) => {$(
        #[derive(Debug, Clone, PartialEq, Default)]
        pub struct $req {
            pub this: OrpcThis,
            pub value: Option<$ty>,
        }

        impl $req {
            pub fn marshal(&self) -> Result<Bytes> {
                let mut w = NdrWriter::new();
                self.this.ndr_marshal(&mut w)?;
                w.write_deferred()?;
                w.write_unique_ptr(self.value.as_ref())?;
                w.write_deferred()?;
                Ok(w.finish())
            }

            pub fn unmarshal(stub: &[u8]) -> Result<Self> {
                let mut r = NdrReader::new(stub);
                let this = OrpcThis::ndr_unmarshal(&mut r)?;
                let value = r.read_unique_ptr()?;
                Ok(Self { this, value })
            }
        }
    )+};
}

macro_rules! hresult_response {
    ($($resp:ident),+ $(,)?) => {$(
        #[derive(Debug, Clone, PartialEq, Default)]
        pub struct $resp {
            pub that: OrpcThat,
            pub hresult: i32,
        }

        impl $resp {
            pub fn marshal(&self) -> Result<Bytes> {
                let mut w = NdrWriter::new();
                self.that.ndr_marshal(&mut w)?;
                w.write_deferred()?;
                w.write_i32(self.hresult);
                Ok(w.finish())
            }

            pub fn unmarshal(stub: &[u8]) -> Result<Self> {
                let mut r = NdrReader::new(stub);
                let that = OrpcThat::ndr_unmarshal(&mut r)?;
                let hresult = r.read_i32()?;
                Ok(Self { that, hresult })
            }
        }
    )+};
}

macro_rules! scalar_get_response {
    ($ty:ty, $write:ident, $read:ident; $($resp:ident),+ $(,)?) => {$(
        #[derive(Debug, Clone, PartialEq, Default)]
        pub struct $resp {
            pub that: OrpcThat,
            pub value: $ty,
            pub hresult: i32,
        }

        impl $resp {
            pub fn marshal(&self) -> Result<Bytes> {
                let mut w = NdrWriter::new();
                self.that.ndr_marshal(&mut w)?;
                w.write_deferred()?;
                w.$write(self.value);
                w.write_i32(self.hresult);
                Ok(w.finish())
            }

            pub fn unmarshal(stub: &[u8]) -> Result<Self> {
                let mut r = NdrReader::new(stub);
                let that = OrpcThat::ndr_unmarshal(&mut r)?;
                let value = r.$read()?;
                let hresult = r.read_i32()?;
                Ok(Self { that, value, hresult })
            }
        }
    )+};
}

macro_rules! ptr_get_response {
    ($ty:ty; $($resp:ident),+ $(,)?) => {$(
        #[derive(Debug, Clone, PartialEq, Default)]
        pub struct $resp {
            pub that: OrpcThat,
            pub value: Option<$ty>,
            pub hresult: i32,
        }

        impl $resp {
            pub fn marshal(&self) -> Result<Bytes> {
                let mut w = NdrWriter::new();
                self.that.ndr_marshal(&mut w)?;
                w.write_deferred()?;
                w.write_unique_ptr(self.value.as_ref())?;
                w.write_deferred()?;
                w.write_i32(self.hresult);
                Ok(w.finish())
            }

            pub fn unmarshal(stub: &[u8]) -> Result<Self> {
                let mut r = NdrReader::new(stub);
                let that = OrpcThat::ndr_unmarshal(&mut r)?;
                let value = r.read_unique_ptr()?;
                let hresult = r.read_i32()?;
                Ok(Self { that, value, hresult })
            }
        }
    )+};
}

// Property getters and the two parameterless security-context calls.
this_only_request!(
    GetClassRequest,
    GetPrivLevelRequest,
    GetAuthLevelRequest,
    GetIsAuthenticatedRequest,
    GetDeliveryRequest,
    GetTraceRequest,
    GetPriorityRequest,
    GetJournalRequest,
    GetResponseQueueInfoV1Request,
    GetAppSpecificRequest,
    GetSourceMachineGuidRequest,
    GetBodyLengthRequest,
    GetBodyRequest,
    GetAdminQueueInfoV1Request,
    GetIdRequest,
    GetCorrelationIdRequest,
    GetAckRequest,
    GetLabelRequest,
    GetMaxTimeToReachQueueRequest,
    GetMaxTimeToReceiveRequest,
    GetHashAlgorithmRequest,
    GetEncryptAlgorithmRequest,
    GetSentTimeRequest,
    GetArrivedTimeRequest,
    GetDestinationQueueInfoRequest,
    GetSenderCertificateRequest,
    GetSenderIdRequest,
    GetSenderIdTypeRequest,
    AttachCurrentSecurityContextRequest,
    GetSenderVersionRequest,
    GetExtensionRequest,
    GetConnectorTypeGuidRequest,
    GetTransactionStatusQueueInfoRequest,
    GetDestinationSymmetricKeyRequest,
    GetSignatureRequest,
    GetAuthenticationProviderTypeRequest,
    GetAuthenticationProviderNameRequest,
    GetMsgClassRequest,
    GetPropertiesRequest,
    GetTransactionIdRequest,
    GetIsFirstInTransactionRequest,
    GetIsLastInTransactionRequest,
    GetResponseQueueInfoV2Request,
    GetAdminQueueInfoV2Request,
    GetReceivedAuthenticationLevelRequest,
    GetResponseQueueInfoRequest,
    GetAdminQueueInfoRequest,
    GetResponseDestinationRequest,
    GetDestinationRequest,
    GetLookupIdRequest,
    GetIsAuthenticated2Request,
    GetIsFirstInTransaction2Request,
    GetIsLastInTransaction2Request,
    AttachCurrentSecurityContext2Request,
    GetSoapEnvelopeRequest,
    GetCompoundMessageRequest,
);

// LONG property setters.
scalar_put_request!(i32, write_i32, read_i32;
    PutPrivLevelRequest,
    PutAuthLevelRequest,
    PutDeliveryRequest,
    PutTraceRequest,
    PutPriorityRequest,
    PutJournalRequest,
    PutAppSpecificRequest,
    PutAckRequest,
    PutMaxTimeToReachQueueRequest,
    PutMaxTimeToReceiveRequest,
    PutHashAlgorithmRequest,
    PutEncryptAlgorithmRequest,
    PutSenderIdTypeRequest,
    PutAuthenticationProviderTypeRequest,
    PutMsgClassRequest,
);

// BSTR property setters.
ptr_put_request!(BString;
    PutLabelRequest,
    PutConnectorTypeGuidRequest,
    PutAuthenticationProviderNameRequest,
    PutSoapHeaderRequest,
    PutSoapBodyRequest,
);

// VARIANT property setters.
ptr_put_request!(Variant;
    PutBodyRequest,
    PutCorrelationIdRequest,
    PutSenderCertificateRequest,
    PutExtensionRequest,
    PutDestinationSymmetricKeyRequest,
    PutSignatureRequest,
    PutSenderIdRequest,
);

// Interface-pointer putref setters.
ptr_put_request!(InterfacePointer;
    PutrefResponseQueueInfoV1Request,
    PutrefAdminQueueInfoV1Request,
    PutrefResponseQueueInfoV2Request,
    PutrefAdminQueueInfoV2Request,
    PutrefResponseQueueInfoRequest,
    PutrefAdminQueueInfoRequest,
    PutrefResponseDestinationRequest,
);

/// `Send`: deliver the message to a queue, optionally inside a transaction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SendRequest {
    pub this: OrpcThis,
    pub destination_queue: Option<InterfacePointer>,
    pub transaction: Option<Variant>,
}

impl SendRequest {
    pub fn marshal(&self) -> Result<Bytes> {
        let mut w = NdrWriter::new();
        self.this.ndr_marshal(&mut w)?;
        w.write_deferred()?;
        w.write_unique_ptr(self.destination_queue.as_ref())?;
        w.write_deferred()?;
        w.write_unique_ptr(self.transaction.as_ref())?;
        w.write_deferred()?;
        Ok(w.finish())
    }

    pub fn unmarshal(stub: &[u8]) -> Result<Self> {
        let mut r = NdrReader::new(stub);
        let this = OrpcThis::ndr_unmarshal(&mut r)?;
        let destination_queue = r.read_unique_ptr()?;
        let transaction = r.read_unique_ptr()?;
        Ok(Self {
            this,
            destination_queue,
            transaction,
        })
    }
}

// Setter and void-call responses.
hresult_response!(
    PutPrivLevelResponse,
    PutAuthLevelResponse,
    PutDeliveryResponse,
    PutTraceResponse,
    PutPriorityResponse,
    PutJournalResponse,
    PutAppSpecificResponse,
    PutAckResponse,
    PutMaxTimeToReachQueueResponse,
    PutMaxTimeToReceiveResponse,
    PutHashAlgorithmResponse,
    PutEncryptAlgorithmResponse,
    PutSenderIdTypeResponse,
    PutAuthenticationProviderTypeResponse,
    PutMsgClassResponse,
    PutLabelResponse,
    PutConnectorTypeGuidResponse,
    PutAuthenticationProviderNameResponse,
    PutSoapHeaderResponse,
    PutSoapBodyResponse,
    PutBodyResponse,
    PutCorrelationIdResponse,
    PutSenderCertificateResponse,
    PutExtensionResponse,
    PutDestinationSymmetricKeyResponse,
    PutSignatureResponse,
    PutSenderIdResponse,
    PutrefResponseQueueInfoV1Response,
    PutrefAdminQueueInfoV1Response,
    PutrefResponseQueueInfoV2Response,
    PutrefAdminQueueInfoV2Response,
    PutrefResponseQueueInfoResponse,
    PutrefAdminQueueInfoResponse,
    PutrefResponseDestinationResponse,
    AttachCurrentSecurityContextResponse,
    AttachCurrentSecurityContext2Response,
    SendResponse,
);

// LONG property getters.
scalar_get_response!(i32, write_i32, read_i32;
    GetClassResponse,
    GetPrivLevelResponse,
    GetAuthLevelResponse,
    GetDeliveryResponse,
    GetTraceResponse,
    GetPriorityResponse,
    GetJournalResponse,
    GetAppSpecificResponse,
    GetBodyLengthResponse,
    GetAckResponse,
    GetMaxTimeToReachQueueResponse,
    GetMaxTimeToReceiveResponse,
    GetHashAlgorithmResponse,
    GetEncryptAlgorithmResponse,
    GetSenderIdTypeResponse,
    GetSenderVersionResponse,
    GetAuthenticationProviderTypeResponse,
    GetMsgClassResponse,
);

// VARIANT_BOOL / SHORT property getters.
scalar_get_response!(i16, write_i16, read_i16;
    GetIsAuthenticatedResponse,
    GetIsFirstInTransactionResponse,
    GetIsLastInTransactionResponse,
    GetReceivedAuthenticationLevelResponse,
    GetIsAuthenticated2Response,
    GetIsFirstInTransaction2Response,
    GetIsLastInTransaction2Response,
);

// BSTR property getters.
ptr_get_response!(BString;
    GetSourceMachineGuidResponse,
    GetLabelResponse,
    GetConnectorTypeGuidResponse,
    GetAuthenticationProviderNameResponse,
    GetSoapEnvelopeResponse,
);

// VARIANT property getters.
ptr_get_response!(Variant;
    GetBodyResponse,
    GetIdResponse,
    GetCorrelationIdResponse,
    GetSentTimeResponse,
    GetArrivedTimeResponse,
    GetSenderCertificateResponse,
    GetSenderIdResponse,
    GetExtensionResponse,
    GetDestinationSymmetricKeyResponse,
    GetSignatureResponse,
    GetTransactionIdResponse,
    GetLookupIdResponse,
    GetCompoundMessageResponse,
);

// Interface-pointer getters.
ptr_get_response!(InterfacePointer;
    GetResponseQueueInfoV1Response,
    GetAdminQueueInfoV1Response,
    GetDestinationQueueInfoResponse,
    GetTransactionStatusQueueInfoResponse,
    GetPropertiesResponse,
    GetResponseQueueInfoV2Response,
    GetAdminQueueInfoV2Response,
    GetResponseQueueInfoResponse,
    GetAdminQueueInfoResponse,
    GetResponseDestinationResponse,
    GetDestinationResponse,
);

#[cfg(test)]
mod tests {
    use super::*;
    use dcom::generate_uuid;

    fn request_this() -> OrpcThis {
        OrpcThis::new(generate_uuid())
    }

    #[test]
    fn test_getter_request_is_bare_orpcthis() {
        let request = GetPriorityRequest { this: request_this() };
        let stub = request.marshal().unwrap();
        assert_eq!(stub.len(), 32);
        assert_eq!(GetPriorityRequest::unmarshal(&stub).unwrap(), request);
    }

    #[test]
    fn test_scalar_response_wire_layout() {
        let response = GetPriorityResponse {
            that: OrpcThat::default(),
            value: 3,
            hresult: 0,
        };
        let stub = response.marshal().unwrap();
        // ORPCTHAT (8) + value (4) + hresult (4)
        assert_eq!(stub.len(), 16);
        assert_eq!(&stub[8..12], &[3, 0, 0, 0]);
        assert_eq!(&stub[12..16], &[0, 0, 0, 0]);
        assert_eq!(GetPriorityResponse::unmarshal(&stub).unwrap(), response);
    }

    #[test]
    fn test_scalar_put_request_roundtrip() {
        let request = PutPriorityRequest {
            this: request_this(),
            value: -5,
        };
        let stub = request.marshal().unwrap();
        assert_eq!(PutPriorityRequest::unmarshal(&stub).unwrap(), request);
    }

    #[test]
    fn test_bool_response_roundtrip() {
        let response = GetIsAuthenticatedResponse {
            that: OrpcThat::default(),
            value: dcom::VARIANT_TRUE,
            hresult: 0,
        };
        let stub = response.marshal().unwrap();
        assert_eq!(GetIsAuthenticatedResponse::unmarshal(&stub).unwrap(), response);
    }

    #[test]
    fn test_bstr_put_request_roundtrip() {
        let request = PutLabelRequest {
            this: request_this(),
            value: Some(BString::new("invoice batch")),
        };
        let stub = request.marshal().unwrap();
        assert_eq!(PutLabelRequest::unmarshal(&stub).unwrap(), request);

        let null_request = PutLabelRequest {
            this: request_this(),
            value: None,
        };
        let stub = null_request.marshal().unwrap();
        assert_eq!(PutLabelRequest::unmarshal(&stub).unwrap(), null_request);
    }

    #[test]
    fn test_variant_body_roundtrip() {
        let request = PutBodyRequest {
            this: request_this(),
            value: Some(Variant::ByteArray(vec![0xde, 0xad, 0xbe, 0xef])),
        };
        let stub = request.marshal().unwrap();
        assert_eq!(PutBodyRequest::unmarshal(&stub).unwrap(), request);
    }

    #[test]
    fn test_variant_get_response_roundtrip() {
        let response = GetLookupIdResponse {
            that: OrpcThat::default(),
            value: Some(Variant::UI8(0x0123_4567_89ab_cdef)),
            hresult: 0,
        };
        let stub = response.marshal().unwrap();
        assert_eq!(GetLookupIdResponse::unmarshal(&stub).unwrap(), response);
    }

    #[test]
    fn test_send_request_roundtrip() {
        let request = SendRequest {
            this: request_this(),
            destination_queue: Some(InterfacePointer::new(vec![1, 2, 3, 4])),
            transaction: Some(Variant::I4(1)),
        };
        let stub = request.marshal().unwrap();
        assert_eq!(SendRequest::unmarshal(&stub).unwrap(), request);

        let bare = SendRequest {
            this: request_this(),
            destination_queue: None,
            transaction: None,
        };
        let stub = bare.marshal().unwrap();
        assert_eq!(SendRequest::unmarshal(&stub).unwrap(), bare);
    }

    #[test]
    fn test_hresult_response_carries_failure() {
        let response = PutPriorityResponse {
            that: OrpcThat::default(),
            hresult: dcom::hresult::E_INVALIDARG,
        };
        let stub = response.marshal().unwrap();
        let decoded = PutPriorityResponse::unmarshal(&stub).unwrap();
        assert_eq!(decoded.hresult, dcom::hresult::E_INVALIDARG);
    }

    #[test]
    fn test_iface_response_roundtrip() {
        let response = GetResponseQueueInfoResponse {
            that: OrpcThat::default(),
            value: Some(InterfacePointer::new(vec![0x4d, 0x45, 0x4f, 0x57])),
            hresult: 0,
        };
        let stub = response.marshal().unwrap();
        assert_eq!(GetResponseQueueInfoResponse::unmarshal(&stub).unwrap(), response);
    }
}
