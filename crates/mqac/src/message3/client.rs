//! Async `IMSMQMessage3` client
//!
//! One method per operation. Each builds the request stub, invokes through
//! the object proxy, decodes the response, and maps a failure HRESULT to
//! [`MqacError::Call`](crate::error::MqacError::Call). Getters return the
//! out-parameter; pointer-typed getters return `None` when the server sends
//! a null pointer.

use super::{interface_syntax, ops, opnum};
use crate::error::{check_hresult, Result};
use dcerpc::RpcClient;
use dcom::{BString, InterfacePointer, Ipid, ObjectProxy, Variant};
use std::net::SocketAddr;
use std::sync::Arc;

macro_rules! get_scalar {
    ($fn_name:ident, $ty:ty, $req:ident, $resp:ident, $opnum:path, $method:literal) => {
        pub async fn $fn_name(&self) -> Result<$ty> {
            let request = ops::$req {
                this: self.proxy.orpc_this(),
            };
            let stub = self.proxy.invoke($opnum, $method, request.marshal()?).await?;
            let response = ops::$resp::unmarshal(&stub)?;
            check_hresult($method, response.hresult)?;
            Ok(response.value)
        }
    };
}

macro_rules! get_ptr {
    ($fn_name:ident, $ty:ty, $req:ident, $resp:ident, $opnum:path, $method:literal) => {
        pub async fn $fn_name(&self) -> Result<Option<$ty>> {
            let request = ops::$req {
                this: self.proxy.orpc_this(),
            };
            let stub = self.proxy.invoke($opnum, $method, request.marshal()?).await?;
            let response = ops::$resp::unmarshal(&stub)?;
            check_hresult($method, response.hresult)?;
            Ok(response.value)
        }
    };
}

macro_rules! put_scalar {
    ($fn_name:ident, $ty:ty, $req:ident, $resp:ident, $opnum:path, $method:literal) => {
        pub async fn $fn_name(&self, value: $ty) -> Result<()> {
            let request = ops::$req {
                this: self.proxy.orpc_this(),
                value,
            };
            let stub = self.proxy.invoke($opnum, $method, request.marshal()?).await?;
            let response = ops::$resp::unmarshal(&stub)?;
            check_hresult($method, response.hresult)
        }
    };
}

macro_rules! put_ptr {
    ($fn_name:ident, $ty:ty, $req:ident, $resp:ident, $opnum:path, $method:literal) => {
        pub async fn $fn_name(&self, value: Option<$ty>) -> Result<()> {
            let request = ops::$req {
                this: self.proxy.orpc_this(),
                value,
            };
            let stub = self.proxy.invoke($opnum, $method, request.marshal()?).await?;
            let response = ops::$resp::unmarshal(&stub)?;
            check_hresult($method, response.hresult)
        }
    };
}

macro_rules! void_call {
    ($fn_name:ident, $req:ident, $resp:ident, $opnum:path, $method:literal) => {
        pub async fn $fn_name(&self) -> Result<()> {
            let request = ops::$req {
                this: self.proxy.orpc_this(),
            };
            let stub = self.proxy.invoke($opnum, $method, request.marshal()?).await?;
            let response = ops::$resp::unmarshal(&stub)?;
            check_hresult($method, response.hresult)
        }
    };
}

/// Client for one `IMSMQMessage3` instance.
pub struct Message3Client {
    proxy: ObjectProxy,
}

impl Message3Client {
    /// Wrap a bound connection; no instance is addressed until
    /// [`set_ipid`](Self::set_ipid) is called.
    pub fn new(client: Arc<RpcClient>) -> Self {
        Self {
            proxy: ObjectProxy::new(client),
        }
    }

    pub fn with_ipid(client: Arc<RpcClient>, ipid: Ipid) -> Self {
        Self {
            proxy: ObjectProxy::with_ipid(client, ipid),
        }
    }

    /// Connect a fresh transport and bind the interface.
    pub async fn connect(addr: SocketAddr) -> Result<Self> {
        let client = RpcClient::connect(addr, interface_syntax()).await?;
        Ok(Self::new(Arc::new(client)))
    }

    pub fn ipid(&self) -> Option<Ipid> {
        self.proxy.ipid()
    }

    pub fn set_ipid(&mut self, ipid: Ipid) {
        self.proxy.set_ipid(ipid);
    }

    get_scalar!(get_class, i32, GetClassRequest, GetClassResponse,
        opnum::GET_CLASS, "IMSMQMessage3::get_Class");
    get_scalar!(get_priv_level, i32, GetPrivLevelRequest, GetPrivLevelResponse,
        opnum::GET_PRIV_LEVEL, "IMSMQMessage3::get_PrivLevel");
    put_scalar!(put_priv_level, i32, PutPrivLevelRequest, PutPrivLevelResponse,
        opnum::PUT_PRIV_LEVEL, "IMSMQMessage3::put_PrivLevel");
    get_scalar!(get_auth_level, i32, GetAuthLevelRequest, GetAuthLevelResponse,
        opnum::GET_AUTH_LEVEL, "IMSMQMessage3::get_AuthLevel");
    put_scalar!(put_auth_level, i32, PutAuthLevelRequest, PutAuthLevelResponse,
        opnum::PUT_AUTH_LEVEL, "IMSMQMessage3::put_AuthLevel");
    get_scalar!(get_is_authenticated, i16, GetIsAuthenticatedRequest,
        GetIsAuthenticatedResponse, opnum::GET_IS_AUTHENTICATED,
        "IMSMQMessage3::get_IsAuthenticated");
    get_scalar!(get_delivery, i32, GetDeliveryRequest, GetDeliveryResponse,
        opnum::GET_DELIVERY, "IMSMQMessage3::get_Delivery");
    put_scalar!(put_delivery, i32, PutDeliveryRequest, PutDeliveryResponse,
        opnum::PUT_DELIVERY, "IMSMQMessage3::put_Delivery");
    get_scalar!(get_trace, i32, GetTraceRequest, GetTraceResponse,
        opnum::GET_TRACE, "IMSMQMessage3::get_Trace");
    put_scalar!(put_trace, i32, PutTraceRequest, PutTraceResponse,
        opnum::PUT_TRACE, "IMSMQMessage3::put_Trace");
    get_scalar!(get_priority, i32, GetPriorityRequest, GetPriorityResponse,
        opnum::GET_PRIORITY, "IMSMQMessage3::get_Priority");
    put_scalar!(put_priority, i32, PutPriorityRequest, PutPriorityResponse,
        opnum::PUT_PRIORITY, "IMSMQMessage3::put_Priority");
    get_scalar!(get_journal, i32, GetJournalRequest, GetJournalResponse,
        opnum::GET_JOURNAL, "IMSMQMessage3::get_Journal");
    put_scalar!(put_journal, i32, PutJournalRequest, PutJournalResponse,
        opnum::PUT_JOURNAL, "IMSMQMessage3::put_Journal");
    get_ptr!(get_response_queue_info_v1, InterfacePointer,
        GetResponseQueueInfoV1Request, GetResponseQueueInfoV1Response,
        opnum::GET_RESPONSE_QUEUE_INFO_V1, "IMSMQMessage3::get_ResponseQueueInfo_v1");
    put_ptr!(putref_response_queue_info_v1, InterfacePointer,
        PutrefResponseQueueInfoV1Request, PutrefResponseQueueInfoV1Response,
        opnum::PUTREF_RESPONSE_QUEUE_INFO_V1, "IMSMQMessage3::putref_ResponseQueueInfo_v1");
    get_scalar!(get_app_specific, i32, GetAppSpecificRequest, GetAppSpecificResponse,
        opnum::GET_APP_SPECIFIC, "IMSMQMessage3::get_AppSpecific");
    put_scalar!(put_app_specific, i32, PutAppSpecificRequest, PutAppSpecificResponse,
        opnum::PUT_APP_SPECIFIC, "IMSMQMessage3::put_AppSpecific");
    get_ptr!(get_source_machine_guid, BString, GetSourceMachineGuidRequest,
        GetSourceMachineGuidResponse, opnum::GET_SOURCE_MACHINE_GUID,
        "IMSMQMessage3::get_SourceMachineGuid");
    get_scalar!(get_body_length, i32, GetBodyLengthRequest, GetBodyLengthResponse,
        opnum::GET_BODY_LENGTH, "IMSMQMessage3::get_BodyLength");
    get_ptr!(get_body, Variant, GetBodyRequest, GetBodyResponse,
        opnum::GET_BODY, "IMSMQMessage3::get_Body");
    put_ptr!(put_body, Variant, PutBodyRequest, PutBodyResponse,
        opnum::PUT_BODY, "IMSMQMessage3::put_Body");
    get_ptr!(get_admin_queue_info_v1, InterfacePointer,
        GetAdminQueueInfoV1Request, GetAdminQueueInfoV1Response,
        opnum::GET_ADMIN_QUEUE_INFO_V1, "IMSMQMessage3::get_AdminQueueInfo_v1");
    put_ptr!(putref_admin_queue_info_v1, InterfacePointer,
        PutrefAdminQueueInfoV1Request, PutrefAdminQueueInfoV1Response,
        opnum::PUTREF_ADMIN_QUEUE_INFO_V1, "IMSMQMessage3::putref_AdminQueueInfo_v1");
    get_ptr!(get_id, Variant, GetIdRequest, GetIdResponse,
        opnum::GET_ID, "IMSMQMessage3::get_Id");
    get_ptr!(get_correlation_id, Variant, GetCorrelationIdRequest,
        GetCorrelationIdResponse, opnum::GET_CORRELATION_ID,
        "IMSMQMessage3::get_CorrelationId");
    put_ptr!(put_correlation_id, Variant, PutCorrelationIdRequest,
        PutCorrelationIdResponse, opnum::PUT_CORRELATION_ID,
        "IMSMQMessage3::put_CorrelationId");
    get_scalar!(get_ack, i32, GetAckRequest, GetAckResponse,
        opnum::GET_ACK, "IMSMQMessage3::get_Ack");
    put_scalar!(put_ack, i32, PutAckRequest, PutAckResponse,
        opnum::PUT_ACK, "IMSMQMessage3::put_Ack");
    get_ptr!(get_label, BString, GetLabelRequest, GetLabelResponse,
        opnum::GET_LABEL, "IMSMQMessage3::get_Label");
    put_ptr!(put_label, BString, PutLabelRequest, PutLabelResponse,
        opnum::PUT_LABEL, "IMSMQMessage3::put_Label");
    get_scalar!(get_max_time_to_reach_queue, i32, GetMaxTimeToReachQueueRequest,
        GetMaxTimeToReachQueueResponse, opnum::GET_MAX_TIME_TO_REACH_QUEUE,
        "IMSMQMessage3::get_MaxTimeToReachQueue");
    put_scalar!(put_max_time_to_reach_queue, i32, PutMaxTimeToReachQueueRequest,
        PutMaxTimeToReachQueueResponse, opnum::PUT_MAX_TIME_TO_REACH_QUEUE,
        "IMSMQMessage3::put_MaxTimeToReachQueue");
    get_scalar!(get_max_time_to_receive, i32, GetMaxTimeToReceiveRequest,
        GetMaxTimeToReceiveResponse, opnum::GET_MAX_TIME_TO_RECEIVE,
        "IMSMQMessage3::get_MaxTimeToReceive");
    put_scalar!(put_max_time_to_receive, i32, PutMaxTimeToReceiveRequest,
        PutMaxTimeToReceiveResponse, opnum::PUT_MAX_TIME_TO_RECEIVE,
        "IMSMQMessage3::put_MaxTimeToReceive");
    get_scalar!(get_hash_algorithm, i32, GetHashAlgorithmRequest,
        GetHashAlgorithmResponse, opnum::GET_HASH_ALGORITHM,
        "IMSMQMessage3::get_HashAlgorithm");
    put_scalar!(put_hash_algorithm, i32, PutHashAlgorithmRequest,
        PutHashAlgorithmResponse, opnum::PUT_HASH_ALGORITHM,
        "IMSMQMessage3::put_HashAlgorithm");
    get_scalar!(get_encrypt_algorithm, i32, GetEncryptAlgorithmRequest,
        GetEncryptAlgorithmResponse, opnum::GET_ENCRYPT_ALGORITHM,
        "IMSMQMessage3::get_EncryptAlgorithm");
    put_scalar!(put_encrypt_algorithm, i32, PutEncryptAlgorithmRequest,
        PutEncryptAlgorithmResponse, opnum::PUT_ENCRYPT_ALGORITHM,
        "IMSMQMessage3::put_EncryptAlgorithm");
    get_ptr!(get_sent_time, Variant, GetSentTimeRequest, GetSentTimeResponse,
        opnum::GET_SENT_TIME, "IMSMQMessage3::get_SentTime");
    get_ptr!(get_arrived_time, Variant, GetArrivedTimeRequest,
        GetArrivedTimeResponse, opnum::GET_ARRIVED_TIME,
        "IMSMQMessage3::get_ArrivedTime");
    get_ptr!(get_destination_queue_info, InterfacePointer,
        GetDestinationQueueInfoRequest, GetDestinationQueueInfoResponse,
        opnum::GET_DESTINATION_QUEUE_INFO, "IMSMQMessage3::get_DestinationQueueInfo");
    get_ptr!(get_sender_certificate, Variant, GetSenderCertificateRequest,
        GetSenderCertificateResponse, opnum::GET_SENDER_CERTIFICATE,
        "IMSMQMessage3::get_SenderCertificate");
    put_ptr!(put_sender_certificate, Variant, PutSenderCertificateRequest,
        PutSenderCertificateResponse, opnum::PUT_SENDER_CERTIFICATE,
        "IMSMQMessage3::put_SenderCertificate");
    get_ptr!(get_sender_id, Variant, GetSenderIdRequest, GetSenderIdResponse,
        opnum::GET_SENDER_ID, "IMSMQMessage3::get_SenderId");
    get_scalar!(get_sender_id_type, i32, GetSenderIdTypeRequest,
        GetSenderIdTypeResponse, opnum::GET_SENDER_ID_TYPE,
        "IMSMQMessage3::get_SenderIdType");
    put_scalar!(put_sender_id_type, i32, PutSenderIdTypeRequest,
        PutSenderIdTypeResponse, opnum::PUT_SENDER_ID_TYPE,
        "IMSMQMessage3::put_SenderIdType");

    /// Deliver the message. `destination_queue` is the marshaled queue
    /// object; `transaction` selects the transaction (object or constant).
    pub async fn send(
        &self,
        destination_queue: Option<InterfacePointer>,
        transaction: Option<Variant>,
    ) -> Result<()> {
        let request = ops::SendRequest {
            this: self.proxy.orpc_this(),
            destination_queue,
            transaction,
        };
        let stub = self
            .proxy
            .invoke(opnum::SEND, "IMSMQMessage3::Send", request.marshal()?)
            .await?;
        let response = ops::SendResponse::unmarshal(&stub)?;
        check_hresult("IMSMQMessage3::Send", response.hresult)
    }

    void_call!(attach_current_security_context, AttachCurrentSecurityContextRequest,
        AttachCurrentSecurityContextResponse, opnum::ATTACH_CURRENT_SECURITY_CONTEXT,
        "IMSMQMessage3::AttachCurrentSecurityContext");
    get_scalar!(get_sender_version, i32, GetSenderVersionRequest,
        GetSenderVersionResponse, opnum::GET_SENDER_VERSION,
        "IMSMQMessage3::get_SenderVersion");
    get_ptr!(get_extension, Variant, GetExtensionRequest, GetExtensionResponse,
        opnum::GET_EXTENSION, "IMSMQMessage3::get_Extension");
    put_ptr!(put_extension, Variant, PutExtensionRequest, PutExtensionResponse,
        opnum::PUT_EXTENSION, "IMSMQMessage3::put_Extension");
    get_ptr!(get_connector_type_guid, BString, GetConnectorTypeGuidRequest,
        GetConnectorTypeGuidResponse, opnum::GET_CONNECTOR_TYPE_GUID,
        "IMSMQMessage3::get_ConnectorTypeGuid");
    put_ptr!(put_connector_type_guid, BString, PutConnectorTypeGuidRequest,
        PutConnectorTypeGuidResponse, opnum::PUT_CONNECTOR_TYPE_GUID,
        "IMSMQMessage3::put_ConnectorTypeGuid");
    get_ptr!(get_transaction_status_queue_info, InterfacePointer,
        GetTransactionStatusQueueInfoRequest, GetTransactionStatusQueueInfoResponse,
        opnum::GET_TRANSACTION_STATUS_QUEUE_INFO,
        "IMSMQMessage3::get_TransactionStatusQueueInfo");
    get_ptr!(get_destination_symmetric_key, Variant,
        GetDestinationSymmetricKeyRequest, GetDestinationSymmetricKeyResponse,
        opnum::GET_DESTINATION_SYMMETRIC_KEY,
        "IMSMQMessage3::get_DestinationSymmetricKey");
    put_ptr!(put_destination_symmetric_key, Variant,
        PutDestinationSymmetricKeyRequest, PutDestinationSymmetricKeyResponse,
        opnum::PUT_DESTINATION_SYMMETRIC_KEY,
        "IMSMQMessage3::put_DestinationSymmetricKey");
    get_ptr!(get_signature, Variant, GetSignatureRequest, GetSignatureResponse,
        opnum::GET_SIGNATURE, "IMSMQMessage3::get_Signature");
    put_ptr!(put_signature, Variant, PutSignatureRequest, PutSignatureResponse,
        opnum::PUT_SIGNATURE, "IMSMQMessage3::put_Signature");
    get_scalar!(get_authentication_provider_type, i32,
        GetAuthenticationProviderTypeRequest, GetAuthenticationProviderTypeResponse,
        opnum::GET_AUTHENTICATION_PROVIDER_TYPE,
        "IMSMQMessage3::get_AuthenticationProviderType");
    put_scalar!(put_authentication_provider_type, i32,
        PutAuthenticationProviderTypeRequest, PutAuthenticationProviderTypeResponse,
        opnum::PUT_AUTHENTICATION_PROVIDER_TYPE,
        "IMSMQMessage3::put_AuthenticationProviderType");
    get_ptr!(get_authentication_provider_name, BString,
        GetAuthenticationProviderNameRequest, GetAuthenticationProviderNameResponse,
        opnum::GET_AUTHENTICATION_PROVIDER_NAME,
        "IMSMQMessage3::get_AuthenticationProviderName");
    put_ptr!(put_authentication_provider_name, BString,
        PutAuthenticationProviderNameRequest, PutAuthenticationProviderNameResponse,
        opnum::PUT_AUTHENTICATION_PROVIDER_NAME,
        "IMSMQMessage3::put_AuthenticationProviderName");
    put_ptr!(put_sender_id, Variant, PutSenderIdRequest, PutSenderIdResponse,
        opnum::PUT_SENDER_ID, "IMSMQMessage3::put_SenderId");
    get_scalar!(get_msg_class, i32, GetMsgClassRequest, GetMsgClassResponse,
        opnum::GET_MSG_CLASS, "IMSMQMessage3::get_MsgClass");
    put_scalar!(put_msg_class, i32, PutMsgClassRequest, PutMsgClassResponse,
        opnum::PUT_MSG_CLASS, "IMSMQMessage3::put_MsgClass");
    get_ptr!(get_properties, InterfacePointer, GetPropertiesRequest,
        GetPropertiesResponse, opnum::GET_PROPERTIES, "IMSMQMessage3::get_Properties");
    get_ptr!(get_transaction_id, Variant, GetTransactionIdRequest,
        GetTransactionIdResponse, opnum::GET_TRANSACTION_ID,
        "IMSMQMessage3::get_TransactionId");
    get_scalar!(get_is_first_in_transaction, i16, GetIsFirstInTransactionRequest,
        GetIsFirstInTransactionResponse, opnum::GET_IS_FIRST_IN_TRANSACTION,
        "IMSMQMessage3::get_IsFirstInTransaction");
    get_scalar!(get_is_last_in_transaction, i16, GetIsLastInTransactionRequest,
        GetIsLastInTransactionResponse, opnum::GET_IS_LAST_IN_TRANSACTION,
        "IMSMQMessage3::get_IsLastInTransaction");
    get_ptr!(get_response_queue_info_v2, InterfacePointer,
        GetResponseQueueInfoV2Request, GetResponseQueueInfoV2Response,
        opnum::GET_RESPONSE_QUEUE_INFO_V2, "IMSMQMessage3::get_ResponseQueueInfo_v2");
    put_ptr!(putref_response_queue_info_v2, InterfacePointer,
        PutrefResponseQueueInfoV2Request, PutrefResponseQueueInfoV2Response,
        opnum::PUTREF_RESPONSE_QUEUE_INFO_V2, "IMSMQMessage3::putref_ResponseQueueInfo_v2");
    get_ptr!(get_admin_queue_info_v2, InterfacePointer,
        GetAdminQueueInfoV2Request, GetAdminQueueInfoV2Response,
        opnum::GET_ADMIN_QUEUE_INFO_V2, "IMSMQMessage3::get_AdminQueueInfo_v2");
    put_ptr!(putref_admin_queue_info_v2, InterfacePointer,
        PutrefAdminQueueInfoV2Request, PutrefAdminQueueInfoV2Response,
        opnum::PUTREF_ADMIN_QUEUE_INFO_V2, "IMSMQMessage3::putref_AdminQueueInfo_v2");
    get_scalar!(get_received_authentication_level, i16,
        GetReceivedAuthenticationLevelRequest, GetReceivedAuthenticationLevelResponse,
        opnum::GET_RECEIVED_AUTHENTICATION_LEVEL,
        "IMSMQMessage3::get_ReceivedAuthenticationLevel");
    get_ptr!(get_response_queue_info, InterfacePointer,
        GetResponseQueueInfoRequest, GetResponseQueueInfoResponse,
        opnum::GET_RESPONSE_QUEUE_INFO, "IMSMQMessage3::get_ResponseQueueInfo");
    put_ptr!(putref_response_queue_info, InterfacePointer,
        PutrefResponseQueueInfoRequest, PutrefResponseQueueInfoResponse,
        opnum::PUTREF_RESPONSE_QUEUE_INFO, "IMSMQMessage3::putref_ResponseQueueInfo");
    get_ptr!(get_admin_queue_info, InterfacePointer,
        GetAdminQueueInfoRequest, GetAdminQueueInfoResponse,
        opnum::GET_ADMIN_QUEUE_INFO, "IMSMQMessage3::get_AdminQueueInfo");
    put_ptr!(putref_admin_queue_info, InterfacePointer,
        PutrefAdminQueueInfoRequest, PutrefAdminQueueInfoResponse,
        opnum::PUTREF_ADMIN_QUEUE_INFO, "IMSMQMessage3::putref_AdminQueueInfo");
    get_ptr!(get_response_destination, InterfacePointer,
        GetResponseDestinationRequest, GetResponseDestinationResponse,
        opnum::GET_RESPONSE_DESTINATION, "IMSMQMessage3::get_ResponseDestination");
    put_ptr!(putref_response_destination, InterfacePointer,
        PutrefResponseDestinationRequest, PutrefResponseDestinationResponse,
        opnum::PUTREF_RESPONSE_DESTINATION, "IMSMQMessage3::putref_ResponseDestination");
    get_ptr!(get_destination, InterfacePointer, GetDestinationRequest,
        GetDestinationResponse, opnum::GET_DESTINATION, "IMSMQMessage3::get_Destination");
    get_ptr!(get_lookup_id, Variant, GetLookupIdRequest, GetLookupIdResponse,
        opnum::GET_LOOKUP_ID, "IMSMQMessage3::get_LookupId");
    get_scalar!(get_is_authenticated2, i16, GetIsAuthenticated2Request,
        GetIsAuthenticated2Response, opnum::GET_IS_AUTHENTICATED2,
        "IMSMQMessage3::get_IsAuthenticated2");
    get_scalar!(get_is_first_in_transaction2, i16, GetIsFirstInTransaction2Request,
        GetIsFirstInTransaction2Response, opnum::GET_IS_FIRST_IN_TRANSACTION2,
        "IMSMQMessage3::get_IsFirstInTransaction2");
    get_scalar!(get_is_last_in_transaction2, i16, GetIsLastInTransaction2Request,
        GetIsLastInTransaction2Response, opnum::GET_IS_LAST_IN_TRANSACTION2,
        "IMSMQMessage3::get_IsLastInTransaction2");
    void_call!(attach_current_security_context2, AttachCurrentSecurityContext2Request,
        AttachCurrentSecurityContext2Response, opnum::ATTACH_CURRENT_SECURITY_CONTEXT2,
        "IMSMQMessage3::AttachCurrentSecurityContext2");
    get_ptr!(get_soap_envelope, BString, GetSoapEnvelopeRequest,
        GetSoapEnvelopeResponse, opnum::GET_SOAP_ENVELOPE,
        "IMSMQMessage3::get_SoapEnvelope");
    get_ptr!(get_compound_message, Variant, GetCompoundMessageRequest,
        GetCompoundMessageResponse, opnum::GET_COMPOUND_MESSAGE,
        "IMSMQMessage3::get_CompoundMessage");
    put_ptr!(put_soap_header, BString, PutSoapHeaderRequest, PutSoapHeaderResponse,
        opnum::PUT_SOAP_HEADER, "IMSMQMessage3::put_SoapHeader");
    put_ptr!(put_soap_body, BString, PutSoapBodyRequest, PutSoapBodyResponse,
        opnum::PUT_SOAP_BODY, "IMSMQMessage3::put_SoapBody");
}
