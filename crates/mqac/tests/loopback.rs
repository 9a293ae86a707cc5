//! End-to-end tests against an in-process responder.
//!
//! The responder speaks just enough of the protocol to accept a bind and
//! answer calls: it decodes each request stub with the binding's own request
//! types and replies with encoded response stubs.

use bytes::Bytes;
use dcerpc::{BindAckPdu, Pdu, RequestPdu, ResponsePdu, RpcTransport};
use dcom::{
    generate_uuid, hresult, BString, InterfacePointer, Ipid, OrpcThat, Variant, VARIANT_TRUE,
};
use mqac::message3::{ops, opnum, Message3Client};
use mqac::MqacError;
use std::net::SocketAddr;
use tokio::net::TcpListener;

async fn serve<F>(n_calls: usize, mut handler: F) -> SocketAddr
where
    F: FnMut(RequestPdu) -> Bytes + Send + 'static,
{
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut transport = RpcTransport::new(stream);
        let bind = transport.read_pdu().await.unwrap();
        let ack = BindAckPdu::new(bind.header().call_id, 1);
        transport.write_pdu(&ack.encode()).await.unwrap();
        for _ in 0..n_calls {
            let request = match transport.read_pdu().await.unwrap() {
                Pdu::Request(request) => request,
                other => panic!("expected request, got {:?}", other.header().packet_type),
            };
            let call_id = request.header.call_id;
            let context_id = request.context_id;
            let stub = handler(request);
            let response = ResponsePdu::new(call_id, context_id, stub);
            transport.write_pdu(&response.encode()).await.unwrap();
        }
    });
    addr
}

async fn connect(addr: SocketAddr, ipid: Ipid) -> Message3Client {
    let mut client = Message3Client::connect(addr).await.unwrap();
    client.set_ipid(ipid);
    client
}

#[tokio::test]
async fn test_scalar_get_and_put() {
    let ipid = Ipid(generate_uuid());
    let addr = serve(2, move |request| {
        assert_eq!(request.object, Some(ipid.0));
        match request.opnum {
            opnum::GET_PRIORITY => {
                ops::GetPriorityRequest::unmarshal(&request.stub_data).unwrap();
                ops::GetPriorityResponse {
                    that: OrpcThat::default(),
                    value: 3,
                    hresult: hresult::S_OK,
                }
                .marshal()
                .unwrap()
            }
            opnum::PUT_PRIORITY => {
                let decoded = ops::PutPriorityRequest::unmarshal(&request.stub_data).unwrap();
                assert_eq!(decoded.value, 6);
                ops::PutPriorityResponse {
                    that: OrpcThat::default(),
                    hresult: hresult::S_OK,
                }
                .marshal()
                .unwrap()
            }
            other => panic!("unexpected opnum {other}"),
        }
    })
    .await;

    let client = connect(addr, ipid).await;
    assert_eq!(client.get_priority().await.unwrap(), 3);
    client.put_priority(6).await.unwrap();
}

#[tokio::test]
async fn test_label_roundtrip() {
    let ipid = Ipid(generate_uuid());
    let addr = serve(2, |request| match request.opnum {
        opnum::PUT_LABEL => {
            let decoded = ops::PutLabelRequest::unmarshal(&request.stub_data).unwrap();
            assert_eq!(decoded.value, Some(BString::new("orders")));
            ops::PutLabelResponse {
                that: OrpcThat::default(),
                hresult: hresult::S_OK,
            }
            .marshal()
            .unwrap()
        }
        opnum::GET_LABEL => ops::GetLabelResponse {
            that: OrpcThat::default(),
            value: Some(BString::new("orders")),
            hresult: hresult::S_OK,
        }
        .marshal()
        .unwrap(),
        other => panic!("unexpected opnum {other}"),
    })
    .await;

    let client = connect(addr, ipid).await;
    client.put_label(Some(BString::new("orders"))).await.unwrap();
    assert_eq!(client.get_label().await.unwrap(), Some(BString::new("orders")));
}

#[tokio::test]
async fn test_variant_body_and_bool_getter() {
    let ipid = Ipid(generate_uuid());
    let body = vec![0x01, 0x02, 0x03, 0x04, 0x05];
    let expected = body.clone();
    let addr = serve(2, move |request| match request.opnum {
        opnum::PUT_BODY => {
            let decoded = ops::PutBodyRequest::unmarshal(&request.stub_data).unwrap();
            assert_eq!(decoded.value, Some(Variant::ByteArray(expected.clone())));
            ops::PutBodyResponse {
                that: OrpcThat::default(),
                hresult: hresult::S_OK,
            }
            .marshal()
            .unwrap()
        }
        opnum::GET_IS_AUTHENTICATED => ops::GetIsAuthenticatedResponse {
            that: OrpcThat::default(),
            value: VARIANT_TRUE,
            hresult: hresult::S_OK,
        }
        .marshal()
        .unwrap(),
        other => panic!("unexpected opnum {other}"),
    })
    .await;

    let client = connect(addr, ipid).await;
    client
        .put_body(Some(Variant::ByteArray(body)))
        .await
        .unwrap();
    assert_eq!(client.get_is_authenticated().await.unwrap(), VARIANT_TRUE);
}

#[tokio::test]
async fn test_interface_pointer_getter() {
    let ipid = Ipid(generate_uuid());
    let marshaled = vec![0x4d, 0x45, 0x4f, 0x57, 0x01, 0x00, 0x00, 0x00];
    let expected = marshaled.clone();
    let addr = serve(1, move |request| {
        assert_eq!(request.opnum, opnum::GET_RESPONSE_QUEUE_INFO);
        ops::GetResponseQueueInfoResponse {
            that: OrpcThat::default(),
            value: Some(InterfacePointer::new(marshaled.clone())),
            hresult: hresult::S_OK,
        }
        .marshal()
        .unwrap()
    })
    .await;

    let client = connect(addr, ipid).await;
    let queue_info = client.get_response_queue_info().await.unwrap();
    assert_eq!(queue_info, Some(InterfacePointer::new(expected)));
}

#[tokio::test]
async fn test_send_with_transaction() {
    let ipid = Ipid(generate_uuid());
    let addr = serve(1, |request| {
        assert_eq!(request.opnum, opnum::SEND);
        let decoded = ops::SendRequest::unmarshal(&request.stub_data).unwrap();
        assert!(decoded.destination_queue.is_some());
        assert_eq!(decoded.transaction, Some(Variant::I4(1)));
        ops::SendResponse {
            that: OrpcThat::default(),
            hresult: hresult::S_OK,
        }
        .marshal()
        .unwrap()
    })
    .await;

    let client = connect(addr, ipid).await;
    client
        .send(
            Some(InterfacePointer::new(vec![1, 2, 3])),
            Some(Variant::I4(1)),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_failure_hresult_names_method() {
    let ipid = Ipid(generate_uuid());
    let addr = serve(1, |_| {
        ops::GetBodyResponse {
            that: OrpcThat::default(),
            value: None,
            hresult: hresult::MQ_ERROR,
        }
        .marshal()
        .unwrap()
    })
    .await;

    let client = connect(addr, ipid).await;
    match client.get_body().await {
        Err(MqacError::Call { method, hresult }) => {
            assert_eq!(method, "IMSMQMessage3::get_Body");
            assert_eq!(hresult, 0xc00e_0001);
        }
        other => panic!("expected call failure, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_missing_ipid_fails_before_sending() {
    // The responder only handles the bind; no request must reach it.
    let addr = serve(0, |_| Bytes::new()).await;
    let client = Message3Client::connect(addr).await.unwrap();
    match client.get_class().await {
        Err(MqacError::Dcom(dcom::DcomError::MissingIpid { method })) => {
            assert_eq!(method, "IMSMQMessage3::get_Class");
        }
        other => panic!("expected missing IPID, got {:?}", other.map(|_| ())),
    }
}
