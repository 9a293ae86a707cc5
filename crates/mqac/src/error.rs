//! Binding-level errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MqacError {
    #[error(transparent)]
    Dcom(#[from] dcom::DcomError),

    #[error(transparent)]
    Rpc(#[from] dcerpc::RpcError),

    #[error(transparent)]
    Ndr(#[from] ndr::NdrError),

    /// The call completed at the transport level but the server returned a
    /// failure HRESULT.
    #[error("{method} failed: HRESULT 0x{hresult:08x}")]
    Call { method: &'static str, hresult: u32 },
}

pub type Result<T> = std::result::Result<T, MqacError>;

/// Map a returned HRESULT to the binding's error convention: S_OK passes,
/// any other value becomes a [`MqacError::Call`] carrying the method name.
pub fn check_hresult(method: &'static str, hresult: i32) -> Result<()> {
    if dcom::hresult::succeeded(hresult) {
        Ok(())
    } else {
        Err(MqacError::Call {
            method,
            hresult: hresult as u32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcom::hresult;

    #[test]
    fn test_check_hresult() {
        assert!(check_hresult("IMSMQMessage3::get_Class", hresult::S_OK).is_ok());
        match check_hresult("IMSMQMessage3::get_Class", hresult::E_FAIL) {
            Err(MqacError::Call { method, hresult }) => {
                assert_eq!(method, "IMSMQMessage3::get_Class");
                assert_eq!(hresult, 0x8000_4005);
            }
            other => panic!("expected call error, got {:?}", other),
        }
    }

    #[test]
    fn test_nonzero_success_codes_are_failures() {
        match check_hresult("IMSMQMessage3::get_Class", hresult::S_FALSE) {
            Err(MqacError::Call { method, hresult }) => {
                assert_eq!(method, "IMSMQMessage3::get_Class");
                assert_eq!(hresult, 1);
            }
            other => panic!("expected call error, got {:?}", other),
        }
        assert!(check_hresult("IMSMQMessage3::get_Class", 2).is_err());
    }

    #[test]
    fn test_call_error_message_names_method() {
        let err = check_hresult("IMSMQMessage3::put_Label", hresult::MQ_ERROR).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("put_Label"));
        assert!(msg.contains("c00e0001"));
    }
}
