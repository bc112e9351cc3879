multiversx_sc::imports!();

use common_errors::ERROR_INVALID_CALLBACK_PARAMS;
use common_structs::{decode_operation_tag, CallbackParams, Operation};

/// Serialization of the state that crosses the flash loan boundary. The
/// lending market only carries an opaque byte blob through the callback, so
/// everything needed to resume execution is packed here at entry and unpacked
/// exactly once inside `onFlashLoan`.
#[multiversx_sc::module]
pub trait CodecModule {
    fn encode_callback_params(&self, params: &CallbackParams<Self::Api>) -> ManagedBuffer {
        let mut encoded = ManagedBuffer::new();
        if params.top_encode(&mut encoded).is_err() {
            sc_panic!(ERROR_INVALID_CALLBACK_PARAMS);
        }
        encoded
    }

    /// Reads the operation tag only; the tag occupies the first byte of the
    /// payload so it can be dispatched on before the full schema is decoded.
    fn decode_operation(&self, buffer: &ManagedBuffer) -> Operation {
        match decode_operation_tag(buffer) {
            Some(operation) => operation,
            None => sc_panic!(ERROR_INVALID_CALLBACK_PARAMS),
        }
    }

    /// Full decode; rejects malformed payloads instead of returning partially
    /// populated params.
    fn decode_callback_params(&self, buffer: &ManagedBuffer) -> CallbackParams<Self::Api> {
        match CallbackParams::top_decode(buffer.clone()) {
            Ok(params) => params,
            Err(_) => sc_panic!(ERROR_INVALID_CALLBACK_PARAMS),
        }
    }
}
