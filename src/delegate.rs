//! The delegate seam.
//!
//! # Responsibilities
//! - Define the contract between the host and the injected lambda
//! - Adapt plain closures to that contract
//! - Classify the two failures the host can surface per request
//!
//! # Design Decisions
//! - The delegate is synchronous; it runs inline on the request task
//! - Payloads move by value; the delegate owns its input
//! - Delegate errors stay opaque to the host (boxed, Display only)

use serde_json::Value;
use thiserror::Error;

/// Boxed error type returned by delegates.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A function from one JSON value to one JSON-serializable value.
///
/// This is the only business logic in the system. The host treats it as
/// opaque: it is invoked once per request with the parsed payload and its
/// result (or error message) becomes the response body.
pub trait Delegate: Send + Sync + 'static {
    /// Transform the payload. Errors are surfaced to the client as an HTTP
    /// 500 with the error's message in the `error` field.
    fn invoke(&self, payload: Value) -> Result<Value, BoxError>;
}

/// Returns a new [`DelegateFn`] with the given closure.
pub fn delegate_fn<F>(f: F) -> DelegateFn<F>
where
    F: Fn(Value) -> Result<Value, BoxError> + Send + Sync + 'static,
{
    DelegateFn { f }
}

/// A [`Delegate`] implemented by a closure.
#[derive(Clone, Copy, Debug)]
pub struct DelegateFn<F> {
    f: F,
}

impl<F> Delegate for DelegateFn<F>
where
    F: Fn(Value) -> Result<Value, BoxError> + Send + Sync + 'static,
{
    fn invoke(&self, payload: Value) -> Result<Value, BoxError> {
        (self.f)(payload)
    }
}

/// Delegate that returns the payload unchanged.
///
/// Hosted by the shipped binary so a fresh deployment can be exercised
/// without writing a lambda first.
#[derive(Debug, Clone, Copy, Default)]
pub struct Echo;

impl Delegate for Echo {
    fn invoke(&self, payload: Value) -> Result<Value, BoxError> {
        Ok(payload)
    }
}

/// Errors that can occur while processing a buffered request body.
///
/// Both variants render to the same HTTP 500 response shape; the client
/// cannot distinguish a malformed payload from a failing delegate.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The body was not valid JSON (invalid UTF-8 included).
    #[error("invalid JSON payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// The delegate returned an error.
    #[error("{0}")]
    Delegate(BoxError),
}

/// Parse the buffered body and run the delegate over it.
pub fn process(delegate: &dyn Delegate, body: &[u8]) -> Result<Value, InvokeError> {
    let payload: Value = serde_json::from_slice(body)?;
    delegate.invoke(payload).map_err(InvokeError::Delegate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn echo_returns_payload_unchanged() {
        let payload = json!({"a": 1, "nested": [true, null]});
        let result = Echo.invoke(payload.clone()).unwrap();
        assert_eq!(result, payload);
    }

    #[test]
    fn closures_are_delegates() {
        let double = delegate_fn(|payload| {
            let n = payload
                .as_i64()
                .ok_or_else(|| BoxError::from("expected a number"))?;
            Ok(json!(n * 2))
        });
        assert_eq!(process(&double, b"21").unwrap(), json!(42));
        assert!(matches!(
            process(&double, b"\"nope\""),
            Err(InvokeError::Delegate(_))
        ));
    }

    #[test]
    fn malformed_body_is_a_payload_error() {
        let err = process(&Echo, b"not json").unwrap_err();
        assert!(matches!(err, InvokeError::Payload(_)));
        assert!(err.to_string().starts_with("invalid JSON payload"));
    }

    #[test]
    fn empty_body_is_a_payload_error() {
        assert!(matches!(
            process(&Echo, b""),
            Err(InvokeError::Payload(_))
        ));
    }

    #[test]
    fn delegate_error_message_is_preserved() {
        let failing = delegate_fn(|_| Err("lambda exploded".into()));
        let err = process(&failing, b"{}").unwrap_err();
        assert_eq!(err.to_string(), "lambda exploded");
    }
}
