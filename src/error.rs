use std::any::Any;

use thiserror::Error;

/// A failure raised by a producer body while computing a value.
///
/// When a producer panics between two yield points, the panic is caught on
/// the producer thread and handed to the consumer as a `ProducerError` on the
/// *next* pull. The generator is exhausted afterward: every later pull
/// reports plain exhaustion, never the same error again.
///
/// ```rust
/// use lazygen::Pull;
/// use lazygen::generate;
///
/// let mut faulty = generate(|mut out| {
///     out.yield_(1);
///     panic!("ran out of numbers");
/// });
///
/// assert_eq!(faulty.next().unwrap(), Some(1));
/// let error = faulty.next().unwrap_err();
/// assert!(error.message().contains("ran out of numbers"));
/// assert_eq!(faulty.next().unwrap(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("producer failed: {message}")]
pub struct ProducerError {
    message: String,
}

impl ProducerError {
    /// Extracts a printable message from a caught panic payload. Panics
    /// carry `&str` or `String` payloads in practice; anything else gets a
    /// generic description.
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(text) = payload.downcast_ref::<&str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "producer panicked".to_string()
        };
        ProducerError { message }
    }

    /// The message the producer failed with.
    pub fn message(&self) -> &str {
        &self.message
    }
}
