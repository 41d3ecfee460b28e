//! Reply channel back to the host PTY.
//!
//! The screen emits DSR/DA reports, mouse events, and paste brackets
//! through a sink injected at construction. The core never blocks: a sink
//! that cannot accept bytes causes the reply to be dropped with a logged
//! warning, which is how real terminals degrade under backpressure.

use std::sync::{Arc, Mutex};

/// Byte sink for terminal replies.
pub trait ResponseSink: Send {
    /// Deliver `bytes` in order. Return false if the sink cannot accept
    /// them; the caller drops the reply.
    fn write(&mut self, bytes: &[u8]) -> bool;
}

/// Discards every reply. Useful for tests and offline replay.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ResponseSink for NullSink {
    fn write(&mut self, _bytes: &[u8]) -> bool {
        true
    }
}

/// Shared capture buffer. Embedders clone the `Arc`, hand one clone to
/// the screen, and drain the other from their I/O loop.
impl ResponseSink for Arc<Mutex<Vec<u8>>> {
    fn write(&mut self, bytes: &[u8]) -> bool {
        match self.lock() {
            Ok(mut buf) => {
                buf.extend_from_slice(bytes);
                true
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_sink_accepts() {
        let mut sink = NullSink;
        assert!(sink.write(b"\x1b[0n"));
    }

    #[test]
    fn test_shared_buffer_captures_in_order() {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let mut sink = buf.clone();
        assert!(sink.write(b"\x1b[1;1R"));
        assert!(sink.write(b"\x1b[0n"));
        assert_eq!(&*buf.lock().unwrap(), b"\x1b[1;1R\x1b[0n");
    }
}
