use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

/// Process-wide sequence number of an exchange, attached as a request extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct RequestId(pub u64);

impl RequestId {
    pub fn next() -> Self {
        static SEQ: AtomicU64 = AtomicU64::new(0);
        Self(SEQ.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
