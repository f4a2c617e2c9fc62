use std::time::{Duration, Instant};

/// The instant an exchange was created.
#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct EnterTime(pub Instant);

impl EnterTime {
    pub fn now() -> Self {
        Self(Instant::now())
    }
    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}
