use std::sync::{Mutex, PoisonError};

/// Supplies transaction ids for outgoing queries.
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> u16;
}

/// Uniformly random ids from a private generator.
pub struct RandomIds {
    rng: Mutex<fastrand::Rng>,
}

impl RandomIds {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::new()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::with_seed(seed)),
        }
    }
}

impl Default for RandomIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for RandomIds {
    fn next_id(&self) -> u16 {
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .u16(..)
    }
}

/// Always hands out the same id.
#[derive(Debug, Clone, Copy)]
pub struct FixedId(pub u16);

impl IdSource for FixedId {
    fn next_id(&self) -> u16 {
        self.0
    }
}
