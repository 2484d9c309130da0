use std::fmt;
use std::hash::{Hash, Hasher};

pub const TYPE_A: u16 = 1;
pub const TYPE_NS: u16 = 2;
pub const CLASS_IN: u16 = 1;

/// Record type of a question or resource record.
///
/// Only `A` and `NS` are interpreted; every other code is carried through
/// as `Other` so it survives a decode/encode cycle untouched. Equality and
/// hashing go by wire code, so `Other(1) == A`.
#[derive(Clone, Copy, Debug, Eq)]
pub enum QType {
    A,
    Ns,
    Other(u16),
}

impl QType {
    pub fn code(&self) -> u16 {
        match self {
            QType::A => TYPE_A,
            QType::Ns => TYPE_NS,
            QType::Other(code) => *code,
        }
    }
}

impl PartialEq for QType {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}

impl Hash for QType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code().hash(state);
    }
}

impl From<u16> for QType {
    fn from(code: u16) -> Self {
        match code {
            TYPE_A => QType::A,
            TYPE_NS => QType::Ns,
            other => QType::Other(other),
        }
    }
}

impl fmt::Display for QType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match QType::from(self.code()) {
            QType::A => write!(f, "A"),
            QType::Ns => write!(f, "NS"),
            // RFC 3597 notation for types without a mnemonic
            QType::Other(code) => write!(f, "TYPE{}", code),
        }
    }
}
