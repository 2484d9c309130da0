use std::net::{Ipv4Addr, SocketAddr};

use dns::DnsError;
use domain_name_query_types::QType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Codec(#[from] DnsError),

    #[error("{server} returned no answer records")]
    NoAnswer { server: Ipv4Addr },

    #[error("{server} returned neither an answer nor a referral for {name}")]
    NoDelegation { name: String, server: Ipv4Addr },

    #[error("glueless referrals nested deeper than {depth} while resolving {name}")]
    DepthExceeded { name: String, depth: usize },

    #[error("gave up on {name} after {queries} queries")]
    TooManyReferrals { name: String, queries: usize },

    #[error("answer for {name} is a {qtype} record, not an address")]
    NotAnAddress { name: String, qtype: QType },

    #[error("no response from {server}")]
    Timeout { server: SocketAddr },

    #[error("failed to reach {server}: {source}")]
    Unreachable {
        server: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

impl ResolveError {
    pub(crate) fn transport(server: SocketAddr, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::TimedOut => ResolveError::Timeout { server },
            _ => ResolveError::Unreachable { server, source },
        }
    }
}
