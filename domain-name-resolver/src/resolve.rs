use std::net::{Ipv4Addr, SocketAddr};

use configuration::{LookupConfiguration, ResolverConfiguration};
use dns::{IdSource, Message, RData, RandomIds, RECURSION_DESIRED};
use domain_name_query_types::QType;
use futures::future::{BoxFuture, FutureExt};

use crate::error::ResolveError;
use crate::transport::{Transport, UdpTransport};

pub const DNS_PORT: u16 = 53;

/// What a response tells us to do next.
enum Step<'a> {
    Answer(&'a RData),
    Glue(Ipv4Addr),
    Referral(&'a str),
    DeadEnd,
}

impl<'a> Step<'a> {
    fn from_response(response: &'a Message, qtype: QType) -> Self {
        if let Some(rdata) = response.answer(qtype) {
            Step::Answer(rdata)
        } else if let Some(addr) = response.glue_address() {
            Step::Glue(addr)
        } else if let Some(host) = response.referral() {
            Step::Referral(host)
        } else {
            Step::DeadEnd
        }
    }
}

pub struct Resolver<T, I = RandomIds> {
    transport: T,
    ids: I,
    config: ResolverConfiguration,
}

impl Resolver<UdpTransport, RandomIds> {
    pub fn udp(config: &LookupConfiguration) -> Self {
        Self::new(
            UdpTransport::new(&config.transport),
            RandomIds::new(),
            config.resolver.clone(),
        )
    }
}

impl<T, I> Resolver<T, I>
where
    T: Transport,
    I: IdSource,
{
    pub fn new(transport: T, ids: I, config: ResolverConfiguration) -> Self {
        Self {
            transport,
            ids,
            config,
        }
    }

    /// Asks a recursive resolver and takes the first answer as the result.
    pub async fn resolve_via_upstream(
        &self,
        domain: &str,
        qtype: QType,
        upstream: Ipv4Addr,
    ) -> Result<Ipv4Addr, ResolveError> {
        tracing::debug!("resolving {} {} via {}", domain, qtype, upstream);

        let response = self.query(upstream, domain, qtype, RECURSION_DESIRED).await?;
        let first = response
            .answers
            .first()
            .ok_or(ResolveError::NoAnswer { server: upstream })?;

        address_of(&first.rdata, domain, first.rtype)
    }

    /// Walks the delegation chain from the root server down to an answer.
    ///
    /// `max_queries` caps every query issued on behalf of this call, nested
    /// glueless lookups included.
    pub async fn resolve(&self, domain: &str, qtype: QType) -> Result<Ipv4Addr, ResolveError> {
        let mut budget = self.config.max_queries;
        self.resolve_at_depth(domain, qtype, 0, &mut budget).await
    }

    fn resolve_at_depth<'a>(
        &'a self,
        domain: &'a str,
        qtype: QType,
        depth: usize,
        budget: &'a mut usize,
    ) -> BoxFuture<'a, Result<Ipv4Addr, ResolveError>> {
        async move {
            if depth > self.config.max_referral_depth {
                return Err(ResolveError::DepthExceeded {
                    name: domain.to_string(),
                    depth: self.config.max_referral_depth,
                });
            }

            let mut nameserver = self.config.root_server;
            loop {
                if *budget == 0 {
                    return Err(ResolveError::TooManyReferrals {
                        name: domain.to_string(),
                        queries: self.config.max_queries,
                    });
                }
                *budget -= 1;

                tracing::info!("querying {} for {}", nameserver, domain);
                let response = self.query(nameserver, domain, qtype, 0).await?;

                match Step::from_response(&response, qtype) {
                    Step::Answer(rdata) => return address_of(rdata, domain, qtype),
                    Step::Glue(addr) => {
                        tracing::debug!("following glue to {}", addr);
                        nameserver = addr;
                    }
                    Step::Referral(host) => {
                        tracing::debug!("referred to {} without glue, resolving it first", host);
                        let host = host.to_string();
                        nameserver = self
                            .resolve_at_depth(&host, QType::A, depth + 1, &mut *budget)
                            .await?;
                    }
                    Step::DeadEnd => {
                        return Err(ResolveError::NoDelegation {
                            name: domain.to_string(),
                            server: nameserver,
                        });
                    }
                }
            }
        }
        .boxed()
    }

    async fn query(
        &self,
        nameserver: Ipv4Addr,
        domain: &str,
        qtype: QType,
        flags: u16,
    ) -> Result<Message, ResolveError> {
        let request_bytes = dns::encode_query(&self.ids, domain, qtype, flags)?;
        let server_addr = SocketAddr::from((nameserver, DNS_PORT));

        let response_bytes = self
            .transport
            .exchange(server_addr, &request_bytes)
            .await
            .map_err(|e| ResolveError::transport(server_addr, e))?;

        Ok(dns::decode_message(&response_bytes)?)
    }
}

fn address_of(rdata: &RData, domain: &str, qtype: QType) -> Result<Ipv4Addr, ResolveError> {
    match rdata {
        RData::A(addr) => Ok(*addr),
        _ => Err(ResolveError::NotAnAddress {
            name: domain.to_string(),
            qtype,
        }),
    }
}
