//! Network capabilities: asynchronous HTTP and DNS TXT resolution.
//!
//! Both capabilities are behind traits so tests can inject mocks and hosts
//! can substitute their own transport.

mod dns;
mod http;

pub use dns::{update_url_from_record, HickoryTxtResolver, ResolveError, TxtResolver};
pub use http::{AsyncHttpClient, FetchError, ReqwestClient};

#[cfg(test)]
pub(crate) use dns::tests::MockTxtResolver;
