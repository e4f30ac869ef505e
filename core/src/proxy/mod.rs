//! Proxy module - dev server redirect server

pub mod prefix;
pub mod redirector;
pub mod server;

pub use prefix::{PathPrefix, PrefixError};
pub use redirector::{sanitize_for_log, DevServerRedirector, Redirection};
pub use server::ProxyServer;
