//! MCP (Model Context Protocol) transport and tool discovery.
//!
//! This crate owns everything that talks to remote MCP servers: credential
//! handling, the HTTP JSON-RPC transport, and the discovery engine that
//! reconciles fetched tools into the catalog. Storage stays behind the
//! repository ports from `mcphub-core`.
#![deny(unsafe_code)]

pub mod auth;
pub mod client;
pub mod discovery;

pub use client::{HttpTransport, HttpTransportFactory, PROTOCOL_VERSION, ServerInfo};
pub use discovery::{DiscoveryError, DiscoveryService};
