//! LINE Messaging API plumbing: webhook signature, inbound events, outbound
//! messages and the reply client.

pub mod client;
pub mod event;
pub mod message;
pub mod signature;

pub const SIGNATURE_HEADER: &str = "x-line-signature";
