//! Typed Rust client for the websms.com SMS JSON gateway.
//!
//! The crate has a domain layer of validated message types, a transport layer for the
//! JSON wire format and response classification, and a small client layer that issues
//! one HTTPS request per send.
//!
//! ```rust,no_run
//! use websms::{Credentials, Message, SendOptions, WebSmsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), websms::SmsError> {
//!     let client = WebSmsClient::new(Credentials::new("username", "password")?)?;
//!     let message = Message::text(["4367612345678"], "hello")?;
//!     let response = client.send(&message, SendOptions::test()).await?;
//!     println!("transfer id: {:?}", response.transfer_id);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod domain;
mod error;
mod transport;

pub use client::{
    Credentials, DEFAULT_GATEWAY_URL, LogHandler, SendHandler, WebSmsClient, WebSmsClientBuilder,
    handler_fn, success_fn,
};
pub use config::ClientConfig;
pub use domain::{
    ApiResponse, BinaryMessageConfig, BinarySegment, ConstructionOptions, MaxSmsPerMessage,
    Message, MessageContent, MessageKind, MessageText, RecipientAddress, SendOptions,
    SenderAddress, SenderAddressType, TextMessageConfig, ValidationError,
};
pub use error::{ErrorCause, SmsError};
