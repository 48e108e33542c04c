//! Language model backends used to write the digest.
//!
//! Every backend implements [`ModelInvoker`], a plain prompt-to-completion
//! contract. [`BedrockModelInvoker`] talks to the Bedrock runtime REST API and
//! adapts the request and response shapes per [`ModelProvider`].

pub mod bedrock;
pub mod provider;
pub mod service;

pub use bedrock::{BedrockConfig, BedrockModelInvoker, regional_endpoint};
pub use provider::ModelProvider;
pub use service::ModelInvoker;

#[cfg(test)]
pub use service::MockModelInvoker;
