/*!
 * Provider implementations for the translation endpoint.
 *
 * This module contains the client for the DeepSeek chat-completions API and
 * a mock provider used by the test suite to exercise the pipeline without
 * network access.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for translation providers
///
/// This trait defines the interface a provider implementation must follow,
/// allowing the translation service to drive the real API and the test
/// double through the same shape.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Extract the reply text from the provider response
    fn extract_text(response: &Self::Response) -> String;
}

pub mod deepseek;
pub mod mock;
