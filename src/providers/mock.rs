/*!
 * Mock provider implementation for testing.
 *
 * Simulates the translation endpoint without network access:
 * - `MockTranslator::working()` - echoes every numbered line with a marker
 * - `MockTranslator::failing()` - always fails with an error
 * - `MockTranslator::empty()` - succeeds with an empty reply
 * - `MockTranslator::truncated()` - drops all but the first reply line
 * - `MockTranslator::unnumbered()` - replies without the numeric prefixes
 */

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Marker the working mock prepends to every translated line
///
/// Deliberately carries a Vietnamese diacritic so tests of the
/// skip-translated heuristic see mock output as target-language text.
pub const MOCK_PREFIX: &str = "Đã dịch:";

static NUMBERED_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\.\s?(.*)$").unwrap());

/// Mock request carrying the two prompt messages
#[derive(Debug, Clone)]
pub struct MockRequest {
    /// System prompt content
    pub system: String,
    /// User prompt content (the numbered list)
    pub user: String,
}

/// Mock response mirroring the fields the service reads
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// The reply text
    pub content: String,
    /// Simulated prompt tokens
    pub prompt_tokens: Option<u64>,
    /// Simulated completion tokens
    pub completion_tokens: Option<u64>,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// Translate every numbered line by prefixing it with a marker
    Working,
    /// Always fail with a request error
    Failing,
    /// Succeed but return no content
    Empty,
    /// Return only the first numbered line
    Truncated,
    /// Return translations without numeric prefixes
    Unnumbered,
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of completed requests, for assertions on call counts
    request_count: Arc<AtomicUsize>,
}

impl MockTranslator {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    pub fn truncated() -> Self {
        Self::new(MockBehavior::Truncated)
    }

    pub fn unnumbered() -> Self {
        Self::new(MockBehavior::Unnumbered)
    }

    /// Number of requests completed so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Handle shared by clones of the counter, for assertions after the
    /// provider has been moved into a service
    pub fn request_counter(&self) -> Arc<AtomicUsize> {
        self.request_count.clone()
    }

    /// Apply the working translation to one source line
    pub fn translate_line(text: &str) -> String {
        format!("{} {}", MOCK_PREFIX, text)
    }

    fn reply_for(&self, request: &MockRequest) -> String {
        let translated: Vec<String> = request
            .user
            .lines()
            .filter_map(|line| {
                NUMBERED_LINE.captures(line).map(|caps| {
                    let number = &caps[1];
                    let text = &caps[2];
                    match self.behavior {
                        MockBehavior::Unnumbered => Self::translate_line(text),
                        _ => format!("{}. {}", number, Self::translate_line(text)),
                    }
                })
            })
            .collect();

        match self.behavior {
            MockBehavior::Truncated => translated.into_iter().take(1).collect(),
            _ => translated.join("\n"),
        }
    }
}

#[async_trait]
impl Provider for MockTranslator {
    type Request = MockRequest;
    type Response = MockResponse;

    async fn complete(&self, request: MockRequest) -> Result<MockResponse, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::RequestFailed(
                "Mock provider configured to fail".to_string(),
            )),
            MockBehavior::Empty => Ok(MockResponse {
                content: String::new(),
                prompt_tokens: None,
                completion_tokens: None,
            }),
            _ => {
                let content = self.reply_for(&request);
                let completion_tokens = (content.len() / 4) as u64;
                Ok(MockResponse {
                    prompt_tokens: Some((request.user.len() / 4) as u64),
                    completion_tokens: Some(completion_tokens),
                    content,
                })
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::RequestFailed(
                "Mock provider configured to fail".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn extract_text(response: &MockResponse) -> String {
        response.content.clone()
    }
}
