//! Natural-language explanations of a match score.
//!
//! The explanation backend is an injected [`TextCompletionService`]; the
//! ranking logic never depends on it. [`explain`] renders the counsellor
//! prompt from an [`ExplanationContext`] and forwards it to the service.

use thiserror::Error;

const ROLE: &str = "You are a professional college counselor advising a prospective student \
                    who is searching for schools against a set of criteria.";

const INSTRUCTIONS: &str = "Only answer what was asked, without preamble or closing remarks, in \
                            under 100 words. Give a constructive review, without excessive \
                            flattery, of why this school received its similarity score.";

/// Errors from [`TextCompletionService::complete`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    /// The completion backend could not be started.
    #[error("failed to start completion command '{command}': {message}")]
    Spawn {
        /// Command that was launched.
        command: String,
        /// Launch failure description.
        message: String,
    },
    /// Exchanging data with the backend failed.
    #[error("failed to exchange data with completion command '{command}': {message}")]
    Io {
        /// Command that was running.
        command: String,
        /// I/O failure description.
        message: String,
    },
    /// The backend exited unsuccessfully.
    #[error("completion command '{command}' exited with {status}: {stderr}")]
    Failed {
        /// Command that was running.
        command: String,
        /// Exit status description.
        status: String,
        /// Captured standard error.
        stderr: String,
    },
    /// The backend produced output that was not UTF-8.
    #[error("completion command '{command}' produced non-UTF-8 output")]
    InvalidOutput {
        /// Command that was running.
        command: String,
    },
}

/// Produce text for a prompt.
///
/// # Examples
///
/// ```rust
/// use collegiate_core::{CompletionError, TextCompletionService};
///
/// struct Echo;
///
/// impl TextCompletionService for Echo {
///     fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
///         Ok(prompt.to_owned())
///     }
/// }
///
/// assert_eq!(Echo.complete("hello")?, "hello");
/// # Ok::<(), CompletionError>(())
/// ```
pub trait TextCompletionService: Send + Sync {
    /// Complete `prompt`.
    ///
    /// # Errors
    /// Returns [`CompletionError`] when the backend fails.
    fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// Everything the explanation prompt refers to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExplanationContext {
    /// Institution under discussion.
    pub institution_name: String,
    /// Similarity score the institution received.
    pub score: f64,
    /// Search criteria as `(name, value)` pairs, excluding location and `k`.
    pub criteria: Vec<(String, String)>,
    /// Prior chat messages, oldest first.
    pub history: Vec<String>,
    /// The user's new message.
    pub message: String,
}

impl ExplanationContext {
    /// Render the counsellor prompt.
    ///
    /// # Examples
    /// ```
    /// use collegiate_core::ExplanationContext;
    ///
    /// let context = ExplanationContext {
    ///     institution_name: "Example College".into(),
    ///     score: 0.82,
    ///     criteria: vec![("Major".into(), "STEM".into())],
    ///     history: Vec::new(),
    ///     message: "Why this score?".into(),
    /// };
    /// let prompt = context.prompt();
    /// assert!(prompt.contains("Example College"));
    /// assert!(prompt.contains("Major: STEM"));
    /// ```
    pub fn prompt(&self) -> String {
        let criteria = self
            .criteria
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join(", ");
        let history = if self.history.is_empty() {
            "(none)".to_owned()
        } else {
            self.history.join("\n")
        };

        format!(
            "{ROLE}\n\
             The student is looking into {name}.\n\
             The school received a similarity match score (range 0-1) of {score}.\n\
             The criteria were: {criteria}.\n\
             Chat history:\n{history}\n\
             New message from the student: {message}\n\
             {INSTRUCTIONS}\n",
            name = self.institution_name,
            score = self.score,
            message = self.message,
        )
    }
}

/// Ask `service` to explain the score described by `context`.
///
/// # Errors
/// Propagates [`CompletionError`] from the service.
pub fn explain(
    service: &dyn TextCompletionService,
    context: &ExplanationContext,
) -> Result<String, CompletionError> {
    let response = service.complete(&context.prompt())?;
    Ok(response.trim().to_owned())
}
