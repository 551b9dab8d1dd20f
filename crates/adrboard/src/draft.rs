//! Simulated ADR draft generation.
//!
//! Drafts are composed from canned text after a fixed delay. Generation runs
//! as a spawned task that can be cancelled, and a generator refuses to start
//! a second draft while one is still running.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::oneshot;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info};

use crate::adr::{AdrCategory, AdrTemplate};
use crate::error::{Error, Result};

/// Maximum number of input characters quoted in a natural-language title.
pub const TITLE_EXCERPT_CHARS: usize = 60;

/// What a draft is generated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftSource {
    /// A free-text description of the decision.
    Natural(String),
    /// The code changes of a pull request.
    Code,
    /// A template, by id.
    Template(String),
}

impl std::fmt::Display for DraftSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Natural(_) => write!(f, "natural"),
            Self::Code => write!(f, "code"),
            Self::Template(id) => write!(f, "template:{id}"),
        }
    }
}

/// A generated, unsaved ADR draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Draft {
    /// Draft title.
    pub title: String,
    /// Draft category.
    pub category: AdrCategory,
    /// Context section.
    pub context: String,
    /// Decision section.
    pub decision: String,
    /// Consequences section.
    pub consequences: String,
    /// Alternatives section.
    pub alternatives: String,
    /// Tags.
    pub tags: Vec<String>,
    /// BLAKE3 hex digest of the text fields.
    pub fingerprint: String,
}

impl Draft {
    fn new(
        title: String,
        category: AdrCategory,
        context: String,
        decision: String,
        consequences: String,
        alternatives: String,
        tags: Vec<String>,
    ) -> Self {
        let mut draft = Self {
            title,
            category,
            context,
            decision,
            consequences,
            alternatives,
            tags,
            fingerprint: String::new(),
        };
        draft.fingerprint = draft.compute_fingerprint();
        draft
    }

    /// A draft with no content, as left by a generation with nothing to use.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(
            String::new(),
            AdrCategory::General,
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            Vec::new(),
        )
    }

    /// Check whether every text field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.context.is_empty()
            && self.decision.is_empty()
            && self.consequences.is_empty()
            && self.alternatives.is_empty()
            && self.tags.is_empty()
    }

    /// Compute the fingerprint of the current text fields.
    #[must_use]
    pub fn compute_fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for field in [
            &self.title,
            &self.context,
            &self.decision,
            &self.consequences,
            &self.alternatives,
        ] {
            hasher.update(field.as_bytes());
            hasher.update(&[0]);
        }
        for tag in &self.tags {
            hasher.update(tag.as_bytes());
            hasher.update(&[0]);
        }
        hasher.finalize().to_hex().to_string()
    }
}

/// Build a draft from `source` without any delay.
///
/// An unknown template id or blank natural-language input yields
/// [`Draft::empty`].
#[must_use]
pub fn compose_draft(source: &DraftSource, templates: &[AdrTemplate]) -> Draft {
    match source {
        DraftSource::Template(id) => templates
            .iter()
            .find(|tpl| &tpl.id == id)
            .map_or_else(Draft::empty, from_template),
        DraftSource::Natural(input) if input.trim().is_empty() => Draft::empty(),
        DraftSource::Natural(input) => from_description(input),
        DraftSource::Code => from_code_changes(),
    }
}

fn from_template(template: &AdrTemplate) -> Draft {
    Draft::new(
        format!("[Generated] {}", template.name),
        template.category,
        template.fields.context.clone(),
        template.fields.decision.clone(),
        template.fields.consequences.clone(),
        template.fields.alternatives.clone(),
        template.tags.clone(),
    )
}

fn from_description(input: &str) -> Draft {
    let excerpt: String = input.chars().take(TITLE_EXCERPT_CHARS).collect();
    Draft::new(
        format!("[AI Draft] Decision: {excerpt}..."),
        AdrCategory::General,
        format!(
            "Based on the input: \"{input}\"\n\n\
             Our team needs to make an architectural decision regarding this topic. \
             The current system requires changes to support the described requirements. \
             Key constraints include performance, maintainability, and team expertise."
        ),
        "In the context of the described requirements, facing the need for \
         [specific constraint], we decided for [chosen approach] and against \
         [alternatives], to achieve [desired outcome], accepting [trade-offs]."
            .to_string(),
        "Positive: [Expected benefits from the decision].\n\n\
         Negative: [Known drawbacks and risks].\n\n\
         Neutral: [Side effects that need monitoring]."
            .to_string(),
        "Alternative 1: [Description and evaluation]\n\
         Alternative 2: [Description and evaluation]"
            .to_string(),
        Vec::new(),
    )
}

fn from_code_changes() -> Draft {
    Draft::new(
        "[AI Draft] Architecture change detected in PR".to_string(),
        AdrCategory::General,
        "Code changes detected in the pull request suggest an architectural modification. \
         The changes affect [components/services] and introduce [new patterns/dependencies]."
            .to_string(),
        "Based on the code changes, the decision is to [extracted decision]. \
         This modifies the existing architecture by [change description]."
            .to_string(),
        "Positive: [Inferred benefits from code changes].\n\n\
         Negative: [Potential issues identified].\n\n\
         Risks: [Risks detected from the changes]."
            .to_string(),
        String::new(),
        Vec::new(),
    )
}

/// Something that turns a [`DraftSource`] into a [`Draft`].
#[async_trait::async_trait]
pub trait DraftGenerator: Send + Sync {
    /// Generate a draft, waiting for it to complete.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GenerationInProgress`] if another generation is
    /// running, or [`Error::GenerationCancelled`] if it was cancelled.
    async fn generate(&self, source: DraftSource) -> Result<Draft>;

    /// Check whether a generation is currently running.
    fn is_generating(&self) -> bool;
}

/// Clears the in-flight flag when a generation ends, however it ends.
#[derive(Debug)]
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| Error::GenerationInProgress)?;
        Ok(Self(Arc::clone(flag)))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Generator that composes canned drafts after a fixed delay.
#[derive(Debug, Clone)]
pub struct SimulatedGenerator {
    delay: Duration,
    templates: Arc<Vec<AdrTemplate>>,
    in_flight: Arc<AtomicBool>,
}

impl SimulatedGenerator {
    /// Create a generator with the given delay and template catalogue.
    #[must_use]
    pub fn new(delay: Duration, templates: Vec<AdrTemplate>) -> Self {
        Self {
            delay,
            templates: Arc::new(templates),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The configured delay.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Start generating a draft in the background.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GenerationInProgress`] if a generation started by
    /// this generator (or a clone of it) has not finished yet.
    pub fn start(&self, source: DraftSource) -> Result<DraftTask> {
        let guard = InFlightGuard::acquire(&self.in_flight)?;
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        let delay = self.delay;
        let templates = Arc::clone(&self.templates);

        info!(source = %source, delay = ?delay, "Draft generation started");

        let handle = tokio::spawn(async move {
            let result = tokio::select! {
                () = tokio::time::sleep(delay) => Ok(compose_draft(&source, &templates)),
                _ = cancel_rx => Err(Error::GenerationCancelled),
            };
            match &result {
                Ok(draft) => debug!(fingerprint = %draft.fingerprint, "Draft generated"),
                Err(_) => info!(source = %source, "Draft generation cancelled"),
            }
            drop(guard);
            result
        });

        Ok(DraftTask {
            cancel: Some(cancel_tx),
            handle,
        })
    }
}

#[async_trait::async_trait]
impl DraftGenerator for SimulatedGenerator {
    async fn generate(&self, source: DraftSource) -> Result<Draft> {
        self.start(source)?.wait().await
    }

    fn is_generating(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }
}

/// Handle to a running generation.
///
/// Dropping the handle without waiting cancels the generation.
#[derive(Debug)]
pub struct DraftTask {
    cancel: Option<oneshot::Sender<()>>,
    handle: JoinHandle<Result<Draft>>,
}

impl DraftTask {
    /// Ask the generation to stop.
    ///
    /// Returns `false` if it was already cancelled or has finished.
    pub fn cancel(&mut self) -> bool {
        self.cancel
            .take()
            .is_some_and(|cancel| cancel.send(()).is_ok())
    }

    /// Check whether the generation has finished.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the generation to finish.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GenerationCancelled`] if the task was cancelled, or
    /// [`Error::Generation`] if it stopped abnormally.
    pub async fn wait(self) -> Result<Draft> {
        let Self { cancel, handle } = self;
        let result = handle.await;
        drop(cancel);
        flatten(result)
    }

    /// Wait for the generation, cancelling it if `signal` resolves first.
    ///
    /// # Errors
    ///
    /// Same as [`DraftTask::wait`].
    pub async fn wait_or_cancel<F>(mut self, signal: F) -> Result<Draft>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(signal);
        tokio::select! {
            result = &mut self.handle => return flatten(result),
            () = &mut signal => {}
        }
        self.cancel();
        self.wait().await
    }
}

fn flatten(result: std::result::Result<Result<Draft>, JoinError>) -> Result<Draft> {
    result.map_err(|e| Error::generation(e.to_string()))?
}
