//! Session state: the conversation, the current artifacts and the in-flight flag.

use crate::{Intent, IntentClassifier, KeywordClassifier, ResponseGateway, route};
use cms_architect_core::{Conversation, GeneratedArtifacts, Message};
use cms_architect_error::{ProviderErrorKind, ProviderResult};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

/// First assistant message of every session.
pub const GREETING: &str = "Hello! I'm your CMS Architect. Describe the Course Management \
System you want to build (e.g., 'A university system with students, professors, and \
grading'), and I'll generate the Java backend code, MySQL schema, and a dashboard preview \
for you.";

/// Appended when a generation call starts.
pub const GENERATION_PROGRESS_NOTICE: &str =
    "Analyzing requirements and Architecting your CMS... This may take a few seconds.";

/// Appended when a generation call succeeds.
pub const GENERATION_SUCCESS_NOTICE: &str = "I've generated the system architecture for you! \
Check the Schema, Code, and Preview tabs to see the results.";

/// Appended when a generation call fails.
pub const GENERATION_ERROR_NOTICE: &str = "Sorry, I encountered an error generating the \
response. Please check your API key and try again.";

/// Appended when the user cancels a generation call.
pub const GENERATION_CANCELLED_NOTICE: &str = "Request cancelled.";

/// A turn accepted by [`Session::begin_turn`], ready to be executed.
///
/// A turn owns everything the provider call needs, so it can be moved into
/// a spawned task while the session keeps rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Routed intent
    pub intent: Intent,
    /// Text forwarded to the provider (directive removed)
    pub text: String,
    /// History preceding this turn's user message
    pub history: Vec<Message>,
}

impl Turn {
    /// Runs the provider call for this turn.
    pub async fn execute(&self, gateway: &ResponseGateway, cancel: &CancellationToken) -> TurnOutcome {
        match self.intent {
            Intent::Generate => {
                TurnOutcome::Generated(gateway.generate_artifacts(&self.text, cancel).await)
            }
            Intent::Chat => TurnOutcome::Replied(gateway.chat(&self.history, &self.text, cancel).await),
        }
    }
}

/// Result of an executed turn, applied with [`Session::complete`].
#[derive(Debug, Clone)]
pub enum TurnOutcome {
    /// A generation call settled
    Generated(ProviderResult<GeneratedArtifacts>),
    /// A chat call produced a reply
    Replied(String),
}

/// One user's session.
///
/// Artifacts change only when a generation call succeeds, and then are
/// replaced in full. At most one turn is in flight.
///
/// # Examples
///
/// ```
/// use cms_architect_gateway::{GREETING, Intent, Session, TurnOutcome};
///
/// let mut session = Session::new(None);
/// assert_eq!(session.conversation().messages()[0].text(), GREETING);
///
/// let turn = session.begin_turn("What is RBAC?").unwrap();
/// assert_eq!(turn.intent, Intent::Chat);
/// assert!(session.is_busy());
/// assert!(session.begin_turn("Another question").is_none());
///
/// session.complete(TurnOutcome::Replied("Role-based access control.".to_string()));
/// assert!(!session.is_busy());
/// assert_eq!(session.conversation().len(), 3);
/// ```
pub struct Session {
    conversation: Conversation,
    artifacts: GeneratedArtifacts,
    classifier: Box<dyn IntentClassifier>,
    in_flight: bool,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("messages", &self.conversation.len())
            .field("artifacts_empty", &self.artifacts.is_empty())
            .field("in_flight", &self.in_flight)
            .finish()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Session {
    /// New session opened with the greeting. `history_cap` bounds the
    /// history forwarded with chat turns.
    pub fn new(history_cap: Option<usize>) -> Self {
        let mut conversation = Conversation::new(history_cap);
        conversation.push(Message::assistant(GREETING));
        Self {
            conversation,
            artifacts: GeneratedArtifacts::default(),
            classifier: Box::new(KeywordClassifier),
            in_flight: false,
        }
    }

    /// Replaces the intent classifier.
    pub fn with_classifier(mut self, classifier: impl IntentClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    /// Conversation so far.
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Current artifacts; empty until the first successful generation.
    pub fn artifacts(&self) -> &GeneratedArtifacts {
        &self.artifacts
    }

    /// Whether a turn is in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Accepts user input and starts a turn.
    ///
    /// Returns `None` for blank input or while another turn is in flight.
    /// Otherwise the user message (and, for generation, the progress notice)
    /// is appended and the session is marked busy until
    /// [`complete`](Self::complete).
    #[instrument(skip(self, input), fields(input_len = input.len()))]
    pub fn begin_turn(&mut self, input: &str) -> Option<Turn> {
        let input = input.trim();
        if input.is_empty() {
            debug!("Ignoring blank input");
            return None;
        }
        if self.in_flight {
            debug!("Ignoring input while a turn is in flight");
            return None;
        }

        let history = self.conversation.forwarded_history().to_vec();
        let (intent, text) = route(self.classifier.as_ref(), input);
        self.conversation.push(Message::user(input));
        if intent == Intent::Generate {
            self.conversation
                .push(Message::assistant(GENERATION_PROGRESS_NOTICE));
        }
        self.in_flight = true;
        debug!(%intent, history = history.len(), "Turn started");

        Some(Turn {
            intent,
            text: text.to_string(),
            history,
        })
    }

    /// Applies the outcome of the in-flight turn and clears the busy flag.
    ///
    /// A failed generation leaves the previous artifacts untouched.
    pub fn complete(&mut self, outcome: TurnOutcome) {
        self.in_flight = false;
        match outcome {
            TurnOutcome::Generated(Ok(artifacts)) => {
                self.artifacts = artifacts;
                self.conversation
                    .push(Message::assistant(GENERATION_SUCCESS_NOTICE));
            }
            TurnOutcome::Generated(Err(e)) => {
                let notice = match e.kind() {
                    ProviderErrorKind::Cancelled => GENERATION_CANCELLED_NOTICE,
                    _ => GENERATION_ERROR_NOTICE,
                };
                self.conversation.push(Message::assistant(notice));
            }
            TurnOutcome::Replied(reply) => {
                self.conversation.push(Message::assistant(reply));
            }
        }
    }

    /// Runs a whole turn in place. Returns `false` when the input was rejected.
    pub async fn submit(
        &mut self,
        gateway: &ResponseGateway,
        input: &str,
        cancel: &CancellationToken,
    ) -> bool {
        let Some(turn) = self.begin_turn(input) else {
            return false;
        };
        let outcome = turn.execute(gateway, cancel).await;
        self.complete(outcome);
        true
    }
}
