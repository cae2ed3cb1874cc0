//! AI assistant session: query draft, query history, last response.
//!
//! DESIGN
//! ======
//! The session is an admission gate of capacity one. While a query is
//! generating, further submissions are rejected without touching `context`
//! or `response`. Each accepted submission carries a ticket; completions for
//! any other ticket are stale and dropped.
//!
//! TRADE-OFFS
//! ==========
//! `context` grows for the whole view lifetime. It is only used to render the
//! recent-queries list and to give the responder prior queries, so no cap is
//! applied.

use serde::Serialize;

use crate::error::ErrorCode;

#[cfg(test)]
#[path = "assistant_test.rs"]
mod assistant_test;

/// Whether a generation request is in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AiStatus {
    #[default]
    Idle,
    Generating,
}

/// Canned prompts behind the panel's quick action buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuickAction {
    MissingDelivery,
    Personalize,
    Escalate,
}

impl QuickAction {
    pub const ALL: [Self; 3] = [Self::MissingDelivery, Self::Personalize, Self::Escalate];

    /// Query text submitted for this action.
    #[must_use]
    pub fn phrase(self) -> &'static str {
        match self {
            Self::MissingDelivery => "How do I handle missing orders?",
            Self::Personalize => "Make it sound more like us",
            Self::Escalate => "How do I escalate this issue?",
        }
    }

    /// Button label shown in the panel.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::MissingDelivery => "Handle missing deliveries",
            Self::Personalize => "Personalize response tone",
            Self::Escalate => "Escalation procedures",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingDelivery => "missing-delivery",
            Self::Personalize => "personalize",
            Self::Escalate => "escalate",
        }
    }
}

impl std::str::FromStr for QuickAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "missing-delivery" => Ok(Self::MissingDelivery),
            "personalize" => Ok(Self::Personalize),
            "escalate" => Ok(Self::Escalate),
            other => Err(format!("unknown quick action: {other}")),
        }
    }
}

/// Recoverable failure recorded on the session after a responder error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SessionError {
    pub code: &'static str,
    pub message: String,
    pub retryable: bool,
}

impl SessionError {
    pub fn from_error<E: ErrorCode>(err: &E) -> Self {
        Self { code: err.error_code(), message: err.to_string(), retryable: err.retryable() }
    }
}

/// An accepted submission, handed to the responder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub ticket: u64,
    pub query: String,
    /// Queries submitted before this one, oldest first.
    pub prior_context: Vec<String>,
}

/// Result of asking the session to accept a query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Admission {
    Accepted(Submission),
    /// Query text was empty or whitespace-only.
    Blank,
    /// Another query is still generating.
    Busy,
}

#[derive(Clone, Debug, Default)]
pub struct AiSession {
    query: String,
    context: Vec<String>,
    response: Option<String>,
    status: AiStatus,
    last_error: Option<SessionError>,
    in_flight: Option<Submission>,
    next_ticket: u64,
}

impl AiSession {
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Edit the query draft. Ignored while generating (input is disabled).
    pub fn set_query(&mut self, text: impl Into<String>) -> bool {
        if self.status == AiStatus::Generating {
            return false;
        }
        self.query = text.into();
        true
    }

    #[must_use]
    pub fn context(&self) -> &[String] {
        &self.context
    }

    /// The last `limit` submitted queries, oldest first.
    #[must_use]
    pub fn recent_context(&self, limit: usize) -> &[String] {
        let start = self.context.len().saturating_sub(limit);
        &self.context[start..]
    }

    #[must_use]
    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    #[must_use]
    pub fn status(&self) -> AiStatus {
        self.status
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    #[must_use]
    pub fn query_input_enabled(&self) -> bool {
        self.status == AiStatus::Idle
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.status == AiStatus::Idle && !self.query.trim().is_empty()
    }

    /// Submit the current query draft. The draft is cleared on acceptance.
    pub fn submit(&mut self) -> Admission {
        let text = self.query.clone();
        let admission = self.submit_text(&text);
        if matches!(admission, Admission::Accepted(_)) {
            self.query.clear();
        }
        admission
    }

    /// Submit `text` through the admission gate, leaving the draft alone.
    ///
    /// On acceptance the text joins `context` and the session enters
    /// `Generating`. Rejections leave every field untouched.
    pub fn submit_text(&mut self, text: &str) -> Admission {
        if self.status == AiStatus::Generating {
            return Admission::Busy;
        }
        if text.trim().is_empty() {
            return Admission::Blank;
        }

        self.next_ticket += 1;
        let submission = Submission {
            ticket: self.next_ticket,
            query: text.to_owned(),
            prior_context: self.context.clone(),
        };
        self.context.push(text.to_owned());
        self.status = AiStatus::Generating;
        self.last_error = None;
        self.in_flight = Some(submission.clone());
        Admission::Accepted(submission)
    }

    /// Record a completed response. Returns `false` for stale tickets.
    pub fn resolve(&mut self, ticket: u64, response: String) -> bool {
        if self.in_flight.as_ref().map(|s| s.ticket) != Some(ticket) {
            return false;
        }
        self.in_flight = None;
        self.response = Some(response);
        self.status = AiStatus::Idle;
        true
    }

    /// Record a failed generation. Returns `false` for stale tickets.
    ///
    /// The submitted text is put back into the draft for retry unless the
    /// draft still holds text, which happens when the failed query was
    /// submitted directly with [`AiSession::submit_text`].
    pub fn fail(&mut self, ticket: u64, error: SessionError) -> bool {
        let Some(submission) = self.in_flight.take_if(|s| s.ticket == ticket) else {
            return false;
        };
        if self.query.trim().is_empty() {
            self.query = submission.query;
        }
        self.last_error = Some(error);
        self.status = AiStatus::Idle;
        true
    }
}
