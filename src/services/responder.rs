//! Turns an assistant query into response text.
//!
//! DESIGN
//! ======
//! `Responder` is the seam where a real inference service plugs in. The
//! shipped implementation, [`CannedResponder`], is a keyword table: the
//! lowercased query is checked against each rule in order and the first rule
//! with a matching trigger wins. Templates are fixed text; the query is never
//! interpolated into them.
//!
//! ERROR HANDLING
//! ==============
//! The canned table cannot fail. `ResponderError` exists for real backends;
//! the view wraps every call in a timeout and turns failures into a
//! recoverable session error.

use crate::error::ErrorCode;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ResponderError {
    #[error("responder timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },
    #[error("responder unavailable: {0}")]
    Unavailable(String),
    #[error("responder returned an empty response")]
    EmptyResponse,
}

impl ErrorCode for ResponderError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "E_RESPONDER_TIMEOUT",
            Self::Unavailable(_) => "E_RESPONDER_UNAVAILABLE",
            Self::EmptyResponse => "E_RESPONDER_EMPTY",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Unavailable(_))
    }
}

/// Input to a responder call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponderRequest {
    pub query: String,
    /// Queries submitted earlier in the session, oldest first.
    pub context: Vec<String>,
}

/// Produces response text for an assistant query.
#[async_trait::async_trait]
pub trait Responder: Send + Sync {
    /// Answer `request`.
    ///
    /// # Errors
    ///
    /// Returns a [`ResponderError`] if the backend cannot produce a response.
    async fn respond(&self, request: &ResponderRequest) -> Result<String, ResponderError>;
}

// =============================================================================
// CANNED RULES
// =============================================================================

pub const DELIVERY_GUIDANCE: &str = "Based on our help documentation and previous similar cases, here's how to handle missing delivery issues:\n\n1. First, verify the delivery address with the customer\n2. Check our shipping partner's tracking system for detailed delivery confirmation\n3. If confirmed delivered but customer didn't receive it, offer to:\n   - Contact the shipping carrier for investigation\n   - Process a replacement order immediately\n   - Provide a full refund if preferred\n\nThis approach has resolved 94% of similar cases successfully.";

pub const PERSONALIZED_REPLY: &str = "Here's a more personalized version:\n\n\"I'm really sorry to hear your package didn't make it to you! That's definitely frustrating. Let me dig into this right away and get it sorted out for you. I'll check with our shipping team to see exactly what happened, and we'll make sure you get your order - whether that's sending a new one or getting you a full refund. We've got your back on this! 🙂\"";

pub const ESCALATION_GUIDANCE: &str = "For escalation procedures:\n\n1. Assess the situation severity (financial impact, customer tier, complexity)\n2. Gather all relevant details and context\n3. For Premium customers: Direct escalation to senior support\n4. Document the escalation reason clearly\n5. Set appropriate expectations with the customer\n6. Follow up within 2 hours\n\nAlways inform the customer about the escalation process and timeline.";

pub const FALLBACK_OFFER: &str = "I can help you craft a response based on our knowledge base and best practices. What specific aspect of customer service would you like assistance with?";

/// Which canned rule produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    DeliveryIssue,
    Personalize,
    Escalation,
    Fallback,
}

struct Rule {
    kind: RuleKind,
    triggers: &'static [&'static str],
    template: &'static str,
}

/// Evaluated top to bottom; first match wins.
const RULES: &[Rule] = &[
    Rule { kind: RuleKind::DeliveryIssue, triggers: &["missing order", "delivery"], template: DELIVERY_GUIDANCE },
    Rule {
        kind: RuleKind::Personalize,
        triggers: &["make it sound like us", "personalize"],
        template: PERSONALIZED_REPLY,
    },
    Rule { kind: RuleKind::Escalation, triggers: &["escalate"], template: ESCALATION_GUIDANCE },
];

fn matching_rule(query: &str) -> Option<&'static Rule> {
    let lowered = query.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.triggers.iter().any(|t| lowered.contains(t)))
}

/// Classify `query` against the rule table.
#[must_use]
pub fn classify(query: &str) -> RuleKind {
    matching_rule(query).map_or(RuleKind::Fallback, |rule| rule.kind)
}

/// Canned response text for `query`.
#[must_use]
pub fn canned_response(query: &str) -> &'static str {
    matching_rule(query).map_or(FALLBACK_OFFER, |rule| rule.template)
}

/// Keyword-table responder standing in for a real assistant backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedResponder;

#[async_trait::async_trait]
impl Responder for CannedResponder {
    async fn respond(&self, request: &ResponderRequest) -> Result<String, ResponderError> {
        Ok(canned_response(&request.query).to_owned())
    }
}

#[cfg(test)]
#[path = "responder_test.rs"]
mod tests;
