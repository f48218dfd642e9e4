//! Session aggregate entity.
//!
//! A session is a single poll: a title, an optional description and a fixed
//! set of options, together with the running vote tally.
//!
//! # Ownership
//!
//! The tally lives inside the aggregate, but only the store mutates it, and
//! only through [`Session::record_vote`].

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OptionId, SessionId, Timestamp};

use super::errors::SessionError;
use super::tally::Tally;

/// Maximum length for session title.
pub const MAX_TITLE_LENGTH: usize = 500;

/// Minimum number of usable options per session.
pub const MIN_OPTIONS: usize = 2;

/// One selectable choice within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    pub id: OptionId,
    pub text: String,
}

/// Session aggregate - a single poll instance.
///
/// # Invariants
///
/// - `id` is globally unique and never reused
/// - `title` is 1-500 characters after trimming
/// - `options` has at least two entries, fixed at creation
/// - `tally` keys are exactly the option ids
/// - Tally counts never decrease
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for this session.
    id: SessionId,

    /// Session title.
    title: String,

    /// Optional description.
    description: Option<String>,

    /// Options in creation order.
    options: Vec<PollOption>,

    /// Current vote counts.
    tally: Tally,

    /// When the session was created.
    created_at: Timestamp,
}

/// Lightweight listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub id: SessionId,
    pub title: String,
    pub description: Option<String>,
}

impl Session {
    /// Create a new session with a zeroed tally.
    ///
    /// Option texts are trimmed and blank entries discarded before ids are
    /// assigned, so ids stay contiguous.
    ///
    /// # Errors
    ///
    /// - `InvalidSession` if the title is blank or too long
    /// - `InvalidSession` if fewer than two non-blank option texts remain
    pub fn new<S: AsRef<str>>(
        id: SessionId,
        title: &str,
        description: Option<&str>,
        option_texts: &[S],
    ) -> Result<Self, SessionError> {
        let title = Self::validate_title(title)?;

        let options: Vec<PollOption> = option_texts
            .iter()
            .map(|text| text.as_ref().trim())
            .filter(|text| !text.is_empty())
            .enumerate()
            .map(|(index, text)| PollOption {
                id: OptionId::from_position(index),
                text: text.to_string(),
            })
            .collect();

        if options.len() < MIN_OPTIONS {
            return Err(SessionError::invalid(format!(
                "at least {} non-empty options are required, got {}",
                MIN_OPTIONS,
                options.len()
            )));
        }

        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        let tally = Tally::zeroed(options.iter().map(|o| &o.id));

        Ok(Self {
            id,
            title,
            description,
            options,
            tally,
            created_at: Timestamp::now(),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the session ID.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the session title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the session description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the options in creation order.
    pub fn options(&self) -> &[PollOption] {
        &self.options
    }

    /// Returns the current tally.
    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    /// Returns when the session was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Checks whether the option belongs to this session.
    pub fn has_option(&self, option_id: &OptionId) -> bool {
        self.options.iter().any(|o| &o.id == option_id)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Add one vote for an option and return the updated tally.
    ///
    /// # Errors
    ///
    /// - `OptionNotFound` if the option is not part of this session
    pub fn record_vote(&mut self, option_id: &OptionId) -> Result<Tally, SessionError> {
        match self.tally.increment(option_id) {
            Some(_) => Ok(self.tally.clone()),
            None => Err(SessionError::OptionNotFound {
                session: self.id,
                option: option_id.clone(),
            }),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Validates the session title, returning its trimmed form.
    fn validate_title(title: &str) -> Result<String, SessionError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(SessionError::invalid("title cannot be empty"));
        }
        if trimmed.chars().count() > MAX_TITLE_LENGTH {
            return Err(SessionError::invalid(format!(
                "title must be {} characters or less",
                MAX_TITLE_LENGTH
            )));
        }
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lunch() -> Session {
        Session::new(SessionId::new(), "Lunch?", None, &["Pizza", "Sushi"]).unwrap()
    }

    // ══════════════════════════════════════════════════════════════
    // Construction
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn new_session_with_two_options_starts_at_zero() {
        let session = lunch();

        assert_eq!(session.title(), "Lunch?");
        assert_eq!(session.options().len(), 2);
        assert_eq!(session.options()[0].text, "Pizza");
        assert_eq!(session.options()[0].id, OptionId::new("1"));
        assert_eq!(session.options()[1].id, OptionId::new("2"));
        assert_eq!(session.tally().count(&OptionId::new("1")), Some(0));
        assert_eq!(session.tally().count(&OptionId::new("2")), Some(0));
    }

    #[test]
    fn new_session_rejects_single_option() {
        let result = Session::new(SessionId::new(), "Solo", None, &["Only"]);
        assert!(matches!(result, Err(SessionError::InvalidSession(_))));
    }

    #[test]
    fn new_session_ignores_blank_options_when_counting() {
        let result = Session::new(SessionId::new(), "Blank", None, &["Yes", "   ", ""]);
        assert!(matches!(result, Err(SessionError::InvalidSession(_))));
    }

    #[test]
    fn new_session_numbers_options_after_dropping_blanks() {
        let session =
            Session::new(SessionId::new(), "Gaps", None, &["  A ", "", "B"]).unwrap();

        let ids: Vec<&str> = session.options().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(session.options()[0].text, "A");
        assert_eq!(session.options()[1].text, "B");
    }

    #[test]
    fn new_session_rejects_blank_title() {
        let result = Session::new(SessionId::new(), "   ", None, &["A", "B"]);
        assert!(matches!(result, Err(SessionError::InvalidSession(_))));
    }

    #[test]
    fn new_session_rejects_overlong_title() {
        let title = "x".repeat(MAX_TITLE_LENGTH + 1);
        let result = Session::new(SessionId::new(), &title, None, &["A", "B"]);
        assert!(matches!(result, Err(SessionError::InvalidSession(_))));
    }

    #[test]
    fn blank_description_is_dropped() {
        let session = Session::new(SessionId::new(), "T", Some("  "), &["A", "B"]).unwrap();
        assert_eq!(session.description(), None);

        let session = Session::new(SessionId::new(), "T", Some("why"), &["A", "B"]).unwrap();
        assert_eq!(session.description(), Some("why"));
    }

    #[test]
    fn tally_keys_match_option_ids() {
        let session =
            Session::new(SessionId::new(), "Three", None, &["A", "B", "C"]).unwrap();

        let option_ids: Vec<&OptionId> = session.options().iter().map(|o| &o.id).collect();
        let tally_ids: Vec<&OptionId> = session.tally().counts().keys().collect();
        assert_eq!(option_ids, tally_ids);
    }

    // ══════════════════════════════════════════════════════════════
    // Voting
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn record_vote_increments_only_that_option() {
        let mut session = lunch();

        let tally = session.record_vote(&OptionId::new("1")).unwrap();

        assert_eq!(tally.count(&OptionId::new("1")), Some(1));
        assert_eq!(tally.count(&OptionId::new("2")), Some(0));
        assert_eq!(session.tally(), &tally);
    }

    #[test]
    fn record_vote_for_missing_option_fails_and_keeps_tally() {
        let mut session = lunch();

        let result = session.record_vote(&OptionId::new("pizza"));

        assert!(matches!(result, Err(SessionError::OptionNotFound { .. })));
        assert_eq!(session.tally().total(), 0);
    }

    #[test]
    fn summary_carries_id_title_description() {
        let session = Session::new(SessionId::new(), "T", Some("D"), &["A", "B"]).unwrap();
        let summary = session.summary();

        assert_eq!(summary.id, *session.id());
        assert_eq!(summary.title, "T");
        assert_eq!(summary.description.as_deref(), Some("D"));
    }
}
