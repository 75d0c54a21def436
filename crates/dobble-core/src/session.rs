//! Form state of one deck-building session.
//!
//! Every user action is an explicit method that mutates the state and resets
//! whatever it invalidates. Remote calls are split into a `begin_*` step that
//! hands out a [`RequestToken`] and an `apply_*` step that only accepts the
//! answer to the most recently started request of that kind. Changing the
//! input or starting a new validation orphans every request in flight.

use dobble_client::ClientError;
use dobble_model::{
    Deck, ExportJob, ExportSettings, GenerateRequest, GenerateResponse, GenerationMode, Notation,
    SymbolDefinition, ValidateResponse, ValidationResult, cards_for_order,
};

use crate::error::{CoreError, Result};
use crate::policy::check_symbol_supply;
use crate::universe::{build_symbol_definitions, build_universe};

const VALIDATION_FAILED: &str = "Validation failed";
const GENERATION_FAILED: &str = "Generation failed";
const INVALID_INPUT: &str = "Invalid input";

/// Identifies one started request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

/// Parameters of a validation request handed out by [`Session::begin_validation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationTicket {
    pub token: RequestToken,
    pub mode: GenerationMode,
    /// The raw input, `0` when unset.
    pub how_many: i64,
}

/// A generation request handed out by [`Session::begin_generation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTicket {
    pub token: RequestToken,
    pub request: GenerateRequest,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    mode: GenerationMode,
    notation: Notation,
    how_many: Option<i64>,

    n: Option<u32>,
    symbols_per_card: Option<u32>,
    num_cards: Option<u32>,
    valid: bool,
    loading: bool,
    error: Option<String>,

    deck: Deck,
    selection: Vec<String>,

    next_token: u64,
    pending_validation: Option<RequestToken>,
    pending_generation: Option<RequestToken>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // ----- state -----

    pub fn mode(&self) -> GenerationMode {
        self.mode
    }

    pub fn notation(&self) -> Notation {
        self.notation
    }

    pub fn how_many(&self) -> Option<i64> {
        self.how_many
    }

    pub fn n(&self) -> Option<u32> {
        self.n
    }

    pub fn symbols_per_card(&self) -> Option<u32> {
        self.symbols_per_card
    }

    pub fn num_cards(&self) -> Option<u32> {
        self.num_cards
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    /// Snapshot of the current validation state.
    pub fn validation(&self) -> ValidationResult {
        ValidationResult {
            valid: self.valid,
            message: self.error.clone(),
            n: self.n,
            symbols_per_card: self.symbols_per_card,
            num_cards: self.num_cards,
        }
    }

    // ----- user actions -----

    /// Switches what the numeric input means. Clears the input as well.
    pub fn set_mode(&mut self, mode: GenerationMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.how_many = None;
        self.reset_validation();
    }

    pub fn set_how_many(&mut self, how_many: Option<i64>) {
        if self.how_many == how_many {
            return;
        }
        self.how_many = how_many;
        self.reset_validation();
    }

    /// Switches the notation. The alphabet check depends on it, so a prior
    /// validation no longer holds.
    pub fn set_notation(&mut self, notation: Notation) {
        if self.notation == notation {
            return;
        }
        self.notation = notation;
        self.reset_validation();
    }

    /// Replaces the picked image sources.
    pub fn set_selection(&mut self, selection: Vec<String>) {
        self.selection = selection;
    }

    /// Adds `src` to the selection, or removes it if already picked.
    pub fn toggle_symbol(&mut self, src: &str) {
        if let Some(index) = self.selection.iter().position(|picked| picked == src) {
            self.selection.remove(index);
        } else {
            self.selection.push(src.to_string());
        }
    }

    /// Clears the error and every value derived by validation.
    ///
    /// Requests still in flight were started for the previous input; their
    /// answers are dropped when they arrive.
    pub fn reset_validation(&mut self) {
        self.error = None;
        self.valid = false;
        self.loading = false;
        self.n = None;
        self.symbols_per_card = None;
        self.num_cards = None;
        self.pending_validation = None;
        self.pending_generation = None;
    }

    fn issue_token(&mut self) -> RequestToken {
        self.next_token += 1;
        RequestToken(self.next_token)
    }

    // ----- validation -----

    /// Starts a validation: clears derived values, the deck and the selection.
    pub fn begin_validation(&mut self) -> ValidationTicket {
        self.reset_validation();
        self.loading = true;
        self.deck = Deck::default();
        self.selection.clear();

        let token = self.issue_token();
        self.pending_validation = Some(token);
        ValidationTicket {
            token,
            mode: self.mode,
            how_many: self.how_many.unwrap_or(0),
        }
    }

    /// Records the answer to a validation request.
    ///
    /// Returns `false` without touching the state when `token` has been
    /// superseded by a later [`begin_validation`](Self::begin_validation).
    pub fn apply_validation(
        &mut self,
        token: RequestToken,
        outcome: std::result::Result<ValidateResponse, ClientError>,
    ) -> bool {
        if self.pending_validation != Some(token) {
            tracing::debug!(?token, "ignoring superseded validation response");
            return false;
        }
        self.pending_validation = None;
        self.loading = false;

        let response = match outcome {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "validation request failed");
                self.error = Some(err.detail().unwrap_or(VALIDATION_FAILED).to_string());
                return true;
            }
        };

        let result = ValidationResult::from(response);
        if !result.valid {
            self.error = Some(result.message.unwrap_or_else(|| INVALID_INPUT.to_string()));
            return true;
        }
        let (Some(n), Some(num_cards)) = (result.n, result.num_cards) else {
            tracing::warn!("validation answer is missing derived values");
            self.error = Some(VALIDATION_FAILED.to_string());
            return true;
        };

        if let Err(message) = check_symbol_supply(self.notation, num_cards) {
            tracing::info!(notation = %self.notation, num_cards, "deck rejected locally");
            self.error = Some(message);
            return true;
        }

        self.n = Some(n);
        self.symbols_per_card = result.symbols_per_card;
        self.num_cards = Some(num_cards);
        self.valid = true;
        tracing::info!(n, num_cards, "deck parameters validated");
        true
    }

    // ----- generation -----

    pub fn can_generate(&self) -> bool {
        self.generate_disabled_reason().is_none()
    }

    /// Label of the generate action.
    pub fn generate_label(&self) -> String {
        match self.n {
            Some(n) => format!("Generate {} cards", cards_for_order(n)),
            None => "Generate Cards".to_string(),
        }
    }

    /// Why generation is currently unavailable, if it is.
    pub fn generate_disabled_reason(&self) -> Option<String> {
        if !self.valid {
            return Some("Validate the form first".to_string());
        }
        let (Some(_), Some(num_cards)) = (self.n, self.num_cards) else {
            return Some("Missing derived values".to_string());
        };
        if self.notation == Notation::Images && self.selection.len() != num_cards as usize {
            return Some(format!("Pick exactly {num_cards} symbols"));
        }
        None
    }

    /// Builds the generate request, or `None` when generation is not possible
    /// (no successful validation, or an image selection of the wrong size).
    pub fn begin_generation(&mut self) -> Option<GenerationTicket> {
        let n = self.n?;
        let num_cards = self.num_cards?;
        let symbols = build_universe(self.notation, num_cards, &self.selection)?;

        let token = self.issue_token();
        self.pending_generation = Some(token);
        Some(GenerationTicket {
            token,
            request: GenerateRequest { n, symbols },
        })
    }

    /// Records the answer to a generate request.
    ///
    /// Failures are stored as the session error and handed back to the
    /// caller. `Ok(false)` means the answer was superseded and ignored.
    pub fn apply_generation(
        &mut self,
        token: RequestToken,
        outcome: std::result::Result<GenerateResponse, ClientError>,
    ) -> std::result::Result<bool, ClientError> {
        let current = self.pending_generation == Some(token);
        match outcome {
            Ok(_) if !current => {
                tracing::debug!(?token, "ignoring superseded generate response");
                Ok(false)
            }
            Ok(response) => {
                self.pending_generation = None;
                self.deck = Deck::from(response.cards);
                Ok(true)
            }
            Err(err) => {
                if current {
                    self.pending_generation = None;
                    self.error = Some(err.detail().unwrap_or(GENERATION_FAILED).to_string());
                }
                tracing::warn!(error = %err, "generate request failed");
                Err(err)
            }
        }
    }

    // ----- export -----

    /// Rendering definitions for the current notation, once validated.
    pub fn symbol_definitions(&self) -> Option<Vec<SymbolDefinition>> {
        let num_cards = self.num_cards?;
        Some(build_symbol_definitions(
            self.notation,
            num_cards,
            &self.selection,
        ))
    }

    /// Snapshot of the generated deck for the PDF exporter.
    pub fn export_job(&self, settings: ExportSettings) -> Result<ExportJob> {
        let (Some(n), Some(num_cards)) = (self.n, self.num_cards) else {
            return Err(CoreError::NothingToExport);
        };
        if self.deck.is_empty() {
            return Err(CoreError::NothingToExport);
        }
        let symbols_per_card = self
            .symbols_per_card
            .unwrap_or_else(|| dobble_model::symbols_per_card_for_order(n));
        let symbols = build_symbol_definitions(self.notation, num_cards, &self.selection);
        Ok(ExportJob::new(
            n,
            symbols_per_card,
            num_cards,
            self.deck.cards().to_vec(),
            symbols,
            settings,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_answer(n: u32) -> ValidateResponse {
        ValidateResponse {
            valid: true,
            message: Some("Valid input".to_string()),
            n: Some(n),
            symbols_per_card: Some(n + 1),
            num_cards: Some(cards_for_order(n)),
            total_symbols: Some(cards_for_order(n)),
        }
    }

    fn validated(notation: Notation, n: u32) -> Session {
        let mut session = Session::new();
        session.set_notation(notation);
        session.set_how_many(Some(i64::from(n)));
        let ticket = session.begin_validation();
        assert!(session.apply_validation(ticket.token, Ok(valid_answer(n))));
        session
    }

    fn strings(count: usize, prefix: &str) -> Vec<String> {
        (0..count).map(|i| format!("{prefix}{i}.png")).collect()
    }

    #[test]
    fn test_begin_validation_defaults_how_many_to_zero() {
        let mut session = Session::new();
        let ticket = session.begin_validation();
        assert_eq!(ticket.how_many, 0);
        assert_eq!(ticket.mode, GenerationMode::ByOrder);
        assert!(session.is_loading());
    }

    #[test]
    fn test_valid_answer_stores_derived_values() {
        let session = validated(Notation::Numeric, 3);
        assert!(session.is_valid());
        assert!(!session.is_loading());
        assert_eq!(session.n(), Some(3));
        assert_eq!(session.symbols_per_card(), Some(4));
        assert_eq!(session.num_cards(), Some(13));
        assert_eq!(session.error(), None);
    }

    #[test]
    fn test_invalid_answer_leaves_derived_values_unset() {
        for mode in [
            GenerationMode::ByOrder,
            GenerationMode::ByCount,
            GenerationMode::BySymbolsPerCard,
        ] {
            for how_many in [-1, 0, 6, 10, 1000] {
                let mut session = Session::new();
                session.set_mode(mode);
                session.set_how_many(Some(how_many));
                let ticket = session.begin_validation();
                let answer = ValidateResponse {
                    valid: false,
                    message: Some("Invalid input".to_string()),
                    n: Some(6),
                    ..Default::default()
                };
                session.apply_validation(ticket.token, Ok(answer));

                let result = session.validation();
                assert!(!result.valid);
                assert_eq!(result.n, None);
                assert_eq!(result.symbols_per_card, None);
                assert_eq!(result.num_cards, None);
                assert_eq!(result.message.as_deref(), Some("Invalid input"));
            }
        }
    }

    #[test]
    fn test_alphabetic_deck_too_large_is_rejected_locally() {
        let mut session = Session::new();
        session.set_notation(Notation::Alphabetic);
        let ticket = session.begin_validation();
        let answer = ValidateResponse {
            valid: true,
            n: Some(5),
            symbols_per_card: Some(6),
            num_cards: Some(30),
            ..Default::default()
        };
        session.apply_validation(ticket.token, Ok(answer));

        assert!(!session.is_valid());
        assert_eq!(session.n(), None);
        let error = session.error().unwrap();
        assert!(error.starts_with("Not enough letters: need 30, only 26 available."));
        assert!(error.contains("{ 2, 3, 4 }"));
    }

    #[test]
    fn test_transport_failure_uses_detail_or_generic_message() {
        let mut session = Session::new();
        let ticket = session.begin_validation();
        session.apply_validation(
            ticket.token,
            Err(ClientError::Network("connection refused".to_string())),
        );
        assert_eq!(session.error(), Some("Validation failed"));
        assert!(!session.is_loading());

        let ticket = session.begin_validation();
        session.apply_validation(
            ticket.token,
            Err(ClientError::Api {
                status: 422,
                detail: Some("how_many must be an integer".to_string()),
            }),
        );
        assert_eq!(session.error(), Some("how_many must be an integer"));
    }

    #[test]
    fn test_superseded_validation_is_ignored() {
        let mut session = Session::new();
        let first = session.begin_validation();
        let second = session.begin_validation();

        assert!(session.apply_validation(second.token, Ok(valid_answer(2))));
        assert!(!session.apply_validation(
            first.token,
            Ok(ValidateResponse {
                valid: false,
                message: Some("stale".to_string()),
                ..Default::default()
            })
        ));
        assert!(session.is_valid());
        assert_eq!(session.n(), Some(2));
    }

    #[test]
    fn test_input_changes_reset_validation() {
        let mut session = validated(Notation::Numeric, 2);
        session.set_how_many(Some(3));
        assert!(!session.is_valid());
        assert_eq!(session.n(), None);

        let mut session = validated(Notation::Numeric, 2);
        session.set_mode(GenerationMode::ByCount);
        assert_eq!(session.how_many(), None);
        assert!(!session.is_valid());

        let mut session = validated(Notation::Numeric, 2);
        session.set_notation(Notation::Alphabetic);
        assert!(!session.is_valid());
    }

    #[test]
    fn test_input_change_drops_validation_in_flight() {
        let mut session = Session::new();
        session.set_how_many(Some(2));
        let ticket = session.begin_validation();
        session.set_how_many(Some(3));
        assert!(!session.is_loading());

        assert!(!session.apply_validation(ticket.token, Ok(valid_answer(2))));
        assert!(!session.is_valid());
        assert_eq!(session.n(), None);
        assert_eq!(session.how_many(), Some(3));
    }

    #[test]
    fn test_notation_and_mode_changes_drop_validation_in_flight() {
        let mut session = Session::new();
        let ticket = session.begin_validation();
        session.set_notation(Notation::Alphabetic);
        assert!(!session.apply_validation(ticket.token, Ok(valid_answer(2))));

        let ticket = session.begin_validation();
        session.set_mode(GenerationMode::ByCount);
        assert!(!session.apply_validation(ticket.token, Ok(valid_answer(2))));
        assert!(!session.is_valid());
    }

    #[test]
    fn test_revalidation_drops_generation_in_flight() {
        let mut session = validated(Notation::Numeric, 2);
        let old = session.begin_generation().unwrap();

        session.set_how_many(Some(3));
        let ticket = session.begin_validation();
        assert!(session.apply_validation(ticket.token, Ok(valid_answer(3))));

        let order_two = vec![
            vec!["0".to_string(), "1".to_string(), "2".to_string()];
            7
        ];
        assert!(matches!(
            session.apply_generation(old.token, Ok(GenerateResponse { cards: order_two })),
            Ok(false)
        ));
        assert!(session.deck().is_empty());
        assert_eq!(session.n(), Some(3));
        assert!(matches!(
            session.export_job(ExportSettings::default()),
            Err(CoreError::NothingToExport)
        ));
    }

    #[test]
    fn test_stale_generation_failure_leaves_error_untouched() {
        let mut session = validated(Notation::Numeric, 2);
        let old = session.begin_generation().unwrap();
        session.begin_validation();

        let err = session
            .apply_generation(old.token, Err(ClientError::Network("reset".to_string())))
            .unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));
        assert_eq!(session.error(), None);
    }

    #[test]
    fn test_generate_label_survives_huge_order() {
        let mut session = Session::new();
        let ticket = session.begin_validation();
        let answer = ValidateResponse {
            valid: true,
            n: Some(70_000),
            num_cards: Some(u32::MAX),
            ..Default::default()
        };
        assert!(session.apply_validation(ticket.token, Ok(answer)));
        assert_eq!(
            session.generate_label(),
            format!("Generate {} cards", u32::MAX)
        );
    }

    #[test]
    fn test_unchanged_input_keeps_validation() {
        let mut session = validated(Notation::Numeric, 2);
        session.set_how_many(Some(2));
        session.set_mode(GenerationMode::ByOrder);
        assert!(session.is_valid());
    }

    #[test]
    fn test_generate_label_and_reasons() {
        let mut session = Session::new();
        assert_eq!(session.generate_label(), "Generate Cards");
        assert_eq!(
            session.generate_disabled_reason().as_deref(),
            Some("Validate the form first")
        );

        let session_numeric = validated(Notation::Numeric, 7);
        assert_eq!(session_numeric.generate_label(), "Generate 57 cards");
        assert!(session_numeric.can_generate());

        session = validated(Notation::Images, 2);
        assert_eq!(
            session.generate_disabled_reason().as_deref(),
            Some("Pick exactly 7 symbols")
        );
        session.set_selection(strings(7, "img"));
        assert!(session.can_generate());
    }

    #[test]
    fn test_numeric_generation_request() {
        let mut session = validated(Notation::Numeric, 2);
        let ticket = session.begin_generation().unwrap();
        assert_eq!(ticket.request.n, 2);
        assert_eq!(
            ticket.request.symbols,
            vec!["0", "1", "2", "3", "4", "5", "6"]
        );
    }

    #[test]
    fn test_image_generation_blocked_on_wrong_selection() {
        let mut session = validated(Notation::Images, 2);
        session.set_selection(strings(6, "img"));
        assert!(session.begin_generation().is_none());

        session.toggle_symbol("extra.png");
        let ticket = session.begin_generation().unwrap();
        assert_eq!(ticket.request.symbols.last().unwrap(), "extra.png");
    }

    #[test]
    fn test_generation_without_validation_is_blocked() {
        let mut session = Session::new();
        assert!(session.begin_generation().is_none());
    }

    #[test]
    fn test_apply_generation_success_and_failure() {
        let mut session = validated(Notation::Numeric, 2);
        let ticket = session.begin_generation().unwrap();
        let cards = vec![vec!["0".to_string(), "1".to_string(), "2".to_string()]];
        assert!(matches!(
            session.apply_generation(ticket.token, Ok(GenerateResponse { cards })),
            Ok(true)
        ));
        assert_eq!(session.deck().len(), 1);

        let ticket = session.begin_generation().unwrap();
        let err = session
            .apply_generation(
                ticket.token,
                Err(ClientError::Network("reset".to_string())),
            )
            .unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));
        assert_eq!(session.error(), Some("Generation failed"));
        assert_eq!(session.deck().len(), 1);
    }

    #[test]
    fn test_superseded_generation_is_ignored() {
        let mut session = validated(Notation::Numeric, 2);
        let first = session.begin_generation().unwrap();
        let second = session.begin_generation().unwrap();

        let newer = vec![vec!["new".to_string()]];
        let older = vec![vec!["old".to_string()]];
        assert!(matches!(
            session.apply_generation(second.token, Ok(GenerateResponse { cards: newer })),
            Ok(true)
        ));
        assert!(matches!(
            session.apply_generation(first.token, Ok(GenerateResponse { cards: older })),
            Ok(false)
        ));
        assert_eq!(session.deck().cards()[0], vec!["new"]);
    }

    #[test]
    fn test_validation_clears_deck_and_selection() {
        let mut session = validated(Notation::Images, 2);
        session.set_selection(strings(7, "img"));
        let ticket = session.begin_generation().unwrap();
        session
            .apply_generation(
                ticket.token,
                Ok(GenerateResponse {
                    cards: vec![vec!["img0.png".to_string()]],
                }),
            )
            .unwrap();

        session.begin_validation();
        assert!(session.deck().is_empty());
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_export_job_requires_deck() {
        let session = validated(Notation::Numeric, 2);
        assert!(matches!(
            session.export_job(ExportSettings::default()),
            Err(CoreError::NothingToExport)
        ));
    }

    #[test]
    fn test_export_job_snapshot() {
        let mut session = validated(Notation::Alphabetic, 2);
        let ticket = session.begin_generation().unwrap();
        let cards = vec![
            vec!["A".to_string(), "B".to_string(), "C".to_string()],
            vec!["A".to_string(), "D".to_string(), "E".to_string()],
        ];
        session
            .apply_generation(ticket.token, Ok(GenerateResponse { cards }))
            .unwrap();

        let job = session.export_job(ExportSettings::default()).unwrap();
        assert_eq!(job.n, 2);
        assert_eq!(job.symbols_per_card, 3);
        assert_eq!(job.num_cards, 7);
        assert_eq!(job.cards.len(), 2);
        assert_eq!(job.symbols.len(), 7);
        assert_eq!(job.symbols[0], SymbolDefinition::text("A"));
    }
}
