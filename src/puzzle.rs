//! Puzzle page controller
//!
//! One controller per page view. It validates the typed answer on every
//! edit, decides how the answer field and continue button should look, and
//! records completion when the player continues with a correct answer.

use crate::config::{GameConfig, PageConfig};
use crate::consts::{CALENDAR_URL, RETURN_DELAY_MS};
use crate::persistence::KeyValueStore;
use crate::progress::ProgressStore;

/// Where the page is in its answer flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleState {
    /// Input empty or wrong
    AwaitingInput,
    /// Input matches the expected answer
    AnswerCorrect,
    /// Player continued with a correct answer
    Completed,
}

/// Styling of the answer field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStyle {
    /// Empty input
    Neutral,
    Success,
    Error,
}

impl FieldStyle {
    pub fn border_color(&self) -> &'static str {
        match self {
            FieldStyle::Neutral => "var(--border-color)",
            FieldStyle::Success => "var(--success-green)",
            FieldStyle::Error => "var(--error-red)",
        }
    }

    pub fn box_shadow(&self) -> &'static str {
        match self {
            FieldStyle::Neutral => "none",
            FieldStyle::Success => "0 0 0 3px rgba(16, 185, 129, 0.1)",
            FieldStyle::Error => "0 0 0 3px rgba(239, 68, 68, 0.1)",
        }
    }
}

/// Appearance of the continue button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContinueButton {
    pub enabled: bool,
}

impl ContinueButton {
    pub fn label(&self) -> &'static str {
        if self.enabled { "Continue ✓" } else { "Continue" }
    }

    pub fn background(&self) -> &'static str {
        if self.enabled {
            "var(--gradient-success)"
        } else {
            "var(--bg-tertiary)"
        }
    }

    pub fn color(&self) -> &'static str {
        if self.enabled { "white" } else { "var(--text-light)" }
    }

    pub fn cursor(&self) -> &'static str {
        if self.enabled { "pointer" } else { "not-allowed" }
    }
}

/// Visual feedback after an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    pub field: FieldStyle,
    pub button: ContinueButton,
}

/// What the page must do after a continue attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Answer not matched
    Ignored,
    /// Leave for the next page right away
    Navigate(String),
    /// Show the win modal and wait for dismissal
    ShowWinModal,
}

/// Deferred navigation after the win modal closes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnToCalendar {
    pub delay_ms: i32,
    pub url: String,
}

/// Compare a typed answer against the expected one
///
/// Surrounding whitespace in the typed answer is ignored. Case is ignored
/// unless `case_sensitive` is set.
pub fn answers_match(input: &str, expected: &str, case_sensitive: bool) -> bool {
    let input = input.trim();
    if case_sensitive {
        input == expected
    } else {
        input.to_lowercase() == expected.to_lowercase()
    }
}

/// Per-page answer state machine
#[derive(Debug, Clone)]
pub struct PuzzleController {
    game: GameConfig,
    page: PageConfig,
    state: PuzzleState,
}

impl PuzzleController {
    pub fn new(game: GameConfig, page: PageConfig) -> Self {
        log::info!("Initialized Day {}", page.day_number);
        Self {
            game,
            page,
            state: PuzzleState::AwaitingInput,
        }
    }

    pub fn state(&self) -> PuzzleState {
        self.state
    }

    /// Whether continuing is allowed with the current input
    pub fn is_answer_correct(&self) -> bool {
        matches!(
            self.state,
            PuzzleState::AnswerCorrect | PuzzleState::Completed
        )
    }

    /// Re-validate after the answer field changed
    ///
    /// A completed page stays completed while the input still matches.
    pub fn input(&mut self, value: &str) -> Feedback {
        let matched = answers_match(value, &self.page.correct_answer, self.game.case_sensitive);

        self.state = match (self.state, matched) {
            (PuzzleState::Completed, true) => PuzzleState::Completed,
            (_, true) => PuzzleState::AnswerCorrect,
            (_, false) => PuzzleState::AwaitingInput,
        };

        let field = if value.trim().is_empty() {
            FieldStyle::Neutral
        } else if matched {
            FieldStyle::Success
        } else {
            FieldStyle::Error
        };

        Feedback {
            field,
            button: ContinueButton { enabled: matched },
        }
    }

    /// Continue with the current answer (Enter key or continue button)
    ///
    /// Continuing again from a completed page repeats the outcome; the
    /// completion write is idempotent. A failed progress write is logged
    /// and does not block the player.
    pub fn submit<S: KeyValueStore>(&mut self, progress: &mut ProgressStore<S>) -> Submission {
        if !self.is_answer_correct() {
            return Submission::Ignored;
        }

        if let Err(e) = progress.mark_completed(self.page.day_number) {
            log::warn!(
                "Could not save completion of day {}: {}",
                self.page.day_number,
                e
            );
        }
        self.state = PuzzleState::Completed;

        if self.game.disable_win_modal {
            Submission::Navigate(self.page.next_page_url.clone())
        } else {
            Submission::ShowWinModal
        }
    }

    /// Closing the win modal returns to the calendar after a short delay
    pub fn dismiss(&self) -> ReturnToCalendar {
        ReturnToCalendar {
            delay_ms: RETURN_DELAY_MS,
            url: CALENDAR_URL.to_string(),
        }
    }

    /// Expected answer, for filling into the field during testing
    pub fn reveal_answer(&self) -> &str {
        log::info!(
            "The answer for Day {} is: \"{}\"",
            self.page.day_number,
            self.page.correct_answer
        );
        &self.page.correct_answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day::{Day, DayStatus};
    use crate::persistence::MemoryStore;

    fn page(answer: &str) -> PageConfig {
        PageConfig {
            day_number: Day::new(3).unwrap(),
            correct_answer: answer.to_string(),
            next_page_url: "day4.html".to_string(),
        }
    }

    fn controller(game: GameConfig) -> PuzzleController {
        PuzzleController::new(game, page("Lumos"))
    }

    #[test]
    fn test_answer_matching() {
        assert!(answers_match("lumos", "Lumos", false));
        assert!(answers_match(" Lumos ", "Lumos", false));
        assert!(!answers_match("Lumos!", "Lumos", false));
        assert!(!answers_match("", "Lumos", false));
    }

    #[test]
    fn test_case_sensitive_matching() {
        assert!(!answers_match("lumos", "Lumos", true));
        assert!(answers_match("  Lumos\n", "Lumos", true));
    }

    #[test]
    fn test_input_transitions() {
        let mut ctl = controller(GameConfig::default());
        assert_eq!(ctl.state(), PuzzleState::AwaitingInput);

        let fb = ctl.input("lum");
        assert_eq!(ctl.state(), PuzzleState::AwaitingInput);
        assert_eq!(fb.field, FieldStyle::Error);
        assert!(!fb.button.enabled);
        assert_eq!(fb.button.label(), "Continue");

        let fb = ctl.input("LUMOS");
        assert_eq!(ctl.state(), PuzzleState::AnswerCorrect);
        assert_eq!(fb.field, FieldStyle::Success);
        assert_eq!(fb.button.label(), "Continue ✓");
        assert_eq!(fb.button.cursor(), "pointer");

        // Editing away from the answer goes back
        let fb = ctl.input("LUMO");
        assert_eq!(ctl.state(), PuzzleState::AwaitingInput);
        assert_eq!(fb.field, FieldStyle::Error);
    }

    #[test]
    fn test_empty_input_is_neutral() {
        let mut ctl = controller(GameConfig::default());
        let fb = ctl.input("   ");
        assert_eq!(fb.field, FieldStyle::Neutral);
        assert_eq!(fb.field.box_shadow(), "none");
        assert_eq!(fb.button.background(), "var(--bg-tertiary)");
    }

    #[test]
    fn test_submit_unmatched_is_noop() {
        let mut progress = ProgressStore::new(MemoryStore::new());
        let mut ctl = controller(GameConfig::default());
        ctl.input("nox");
        assert_eq!(ctl.submit(&mut progress), Submission::Ignored);
        assert!(progress.completed().is_empty());
        assert!(progress.store().is_empty());
    }

    #[test]
    fn test_submit_shows_modal() {
        let mut progress = ProgressStore::new(MemoryStore::new());
        let mut ctl = controller(GameConfig::default());
        ctl.input("lumos");

        assert_eq!(ctl.submit(&mut progress), Submission::ShowWinModal);
        assert_eq!(ctl.state(), PuzzleState::Completed);
        assert_eq!(
            progress.status(Day::new(3).unwrap()),
            DayStatus::Completed
        );

        let back = ctl.dismiss();
        assert_eq!(back.url, "../index.html");
        assert_eq!(back.delay_ms, 500);
    }

    #[test]
    fn test_submit_skips_modal() {
        let mut progress = ProgressStore::new(MemoryStore::new());
        let game = GameConfig {
            disable_win_modal: true,
            ..Default::default()
        };
        let mut ctl = controller(game);
        ctl.input("Lumos");

        assert_eq!(
            ctl.submit(&mut progress),
            Submission::Navigate("day4.html".to_string())
        );
        assert!(progress.completed().contains(&Day::new(3).unwrap()));
    }

    #[test]
    fn test_input_after_completion() {
        let mut progress = ProgressStore::new(MemoryStore::new());
        let mut ctl = controller(GameConfig::default());
        ctl.input("lumos");
        assert_eq!(ctl.submit(&mut progress), Submission::ShowWinModal);

        // Still matched: button stays usable and the page stays completed
        let fb = ctl.input("lumos");
        assert_eq!(ctl.state(), PuzzleState::Completed);
        assert_eq!(fb.field, FieldStyle::Success);
        assert!(fb.button.enabled);
        assert_eq!(fb.button.label(), "Continue ✓");

        // Continuing again repeats the outcome without a second completion
        assert_eq!(ctl.submit(&mut progress), Submission::ShowWinModal);
        assert_eq!(progress.completed().len(), 1);

        // Editing away disables it again
        let fb = ctl.input("lumo");
        assert_eq!(ctl.state(), PuzzleState::AwaitingInput);
        assert!(!fb.button.enabled);
        assert_eq!(ctl.submit(&mut progress), Submission::Ignored);
    }

    #[test]
    fn test_submit_survives_storage_failure() {
        let mut progress = ProgressStore::new(MemoryStore::read_only());
        let mut ctl = controller(GameConfig::default());
        ctl.input("lumos");
        assert_eq!(ctl.submit(&mut progress), Submission::ShowWinModal);
        assert!(progress.completed().is_empty());
    }

    #[test]
    fn test_reveal_answer_validates() {
        let mut ctl = controller(GameConfig {
            case_sensitive: true,
            ..Default::default()
        });
        let answer = ctl.reveal_answer().to_string();
        let fb = ctl.input(&answer);
        assert!(fb.button.enabled);
        assert_eq!(ctl.state(), PuzzleState::AnswerCorrect);
    }
}
