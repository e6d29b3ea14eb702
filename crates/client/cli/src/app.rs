//! Tracker application: resolve once, then rotate the board until stopped.
use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use initiative_core::{
    ConfigError, FileCacheRepository, InitiativeResolver, Palette, ResolveError,
    ResolvedInitiative, RotationCursor, SecureRoller, TrackerConfig,
};
use initiative_display::{DisplayError, DisplayProfile, Screen, ScreenDriver, ScreenSession};

use crate::args::Args;
use crate::board::{BoardError, MIN_ACTIVE_ENTITIES, stage_pass};
use crate::config::CliConfig;
use crate::interrupt;

const PROMPT: &str = "Next?";

/// Every way a tracker run can fail. Each maps to exit code 1.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("{0}")]
    DisplayUnavailable(#[source] DisplayError),

    #[error("display error: {0}")]
    Display(#[source] DisplayError),

    #[error("Must be at least two entities configured for initiative (found {active})")]
    InsufficientEntities { active: usize },

    #[error("internal error: {0}")]
    Board(#[from] BoardError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<DisplayError> for AppError {
    fn from(error: DisplayError) -> Self {
        match error {
            DisplayError::Unavailable { .. } => Self::DisplayUnavailable(error),
            other => Self::Display(other),
        }
    }
}

/// How the turn loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// Operator pressed Ctrl-C.
    Interrupted,
    /// Input stream closed.
    EndOfInput,
}

/// Summary of a finished run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub passes: usize,
    pub stop: StopReason,
}

pub struct TrackerApp {
    args: Args,
    config: CliConfig,
}

impl TrackerApp {
    pub fn new(args: Args, config: CliConfig) -> Self {
        Self { args, config }
    }

    /// Run against the process stdin/stdout, stopping on Ctrl-C or EOF.
    ///
    /// The interrupt handler is in place before the screen is touched, so a
    /// Ctrl-C at any point after startup still powers the screen off.
    pub async fn run(self) -> Result<RunSummary, AppError> {
        let interrupt = interrupt::listen()?;
        let input = BufReader::new(tokio::io::stdin());
        self.run_with(input, io::stdout(), interrupt).await
    }

    /// Run with injected operator input, feedback output and interrupt signal.
    ///
    /// `interrupt` must already be armed: an interrupt raised before this
    /// call, or while the screen is opening, ends the loop at the first
    /// prompt.
    pub async fn run_with<R, W, I>(
        self,
        input: R,
        output: W,
        interrupt: I,
    ) -> Result<RunSummary, AppError>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
        I: Future<Output = io::Result<()>>,
    {
        tracing::info!("Initiative tracker starting...");

        let tracker = TrackerConfig::load(&self.args.config_file)?;

        let cache = FileCacheRepository::new(&self.config.cache_file);
        let resolved = InitiativeResolver::new(&cache, &SecureRoller)
            .resolve(&tracker, self.args.cache_policy())?;

        if resolved.len() < MIN_ACTIVE_ENTITIES {
            return Err(AppError::InsufficientEntities {
                active: resolved.len(),
            });
        }

        let screen = Screen::from_settings(&tracker.screen);
        let profile = screen.profile();
        tracing::info!("Opening {} screen", screen.model());

        let mut session =
            ScreenSession::open(screen, tracker.screen.screen_brightness_percentage)?;

        let turns = TurnLoop {
            resolved: &resolved,
            palette: &tracker.palette,
            profile: &profile,
            max_rows: profile.rows_for(resolved.len()),
        };
        let outcome = turns.run(&mut session, input, output, interrupt).await;

        let closed = session.shutdown();
        if let Err(e) = &closed {
            tracing::warn!("Screen shutdown failed: {}", e);
        }

        let summary = outcome?;
        closed?;

        tracing::info!(
            "Tracker stopped after {} passes ({:?})",
            summary.passes,
            summary.stop
        );

        Ok(summary)
    }
}

/// Interactive rotation over a resolved order.
pub struct TurnLoop<'a> {
    pub resolved: &'a ResolvedInitiative,
    pub palette: &'a Palette,
    pub profile: &'a DisplayProfile,
    pub max_rows: usize,
}

impl TurnLoop<'_> {
    /// Draw a pass, print feedback and wait for the operator, until input
    /// ends or `interrupt` resolves.
    pub async fn run<D, R, W, I>(
        &self,
        session: &mut ScreenSession<D>,
        input: R,
        mut output: W,
        interrupt: I,
    ) -> Result<RunSummary, AppError>
    where
        D: ScreenDriver,
        R: AsyncBufRead + Unpin,
        W: Write,
        I: Future<Output = io::Result<()>>,
    {
        let mut cursor = RotationCursor::new(self.resolved.order());
        let mut lines = input.lines();
        tokio::pin!(interrupt);

        let mut passes = 0;
        let stop = loop {
            let board = stage_pass(
                &mut cursor,
                self.resolved,
                self.palette,
                self.profile,
                self.max_rows,
            )?;
            session.draw(&board.commands())?;
            passes += 1;

            write!(output, "{}{}", board.feedback(), PROMPT)?;
            output.flush()?;

            // Pending interrupts win over buffered input
            tokio::select! {
                biased;

                signal = &mut interrupt => {
                    signal?;
                    break StopReason::Interrupted;
                }
                line = lines.next_line() => {
                    if line?.is_none() {
                        break StopReason::EndOfInput;
                    }
                }
            }
        };

        writeln!(output)?;
        Ok(RunSummary { passes, stop })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::future;
    use std::path::{Path, PathBuf};

    use initiative_display::transcript::{TranscriptRecord, read_transcript};
    use tempfile::TempDir;

    use super::*;

    struct Fixture {
        _temp_dir: TempDir,
        config_file: PathBuf,
        cache_file: PathBuf,
        transcript: PathBuf,
    }

    impl Fixture {
        fn new(orders: &str) -> Self {
            let temp_dir = TempDir::new().unwrap();
            let transcript = temp_dir.path().join("screen.jsonl");
            Self::with_port(temp_dir, orders, &transcript)
        }

        fn with_port(temp_dir: TempDir, orders: &str, port: &Path) -> Self {
            let config_file = temp_dir.path().join("initiative.json");
            let cache_file = temp_dir.path().join(".cache");
            let json = format!(
                r#"{{{orders}, "screen_model": "transcript", "screen_port": "{}", "screen_brightness_percentage": 60}}"#,
                port.display()
            );
            fs::write(&config_file, json).unwrap();

            Self {
                _temp_dir: temp_dir,
                config_file,
                cache_file,
                transcript: port.to_path_buf(),
            }
        }

        fn app(&self, clear_cache: bool) -> TrackerApp {
            TrackerApp::new(
                Args {
                    config_file: self.config_file.clone(),
                    clear_cache,
                },
                CliConfig {
                    cache_file: self.cache_file.clone(),
                    log_dir: PathBuf::from("unused"),
                },
            )
        }
    }

    const ENCOUNTER: &str =
        r#""player_order": {"Alice": 12, "Bob": [1, 20]}, "enemy_order": {"Goblin": 12}"#;

    fn never() -> impl Future<Output = io::Result<()>> {
        future::pending()
    }

    fn drawn_text(records: &[TranscriptRecord]) -> Vec<String> {
        records
            .iter()
            .filter_map(|record| match record {
                TranscriptRecord::DrawText(command) => Some(command.text.clone()),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn runs_until_input_ends_and_powers_off_screen() {
        let fixture = Fixture::new(ENCOUNTER);
        let mut output = Vec::new();

        let summary = fixture
            .app(false)
            .run_with(&b"\n\n"[..], &mut output, never())
            .await
            .unwrap();

        assert_eq!(summary.passes, 3);
        assert_eq!(summary.stop, StopReason::EndOfInput);

        let records = read_transcript(&fixture.transcript).unwrap();
        assert_eq!(records.first(), Some(&TranscriptRecord::Initialize));
        assert!(records.contains(&TranscriptRecord::SetBrightness { percent: 60 }));
        assert_eq!(
            &records[records.len() - 2..],
            &[TranscriptRecord::ScreenOff, TranscriptRecord::Close]
        );
        assert_eq!(drawn_text(&records).len(), 9);

        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("Currently Up:\n\t"));
        assert_eq!(output.matches("Next?").count(), 3);
    }

    #[tokio::test]
    async fn interrupt_stops_loop_and_still_releases_screen() {
        let fixture = Fixture::new(ENCOUNTER);
        let mut output = Vec::new();

        // Input that never produces a line, so only the interrupt can end the wait
        let (_writer, reader) = tokio::io::duplex(64);
        let summary = fixture
            .app(false)
            .run_with(BufReader::new(reader), &mut output, future::ready(Ok(())))
            .await
            .unwrap();

        assert_eq!(summary.passes, 1);
        assert_eq!(summary.stop, StopReason::Interrupted);

        let records = read_transcript(&fixture.transcript).unwrap();
        assert_eq!(records.last(), Some(&TranscriptRecord::Close));
        assert!(records.contains(&TranscriptRecord::ScreenOff));
    }

    #[tokio::test]
    async fn interrupt_raised_before_screen_opens_wins_over_buffered_input() {
        let fixture = Fixture::new(ENCOUNTER);
        let mut output = Vec::new();

        // Already signalled when the session opens, with lines waiting on input
        let summary = fixture
            .app(false)
            .run_with(&b"\n\n\n"[..], &mut output, future::ready(Ok(())))
            .await
            .unwrap();

        assert_eq!(summary.passes, 1);
        assert_eq!(summary.stop, StopReason::Interrupted);

        let records = read_transcript(&fixture.transcript).unwrap();
        assert_eq!(
            &records[records.len() - 2..],
            &[TranscriptRecord::ScreenOff, TranscriptRecord::Close]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn sigint_during_startup_is_queued_until_first_prompt() {
        let fixture = Fixture::new(ENCOUNTER);
        let interrupt = interrupt::listen().unwrap();

        let status = std::process::Command::new("kill")
            .args(["-INT", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());

        let (_writer, reader) = tokio::io::duplex(64);
        let summary = tokio::time::timeout(
            std::time::Duration::from_secs(10),
            fixture
                .app(false)
                .run_with(BufReader::new(reader), Vec::<u8>::new(), interrupt),
        )
        .await
        .expect("interrupt was not delivered")
        .unwrap();

        assert_eq!(summary.stop, StopReason::Interrupted);

        let records = read_transcript(&fixture.transcript).unwrap();
        assert_eq!(records.first(), Some(&TranscriptRecord::Initialize));
        assert_eq!(
            &records[records.len() - 2..],
            &[TranscriptRecord::ScreenOff, TranscriptRecord::Close]
        );
    }

    #[tokio::test]
    async fn fixed_encounter_draws_highest_value_first() {
        let fixture = Fixture::new(
            r#""player_order": {"Alice": 12, "Bob": 3}, "enemy_order": {"Goblin": 12}"#,
        );
        let mut output = Vec::new();

        fixture
            .app(true)
            .run_with(&b""[..], &mut output, never())
            .await
            .unwrap();

        let records = read_transcript(&fixture.transcript).unwrap();
        let rows = drawn_text(&records);
        assert!(rows[0].starts_with("Alice"));
        assert!(rows[1].starts_with("Goblin"));
        assert!(rows[2].starts_with("Bob"));

        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("Currently Up:\n\tAlice: 12\n\tGoblin: 12\n\nOn Deck:\n\tBob: 3\n\n"));
    }

    #[tokio::test]
    async fn resolved_rolls_are_written_to_the_cache_file() {
        let fixture = Fixture::new(ENCOUNTER);

        fixture
            .app(false)
            .run_with(&b""[..], Vec::<u8>::new(), never())
            .await
            .unwrap();

        let cache = fs::read_to_string(&fixture.cache_file).unwrap();
        assert!(cache.contains("\"Alice\":12"));
        assert!(cache.contains("\"Bob\":"));
        assert!(cache.contains("\"Goblin\":12"));
    }

    #[tokio::test]
    async fn single_active_entity_is_refused_before_screen_opens() {
        let fixture = Fixture::new(
            r#""player_order": {"Alice": 12, "-Bob": 3}, "enemy_order": {}"#,
        );

        let err = fixture
            .app(false)
            .run_with(&b"\n"[..], Vec::<u8>::new(), never())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InsufficientEntities { active: 1 }));
        assert!(!fixture.transcript.exists());
    }

    #[tokio::test]
    async fn unreachable_screen_is_reported_as_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let port = temp_dir.path().join("missing-dir/screen.jsonl");
        let fixture = Fixture::with_port(temp_dir, ENCOUNTER, &port);

        let err = fixture
            .app(false)
            .run_with(&b"\n"[..], Vec::<u8>::new(), never())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::DisplayUnavailable(_)));
        assert!(err.to_string().contains("Unable to find or connect to screen"));
    }

    #[tokio::test]
    async fn missing_config_file_is_a_config_error() {
        let fixture = Fixture::new(ENCOUNTER);
        fs::remove_file(&fixture.config_file).unwrap();

        let err = fixture
            .app(false)
            .run_with(&b"\n"[..], Vec::<u8>::new(), never())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Config(ConfigError::Read { .. })));
    }

    #[test]
    fn display_errors_split_on_availability() {
        let unavailable = DisplayError::Unavailable {
            model: initiative_core::ScreenModel::Terminal,
            reason: "stdout is not a terminal".to_string(),
        };
        assert!(matches!(
            AppError::from(unavailable),
            AppError::DisplayUnavailable(_)
        ));
        assert!(matches!(
            AppError::from(DisplayError::NotInitialized),
            AppError::Display(_)
        ));
    }
}
