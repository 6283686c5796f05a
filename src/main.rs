//! Application entry point — FluentFlow terminal tutor.
//!
//! # Startup sequence
//!
//! 1. Parse the command line.
//! 2. Initialise logging (`--log-level`, else `RUST_LOG`, else `info`).
//! 3. Load [`AppConfig`] (defaults on first run).
//! 4. Build the [`Tutor`] and a current-thread [`tokio`] runtime.
//! 5. Run the subcommand's view and print its cards.

use std::io::BufRead;
use std::path::Path;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use tokio::sync::mpsc;

use fluent_flow::{
    audio::{AudioCapture, AudioChunk, AudioClip, RecordingSession, StopReason},
    cli::{Cli, Command},
    config::{AppConfig, AppPaths, RecordingConfig},
    tutor::Tutor,
    view::{
        render, scenario_line, FeedbackCard, MeaningView, SentenceView, SpeakingView, WritingView,
    },
};

/// How often the recording loop re-checks the duration ceiling.
const RECORDING_TICK: Duration = Duration::from_millis(100);

// ---------------------------------------------------------------------------
// Output helpers
// ---------------------------------------------------------------------------

/// Print cards and the view's error; the exit code reflects the error.
fn finish_view(cards: &[FeedbackCard], error: Option<&str>) -> ExitCode {
    println!("{}", render::render_cards(cards));
    match error {
        Some(message) => {
            eprint!("{}", render::render_error(message));
            ExitCode::FAILURE
        }
        None => ExitCode::SUCCESS,
    }
}

fn print_scenario(line: &str) {
    if !line.is_empty() {
        println!("{line}\n");
    }
}

/// Read the learner's answer from stdin until an empty line or EOF.
fn read_written_answer(language_name: &str) -> anyhow::Result<String> {
    println!(
        "Write your response to the scenario in {language_name} here (finish with an empty line):"
    );
    let mut lines = Vec::new();
    for line in std::io::stdin().lock().lines() {
        let line = line.context("failed to read from stdin")?;
        if line.trim().is_empty() {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

// ---------------------------------------------------------------------------
// Microphone recording
// ---------------------------------------------------------------------------

/// Whether a stdin read means the learner pressed Enter.
///
/// EOF (`Ok(0)`, e.g. piped or closed stdin) is not a keypress.
fn is_enter_press(read: std::io::Result<usize>) -> bool {
    matches!(read, Ok(n) if n > 0)
}

/// Record from the default microphone until Enter or the ceiling.
async fn record_clip(config: &RecordingConfig) -> anyhow::Result<AudioClip> {
    let capture = AudioCapture::new(config.sample_rate)?;
    let mut session = RecordingSession::from_config(config);

    let (chunk_tx, mut chunk_rx) = mpsc::unbounded_channel::<AudioChunk>();
    let (enter_tx, mut enter_rx) = mpsc::unbounded_channel::<()>();

    // A plain thread: a pending stdin read must not hold up runtime shutdown.
    std::thread::Builder::new()
        .name("stdin-stop".into())
        .spawn(move || {
            let mut line = String::new();
            if is_enter_press(std::io::stdin().read_line(&mut line)) {
                let _ = enter_tx.send(());
            }
        })
        .context("failed to spawn stdin reader")?;

    log::info!(
        "microphone at {} Hz, clip at {} Hz",
        capture.device_rate(),
        capture.target_rate()
    );
    let handle = capture.start(chunk_tx)?;
    session.start(Instant::now());
    println!(
        "Recording... press Enter to stop (stops automatically after {:.0} seconds).",
        session.max_duration().as_secs_f32()
    );

    let mut ticker = tokio::time::interval(RECORDING_TICK);
    let reason = loop {
        tokio::select! {
            Some(chunk) = chunk_rx.recv() => {
                if let Some(reason) = session.push(&chunk.samples, Instant::now()) {
                    break reason;
                }
            }
            _ = ticker.tick() => {
                if let Some(reason) = session.tick(Instant::now()) {
                    break reason;
                }
            }
            Some(()) = enter_rx.recv() => {
                session.stop();
                break StopReason::User;
            }
        }
    };
    drop(handle);

    if reason == StopReason::Timeout {
        println!("Maximum recording length reached.");
    }
    println!("Captured {:.1} seconds of audio.\n", session.buffered_secs());
    Ok(session.finish()?)
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

async fn run(command: Command, config: AppConfig, language: String) -> anyhow::Result<ExitCode> {
    let tutor = Tutor::from_config(&config);
    let lang = language.as_str();

    let code = match command {
        Command::Scenario => {
            let mut view = WritingView::new();
            view.load_scenario(&tutor, lang).await;
            print_scenario(&scenario_line(&view.scenario));
            match view.error() {
                Some(message) => {
                    eprint!("{}", render::render_error(message));
                    ExitCode::FAILURE
                }
                None => ExitCode::SUCCESS,
            }
        }

        Command::Speak { audio } => {
            let mut view = SpeakingView::new();
            view.load_scenario(&tutor, lang).await;
            print_scenario(&scenario_line(&view.scenario));

            let clip = match audio {
                Some(path) => AudioClip::from_file(&path).map_err(anyhow::Error::from),
                None => record_clip(&config.recording).await,
            };
            let clip = match clip {
                Ok(clip) => clip,
                Err(e) => {
                    log::error!("speak: no audio: {e:#}");
                    eprint!("{}", render::render_error(&e.to_string()));
                    return Ok(ExitCode::FAILURE);
                }
            };

            println!("Transcribing your speech...");
            view.submit_clip(&tutor, &clip, lang).await;
            finish_view(&view.cards(), view.error())
        }

        Command::Write { text, no_scenario } => {
            let mut view = WritingView::new();
            if !no_scenario {
                view.load_scenario(&tutor, lang).await;
                print_scenario(&scenario_line(&view.scenario));
            }
            let written = match text {
                Some(text) => text,
                None => read_written_answer(config.tutor.display_name(lang))?,
            };
            view.submit(&tutor, &written, lang).await;
            finish_view(&view.cards(), view.error())
        }

        Command::Sentences { word } => {
            let mut view = SentenceView::new();
            view.submit(&tutor, &word, lang).await;
            finish_view(&view.cards(), view.error())
        }

        Command::Meaning { query } => {
            let mut view = MeaningView::new();
            view.submit(&tutor, &query, lang).await;
            finish_view(&view.cards(), view.error())
        }

        Command::Transcribe { file } => {
            let clip = AudioClip::from_file(&file)?;
            match tutor.transcribe_audio(&clip, lang).await {
                Ok(text) if text.is_empty() => {
                    eprint!("{}", render::render_error("No speech detected. Please try again."));
                    ExitCode::FAILURE
                }
                Ok(text) => {
                    println!("{text}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprint!("{}", render::render_error(&e.to_string()));
                    ExitCode::FAILURE
                }
            }
        }

        Command::Languages => {
            print!("{}", render::render_languages(&config.tutor, lang));
            ExitCode::SUCCESS
        }

        // Handled before the runtime starts.
        Command::Config { .. } => ExitCode::SUCCESS,
    };
    Ok(code)
}

/// `fluent-flow config [--init]`
fn show_config(config: &AppConfig, path: &Path, init: bool) -> anyhow::Result<()> {
    if init {
        config
            .save_to(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("settings written to {}", path.display());
    }

    let mut shown = config.clone();
    if shown.gemini.api_key.is_some() {
        shown.gemini.api_key = Some("********".into());
    }
    println!("# {}{}", path.display(), if path.exists() { "" } else { " (not created yet)" });
    print!("{}", toml::to_string_pretty(&shown)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // 1. Logging
    let env = env_logger::Env::default().default_filter_or("info");
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(level) = &cli.log_level {
        builder.parse_filters(level);
    }
    builder.init();

    // 2. Configuration
    let settings_path = cli
        .config
        .clone()
        .unwrap_or_else(|| AppPaths::new().settings_file);
    let config = AppConfig::load_from(&settings_path).unwrap_or_else(|e| {
        log::warn!(
            "Failed to load config from {} ({e}); using defaults",
            settings_path.display()
        );
        AppConfig::default()
    });

    if let Command::Config { init } = cli.command {
        show_config(&config, &settings_path, init)?;
        return Ok(ExitCode::SUCCESS);
    }

    let language = cli
        .language
        .clone()
        .unwrap_or_else(|| config.tutor.default_language.clone());
    match config.tutor.find_language(&language) {
        Some(lang) => log::info!("practice language: {} ({})", lang.name, lang.code),
        None => log::warn!("language {language:?} is not in the configured list; using it as given"),
    }

    // 3. Runtime
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    rt.block_on(run(cli.command, config, language))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_a_non_empty_read_stops_recording() {
        assert!(is_enter_press(Ok(1)));
        assert!(!is_enter_press(Ok(0)));
        assert!(!is_enter_press(Err(std::io::Error::other("closed"))));
    }
}
