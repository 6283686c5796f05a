//! Command-line interface for FluentFlow.
//!
//! # Usage
//!
//! ```bash
//! # A speaking scenario, then record from the microphone
//! fluent-flow speak
//!
//! # Feedback on a pre-recorded answer, in Spanish
//! fluent-flow -l es-ES speak --audio answer.webm
//!
//! # Writing feedback without fetching a scenario first
//! fluent-flow write "Yesterday I goed to the market." --no-scenario
//!
//! # Vocabulary helpers
//! fluent-flow sentences borrow
//! fluent-flow meaning "break a leg"
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// FluentFlow - AI language tutor in the terminal
///
/// Speaking and writing practice with feedback, example sentences and word
/// meanings, powered by the Gemini API.
#[derive(Parser, Debug, Clone)]
#[command(name = "fluent-flow")]
#[command(version)]
#[command(about = "AI language tutor: speaking, writing and vocabulary practice", long_about = None)]
pub struct Cli {
    /// Practice language code (e.g. en-US, es-ES)
    ///
    /// Defaults to `tutor.default_language` from the settings file.
    #[arg(short, long, global = true, value_name = "CODE")]
    pub language: Option<String>,

    /// Settings file to use instead of the platform default
    #[arg(long, global = true, env = "FLUENT_FLOW_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace
    ///
    /// Overrides `RUST_LOG`; without either, `info` is used.
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Generate a beginner-level practice scenario
    Scenario,

    /// Speaking practice: scenario, recording, transcription and feedback
    Speak {
        /// Use an existing audio file instead of the microphone
        #[arg(long, value_name = "FILE")]
        audio: Option<PathBuf>,
    },

    /// Writing practice: feedback on a written answer
    Write {
        /// The text to check; read from stdin when omitted
        text: Option<String>,

        /// Skip fetching a scenario first
        #[arg(long)]
        no_scenario: bool,
    },

    /// Example sentences and a usage note for a word
    Sentences {
        /// Word or phrase
        word: String,
    },

    /// Definition, examples and context for a word or phrase
    Meaning {
        /// Word or phrase
        query: String,
    },

    /// Transcribe an audio file and print the text
    Transcribe {
        /// Audio file (wav, webm, ogg, mp3, flac, m4a)
        file: PathBuf,
    },

    /// List the configured practice languages
    Languages,

    /// Show the settings file location and contents
    Config {
        /// Write the current settings to the file (creates it if missing)
        #[arg(long)]
        init: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_language_after_subcommand() {
        let cli = Cli::try_parse_from(["fluent-flow", "sentences", "comer", "-l", "es-ES"]).unwrap();
        assert_eq!(cli.language.as_deref(), Some("es-ES"));
        assert_eq!(
            cli.command,
            Command::Sentences {
                word: "comer".into()
            }
        );
    }

    #[test]
    fn write_text_is_optional() {
        let cli = Cli::try_parse_from(["fluent-flow", "write", "--no-scenario"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Write {
                text: None,
                no_scenario: true
            }
        );
    }

    #[test]
    fn speak_accepts_audio_file() {
        let cli = Cli::try_parse_from(["fluent-flow", "speak", "--audio", "a.webm"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Speak {
                audio: Some(PathBuf::from("a.webm"))
            }
        );
        assert!(cli.log_level.is_none());
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["fluent-flow"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
