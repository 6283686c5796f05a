//! Plain-text terminal rendering of cards and errors.

use std::fmt::Write as _;

use crate::config::TutorConfig;

use super::content::{CardContent, FeedbackCard};

const INDENT: &str = "  ";

/// One card: underlined title, then its content indented.
pub fn render_card(card: &FeedbackCard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", card.title);
    let _ = writeln!(out, "{}", "-".repeat(card.title.chars().count()));

    if card.loading {
        let _ = writeln!(out, "{INDENT}Loading...");
        return out;
    }

    match &card.content {
        CardContent::Text(text) => {
            for line in text.lines() {
                let _ = writeln!(out, "{INDENT}{line}");
            }
        }
        CardContent::TextList(items) => {
            for item in items {
                let _ = writeln!(out, "{INDENT}- {item}");
            }
        }
        CardContent::Prebuilt(lines) => {
            for line in lines {
                let _ = writeln!(out, "{line}");
            }
        }
    }
    out
}

/// All cards, separated by blank lines.
pub fn render_cards(cards: &[FeedbackCard]) -> String {
    cards
        .iter()
        .map(render_card)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_error(message: &str) -> String {
    format!("Error!\n{INDENT}{message}\n")
}

/// Configured languages, marking the active one.
pub fn render_languages(tutor: &TutorConfig, active: &str) -> String {
    let mut out = String::new();
    for lang in &tutor.languages {
        let marker = if lang.code == active { "*" } else { " " };
        let _ = writeln!(out, "{marker} {:<6} {}", lang.code, lang.name);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(content: CardContent) -> FeedbackCard {
        FeedbackCard {
            title: "Example Sentences".into(),
            content,
            loading: false,
        }
    }

    #[test]
    fn text_is_indented_under_underlined_title() {
        let out = render_card(&card(CardContent::Text("one\ntwo".into())));
        assert_eq!(out, "Example Sentences\n-----------------\n  one\n  two\n");
    }

    #[test]
    fn list_items_are_bulleted() {
        let out = render_card(&card(CardContent::TextList(vec!["a".into(), "b".into()])));
        assert!(out.ends_with("  - a\n  - b\n"));
    }

    #[test]
    fn prebuilt_lines_are_verbatim() {
        let out = render_card(&card(CardContent::Prebuilt(vec!["  x".into(), "y".into()])));
        assert!(out.ends_with("-\n  x\ny\n"));
    }

    #[test]
    fn loading_card_hides_content() {
        let mut c = card(CardContent::Text("Getting examples...".into()));
        c.loading = true;
        assert!(render_card(&c).ends_with("  Loading...\n"));
    }

    #[test]
    fn cards_are_blank_line_separated() {
        let c = card(CardContent::Text("t".into()));
        let out = render_cards(&[c.clone(), c]);
        assert!(out.contains("  t\n\nExample Sentences"));
    }

    #[test]
    fn error_block() {
        assert_eq!(
            render_error("Please enter a word or phrase."),
            "Error!\n  Please enter a word or phrase.\n"
        );
    }

    #[test]
    fn languages_mark_active() {
        let out = render_languages(&TutorConfig::default(), "es-ES");
        assert!(out.contains("* es-ES"));
        assert!(out.contains("  en-US"));
    }
}
