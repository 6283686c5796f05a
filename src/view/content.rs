//! Feedback card model.

/// What a card displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardContent {
    /// A single paragraph.
    Text(String),
    /// A bulleted list.
    TextList(Vec<String>),
    /// Lines printed exactly as given (e.g. the learner's own writing).
    Prebuilt(Vec<String>),
}

impl CardContent {
    pub fn is_empty(&self) -> bool {
        match self {
            CardContent::Text(text) => text.trim().is_empty(),
            CardContent::TextList(items) | CardContent::Prebuilt(items) => items.is_empty(),
        }
    }
}

/// One titled card in a feature view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackCard {
    pub title: String,
    pub content: CardContent,
    /// The card's data is still being fetched; `content` holds the
    /// in-progress placeholder.
    pub loading: bool,
}

impl FeedbackCard {
    /// Card showing `value` when present and non-empty, otherwise the
    /// loading or idle placeholder.
    pub fn filled_or(
        title: impl Into<String>,
        value: Option<CardContent>,
        loading: bool,
        loading_text: &str,
        idle_text: &str,
    ) -> Self {
        let title = title.into();
        match value.filter(|content| !content.is_empty()) {
            Some(content) => Self {
                title,
                content,
                loading: false,
            },
            None if loading => Self {
                title,
                content: CardContent::Text(loading_text.to_string()),
                loading: true,
            },
            None => Self {
                title,
                content: CardContent::Text(idle_text.to_string()),
                loading: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_card_ignores_loading_flag() {
        let card = FeedbackCard::filled_or(
            "Usage Explanation",
            Some(CardContent::Text("Used for requests.".into())),
            true,
            "Explaining usage...",
            "Explanation will appear here.",
        );
        assert!(!card.loading);
        assert_eq!(card.content, CardContent::Text("Used for requests.".into()));
    }

    #[test]
    fn empty_value_falls_back_to_placeholder() {
        let loading = FeedbackCard::filled_or(
            "t",
            Some(CardContent::TextList(vec![])),
            true,
            "Getting examples...",
            "Examples will appear here.",
        );
        assert!(loading.loading);
        assert_eq!(loading.content, CardContent::Text("Getting examples...".into()));

        let idle = FeedbackCard::filled_or("t", None, false, "x", "Examples will appear here.");
        assert!(!idle.loading);
        assert_eq!(idle.content, CardContent::Text("Examples will appear here.".into()));
    }

    #[test]
    fn whitespace_text_is_empty() {
        assert!(CardContent::Text("  \n".into()).is_empty());
        assert!(!CardContent::Prebuilt(vec![String::new()]).is_empty());
    }
}
