//! Terminal rendering of results and views.

use crate::error::LookupError;
use crate::models::LookupResult;
use crate::state::{View, WordOfDayState, WordOfDayStatus};
use colored::*;
use std::fmt::Write;

const APP_TITLE: &str = "WordWise";

/// Full definition block for a lookup result.
pub fn result(result: &LookupResult) -> String {
    let mut out = String::new();
    let _ = write!(out, "\n{}", result.headword().bold().cyan());
    if let Some(phonetic) = result.phonetic() {
        let _ = write!(out, " {}", format!("[{}]", phonetic).dimmed());
    }
    out.push('\n');
    if let Some(audio) = result.audio() {
        let _ = writeln!(out, "  {}: {}", "Audio".magenta(), audio.underline());
    }

    for meaning in result.meanings() {
        let _ = writeln!(out, "\n  {}", meaning.part_of_speech.italic().green());
        for (i, def) in meaning.definitions.iter().enumerate() {
            let _ = writeln!(out, "  {}: {}", (i + 1).to_string().bold(), def.text.trim());
            if let Some(example) = &def.example {
                let _ = writeln!(out, "        {}", format!("Example: {}", example).italic());
            }
            if !def.synonyms.is_empty() {
                let _ = writeln!(
                    out,
                    "        {}: {}",
                    "Synonyms".magenta(),
                    def.synonyms.join(", ").green()
                );
            }
        }
    }
    out
}

/// One-line user-facing message for a failed lookup.
pub fn error(error: &LookupError) -> String {
    match error {
        LookupError::EmptyQuery => error.to_string().yellow().to_string(),
        LookupError::NotFound { .. } => error.to_string().red().to_string(),
    }
}

/// Success notice shown after a lookup lands.
pub fn found(term: &str) -> String {
    format!("Definition found for \"{}\"", term).green().to_string()
}

pub fn recent(terms: &[String]) -> String {
    if terms.is_empty() {
        return format!("{}\n", "No recent searches.".dimmed());
    }
    let mut out = format!("{}\n", "Recent searches".bold());
    for (i, term) in terms.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, term.cyan());
    }
    out
}

/// Short word-of-the-day card: headword plus its first definition.
pub fn word_of_day(state: &WordOfDayState) -> String {
    let heading = "Word of the Day".bold();
    match state.status {
        WordOfDayStatus::Idle => format!("{}: {}\n", heading, "-".dimmed()),
        WordOfDayStatus::Loading => {
            format!("{}: {} {}\n", heading, state.candidate.cyan(), "(loading...)".dimmed())
        }
        WordOfDayStatus::Failed => format!(
            "{}: {} {}\n",
            heading,
            state.candidate.cyan(),
            "(definition unavailable)".red()
        ),
        WordOfDayStatus::Ready => {
            let Some(result) = &state.result else {
                return format!("{}: {}\n", heading, state.candidate.cyan());
            };
            let first = result
                .meanings()
                .iter()
                .flat_map(|m| m.definitions.iter())
                .next()
                .map(|d| d.text.trim().to_string())
                .unwrap_or_default();
            format!(
                "{}: \"{}\" - {}\n",
                heading,
                result.headword().bold().cyan(),
                first
            )
        }
    }
}

/// Header and hints for `view`.
pub fn view_header(view: View) -> String {
    match view {
        View::Landing => format!(
            "\n{}\n{}\n{}\n",
            APP_TITLE.bold().green(),
            "Explore definitions, synonyms and examples.".dimmed(),
            "Type 'start' to search, 'wotd' for a new word of the day, ':quit' to exit.".dimmed()
        ),
        View::Search => format!(
            "\n{}\n{}\n",
            "Dictionary Search".bold().green(),
            "Enter a word. ':clear' clears, ':back' returns home, ':quit' exits.".dimmed()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::parse_entries;
    use crate::lookup::tests::HELLO_BODY;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_result_lists_meanings_and_examples() {
        plain();
        let hello = parse_entries("hello", HELLO_BODY).unwrap();
        let text = result(&hello);
        assert!(text.contains("hello [həˈləʊ]"));
        assert!(text.contains("exclamation"));
        assert!(text.contains("1: used as a greeting or to begin a phone conversation."));
        assert!(text.contains("Example: hello there, Katie!"));
        assert!(text.contains("Audio: //ssl.gstatic.com/hello.mp3"));
        assert!(!text.contains("Synonyms"));
    }

    #[test]
    fn test_error_messages() {
        plain();
        assert_eq!(error(&LookupError::EmptyQuery), "Please enter a word to search");
        assert!(
            error(&LookupError::NotFound {
                term: "zzz".to_string()
            })
            .starts_with("Word not found or error fetching definition")
        );
    }

    #[test]
    fn test_recent_list() {
        plain();
        assert_eq!(recent(&[]), "No recent searches.\n");
        let terms = vec!["apple".to_string(), "banana".to_string()];
        assert_eq!(recent(&terms), "Recent searches\n  1. apple\n  2. banana\n");
    }

    #[test]
    fn test_word_of_day_card() {
        plain();
        let hello = parse_entries("hello", HELLO_BODY).unwrap();
        let ready = WordOfDayState {
            candidate: "hello".to_string(),
            result: Some(hello),
            status: WordOfDayStatus::Ready,
        };
        let card = word_of_day(&ready);
        assert_eq!(
            card,
            "Word of the Day: \"hello\" - used as a greeting or to begin a phone conversation.\n"
        );
        assert!(card.is_ascii());

        let failed = WordOfDayState {
            status: WordOfDayStatus::Failed,
            result: None,
            ..ready
        };
        assert!(word_of_day(&failed).contains("(definition unavailable)"));
    }
}
