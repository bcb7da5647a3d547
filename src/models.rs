use serde::{Deserialize, Serialize};

// --- Provider payload ---
//
// The provider answers `GET {base}/{term}` with a JSON array of entries.
// Only the fields rendered by the application are modelled; the rest is ignored.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderEntry {
    #[serde(default)]
    pub word: Option<String>,
    #[serde(default)]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub phonetics: Vec<ProviderPhonetic>,
    #[serde(default)]
    pub meanings: Vec<ProviderMeaning>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderPhonetic {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub audio: Option<String>, // URL, often an empty string
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderMeaning {
    #[serde(default)]
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<ProviderDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderDefinition {
    pub definition: String,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

// --- Normalized lookup result ---

/// A resolved dictionary entry, built once from the provider's first entry.
///
/// There is no mutable API; a new lookup produces a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    term: String,
    headword: String,
    phonetic: Option<String>,
    audio: Option<String>,
    meanings: Vec<Meaning>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meaning {
    pub part_of_speech: String,
    pub definitions: Vec<Definition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub text: String,
    pub example: Option<String>,
    /// Provider order, duplicates removed.
    pub synonyms: Vec<String>,
}

impl LookupResult {
    /// Maps a provider entry into a `LookupResult` for the (already trimmed) `term`.
    pub fn from_entry(term: &str, entry: ProviderEntry) -> Self {
        let headword = entry
            .word
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty())
            .unwrap_or_else(|| term.to_string());

        // Prefer the top-level phonetic, otherwise the first phonetic text offered.
        let phonetic = non_blank(entry.phonetic).or_else(|| {
            entry
                .phonetics
                .iter()
                .find_map(|p| non_blank(p.text.clone()))
        });
        let audio = entry
            .phonetics
            .iter()
            .find_map(|p| non_blank(p.audio.clone()));

        let meanings = entry
            .meanings
            .into_iter()
            .map(|m| Meaning {
                part_of_speech: m.part_of_speech,
                definitions: m
                    .definitions
                    .into_iter()
                    .map(|d| Definition {
                        text: d.definition,
                        example: non_blank(d.example),
                        synonyms: dedup_preserving_order(d.synonyms),
                    })
                    .collect(),
            })
            .collect();

        LookupResult {
            term: term.to_string(),
            headword,
            phonetic,
            audio,
            meanings,
        }
    }

    /// The queried word, trimmed.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// The word as the provider spells it.
    pub fn headword(&self) -> &str {
        &self.headword
    }

    pub fn phonetic(&self) -> Option<&str> {
        self.phonetic.as_deref()
    }

    /// Pronunciation audio URL, if the provider offered one.
    pub fn audio(&self) -> Option<&str> {
        self.audio.as_deref()
    }

    pub fn meanings(&self) -> &[Meaning] {
        &self.meanings
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn dedup_preserving_order(values: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(values.len());
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}
