use std::cmp::Ordering;
use std::fmt;

use icu_collator::{Collator, CollatorOptions, Strength};
use icu_locid::{locale, Locale};
use tracing::warn;

use crate::i18n::Language;

fn locale_of(language: Language) -> Locale {
    match language {
        Language::Pl => locale!("pl"),
        Language::En => locale!("en"),
        Language::De => locale!("de"),
        Language::Zh => locale!("zh"),
        Language::Ko => locale!("ko"),
    }
}

/// String ordering for one UI language. Falls back to lowercase code point
/// order when no collation data is available for the locale.
pub struct TextCollator {
    language: Language,
    collator: Option<Collator>,
}

impl fmt::Debug for TextCollator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextCollator")
            .field("language", &self.language)
            .field("collated", &self.collator.is_some())
            .finish()
    }
}

impl TextCollator {
    pub fn for_language(language: Language) -> Self {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Tertiary);
        let collator = match Collator::try_new(&locale_of(language).into(), options) {
            Ok(collator) => Some(collator),
            Err(err) => {
                warn!(language = %language, error = %err, "collation unavailable, using code point order");
                None
            }
        };
        Self { language, collator }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Total order: collation first, raw text breaks ties.
    pub fn compare(&self, left: &str, right: &str) -> Ordering {
        let collated = match &self.collator {
            Some(collator) => collator.compare(left, right),
            None => left.to_lowercase().cmp(&right.to_lowercase()),
        };
        collated.then_with(|| left.cmp(right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polish_letters_sort_next_to_their_base_letter() {
        let collator = TextCollator::for_language(Language::Pl);
        let mut cities = vec!["Zakopane", "Łódź", "Lublin"];

        cities.sort_by(|a, b| collator.compare(a, b));

        assert_eq!(cities, vec!["Lublin", "Łódź", "Zakopane"]);
    }

    #[test]
    fn case_does_not_outrank_letters() {
        let collator = TextCollator::for_language(Language::En);

        assert_eq!(collator.compare("apple", "Banana"), Ordering::Less);
        assert_eq!(collator.compare("Äpfel", "Zebra"), Ordering::Less);
        assert_ne!(collator.compare("a", "A"), Ordering::Equal);
    }
}
