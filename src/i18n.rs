use std::collections::HashMap;
use std::fmt;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

static ENGLISH: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        "Login",
        "Sign Up",
        "Create an Account",
        "Username",
        "Password",
        "Full Name",
        "Email",
        "Enter Salary",
        "Save Salary",
        "Add Expense",
        "Date",
        "Sector",
        "Amount",
        "Expense Table",
        "Balance",
        "Visualizations",
        "Future Predictions",
        "Remaining Days Predictions",
        "Next Month Predictions",
        "Expense added!",
        "Dashboard cleared!",
    ]
    .into_iter()
    .map(|phrase| (phrase, phrase))
    .collect()
});

static HINDI: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Login", "लॉग इन करें"),
        ("Sign Up", "साइन अप करें"),
        ("Create an Account", "खाता बनाएँ"),
        ("Username", "उपयोगकर्ता नाम"),
        ("Password", "पासवर्ड"),
        ("Full Name", "पूरा नाम"),
        ("Email", "ईमेल"),
        ("Enter Salary", "वेतन दर्ज करें"),
        ("Save Salary", "वेतन सहेजें"),
        ("Add Expense", "खर्च जोड़ें"),
        ("Date", "तारीख"),
        ("Sector", "खाता"),
        ("Amount", "राशि"),
        ("Expense Table", "खर्च तालिका"),
        ("Balance", "शेष राशि"),
        ("Visualizations", "दृश्य"),
        ("Future Predictions", "भविष्यवाणियां"),
        ("Remaining Days Predictions", "शेष दिनों की भविष्यवाणियां"),
        ("Next Month Predictions", "अगले महीने की भविष्यवाणियां"),
        ("Expense added!", "खर्च जोड़ा गया!"),
        ("Dashboard cleared!", "डैशबोर्ड साफ़ किया गया!"),
    ])
});

/// Looks up the display phrase for `key` in the given language.
///
/// Keys without a translation are returned unchanged, so every label in the
/// UI can be passed through here even if only English exists for it.
pub fn translate(language: Language, key: &str) -> &str {
    let table: &HashMap<&str, &str> = match language {
        Language::English => &*ENGLISH,
        Language::Hindi => &*HINDI,
    };
    table.get(key).copied().unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_hindi() {
        assert_eq!(translate(Language::Hindi, "Login"), "लॉग इन करें");
        assert_eq!(translate(Language::Hindi, "Balance"), "शेष राशि");
    }

    #[test]
    fn test_translate_english_is_identity() {
        assert_eq!(translate(Language::English, "Expense Table"), "Expense Table");
    }

    #[test]
    fn test_untranslated_key_falls_back_to_key() {
        assert_eq!(translate(Language::Hindi, "Clear Dashboard"), "Clear Dashboard");
        assert_eq!(translate(Language::English, "Not a phrase"), "Not a phrase");
    }

    #[test]
    fn test_language_codes_round_trip_through_serde() {
        let lang: Language = serde_json::from_str("\"hi\"").unwrap();
        assert_eq!(lang, Language::Hindi);
        assert_eq!(Language::English.code(), "en");
    }
}
