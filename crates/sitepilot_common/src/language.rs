//! Site languages.

use serde::{Deserialize, Serialize};

/// Languages the site can be switched to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Ar => "Arabic",
        }
    }

    /// Arabic if the text contains any Arabic-script code point
    pub fn detect(text: &str) -> Self {
        if text.chars().any(is_arabic) {
            Self::Ar
        } else {
            Self::En
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Arabic, Arabic Supplement, Arabic Extended-A and presentation forms
pub fn is_arabic(c: char) -> bool {
    matches!(c,
        '\u{0600}'..='\u{06FF}'
        | '\u{0750}'..='\u{077F}'
        | '\u{08A0}'..='\u{08FF}'
        | '\u{FB50}'..='\u{FDFF}'
        | '\u{FE70}'..='\u{FEFF}')
}

/// Arabic comma, semicolon, question mark, percent and separators
pub fn is_arabic_punctuation(c: char) -> bool {
    matches!(
        c,
        '\u{060C}' | '\u{061B}' | '\u{061F}' | '\u{066A}' | '\u{066B}' | '\u{066C}' | '\u{06D4}'
    )
}
