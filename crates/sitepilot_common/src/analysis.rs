//! Prompt analysis - the "thinking" trace returned with answers.

use serde::{Deserialize, Serialize};

use crate::keywords::extract_keywords;
use crate::language::Language;

/// Kind of question, from the leading question word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    EntityIdentification,
    Definition,
    Temporal,
    Location,
    Reasoning,
    Process,
    Informational,
}

impl QuestionType {
    pub fn classify(prompt: &str) -> Self {
        let p = prompt.trim_start().to_lowercase();

        let table: [(&[&str], Self); 6] = [
            (&["who", "من "], Self::EntityIdentification),
            (&["what", "ما ", "ماذا", "ما هو", "ما هي"], Self::Definition),
            (&["when", "متى"], Self::Temporal),
            (&["where", "أين", "اين"], Self::Location),
            (&["why", "لماذا"], Self::Reasoning),
            (&["how", "كيف"], Self::Process),
        ];

        table
            .iter()
            .find(|(prefixes, _)| prefixes.iter().any(|prefix| p.starts_with(prefix)))
            .map(|(_, kind)| *kind)
            .unwrap_or(Self::Informational)
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::EntityIdentification => "entity identification",
            Self::Definition => "definition or explanation",
            Self::Temporal => "temporal information",
            Self::Location => "location information",
            Self::Reasoning => "reasoning or cause",
            Self::Process => "process or method",
            Self::Informational => "informational",
        }
    }
}

/// Describe what the answer pipeline will look for
pub fn analyze_prompt(prompt: &str) -> String {
    let question_type = QuestionType::classify(prompt);
    let keywords = extract_keywords(prompt, Language::detect(prompt));

    format!(
        "I need to find information about \"{}\". This appears to be a {} question.\n\
         Key concepts to search for: {}.\n\
         I'll search the database for relevant content and provide the most accurate answer based on available information.",
        prompt,
        question_type.description(),
        keywords.join(", ")
    )
}
