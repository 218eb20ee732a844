use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptPair {
    pub english_prompt: String,
    pub vietnamese_prompt: String,
}

impl PromptPair {
    pub fn new(english: impl Into<String>, vietnamese: impl Into<String>) -> Self {
        Self {
            english_prompt: english.into(),
            vietnamese_prompt: vietnamese.into(),
        }
    }

    pub fn get(&self, language: PromptLanguage) -> &str {
        match language {
            PromptLanguage::English => &self.english_prompt,
            PromptLanguage::Vietnamese => &self.vietnamese_prompt,
        }
    }
}

/// Which result card a prompt belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptLanguage {
    English,
    Vietnamese,
}

impl PromptLanguage {
    pub const ALL: [PromptLanguage; 2] = [PromptLanguage::English, PromptLanguage::Vietnamese];

    pub fn code(&self) -> &'static str {
        match self {
            PromptLanguage::English => "en",
            PromptLanguage::Vietnamese => "vi",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PromptLanguage::English => "English Prompt",
            PromptLanguage::Vietnamese => "Prompt Tiếng Việt",
        }
    }
}

impl fmt::Display for PromptLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PromptLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" | "english" => Ok(PromptLanguage::English),
            "vi" | "vietnamese" => Ok(PromptLanguage::Vietnamese),
            other => Err(format!("Unknown prompt language: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes() {
        assert_eq!("en".parse::<PromptLanguage>(), Ok(PromptLanguage::English));
        assert_eq!("vi".parse::<PromptLanguage>(), Ok(PromptLanguage::Vietnamese));
        assert!("fr".parse::<PromptLanguage>().is_err());
        assert_eq!(PromptLanguage::Vietnamese.to_string(), "vi");
    }

    #[test]
    fn test_get_by_language() {
        let pair = PromptPair::new("A cat blinks slowly.", "Con mèo chớp mắt chậm rãi.");
        assert_eq!(pair.get(PromptLanguage::English), "A cat blinks slowly.");
        assert_eq!(
            pair.get(PromptLanguage::Vietnamese),
            "Con mèo chớp mắt chậm rãi."
        );
    }
}
