use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// language codes the host passes when asking for a display name. new codes
/// may appear without an interface change, so anything unrecognized maps
/// to `Unknown`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostLanguage {
    English,
    German,
    French,
    Italian,
    Polish,
    Spanish,
    LatinAmericanSpanish,
    Chinese,
    Japanese,
    Unknown,
}

impl HostLanguage {
    /// reads the three-letter language code. surrounding whitespace and
    /// letter case are ignored.
    pub fn from_code(code: &[u8]) -> HostLanguage {
        let trimmed = code.trim_ascii();
        let mut upper = [0u8; 3];
        if trimmed.len() != upper.len() {
            return HostLanguage::Unknown;
        }
        for (dst, src) in upper.iter_mut().zip(trimmed) {
            *dst = src.to_ascii_uppercase();
        }
        match &upper {
            b"ENG" => HostLanguage::English,
            b"DEU" => HostLanguage::German,
            b"FRA" => HostLanguage::French,
            b"ITA" => HostLanguage::Italian,
            b"POL" => HostLanguage::Polish,
            b"SPA" => HostLanguage::Spanish,
            b"LAS" => HostLanguage::LatinAmericanSpanish,
            b"CHI" => HostLanguage::Chinese,
            b"JAP" => HostLanguage::Japanese,
            _ => HostLanguage::Unknown,
        }
    }

    pub fn code(&self) -> Option<&'static str> {
        match self {
            HostLanguage::English => Some("ENG"),
            HostLanguage::German => Some("DEU"),
            HostLanguage::French => Some("FRA"),
            HostLanguage::Italian => Some("ITA"),
            HostLanguage::Polish => Some("POL"),
            HostLanguage::Spanish => Some("SPA"),
            HostLanguage::LatinAmericanSpanish => Some("LAS"),
            HostLanguage::Chinese => Some("CHI"),
            HostLanguage::Japanese => Some("JAP"),
            HostLanguage::Unknown => None,
        }
    }

    /// the curve name is an acronym and is not translated.
    pub fn display_name(&self) -> &'static str {
        super::metadata::VDF_NAME
    }
}

impl Display for HostLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code().unwrap_or("unknown"))
    }
}
