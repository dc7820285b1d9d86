use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Description of the scripts and font files available for different
/// locales, as published in a versioned `.manifest` file.
///
/// A manifest is either decoded in full or not at all: any malformed field
/// fails the whole decode, so callers never observe a partially valid
/// manifest. Unknown fields are ignored so newer manifests stay readable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontManifest {
    pub scripts: FontScripts,
}

/// The supported scripts. A `None` entry means no fonts are published for
/// that script in this manifest version.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FontScripts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latin_extended: Option<FontScript>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cyrillic_extended: Option<FontScript>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devanagari: Option<FontScript>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chinese_traditional_hk: Option<FontScript>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chinese_traditional: Option<FontScript>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chinese_simplified: Option<FontScript>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arabic: Option<FontScript>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub japanese: Option<FontScript>,
}

/// The font files available for one script. A `None` variant means that
/// weight is not published, not an error.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontScript {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serif: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condensed: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScriptTag {
    LatinExtended,
    CyrillicExtended,
    Devanagari,
    ChineseTraditionalHk,
    ChineseTraditional,
    ChineseSimplified,
    Arabic,
    Japanese,
}

impl ScriptTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptTag::LatinExtended => "latin-extended",
            ScriptTag::CyrillicExtended => "cyrillic-extended",
            ScriptTag::Devanagari => "devanagari",
            ScriptTag::ChineseTraditionalHk => "chinese-traditional-hk",
            ScriptTag::ChineseTraditional => "chinese-traditional",
            ScriptTag::ChineseSimplified => "chinese-simplified",
            ScriptTag::Arabic => "arabic",
            ScriptTag::Japanese => "japanese",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontVariant {
    Regular,
    Bold,
    Serif,
    Script,
    Condensed,
}

impl FontManifest {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).context("malformed font manifest")
    }

    pub fn to_vec(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).context("failed to serialize font manifest")
    }
}

impl FontScripts {
    pub fn by_tag(&self, tag: ScriptTag) -> Option<&FontScript> {
        match tag {
            ScriptTag::LatinExtended => self.latin_extended.as_ref(),
            ScriptTag::CyrillicExtended => self.cyrillic_extended.as_ref(),
            ScriptTag::Devanagari => self.devanagari.as_ref(),
            ScriptTag::ChineseTraditionalHk => self.chinese_traditional_hk.as_ref(),
            ScriptTag::ChineseTraditional => self.chinese_traditional.as_ref(),
            ScriptTag::ChineseSimplified => self.chinese_simplified.as_ref(),
            ScriptTag::Arabic => self.arabic.as_ref(),
            ScriptTag::Japanese => self.japanese.as_ref(),
        }
    }
}

impl FontScript {
    pub fn variant(&self, variant: FontVariant) -> Option<&str> {
        match variant {
            FontVariant::Regular => self.regular.as_deref(),
            FontVariant::Bold => self.bold.as_deref(),
            FontVariant::Serif => self.serif.as_deref(),
            FontVariant::Script => self.script.as_deref(),
            FontVariant::Condensed => self.condensed.as_deref(),
        }
    }
}
