//! Module classification derived from the conf driver and encoding keys

use encoding_rs::{Encoding, UTF_8, UTF_16LE, WINDOWS_1252};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Kind of content a module carries, derived from its `ModDrv`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    /// Versified Bible text (`zText`, `RawText`)
    Bible,
    /// Versified commentary (`zCom`, `RawCom`)
    Commentary,
    /// Key/value lexicon or dictionary (`zLD`, `RawLD`)
    Dictionary,
    /// Hierarchical general book (`RawGenBook`)
    GenBook,
    /// Driver not recognised
    Unknown,
}

impl ModuleKind {
    /// Classify a driver name by its case-insensitive family
    pub fn from_driver(driver: &str) -> Self {
        let driver = driver.trim().to_ascii_lowercase();
        if driver.contains("rawgenbook") {
            Self::GenBook
        } else if driver.starts_with("ztext") || driver.starts_with("rawtext") {
            Self::Bible
        } else if driver.starts_with("zcom") || driver.starts_with("rawcom") {
            Self::Commentary
        } else if driver == "zld" || driver.starts_with("rawld") {
            Self::Dictionary
        } else {
            Self::Unknown
        }
    }

    /// Driver name written by this crate's writers
    pub fn driver_name(self) -> Option<&'static str> {
        match self {
            Self::Bible => Some("zText"),
            Self::Commentary => Some("zCom"),
            Self::Dictionary => Some("zLD"),
            Self::GenBook => Some("RawGenBook"),
            Self::Unknown => None,
        }
    }

    /// Whether a driver of this kind has a reader in this crate
    ///
    /// Only the compressed drivers and RawGenBook carry data access;
    /// the legacy Raw* text drivers are classified but not read.
    pub fn is_supported_driver(driver: &str) -> bool {
        matches!(
            driver.trim().to_ascii_lowercase().as_str(),
            "ztext" | "zcom" | "zld" | "rawgenbook"
        )
    }

    /// Whether this kind is addressed through a versification
    pub fn is_versified(self) -> bool {
        matches!(self, Self::Bible | Self::Commentary)
    }

    /// Conventional location of a module's data relative to the module root
    ///
    /// For zLD and RawGenBook the last component is the file stem shared by
    /// the data files rather than a directory.
    pub fn data_subdir(self, module_name: &str) -> PathBuf {
        let name = module_name.to_ascii_lowercase();
        let mut path = PathBuf::from("modules");
        match self {
            Self::Bible => path.extend(["texts", "ztext", name.as_str()]),
            Self::Commentary => path.extend(["comments", "zcom", name.as_str()]),
            Self::Dictionary => path.extend(["lexdict", "zld", name.as_str(), "dict"]),
            Self::GenBook => path.extend(["genbook", "rawgenbook", name.as_str(), name.as_str()]),
            Self::Unknown => path.push(name.as_str()),
        }
        path
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bible => "Bible",
            Self::Commentary => "Commentary",
            Self::Dictionary => "Dictionary",
            Self::GenBook => "GenBook",
            Self::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Text encoding declared by the conf `Encoding` key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// `UTF-8`, the default for modern modules
    #[default]
    Utf8,
    /// `Latin-1`, the default for very old modules
    Latin1,
    /// `UTF-16` (little-endian)
    Utf16,
}

impl TextEncoding {
    /// Parse the conf value; anything unrecognised is treated as UTF-8
    pub fn from_conf_value(value: &str) -> Self {
        let normalized: String = value
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "latin1" | "iso88591" => Self::Latin1,
            "utf16" | "utf16le" => Self::Utf16,
            _ => Self::Utf8,
        }
    }

    /// Codec for this encoding
    ///
    /// Latin-1 text is read as windows-1252, which agrees with ISO-8859-1
    /// outside 0x80-0x9F and gives the punctuation old modules store there.
    pub fn codec(self) -> &'static Encoding {
        match self {
            Self::Utf8 => UTF_8,
            Self::Latin1 => WINDOWS_1252,
            Self::Utf16 => UTF_16LE,
        }
    }

    /// Decode raw module bytes into a string
    ///
    /// Invalid sequences are replaced rather than rejected.
    pub fn decode(self, bytes: &[u8]) -> String {
        let (text, _, _) = self.codec().decode(bytes);
        text.into_owned()
    }
}
