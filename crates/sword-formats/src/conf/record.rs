//! Typed view of a module conf file

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{ConfError, ConfResult};
use super::kind::{ModuleKind, TextEncoding};
use super::parse_line;

const GLOBAL_OPTION_FILTER: &str = "GlobalOptionFilter";
const FEATURE: &str = "Feature";

/// Keys with a typed field, in the order [`ConfRecord::to_conf_string`] writes them
const TYPED_KEYS: [&str; 16] = [
    "Description",
    "ModDrv",
    "DataPath",
    "Encoding",
    "Lang",
    "Version",
    "CompressType",
    "BlockType",
    "CipherKey",
    "Versification",
    "SourceType",
    "About",
    "DistributionLicense",
    "MinimumVersion",
    "Category",
    "LCSH",
];

/// Parsed module descriptor
///
/// Known keys land in typed fields. Every key, known or not, is also kept in
/// [`ConfRecord::properties`] so a record can be written back without loss.
/// `GlobalOptionFilter` and `Feature` may repeat; every occurrence is kept in
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfRecord {
    /// Module name from the first `[Section]` header
    pub name: String,
    /// `Description`
    pub description: String,
    /// `ModDrv`
    pub driver: String,
    /// `DataPath`, relative to the module root
    pub data_path: String,
    /// `Encoding`
    pub encoding: String,
    /// `Lang`
    pub language: String,
    /// `Version`
    pub version: String,
    /// `CompressType`
    pub compress_type: String,
    /// `BlockType`
    pub block_type: String,
    /// `CipherKey`
    pub cipher_key: String,
    /// `Versification`
    pub versification: String,
    /// `SourceType`
    pub source_type: String,
    /// `About`
    pub about: String,
    /// `DistributionLicense`
    pub distribution_license: String,
    /// `MinimumVersion`
    pub minimum_version: String,
    /// `Category`
    pub category: String,
    /// `LCSH`
    pub lcsh: String,
    /// Every `GlobalOptionFilter` value in file order
    pub global_option_filters: Vec<String>,
    /// Every `Feature` value in file order
    pub features: Vec<String>,
    /// Raw key/value pairs; for repeated keys the last value wins
    pub properties: BTreeMap<String, String>,
}

impl ConfRecord {
    /// Create an empty record for a named module
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Read and parse a conf file
    ///
    /// Only failing to read the file is an error. Once read, parsing is best
    /// effort and lines that do not parse are skipped.
    pub fn from_path(path: impl AsRef<Path>) -> ConfResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ConfError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        // Old conf files are frequently Latin-1
        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(e) => TextEncoding::Latin1.decode(e.as_bytes()),
        };
        let record = Self::parse_str(&content);
        debug!(
            "Parsed conf {} for module '{}' ({} properties)",
            path.display(),
            record.name,
            record.properties.len()
        );
        Ok(record)
    }

    /// Parse conf text
    pub fn parse_str(content: &str) -> Self {
        let mut record = Self::default();
        let mut section_seen = false;
        let mut lines = content.lines();

        while let Some(raw) = lines.next() {
            let line = raw.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                if !section_seen {
                    record.name = line[1..line.len() - 1].trim().to_string();
                    section_seen = true;
                }
                continue;
            }

            let Some((key, value)) = parse_line(line) else {
                continue;
            };

            let mut value = value.to_string();
            while let Some(stripped) = value.strip_suffix('\\') {
                let mut joined = stripped.trim_end().to_string();
                match lines.next() {
                    Some(next) => {
                        let next = next.trim();
                        if !joined.is_empty() && !next.is_empty() {
                            joined.push(' ');
                        }
                        joined.push_str(next);
                    }
                    None => {
                        value = joined;
                        break;
                    }
                }
                value = joined;
            }

            record.set(key, value);
        }

        record
    }

    /// Set a property, updating the matching typed field
    ///
    /// Key matching for typed fields is case-insensitive; the raw map keeps
    /// the key exactly as given.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match key.to_ascii_lowercase().as_str() {
            "description" => self.description.clone_from(&value),
            "moddrv" => self.driver.clone_from(&value),
            "datapath" => self.data_path.clone_from(&value),
            "encoding" => self.encoding.clone_from(&value),
            "lang" => self.language.clone_from(&value),
            "version" => self.version.clone_from(&value),
            "compresstype" => self.compress_type.clone_from(&value),
            "blocktype" => self.block_type.clone_from(&value),
            "cipherkey" => self.cipher_key.clone_from(&value),
            "versification" => self.versification.clone_from(&value),
            "sourcetype" => self.source_type.clone_from(&value),
            "about" => self.about.clone_from(&value),
            "distributionlicense" => self.distribution_license.clone_from(&value),
            "minimumversion" => self.minimum_version.clone_from(&value),
            "category" => self.category.clone_from(&value),
            "lcsh" => self.lcsh.clone_from(&value),
            "globaloptionfilter" => self.global_option_filters.push(value.clone()),
            "feature" => self.features.push(value.clone()),
            _ => {}
        }
        self.properties.insert(key.to_string(), value);
    }

    /// Look up a raw property by case-insensitive key
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .get(key)
            .or_else(|| {
                self.properties
                    .iter()
                    .find(|(k, _)| k.eq_ignore_ascii_case(key))
                    .map(|(_, v)| v)
            })
            .map(String::as_str)
    }

    /// Module kind derived from the driver name
    pub fn module_kind(&self) -> ModuleKind {
        ModuleKind::from_driver(&self.driver)
    }

    /// Whether the driver belongs to the compressed `z*` family
    pub fn is_compressed(&self) -> bool {
        self.driver
            .trim()
            .chars()
            .next()
            .is_some_and(|c| c.eq_ignore_ascii_case(&'z'))
    }

    /// Whether the module carries a cipher key
    pub fn is_encrypted(&self) -> bool {
        !self.cipher_key.trim().is_empty()
    }

    /// Location of the module data under a module root
    ///
    /// `DataPath` values are written relative to the root, usually with a
    /// leading `./` and, for directory formats, a trailing `/`.
    pub fn resolve_data_path(&self, base: &Path) -> PathBuf {
        let relative = self.data_path.trim();
        let relative = relative.strip_prefix("./").unwrap_or(relative);
        let relative = relative.trim_start_matches('/').trim_end_matches('/');
        if relative.is_empty() {
            base.to_path_buf()
        } else {
            base.join(relative)
        }
    }

    /// Text encoding of the module data
    pub fn text_encoding(&self) -> TextEncoding {
        TextEncoding::from_conf_value(&self.encoding)
    }

    /// Render the record back to conf text
    ///
    /// Keys with a typed field come first, in field order, followed by the
    /// remaining properties in key order. Repeated keys are written once per
    /// collected value.
    pub fn to_conf_string(&self) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "[{}]", self.name);

        for typed in TYPED_KEYS {
            for (key, value) in self.properties.iter().filter(|(k, _)| k.eq_ignore_ascii_case(typed)) {
                let _ = writeln!(output, "{key}={value}");
            }
        }

        let untyped = self
            .properties
            .iter()
            .filter(|(key, _)| !TYPED_KEYS.iter().any(|typed| key.eq_ignore_ascii_case(typed)));
        for (key, value) in untyped {
            if key.eq_ignore_ascii_case(GLOBAL_OPTION_FILTER) {
                for filter in &self.global_option_filters {
                    let _ = writeln!(output, "{GLOBAL_OPTION_FILTER}={filter}");
                }
            } else if key.eq_ignore_ascii_case(FEATURE) {
                for feature in &self.features {
                    let _ = writeln!(output, "{FEATURE}={feature}");
                }
            } else {
                let _ = writeln!(output, "{key}={value}");
            }
        }

        output
    }

    /// Write the record to a conf file, creating parent directories
    pub fn write_to(&self, path: impl AsRef<Path>) -> ConfResult<()> {
        let path = path.as_ref();
        let write_error = |source| ConfError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        std::fs::write(path, self.to_conf_string()).map_err(write_error)
    }
}
