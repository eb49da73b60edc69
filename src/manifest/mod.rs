//! Ordered manifest model.
//!
//! A manifest is a YAML mapping from package manager name to a list of package
//! entries. Sections are kept in the order they are written in the file, and
//! packages in the order they are listed, because that is the order in which
//! they get installed.
//!
//! ```yaml
//! scoop:
//!   - git
//!   - name: nodejs
//!     version: 20.11.0
//! chocolatey:
//!   - name: vlc
//! ```

mod error;

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

pub use error::ManifestError;

/// A single package declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    pub name: String,
    /// `None` installs the latest version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }

    pub fn with_version(name: impl Into<String>, version: impl Into<String>) -> Self {
        let version = version.into();
        Self {
            name: name.into(),
            version: (!version.is_empty()).then_some(version),
        }
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

/// One package manager's packages, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub backend_name: String,
    pub packages: Vec<Package>,
}

impl Section {
    pub fn new(backend_name: impl Into<String>, packages: Vec<Package>) -> Self {
        Self {
            backend_name: backend_name.into(),
            packages,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub sections: Vec<Section>,
}

impl Manifest {
    /// Read, parse and validate the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ManifestError::FileNotFound(path.to_path_buf()),
            _ => ManifestError::Read {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        Self::parse(&content)
    }

    /// Parse and validate a manifest document.
    pub fn parse(raw: &str) -> Result<Self, ManifestError> {
        if is_blank_document(raw) {
            return Err(ManifestError::EmptySections);
        }

        let OrderedSections(sections) = serde_yaml::from_str(raw)?;
        let manifest = Self { sections };
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.sections.is_empty() {
            return Err(ManifestError::EmptySections);
        }

        for (position, section) in self.sections.iter().enumerate() {
            if section.backend_name.is_empty() {
                return Err(ManifestError::EmptySectionName(position));
            }
            for (index, package) in section.packages.iter().enumerate() {
                if package.name.is_empty() {
                    return Err(ManifestError::MissingPackageName {
                        section: section.backend_name.clone(),
                        index,
                    });
                }
            }
        }

        Ok(())
    }

    pub fn package_count(&self) -> usize {
        self.sections.iter().map(|s| s.packages.len()).sum()
    }
}

fn is_blank_document(raw: &str) -> bool {
    raw.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

/// The top-level mapping, collected pair by pair so document order survives.
struct OrderedSections(Vec<Section>);

impl<'de> Deserialize<'de> for OrderedSections {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SectionsVisitor)
    }
}

struct SectionsVisitor;

impl<'de> Visitor<'de> for SectionsVisitor {
    type Value = OrderedSections;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of package managers")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut sections = Vec::with_capacity(map.size_hint().unwrap_or(0));

        while let Some(name) = map.next_key::<String>()? {
            let entries = map
                .next_value::<Option<Vec<Entry>>>()
                .map_err(|e| {
                    <A::Error as de::Error>::custom(format!(
                        "failed to decode packages for {}: {}",
                        name, e
                    ))
                })?
                .unwrap_or_default();

            sections.push(Section::new(
                name.trim(),
                entries.into_iter().map(Package::from).collect(),
            ));
        }

        Ok(OrderedSections(sections))
    }
}

/// One list item: a bare name or a `{name, version}` map. A missing name is
/// left empty here and reported by validation with its index.
struct Entry {
    name: String,
    version: Option<String>,
}

impl Entry {
    fn named(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            version: None,
        }
    }
}

impl From<Entry> for Package {
    fn from(entry: Entry) -> Self {
        Package::with_version(entry.name, entry.version.unwrap_or_default())
    }
}

impl<'de> Deserialize<'de> for Entry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EntryVisitor)
    }
}

struct EntryVisitor;

impl<'de> Visitor<'de> for EntryVisitor {
    type Value = Entry;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a package name or a map with `name` and `version`")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Entry, E> {
        Ok(Entry::named(""))
    }

    fn visit_none<E: de::Error>(self) -> Result<Entry, E> {
        Ok(Entry::named(""))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Entry, E> {
        Ok(Entry::named(v))
    }

    // Bare scalars that YAML resolves to other types.
    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Entry, E> {
        Ok(Entry::named(&v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Entry, E> {
        Ok(Entry::named(&v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Entry, E> {
        Ok(Entry::named(&v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Entry, E> {
        Ok(Entry::named(&v.to_string()))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Entry, A::Error> {
        let mut name: Option<String> = None;
        let mut version: Option<String> = None;

        // String targets receive the scalar exactly as written, so
        // `version: 3.10` stays "3.10".
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "name" => name = map.next_value()?,
                "version" => version = map.next_value()?,
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(Entry {
            name: name.map(|n| n.trim().to_string()).unwrap_or_default(),
            version: version.map(|v| v.trim().to_string()),
        })
    }
}
