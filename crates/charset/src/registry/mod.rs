//! Perforce charset names and their platform encodings.
//!
//! The server identifies charsets by a closed set of Perforce names
//! (`shiftjis`, `winansi`, `utf16le-bom`, ...). [`CharsetRegistry`] maps those
//! names to platform encoding names and back, and resolves them into
//! [`Charset`] handles. Build one registry at startup and pass it by
//! reference to whatever needs charset lookups.

mod table;


use rustc_hash::FxHashMap;

use crate::charset::Charset;
use crate::error::EncodingError;

/// One row of the charset table.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct CharsetEntry {
    perforce_name: &'static str,
    platform_name: &'static str,
    bom: Option<bool>,
}

impl CharsetEntry {
    /// Sentinel asking the platform to choose the charset.
    pub const AUTO: Self = Self::new("auto", "auto");

    /// Sentinel meaning no charset conversion.
    pub const NONE: Self = Self::new("none", "none");

    const fn new(perforce_name: &'static str, platform_name: &'static str) -> Self {
        Self {
            perforce_name,
            platform_name,
            bom: None,
        }
    }

    /// A Unicode row that pins whether output starts with a byte-order mark.
    const fn marked(perforce_name: &'static str, platform_name: &'static str, bom: bool) -> Self {
        Self {
            perforce_name,
            platform_name,
            bom: Some(bom),
        }
    }

    /// Perforce charset identifier.
    #[must_use]
    pub const fn perforce_name(&self) -> &'static str {
        self.perforce_name
    }

    /// Platform encoding name.
    #[must_use]
    pub const fn platform_name(&self) -> &'static str {
        self.platform_name
    }

    /// Byte-order mark preference, or `None` to keep the encoding's default.
    #[must_use]
    pub const fn bom(&self) -> Option<bool> {
        self.bom
    }

    /// Reports whether this row is `auto` or `none`.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        *self == Self::AUTO || *self == Self::NONE
    }
}

/// Outcome of resolving a Perforce charset name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CharsetSelection {
    /// `auto`: the caller picks the platform default.
    Auto,
    /// `none`: text is passed through unconverted.
    NoCharset,
    /// A concrete encoding.
    Named(Charset),
}

impl CharsetSelection {
    /// The resolved charset, if any.
    #[must_use]
    pub const fn charset(&self) -> Option<Charset> {
        match self {
            Self::Named(charset) => Some(*charset),
            Self::Auto | Self::NoCharset => None,
        }
    }
}

/// Immutable lookup table between Perforce and platform charset names.
#[derive(Clone, Debug)]
pub struct CharsetRegistry {
    entries: &'static [CharsetEntry],
    by_perforce_name: FxHashMap<&'static str, usize>,
}

impl CharsetRegistry {
    /// Builds the registry from the built-in table.
    #[must_use]
    pub fn new() -> Self {
        let entries = table::CHARSETS;
        let mut by_perforce_name = FxHashMap::default();
        for (index, entry) in entries.iter().enumerate() {
            by_perforce_name.entry(entry.perforce_name).or_insert(index);
        }
        Self {
            entries,
            by_perforce_name,
        }
    }

    /// All rows in declaration order.
    #[must_use]
    pub const fn entries(&self) -> &[CharsetEntry] {
        self.entries
    }

    /// Perforce charset names in declaration order, sentinels included.
    pub fn known_charsets(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(CharsetEntry::perforce_name)
    }

    fn entry(&self, perforce_name: &str) -> Option<&CharsetEntry> {
        self.by_perforce_name
            .get(perforce_name)
            .map(|&index| &self.entries[index])
    }

    /// Platform encoding name for a Perforce charset.
    ///
    /// `auto` and `none` return themselves; callers must handle them before
    /// treating the result as an encoding name.
    #[must_use]
    pub fn platform_name_for(&self, perforce_name: &str) -> Option<&'static str> {
        self.entry(perforce_name).map(CharsetEntry::platform_name)
    }

    /// First Perforce charset in declaration order that maps to `platform_name`.
    #[must_use]
    pub fn perforce_name_for(&self, platform_name: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|entry| entry.platform_name.eq_ignore_ascii_case(platform_name))
            .map(CharsetEntry::perforce_name)
    }

    /// Reports whether `perforce_name` is in the table.
    #[must_use]
    pub fn is_supported(&self, perforce_name: &str) -> bool {
        self.by_perforce_name.contains_key(perforce_name)
    }

    /// Resolves a Perforce charset name into something a converter can use.
    ///
    /// # Errors
    ///
    /// [`EncodingError::UnknownCharset`] for names outside the table and
    /// [`EncodingError::UnsupportedEncoding`] when this build cannot encode
    /// or decode the platform encoding.
    pub fn resolve(&self, perforce_name: &str) -> Result<CharsetSelection, EncodingError> {
        let entry = self
            .entry(perforce_name)
            .ok_or_else(|| EncodingError::UnknownCharset(perforce_name.to_owned()))?;
        if *entry == CharsetEntry::AUTO {
            return Ok(CharsetSelection::Auto);
        }
        if *entry == CharsetEntry::NONE {
            return Ok(CharsetSelection::NoCharset);
        }
        let charset = Charset::for_name(entry.platform_name)?;
        let charset = entry.bom.map_or(charset, |bom| charset.with_bom(bom));
        Ok(CharsetSelection::Named(charset))
    }

    /// Resolves a Perforce charset name that must name a concrete encoding.
    ///
    /// # Errors
    ///
    /// As [`resolve`](Self::resolve), plus [`EncodingError::Sentinel`] for
    /// `auto` and `none`.
    pub fn charset(&self, perforce_name: &str) -> Result<Charset, EncodingError> {
        match self.resolve(perforce_name)? {
            CharsetSelection::Named(charset) => Ok(charset),
            CharsetSelection::Auto | CharsetSelection::NoCharset => {
                Err(EncodingError::Sentinel(perforce_name.to_owned()))
            }
        }
    }
}

impl Default for CharsetRegistry {
    fn default() -> Self {
        Self::new()
    }
}
