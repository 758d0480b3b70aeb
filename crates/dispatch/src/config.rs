//! Per-command dispatch settings.

use charset::{Charset, CharsetConverter, CharsetRegistry, CharsetSelection, EncodingError};
use protocol::MAX_PAYLOAD_LEN;

/// Settings shared by a dispatch session and its connection.
///
/// Built through [`DispatchConfig::builder`]; charset names are validated
/// against a [`CharsetRegistry`] when the builder is finished.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DispatchConfig {
    quiet: bool,
    unicode_server: bool,
    server_charset_name: Option<String>,
    server_charset: Option<Charset>,
    client_charset_name: Option<String>,
    client_charset: Option<Charset>,
    max_payload_len: u32,
    progress_key: i32,
    text_conversion: bool,
}

impl DispatchConfig {
    /// Creates a new [`DispatchConfigBuilder`].
    #[must_use]
    pub fn builder() -> DispatchConfigBuilder {
        DispatchConfigBuilder::default()
    }

    /// Reports whether `client-Message` info results are suppressed.
    #[must_use]
    pub const fn quiet(&self) -> bool {
        self.quiet
    }

    /// Reports whether the server speaks UTF-8 on the wire.
    #[must_use]
    pub const fn unicode_server(&self) -> bool {
        self.unicode_server
    }

    /// Perforce name of the server charset, as configured.
    #[must_use]
    pub fn server_charset_name(&self) -> Option<&str> {
        self.server_charset_name.as_deref()
    }

    /// Resolved server charset; `None` when unset or `none`.
    #[must_use]
    pub const fn server_charset(&self) -> Option<Charset> {
        self.server_charset
    }

    /// Perforce name of the client charset, as configured.
    #[must_use]
    pub fn client_charset_name(&self) -> Option<&str> {
        self.client_charset_name.as_deref()
    }

    /// Resolved client charset; `None` when unset or `none`.
    #[must_use]
    pub const fn client_charset(&self) -> Option<Charset> {
        self.client_charset
    }

    /// Largest inbound payload accepted by a stream connection.
    #[must_use]
    pub const fn max_payload_len(&self) -> u32 {
        self.max_payload_len
    }

    /// Key passed to progress callbacks.
    #[must_use]
    pub const fn progress_key(&self) -> i32 {
        self.progress_key
    }

    /// Reports whether `client-OutputText` data is transcoded.
    #[must_use]
    pub const fn text_conversion(&self) -> bool {
        self.text_conversion
    }

    /// Charset text fields use on the wire.
    ///
    /// Unicode servers always send UTF-8; other servers use the configured
    /// server charset, if any.
    #[must_use]
    pub fn wire_charset(&self) -> Option<Charset> {
        if self.unicode_server {
            Some(Charset::utf8())
        } else {
            self.server_charset
        }
    }

    /// Converter for file text sent by the server, when one is needed.
    ///
    /// Returns `None` when conversion is disabled, either side has no
    /// charset, or both sides already agree.
    #[must_use]
    pub fn text_converter(&self) -> Option<CharsetConverter> {
        if !self.text_conversion {
            return None;
        }
        let from = self.wire_charset()?;
        let to = self.client_charset?;
        (from != to).then(|| CharsetConverter::new(from, to))
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            unicode_server: false,
            server_charset_name: None,
            server_charset: None,
            client_charset_name: None,
            client_charset: None,
            max_payload_len: MAX_PAYLOAD_LEN,
            progress_key: 0,
            text_conversion: true,
        }
    }
}

/// Builder used to assemble a [`DispatchConfig`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DispatchConfigBuilder {
    quiet: bool,
    unicode_server: bool,
    server_charset: Option<String>,
    client_charset: Option<String>,
    max_payload_len: u32,
    progress_key: i32,
    text_conversion: bool,
}

impl Default for DispatchConfigBuilder {
    fn default() -> Self {
        Self {
            quiet: false,
            unicode_server: false,
            server_charset: None,
            client_charset: None,
            max_payload_len: MAX_PAYLOAD_LEN,
            progress_key: 0,
            text_conversion: true,
        }
    }
}

impl DispatchConfigBuilder {
    /// Suppresses `client-Message` info results.
    #[must_use]
    #[doc(alias = "-q")]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Declares whether the server runs in Unicode mode.
    #[must_use]
    pub const fn unicode_server(mut self, unicode: bool) -> Self {
        self.unicode_server = unicode;
        self
    }

    /// Sets the server charset by Perforce name.
    #[must_use]
    pub fn server_charset(mut self, name: impl Into<String>) -> Self {
        self.server_charset = Some(name.into());
        self
    }

    /// Sets the client charset by Perforce name.
    #[must_use]
    #[doc(alias = "P4CHARSET")]
    pub fn client_charset(mut self, name: impl Into<String>) -> Self {
        self.client_charset = Some(name.into());
        self
    }

    /// Caps the payload length accepted from the server.
    ///
    /// Values above the protocol maximum are clamped to it.
    #[must_use]
    pub fn max_payload_len(mut self, limit: u32) -> Self {
        self.max_payload_len = limit.min(MAX_PAYLOAD_LEN);
        self
    }

    /// Sets the key passed to progress callbacks.
    #[must_use]
    pub const fn progress_key(mut self, key: i32) -> Self {
        self.progress_key = key;
        self
    }

    /// Enables or disables transcoding of `client-OutputText` data.
    #[must_use]
    pub const fn text_conversion(mut self, enabled: bool) -> Self {
        self.text_conversion = enabled;
        self
    }

    /// Finalises the builder, resolving charset names through `registry`.
    ///
    /// `auto` resolves to UTF-8; `none` leaves the charset unset.
    ///
    /// # Errors
    ///
    /// Fails closed for names outside the charset table or encodings this
    /// build cannot handle.
    pub fn build(self, registry: &CharsetRegistry) -> Result<DispatchConfig, EncodingError> {
        let server_charset = resolve(registry, self.server_charset.as_deref())?;
        let client_charset = resolve(registry, self.client_charset.as_deref())?;
        Ok(DispatchConfig {
            quiet: self.quiet,
            unicode_server: self.unicode_server,
            server_charset_name: self.server_charset,
            server_charset,
            client_charset_name: self.client_charset,
            client_charset,
            max_payload_len: self.max_payload_len,
            progress_key: self.progress_key,
            text_conversion: self.text_conversion,
        })
    }
}

fn resolve(registry: &CharsetRegistry, name: Option<&str>) -> Result<Option<Charset>, EncodingError> {
    let Some(name) = name else {
        return Ok(None);
    };
    Ok(match registry.resolve(name)? {
        CharsetSelection::Auto => Some(Charset::utf8()),
        CharsetSelection::NoCharset => None,
        CharsetSelection::Named(charset) => Some(charset),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_builder_defaults() {
        let registry = CharsetRegistry::new();
        let built = DispatchConfig::builder().build(&registry).expect("build");
        assert_eq!(built, DispatchConfig::default());
        assert_eq!(built.max_payload_len(), MAX_PAYLOAD_LEN);
        assert!(built.text_conversion());
        assert!(built.text_converter().is_none());
    }

    #[test]
    fn charset_names_are_resolved_and_kept() {
        let registry = CharsetRegistry::new();
        let config = DispatchConfig::builder()
            .server_charset("shiftjis")
            .client_charset("auto")
            .build(&registry)
            .expect("build");

        assert_eq!(config.server_charset_name(), Some("shiftjis"));
        assert_eq!(config.server_charset().map(|c| c.name()), Some("Shift_JIS"));
        assert_eq!(config.client_charset(), Some(Charset::utf8()));

        let converter = config.text_converter().expect("converter");
        assert_eq!(converter.from_charset().name(), "Shift_JIS");
    }

    #[test]
    fn unicode_server_sends_utf8() {
        let registry = CharsetRegistry::new();
        let config = DispatchConfig::builder()
            .unicode_server(true)
            .server_charset("shiftjis")
            .client_charset("utf16le")
            .build(&registry)
            .expect("build");
        assert_eq!(config.wire_charset(), Some(Charset::utf8()));
        let converter = config.text_converter().expect("converter");
        assert_eq!(converter.to_charset().name(), "UTF-16LE");
    }

    #[test]
    fn none_and_matching_charsets_disable_conversion() {
        let registry = CharsetRegistry::new();
        let none = DispatchConfig::builder()
            .server_charset("shiftjis")
            .client_charset("none")
            .build(&registry)
            .expect("build");
        assert_eq!(none.client_charset(), None);
        assert!(none.text_converter().is_none());

        let same = DispatchConfig::builder()
            .unicode_server(true)
            .client_charset("utf8")
            .build(&registry)
            .expect("build");
        assert!(same.text_converter().is_none());

        let disabled = DispatchConfig::builder()
            .server_charset("shiftjis")
            .client_charset("utf8")
            .text_conversion(false)
            .build(&registry)
            .expect("build");
        assert!(disabled.text_converter().is_none());
    }

    #[test]
    fn unknown_charsets_fail_closed() {
        let registry = CharsetRegistry::new();
        let err = DispatchConfig::builder()
            .client_charset("ebcdic")
            .build(&registry)
            .expect_err("unknown");
        assert_eq!(err, EncodingError::UnknownCharset("ebcdic".to_owned()));
    }

    #[test]
    fn payload_limit_is_clamped() {
        let registry = CharsetRegistry::new();
        let config = DispatchConfig::builder()
            .max_payload_len(u32::MAX)
            .quiet(true)
            .progress_key(7)
            .build(&registry)
            .expect("build");
        assert_eq!(config.max_payload_len(), MAX_PAYLOAD_LEN);
        assert!(config.quiet());
        assert_eq!(config.progress_key(), 7);
    }
}
