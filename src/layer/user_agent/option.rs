use kiota_core::error::OpaqueError;
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, fmt, str::FromStr};

/// Product name used by [`UserAgentHandlerOption::default`].
pub const DEFAULT_PRODUCT_NAME: &str = "kiota-rust";

/// Product version used by [`UserAgentHandlerOption::default`].
pub const DEFAULT_PRODUCT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration of the [`UserAgentLayer`].
///
/// Besides configuring the layer at pipeline build time it can also be
/// inserted in the extensions of a single request, in which case it
/// takes precedence over the option of the layer for that request only.
///
/// The option can be deserialized from a (partial) config document,
/// missing fields fall back to their defaults:
///
/// ```
/// use kiota_http::layer::user_agent::UserAgentHandlerOption;
///
/// let option: UserAgentHandlerOption =
///     serde_json::from_str(r#"{"product_name": "graph-cli"}"#).unwrap();
/// assert!(option.is_enabled());
/// assert_eq!(option.product_name(), "graph-cli");
/// ```
///
/// [`UserAgentLayer`]: super::UserAgentLayer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserAgentHandlerOption {
    is_enabled: bool,
    product_name: Cow<'static, str>,
    product_version: Cow<'static, str>,
}

impl Default for UserAgentHandlerOption {
    fn default() -> Self {
        Self {
            is_enabled: true,
            product_name: Cow::Borrowed(DEFAULT_PRODUCT_NAME),
            product_version: Cow::Borrowed(DEFAULT_PRODUCT_VERSION),
        }
    }
}

impl UserAgentHandlerOption {
    /// Create a new enabled [`UserAgentHandlerOption`] for the given product.
    pub fn new(
        product_name: impl Into<Cow<'static, str>>,
        product_version: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            is_enabled: true,
            product_name: product_name.into(),
            product_version: product_version.into(),
        }
    }

    /// Enable or disable the decoration of the `User-Agent` header.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.is_enabled = enabled;
        self
    }

    /// Enable or disable the decoration of the `User-Agent` header.
    pub fn set_enabled(&mut self, enabled: bool) -> &mut Self {
        self.is_enabled = enabled;
        self
    }

    /// Overwrite the product name.
    #[must_use]
    pub fn with_product_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.product_name = name.into();
        self
    }

    /// Overwrite the product name.
    pub fn set_product_name(&mut self, name: impl Into<Cow<'static, str>>) -> &mut Self {
        self.product_name = name.into();
        self
    }

    /// Overwrite the product version.
    #[must_use]
    pub fn with_product_version(mut self, version: impl Into<Cow<'static, str>>) -> Self {
        self.product_version = version.into();
        self
    }

    /// Overwrite the product version.
    pub fn set_product_version(&mut self, version: impl Into<Cow<'static, str>>) -> &mut Self {
        self.product_version = version.into();
        self
    }

    /// Returns `true` if the `User-Agent` header is to be decorated.
    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    /// Name of the product identified in the `User-Agent` header.
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Version of the product identified in the `User-Agent` header.
    pub fn product_version(&self) -> &str {
        &self.product_version
    }

    /// The `{product_name}/{product_version}` token.
    pub fn token(&self) -> String {
        self.to_string()
    }

    /// The token, only if the option is enabled.
    pub(super) fn enabled_token(&self) -> Option<String> {
        self.is_enabled.then(|| self.token())
    }
}

impl fmt::Display for UserAgentHandlerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.product_name, self.product_version)
    }
}

impl FromStr for UserAgentHandlerOption {
    type Err = OpaqueError;

    /// Parse an enabled option from a `{product_name}/{product_version}` token.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, version) = s.trim().split_once('/').ok_or_else(|| {
            OpaqueError::from_display(format!("missing '/' separator in user agent token {s:?}"))
        })?;

        let name = name.trim();
        if name.is_empty() {
            return Err(OpaqueError::from_display(format!(
                "empty product name in user agent token {s:?}"
            )));
        }

        let version = version.trim();
        if version.is_empty() {
            return Err(OpaqueError::from_display(format!(
                "empty product version in user agent token {s:?}"
            )));
        }

        Ok(Self::new(name.to_owned(), version.to_owned()))
    }
}
