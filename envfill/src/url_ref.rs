//! URL references: absolute URLs and relative references

use std::fmt;
use std::str::FromStr;
use url::{ParseError, Url};

// Only used to check the syntax of relative references.
const CHECK_BASE: &str = "http://base.invalid/";

/// An absolute URL or a relative reference such as `/api/v1?x=1`.
///
/// ```rust
/// use envfill::UrlRef;
///
/// let base = url::Url::parse("https://example.com/app/").unwrap();
///
/// let absolute: UrlRef = "https://example.com/api".parse().unwrap();
/// assert!(absolute.as_url().is_some());
///
/// let relative: UrlRef = "/api/v1?x=1".parse().unwrap();
/// assert!(relative.is_relative());
/// assert_eq!(
///     relative.resolve(&base).unwrap().as_str(),
///     "https://example.com/api/v1?x=1"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UrlRef {
    /// A URL with a scheme.
    Absolute(Url),
    /// A reference without a scheme, kept as written.
    Relative(String),
}

impl UrlRef {
    /// Parse an absolute URL or a relative reference.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        match Url::parse(input) {
            Ok(url) => Ok(Self::Absolute(url)),
            Err(ParseError::RelativeUrlWithoutBase) => {
                Url::parse(CHECK_BASE)?.join(input)?;
                Ok(Self::Relative(input.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    /// The reference as written (normalized for absolute URLs).
    pub fn as_str(&self) -> &str {
        match self {
            Self::Absolute(url) => url.as_str(),
            Self::Relative(reference) => reference,
        }
    }

    /// The absolute URL, if this is one.
    pub fn as_url(&self) -> Option<&Url> {
        match self {
            Self::Absolute(url) => Some(url),
            Self::Relative(_) => None,
        }
    }

    pub fn is_relative(&self) -> bool {
        matches!(self, Self::Relative(_))
    }

    /// Resolve against `base`. Absolute URLs are returned unchanged.
    pub fn resolve(&self, base: &Url) -> Result<Url, ParseError> {
        match self {
            Self::Absolute(url) => Ok(url.clone()),
            Self::Relative(reference) => base.join(reference),
        }
    }
}

/// The empty relative reference.
impl Default for UrlRef {
    fn default() -> Self {
        Self::Relative(String::new())
    }
}

impl FromStr for UrlRef {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for UrlRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Url> for UrlRef {
    fn from(url: Url) -> Self {
        Self::Absolute(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_absolute() {
        let url = UrlRef::parse("https://example.com:8443/path?q=1").unwrap();
        assert!(!url.is_relative());
        assert_eq!(url.as_url().and_then(Url::port), Some(8443));
    }

    #[test]
    fn test_parse_relative_references() {
        for input in ["/api/v1?x=1", "api/v1", "../up", "?q=1", "#frag", "//cdn.example.com/x"] {
            let url = UrlRef::parse(input).unwrap();
            assert!(url.is_relative(), "{input}");
            assert_eq!(url.as_str(), input);
            assert_eq!(url.to_string(), input);
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(
            UrlRef::parse("http://[::1"),
            Err(ParseError::InvalidIpv6Address)
        );
        assert!(UrlRef::parse("//[::1/x").is_err());
    }

    #[test]
    fn test_resolve() {
        let base = Url::parse("https://example.com/app/").unwrap();
        let relative = UrlRef::parse("v1/items").unwrap();
        assert_eq!(
            relative.resolve(&base).unwrap().as_str(),
            "https://example.com/app/v1/items"
        );

        let absolute = UrlRef::from(Url::parse("https://other.example/").unwrap());
        assert_eq!(absolute.resolve(&base).unwrap().as_str(), "https://other.example/");
    }
}
