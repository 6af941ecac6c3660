//! Locator parsing
//!
//! A locator is one of:
//! - `-` or `stdin`: read standard input
//! - a bare path: a local file, made absolute against the working directory
//! - `scheme[+format]://[host][/path][?query]` where the optional `+format`
//!   suffix forces the decode format and bypasses detection

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use laminate_core::error::LaminateError;
use laminate_core::types::Format;
use laminate_core::utils::absolute_path;
use url::Url;

use crate::backend::Address;
use crate::SourceResult;

/// URI schemes with a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    File,
    Http,
    Https,
    S3,
    AppConfig,
    Vault,
    Consul,
}

impl Scheme {
    /// Scheme name as written in a locator
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::File => "file",
            Scheme::Http => "http",
            Scheme::Https => "https",
            Scheme::S3 => "s3",
            Scheme::AppConfig => "appconfig",
            Scheme::Vault => "vault",
            Scheme::Consul => "consul",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = LaminateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(Scheme::File),
            "http" => Ok(Scheme::Http),
            "https" => Ok(Scheme::Https),
            "s3" => Ok(Scheme::S3),
            "appconfig" => Ok(Scheme::AppConfig),
            "vault" => Ok(Scheme::Vault),
            "consul" => Ok(Scheme::Consul),
            other => Err(LaminateError::UnsupportedScheme {
                scheme: other.to_string(),
            }),
        }
    }
}

/// A parsed locator
#[derive(Debug, Clone, PartialEq)]
pub enum Locator {
    /// Standard input (`-` or `stdin`)
    Stdin,
    /// A URI served by a backend
    Uri {
        /// The locator as given by the caller
        raw: String,
        scheme: Scheme,
        /// Format forced by a `scheme+format` prefix
        format_hint: Option<Format>,
        /// The URI with any format suffix stripped from its scheme
        url: Url,
    },
}

impl Locator {
    /// Parse a locator string
    pub fn parse(raw: &str) -> SourceResult<Locator> {
        if raw == "-" || raw == "stdin" {
            return Ok(Locator::Stdin);
        }

        let uri = if raw.contains("://") {
            raw.to_string()
        } else {
            file_uri(raw)?
        };

        // `://` is guaranteed present at this point
        let (scheme_part, rest) = uri.split_once("://").ok_or_else(|| LaminateError::LocatorParse {
            locator: raw.to_string(),
            message: "missing '://' separator".to_string(),
        })?;

        let scheme_part = scheme_part.to_ascii_lowercase();
        let (scheme_name, format_hint) = match scheme_part.split_once('+') {
            Some((scheme, hint)) => (scheme, Some(hint.parse::<Format>()?)),
            None => (scheme_part.as_str(), None),
        };

        let url = Url::parse(&format!("{}://{}", scheme_name, rest)).map_err(|e| {
            LaminateError::LocatorParse {
                locator: raw.to_string(),
                message: e.to_string(),
            }
        })?;
        let scheme = scheme_name.parse::<Scheme>()?;

        Ok(Locator::Uri {
            raw: raw.to_string(),
            scheme,
            format_hint,
            url,
        })
    }

    /// Format forced by the locator, if any
    pub fn format_hint(&self) -> Option<Format> {
        match self {
            Locator::Stdin => None,
            Locator::Uri { format_hint, .. } => *format_hint,
        }
    }

    /// URI path, used for extension-based format detection
    pub fn path(&self) -> Option<&str> {
        match self {
            Locator::Stdin => None,
            Locator::Uri { url, .. } => Some(url.path()).filter(|p| !p.is_empty()),
        }
    }

    /// Backend address for URI locators
    pub fn address(&self) -> Option<Address> {
        match self {
            Locator::Stdin => None,
            Locator::Uri { raw, scheme, url, .. } => Some(Address::new(raw.clone(), *scheme, url.clone())),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Stdin => f.write_str("-"),
            Locator::Uri { raw, .. } => f.write_str(raw),
        }
    }
}

/// Build an absolute `file://` URI from a bare path
fn file_uri(raw: &str) -> SourceResult<String> {
    let path = absolute_path(Path::new(raw))?;
    Url::from_file_path(&path)
        .map(String::from)
        .map_err(|()| LaminateError::LocatorParse {
            locator: raw.to_string(),
            message: format!("cannot express {} as a file URI", path.display()),
        })
}
