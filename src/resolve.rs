//! Target URL validation and deployment-path resolution.
//!
//! A published Blazor WebAssembly app declares its deployment root in the
//! entry page's `<base href>` element. [`Target`] captures the scheme,
//! authority, and that base path once, then composes the boot manifest and
//! per-resource URLs from them without further I/O.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use crate::error::BlazorgrabError;

/// Directory under the base path that holds the runtime and assemblies.
const FRAMEWORK_DIR: &str = "_framework/";

/// Fixed name of the boot manifest inside the framework directory.
const BOOT_MANIFEST: &str = "blazor.boot.json";

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(www\.)?[-a-zA-Z0-9@:%._+~#=]{2,256}\.[a-z]{2,6}\b[-a-zA-Z0-9@:%_+.~#?&/=]*$")
        .unwrap()
});

/// Syntactic check for an absolute http(s) URL with a dot-separated host.
///
/// Rejects non-HTTP schemes, bare hostnames, and anything with characters
/// outside the conventional URL set. Purely textual; does not resolve or
/// connect.
pub fn is_valid_url(input: &str) -> bool {
    URL_PATTERN.is_match(input)
}

/// Validate and parse the user-supplied entry page URL.
pub fn parse_target_url(input: &str) -> Result<Url, BlazorgrabError> {
    if !is_valid_url(input) {
        return Err(BlazorgrabError::InvalidUrl {
            url: input.to_string(),
        });
    }
    Url::parse(input).map_err(|_| BlazorgrabError::InvalidUrl {
        url: input.to_string(),
    })
}

/// Resolved deployment location of the target app. Immutable after resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    scheme: String,
    authority: String,
    base_path: String,
}

impl Target {
    /// Derive the target from the entry URL and the entry page HTML.
    ///
    /// A missing `<base href>` declaration is an error unless
    /// `assume_root_base` substitutes the root path `/`.
    pub fn resolve(
        entry_url: &Url,
        entry_html: &str,
        assume_root_base: bool,
    ) -> Result<Target, BlazorgrabError> {
        let base_path = match base_path_from_html(entry_html) {
            Some(href) => normalize_base_path(&href),
            None if assume_root_base => "/".to_string(),
            None => {
                return Err(BlazorgrabError::BasePathMissing {
                    url: entry_url.to_string(),
                })
            }
        };

        let authority = match (entry_url.host_str(), entry_url.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => String::new(),
        };

        Ok(Target {
            scheme: entry_url.scheme().to_string(),
            authority,
            base_path,
        })
    }

    /// The resolved base path; always starts and ends with `/`.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// `scheme://authority{base_path}`, the root the downloader works under.
    pub fn resource_base_url(&self) -> String {
        format!("{}://{}{}", self.scheme, self.authority, self.base_path)
    }

    /// Absolute URL of the boot manifest.
    pub fn manifest_url(&self) -> String {
        format!("{}{}{}", self.resource_base_url(), FRAMEWORK_DIR, BOOT_MANIFEST)
    }

    /// Absolute URL of one framework resource.
    pub fn resource_url(&self, name: &str) -> String {
        format!("{}{}{}", self.resource_base_url(), FRAMEWORK_DIR, name)
    }
}

/// The `href` of the entry page's first `<base>` element, if any.
fn base_path_from_html(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("base").ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("href"))
        .map(str::to_string)
}

/// Coerce an href into a path that starts and ends with `/`.
///
/// An href that is itself an absolute URL contributes only its path
/// component.
fn normalize_base_path(href: &str) -> String {
    let path = match Url::parse(href) {
        Ok(absolute) => absolute.path().to_string(),
        Err(_) => href.to_string(),
    };

    let mut path = if path.starts_with('/') {
        path
    } else {
        format!("/{path}")
    };
    if !path.ends_with('/') {
        path.push('/');
    }
    path
}
