use std::sync::LazyLock;

use osm_model::SourceKind;
use regex::Regex;

use super::email::ALLOWED_DOMAIN_SUFFIXES;
use super::{Normalized, is_blank, reject};
use crate::ledger::{AuditField, Ledger};

static WEBSITE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(http://)?(https://)?[\w.-]*[\w-]+\.[a-zA-Z]{2,4}(/[\w/.#?=%&,!+()-]*)?$")
        .expect("Invalid website regex")
});

/// Scheme, host and path of a URL-like value.
#[derive(Debug, PartialEq, Eq)]
struct UrlParts<'a> {
    scheme: &'a str,
    host: &'a str,
    path: &'a str,
}

impl UrlParts<'_> {
    fn is_empty(&self) -> bool {
        self.scheme.is_empty() && self.host.is_empty() && self.path.is_empty()
    }
}

/// Splits `scheme://host/path`. Without `//` there is no host and the
/// remainder is all path, so `www.example.com` is a bare path.
fn split_url(value: &str) -> UrlParts<'_> {
    let (scheme, rest) = match value.split_once(':') {
        Some((scheme, rest))
            if !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) =>
        {
            (scheme, rest)
        }
        _ => ("", value),
    };
    match rest.strip_prefix("//") {
        Some(authority) => {
            let end = authority.find(['/', '?', '#']).unwrap_or(authority.len());
            UrlParts {
                scheme,
                host: &authority[..end],
                path: &authority[end..],
            }
        }
        None => UrlParts {
            scheme,
            host: "",
            path: rest,
        },
    }
}

/// Normalizes a `website` or `url` value: lower-cased and kept only if it is
/// a plain http(s) URL on an allowed domain.
pub fn normalize_website(raw: &str, source: SourceKind, ledger: &mut Ledger) -> Normalized {
    if is_blank(raw) {
        return reject(ledger, AuditField::Website, raw, source);
    }

    let website = raw.trim().to_lowercase();

    let valid = !split_url(&website).is_empty()
        && WEBSITE_REGEX.is_match(&website)
        && ALLOWED_DOMAIN_SUFFIXES
            .iter()
            .any(|suffix| website.contains(suffix));
    if !valid {
        return reject(ledger, AuditField::Website, &website, source);
    }

    Normalized::Accepted(website)
}
