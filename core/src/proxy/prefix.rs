//! Path prefix matching
//! Validated prefix type with an explicit match-and-strip operation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_PREFIX: &str = "/dev/";

/// Characters the router treats as path parameters or wildcards
const RESERVED: [char; 4] = [':', '*', '{', '}'];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrefixError {
    #[error("path prefix must not be empty")]
    Empty,

    #[error("path prefix {0:?} must start with '/'")]
    MissingLeadingSlash(String),

    #[error("path prefix {0:?} must end with '/'")]
    MissingTrailingSlash(String),

    #[error("path prefix must name at least one segment, not just '/'")]
    Root,

    #[error("path prefix contains reserved character {0:?}")]
    ReservedCharacter(char),
}

/// A URL path prefix such as `/dev/`.
///
/// Always starts and ends with `/`, so the remainder returned by
/// [`PathPrefix::strip`] keeps its leading separator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PathPrefix(String);

impl PathPrefix {
    pub fn new(prefix: impl Into<String>) -> Result<Self, PrefixError> {
        let prefix = prefix.into();

        if prefix.is_empty() {
            return Err(PrefixError::Empty);
        }
        if !prefix.starts_with('/') {
            return Err(PrefixError::MissingLeadingSlash(prefix));
        }
        if !prefix.ends_with('/') {
            return Err(PrefixError::MissingTrailingSlash(prefix));
        }
        // A root prefix would shadow the health routes.
        if prefix == "/" {
            return Err(PrefixError::Root);
        }
        if let Some(c) = prefix.chars().find(|c| RESERVED.contains(c)) {
            return Err(PrefixError::ReservedCharacter(c));
        }

        Ok(Self(prefix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Match `path` against the prefix and return the remainder, starting at
    /// the prefix's trailing `/`.
    ///
    /// `/dev/app.js` stripped of `/dev/` yields `/app.js`; `/dev/` yields `/`;
    /// `/dev` and `/develop` yield `None`.
    pub fn strip<'a>(&self, path: &'a str) -> Option<&'a str> {
        let prefix = self.0.as_bytes();
        if path.len() < prefix.len() || !path.as_bytes().starts_with(prefix) {
            return None;
        }

        // The prefix ends with an ASCII '/', so this index is a char boundary.
        Some(&path[prefix.len() - 1..])
    }

    /// Route patterns covering the bare prefix and everything beneath it
    pub(crate) fn route_patterns(&self) -> [String; 2] {
        [self.0.clone(), format!("{}*rest", self.0)]
    }
}

impl Default for PathPrefix {
    fn default() -> Self {
        Self(DEFAULT_PREFIX.to_string())
    }
}

impl fmt::Display for PathPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PathPrefix {
    type Err = PrefixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for PathPrefix {
    type Error = PrefixError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PathPrefix> for String {
    fn from(prefix: PathPrefix) -> Self {
        prefix.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dev() -> PathPrefix {
        PathPrefix::default()
    }

    #[test]
    fn strip_keeps_leading_separator() {
        assert_eq!(dev().strip("/dev/app.js"), Some("/app.js"));
        assert_eq!(dev().strip("/dev/assets/main.css"), Some("/assets/main.css"));
    }

    #[test]
    fn strip_bare_prefix_yields_root() {
        assert_eq!(dev().strip("/dev/"), Some("/"));
    }

    #[test]
    fn strip_rejects_short_or_mismatched_paths() {
        for path in ["", "/", "/de", "/dev", "/devx/a.js", "/develop", "/api/dev/a.js", "dev/a.js", "/DEV/a.js"] {
            assert_eq!(dev().strip(path), None, "path {:?} should not match", path);
        }
    }

    #[test]
    fn strip_handles_multibyte_remainder() {
        assert_eq!(dev().strip("/dev/ü.js"), Some("/ü.js"));
        assert_eq!(dev().strip("/dëv/a.js"), None);
    }

    #[test]
    fn root_prefix_is_rejected() {
        assert_eq!(PathPrefix::new("/"), Err(PrefixError::Root));
        assert!("/".parse::<PathPrefix>().is_err());
    }

    #[test]
    fn new_validates_shape() {
        assert_eq!(PathPrefix::new(""), Err(PrefixError::Empty));
        assert_eq!(
            PathPrefix::new("dev/"),
            Err(PrefixError::MissingLeadingSlash("dev/".to_string()))
        );
        assert_eq!(
            PathPrefix::new("/dev"),
            Err(PrefixError::MissingTrailingSlash("/dev".to_string()))
        );
        assert_eq!(PathPrefix::new("/:id/"), Err(PrefixError::ReservedCharacter(':')));
        assert_eq!(PathPrefix::new("/a/*/"), Err(PrefixError::ReservedCharacter('*')));
        assert!(PathPrefix::new("/static/dev/").is_ok());
    }

    #[test]
    fn route_patterns_cover_prefix_and_tail() {
        assert_eq!(
            dev().route_patterns(),
            ["/dev/".to_string(), "/dev/*rest".to_string()]
        );
    }

    #[test]
    fn deserializes_through_validation() {
        #[derive(Deserialize)]
        struct Wrapper {
            prefix: PathPrefix,
        }

        let ok: Wrapper = toml::from_str(r#"prefix = "/vite/""#).unwrap();
        assert_eq!(ok.prefix.as_str(), "/vite/");

        assert!(toml::from_str::<Wrapper>(r#"prefix = "/vite""#).is_err());
    }
}
