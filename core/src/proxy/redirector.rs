//! Dev server redirector
//! Sends every request under the prefix to the development server with a 308

use std::borrow::Cow;

use axum::{
    extract::State,
    http::{
        header::{CONTENT_TYPE, LOCATION},
        HeaderValue, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
};

use crate::proxy::prefix::PathPrefix;
use crate::proxy::server::AppState;

const JAVASCRIPT: &str = "application/javascript";
const NOT_FOUND_BODY: &str = "404 page not found\n";

/// Outcome of resolving one request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirection {
    NotFound,
    Permanent { location: String },
}

#[derive(Debug, Clone)]
pub struct DevServerRedirector {
    dev_server: String,
    prefix: PathPrefix,
}

impl DevServerRedirector {
    pub fn new(dev_server: impl Into<String>, prefix: PathPrefix) -> Self {
        Self {
            dev_server: dev_server.into(),
            prefix,
        }
    }

    pub fn dev_server(&self) -> &str {
        &self.dev_server
    }

    pub fn prefix(&self) -> &PathPrefix {
        &self.prefix
    }

    /// Decide where `path` goes.
    ///
    /// The location is the base URL followed by the unmodified remainder.
    /// Nothing is normalized, encoded or validated.
    pub fn resolve(&self, path: &str) -> Redirection {
        let Some(rest) = self.prefix.strip(path) else {
            return Redirection::NotFound;
        };

        tracing::info!("rest: {}", sanitize_for_log(rest));

        Redirection::Permanent {
            location: format!("{}{}", self.dev_server, rest),
        }
    }
}

/// Drop line breaks so a path cannot forge extra log lines.
/// Only for logging; redirects use the original text.
pub fn sanitize_for_log(rest: &str) -> Cow<'_, str> {
    if rest.contains(['\n', '\r']) {
        Cow::Owned(rest.chars().filter(|c| !matches!(c, '\n' | '\r')).collect())
    } else {
        Cow::Borrowed(rest)
    }
}

impl IntoResponse for Redirection {
    fn into_response(self) -> Response {
        match self {
            Redirection::NotFound => not_found(),
            Redirection::Permanent { location } => match HeaderValue::try_from(location) {
                Ok(location) => (
                    StatusCode::PERMANENT_REDIRECT,
                    [
                        (CONTENT_TYPE, HeaderValue::from_static(JAVASCRIPT)),
                        (LOCATION, location),
                    ],
                )
                    .into_response(),
                Err(e) => {
                    tracing::error!("Redirect target is not a valid header value: {}", e);
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                }
            },
        }
    }
}

/// Plain-text 404 used for unmatched paths
pub fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        NOT_FOUND_BODY,
    )
        .into_response()
}

/// Handle any request routed under the dev prefix.
/// The path is read as received, so percent-encoding is passed through.
pub async fn handle_dev_request(State(state): State<AppState>, uri: Uri) -> Response {
    state.redirector.resolve(uri.path()).into_response()
}
