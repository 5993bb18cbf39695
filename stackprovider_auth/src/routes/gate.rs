//! Session gate decision logic
//!
//! A pure function of the request path, the `callbackUrl` query value and whether a
//! session cookie is present. Nothing here looks at the cookie contents.

use http::HeaderValue;

use super::policy::{RouteClass, RouteConfig, RouteTable};

const CALLBACK_URL_PARAM: &str = "callbackUrl";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Continue,
    Redirect(String),
}

/// Inputs the gate decides on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateRequest<'a> {
    pub path: &'a str,
    pub callback_url: Option<&'a str>,
    pub is_logged_in: bool,
}

impl<'a> GateRequest<'a> {
    pub fn new(path: &'a str, is_logged_in: bool) -> Self {
        Self {
            path,
            callback_url: None,
            is_logged_in,
        }
    }

    pub fn with_callback_url(mut self, callback_url: Option<&'a str>) -> Self {
        self.callback_url = callback_url;
        self
    }
}

/// First `callbackUrl` value in a raw query string, percent-decoded
pub fn callback_url_from_query(query: Option<&str>) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == CALLBACK_URL_PARAM)
        .map(|(_, value)| value.into_owned())
}

/// A callback must be non-empty and valid as a `Location` header value
fn is_usable_callback(url: &str) -> bool {
    !url.is_empty() && HeaderValue::from_str(url).is_ok()
}

#[derive(Debug, Clone)]
pub struct SessionGate {
    table: RouteTable,
    sign_in_path: String,
    home_path: String,
}

impl SessionGate {
    pub fn new(config: &RouteConfig) -> Self {
        Self {
            table: RouteTable::new(config),
            sign_in_path: config.sign_in_path.clone(),
            home_path: config.home_path.clone(),
        }
    }

    pub fn decide(&self, request: &GateRequest<'_>) -> GateDecision {
        match (self.table.classify(request.path), request.is_logged_in) {
            (RouteClass::Public, _) => GateDecision::Continue,
            (RouteClass::AuthOnly, true) => {
                let target = request
                    .callback_url
                    .filter(|url| is_usable_callback(url))
                    .unwrap_or(self.home_path.as_str());
                GateDecision::Redirect(target.to_string())
            }
            (RouteClass::Protected, false) => GateDecision::Redirect(format!(
                "{}?{}={}",
                self.sign_in_path,
                CALLBACK_URL_PARAM,
                urlencoding::encode(request.path)
            )),
            (RouteClass::AuthOnly, false) | (RouteClass::Protected, true) => GateDecision::Continue,
        }
    }
}

impl Default for SessionGate {
    fn default() -> Self {
        Self::new(&RouteConfig::default())
    }
}
