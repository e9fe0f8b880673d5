//! HTTP access for ACL documents
//!
//! Datasets talk to servers through the [`HttpClient`] trait so the same
//! apply/fetch code runs against [`ReqwestClient`] or a recording mock.
//! Also parses the `Link` headers servers use to advertise where a
//! resource's ACL lives and which dialect they speak.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Url};
use tracing::debug;

use crate::dataset::AccessControlMode;
use crate::errors::Result;
use crate::vocab::acp;

pub const MEDIA_TYPE_TEXT_TURTLE: &str = "text/turtle";
pub const MEDIA_TYPE_SPARQL_UPDATE: &str = "application/sparql-update";

pub const LINK: &str = "Link";
pub const REL_ACL: &str = "acl";
pub const REL_TYPE: &str = "type";

static LINK_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<([^>]*)>([^<]*)").expect("link pattern is valid"));
static REL_PARAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i);\s*rel\s*=\s*(?:"([^"]*)"|([^;,\s]+))"#).expect("rel pattern is valid")
});

/// Status, headers and body of a completed request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// All values of a header, matched case-insensitively
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Minimal HTTP surface needed to read and write ACL documents
pub trait HttpClient: Send + Sync {
    fn get(&self, uri: &str, accept: &str) -> Result<HttpResponse>;

    fn head(&self, uri: &str) -> Result<HttpResponse>;

    fn put(&self, uri: &str, body: &str, content_type: &str) -> Result<HttpResponse>;

    fn patch(&self, uri: &str, body: &str, content_type: &str) -> Result<HttpResponse>;
}

/// True for 2xx statuses
pub fn is_successful(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Blocking [`HttpClient`] backed by reqwest
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
    auth_token: Option<String>,
}

impl ReqwestClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            auth_token: None,
        }
    }

    /// Send `Authorization: Bearer <token>` with every request
    pub fn with_auth(mut self, token: String) -> Self {
        self.auth_token = Some(token);
        self
    }

    fn send(&self, method: Method, uri: &str, accept: Option<&str>, body: Option<(&str, &str)>) -> Result<HttpResponse> {
        let mut request = self.client.request(method.clone(), uri);
        if let Some(token) = &self.auth_token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(accept) = accept {
            request = request.header(ACCEPT, accept);
        }
        if let Some((body, content_type)) = body {
            request = request.header(CONTENT_TYPE, content_type).body(body.to_string());
        }

        let response = request.send()?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str().to_string(), v.to_string())))
            .collect();
        let body = response.text()?;
        debug!(%method, uri, status, "HTTP request completed");

        Ok(HttpResponse { status, headers, body })
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, uri: &str, accept: &str) -> Result<HttpResponse> {
        self.send(Method::GET, uri, Some(accept), None)
    }

    fn head(&self, uri: &str) -> Result<HttpResponse> {
        self.send(Method::HEAD, uri, None, None)
    }

    fn put(&self, uri: &str, body: &str, content_type: &str) -> Result<HttpResponse> {
        self.send(Method::PUT, uri, None, Some((body, content_type)))
    }

    fn patch(&self, uri: &str, body: &str, content_type: &str) -> Result<HttpResponse> {
        self.send(Method::PATCH, uri, None, Some((body, content_type)))
    }
}

/// `(target, rel values)` for every link in the given `Link` header values
pub fn parse_links<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<(String, Vec<String>)> {
    let mut links = Vec::new();
    for value in values {
        for caps in LINK_VALUE.captures_iter(value) {
            let rels = REL_PARAM
                .captures_iter(&caps[2])
                .filter_map(|rel| rel.get(1).or_else(|| rel.get(2)))
                .flat_map(|rel| rel.as_str().split_whitespace().map(str::to_string).collect::<Vec<_>>())
                .collect();
            links.push((caps[1].to_string(), rels));
        }
    }
    links
}

/// Locate the ACL document advertised in a response's `Link` headers
///
/// Accepts `rel="acl"` and the ACP `accessControl` relation. Relative
/// targets are resolved against `resource_uri`.
pub fn acl_uri_from_links(response: &HttpResponse, resource_uri: &str) -> Option<String> {
    let (target, _) = parse_links(response.header_values(LINK))
        .into_iter()
        .find(|(_, rels)| rels.iter().any(|r| r == REL_ACL || r == acp::ACCESS_CONTROL_PROP.as_str()))?;

    match Url::parse(resource_uri).and_then(|base| base.join(&target)) {
        Ok(url) => Some(url.to_string()),
        Err(_) => Some(target),
    }
}

/// ACP when the server types the resource as an access control resource, WAC otherwise
pub fn mode_from_links(response: &HttpResponse) -> AccessControlMode {
    let is_acp = parse_links(response.header_values(LINK))
        .iter()
        .any(|(target, rels)| target == acp::ACCESS_CONTROL_RESOURCE.as_str() && rels.iter().any(|r| r == REL_TYPE));
    if is_acp {
        AccessControlMode::Acp
    } else {
        AccessControlMode::Wac
    }
}
