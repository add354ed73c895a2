use crate::dns_query::DnsQuery;
use std::fmt;
use std::sync::Arc;

/// Accept header sent to providers that don't declare their own headers.
pub const DNS_JSON_CONTENT_TYPE: &str = "application/dns-json";

const NAME_PLACEHOLDER: &str = "{name}";
const TYPE_PLACEHOLDER: &str = "{type}";

/// One DoH endpoint the checker fans out to.
///
/// The URL is a template: `{name}` is replaced by the percent-encoded
/// hostname and `{type}` by the record type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    pub id: Arc<str>,
    pub name: Arc<str>,
    url_template: Arc<str>,
    headers: Vec<(Arc<str>, Arc<str>)>,
}

impl Provider {
    pub fn new(
        id: impl Into<Arc<str>>,
        name: impl Into<Arc<str>>,
        url_template: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url_template: url_template.into(),
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<Arc<str>>, value: impl Into<Arc<str>>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn google() -> Self {
        Self::new(
            "google",
            "Google (8.8.8.8)",
            "https://dns.google/resolve?name={name}&type={type}",
        )
    }

    pub fn cloudflare() -> Self {
        Self::new(
            "cloudflare",
            "Cloudflare (1.1.1.1)",
            "https://cloudflare-dns.com/dns-query?name={name}&type={type}",
        )
        .with_header("accept", DNS_JSON_CONTENT_TYPE)
    }

    /// The built-in provider set: Google, then Cloudflare.
    pub fn defaults() -> Vec<Provider> {
        vec![Self::google(), Self::cloudflare()]
    }

    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    pub fn build_url(&self, query: &DnsQuery) -> String {
        self.url_template
            .replace(NAME_PLACEHOLDER, &urlencoding::encode(&query.domain))
            .replace(TYPE_PLACEHOLDER, query.record_type.as_str())
    }

    /// Headers to send with a request. Providers without explicit headers
    /// still ask for the JSON flavour of DoH.
    pub fn request_headers(&self) -> Vec<(&str, &str)> {
        if self.headers.is_empty() {
            return vec![("accept", DNS_JSON_CONTENT_TYPE)];
        }
        self.headers
            .iter()
            .map(|(k, v)| (k.as_ref(), v.as_ref()))
            .collect()
    }

    pub fn template_is_valid(template: &str) -> bool {
        (template.starts_with("https://") || template.starts_with("http://"))
            && template.contains(NAME_PLACEHOLDER)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
