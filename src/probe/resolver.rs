use std::sync::Arc;

use reqwest::Method;

use crate::catalogue::{PayloadTemplate, PATH_PLACEHOLDER, URL_PLACEHOLDER};
use crate::target::Target;

/// A catalogue entry bound to one target, ready to send.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    pub index: usize,
    pub target: Arc<Target>,
    pub method: Method,
    pub headers: Vec<(String, String)>,
}

/// Substitute `%URL%` and `%PATH%` in every header value of `template` for `target`.
///
/// Replacement is literal; values are not URL-encoded.
pub fn resolve(index: usize, template: &PayloadTemplate, target: &Arc<Target>) -> ProbeRequest {
    let headers = template
        .headers()
        .iter()
        .map(|(name, value)| (name.to_string(), substitute(value, target)))
        .collect();

    ProbeRequest {
        index,
        target: Arc::clone(target),
        method: template.method(),
        headers,
    }
}

fn substitute(value: &str, target: &Target) -> String {
    value
        .replace(URL_PLACEHOLDER, &target.origin)
        .replace(PATH_PLACEHOLDER, &target.path)
}
