use anyhow::{anyhow, bail, Context, Result};
use url::Url;

/// One URL under test, split into the parts the payload placeholders refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub raw: String,
    pub url: Url,
    /// `scheme://host[:port]`
    pub origin: String,
    /// Never empty, `/` at minimum.
    pub path: String,
}

impl Target {
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let url = Url::parse(raw).with_context(|| format!("invalid URL '{}'", raw))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("URL '{}' has unsupported scheme '{}'", raw, url.scheme());
        }
        let host = url
            .host_str()
            .ok_or_else(|| anyhow!("URL '{}' has no host", raw))?;

        let origin = match url.port() {
            Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
            None => format!("{}://{}", url.scheme(), host),
        };
        let path = match url.path() {
            "" => "/".to_string(),
            p => p.to_string(),
        };

        Ok(Self {
            raw: raw.to_string(),
            url,
            origin,
            path,
        })
    }

    /// Origin plus path, as shown in result lines.
    pub fn display_url(&self) -> String {
        format!("{}{}", self.origin, self.path)
    }
}
