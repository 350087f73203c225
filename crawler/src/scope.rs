use url::Url;

/// Decides which URLs belong to the crawled site: same scheme, host and port
/// as the seed, with a path under the seed's directory.
#[derive(Debug, Clone)]
pub struct Scope {
    scheme: String,
    host: Option<String>,
    port: Option<u16>,
    prefix: String,
}

impl Scope {
    pub fn from_seed(seed: &Url) -> Self {
        let path = seed.path();
        let prefix = match path.rfind('/') {
            Some(i) => path[..=i].to_string(),
            None => "/".to_string(),
        };
        Self {
            scheme: seed.scheme().to_string(),
            host: seed.host_str().map(str::to_string),
            port: seed.port_or_known_default(),
            prefix,
        }
    }

    pub fn is_internal(&self, url: &str) -> bool {
        let Ok(u) = Url::parse(url) else { return false };
        u.scheme() == self.scheme
            && u.host_str() == self.host.as_deref()
            && u.port_or_known_default() == self.port
            && u.path().starts_with(&self.prefix)
    }
}
