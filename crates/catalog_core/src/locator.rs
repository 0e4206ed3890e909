use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api/";

const CHARACTER_PATH: &str = "character/";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocatorError {
    #[error("invalid base url {input:?}: {reason}")]
    InvalidBase { input: String, reason: String },
    #[error("unsupported scheme {0:?}, expected http or https")]
    UnsupportedScheme(String),
}

/// Builds locators against the upstream character collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEndpoint {
    collection: Url,
}

impl CatalogEndpoint {
    pub fn new(base_url: &str) -> Result<Self, LocatorError> {
        let invalid = |reason: String| LocatorError::InvalidBase {
            input: base_url.to_string(),
            reason,
        };

        let mut base = Url::parse(base_url.trim()).map_err(|err| invalid(err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("not a hierarchical url".to_string()));
        }
        if !matches!(base.scheme(), "http" | "https") {
            return Err(LocatorError::UnsupportedScheme(base.scheme().to_string()));
        }
        // Without a trailing slash `join` would replace the last segment.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.set_query(None);
        base.set_fragment(None);

        let collection = base
            .join(CHARACTER_PATH)
            .map_err(|err| invalid(err.to_string()))?;
        Ok(Self { collection })
    }

    /// Locator of the unfiltered first page.
    pub fn default_locator(&self) -> String {
        self.collection.to_string()
    }

    /// Locator of the first page of a name search. An empty `text` matches everything.
    pub fn search_locator(&self, text: &str) -> String {
        let mut url = self.collection.clone();
        url.query_pairs_mut().append_pair("name", text);
        url.to_string()
    }
}
