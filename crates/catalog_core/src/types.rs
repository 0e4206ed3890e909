pub type RequestId = u64;

/// Shown when the upstream API has no matches for a query.
pub const NOT_FOUND_MESSAGE: &str = "Sorry no results.";
/// Shown when a fetch fails for any reason other than "no matches".
pub const TRANSPORT_ERROR_MESSAGE: &str = "Something went wrong, please try again.";

/// One catalog entry. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultItem {
    pub id: u64,
    pub name: String,
    pub image_url: String,
}

/// The single live pagination cursor. `next == None` marks the end of the collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageCursor {
    pub next: Option<String>,
    pub current: String,
}

/// A successfully decoded page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageData {
    pub items: Vec<ResultItem>,
    pub next: Option<String>,
    pub prev: Option<String>,
    pub count: Option<u64>,
}

impl PageData {
    /// A page with no `prev` link starts a new lineage.
    pub fn is_first_page(&self) -> bool {
        self.prev.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success(PageData),
    NotFound,
    TransportError(String),
}
