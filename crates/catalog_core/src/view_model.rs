use crate::ResultItem;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogViewModel {
    pub cards: Vec<CardView>,
    pub error_message: Option<String>,
    /// Only true while the cursor has a next page.
    pub load_more_enabled: bool,
    pub fetching: bool,
    pub shown: usize,
    pub total: Option<u64>,
    pub query: Option<String>,
    pub current_locator: String,
    pub selected: Option<CardView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: u64,
    pub name: String,
    pub image_url: String,
    pub detail_path: String,
}

impl CardView {
    pub(crate) fn from_item(item: &ResultItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            image_url: item.image_url.clone(),
            detail_path: format!("/character/{}", item.id),
        }
    }
}
