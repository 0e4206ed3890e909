//! Catalog core: pure state machine and view-model helpers.
mod effect;
mod locator;
mod msg;
mod state;
mod types;
mod update;
mod view_model;

pub use effect::Effect;
pub use locator::{CatalogEndpoint, LocatorError, DEFAULT_BASE_URL};
pub use msg::Msg;
pub use state::{CatalogState, FetchStatus};
pub use types::{
    FetchOutcome, PageCursor, PageData, RequestId, ResultItem, NOT_FOUND_MESSAGE,
    TRANSPORT_ERROR_MESSAGE,
};
pub use update::update;
pub use view_model::{CardView, CatalogViewModel};
