use crate::{FetchOutcome, PageCursor, RequestId, ResultItem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Seed the view from the render-time fetch. Issues no request.
    Initialize {
        results: Vec<ResultItem>,
        cursor: PageCursor,
        count: Option<u64>,
    },
    /// The render-time fetch failed; the view starts empty with an error line.
    BootstrapFailed { locator: String, not_found: bool },
    /// User asked for the next page of the current listing.
    LoadMoreClicked,
    /// User submitted the search form.
    SearchSubmitted(String),
    /// Engine completion for a request.
    FetchCompleted {
        request_id: RequestId,
        locator: String,
        outcome: FetchOutcome,
    },
    /// Engine aborted a superseded request.
    FetchCancelled { request_id: RequestId },
    /// User opened the detail view of a card.
    CardSelected { id: u64 },
    /// Fallback for placeholder wiring.
    NoOp,
}
