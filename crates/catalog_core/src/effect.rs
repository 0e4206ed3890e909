use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one GET against `locator`, tagged with `request_id`.
    Fetch { request_id: RequestId, locator: String },
    /// Abort a superseded request if it is still on the wire.
    CancelFetch { request_id: RequestId },
}
