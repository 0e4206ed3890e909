//! Catalog engine: HTTP fetching and effect execution.
mod decode;
mod engine;
mod fetch;
mod types;

pub use decode::{decode_page, DecodeError};
pub use engine::{EngineError, EngineEvents, EngineHandle};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use types::{
    Character, CharacterPage, EngineEvent, FailureKind, FetchError, PageInfo, RequestId,
};
