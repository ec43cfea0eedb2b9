pub mod types;

pub use types::{Action, AppEvent, LookupKind, LookupResult, Request, Response};
