use serde::Serialize;

/// The `{ "data": T }` envelope every successful response is wrapped in.
/// Error responses use the `{ "error", "code" }` shape from `error.rs`
/// instead.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
