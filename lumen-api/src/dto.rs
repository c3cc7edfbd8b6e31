//! Request/response DTOs

use serde::{Deserialize, Serialize};

/// Body of a 200 response from the dynamic content endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct DynamicTextResponse {
    pub text: String,
    pub etag: String,
}

/// `?key=` query for the dynamic content endpoints.
#[derive(Debug, Deserialize)]
pub struct ContentKeyQuery {
    pub key: String,
}

/// `?board=` query shared by editor and device endpoints.
#[derive(Debug, Deserialize)]
pub struct BoardQuery {
    pub board: String,
}

/// One row in the editor's board listing.
#[derive(Debug, Serialize)]
pub struct BoardSummaryResponse {
    pub name: String,
    #[serde(rename = "screenCount")]
    pub screen_count: usize,
}

#[derive(Debug, Serialize)]
pub struct BoardListResponse {
    pub boards: Vec<BoardSummaryResponse>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBoardRequest {
    pub name: String,
}

/// Firmware metadata served to devices checking for updates.
#[derive(Debug, Serialize)]
pub struct FirmwareInfoResponse {
    pub version: String,
    pub size: i64,
    pub hmac: String,
}

/// `?template=` query for resolution previews.
#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub template: String,
}

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub template: String,
    pub resolved: String,
}

/// Filters for Home Assistant entity browsing.
#[derive(Debug, Deserialize)]
pub struct EntityListQuery {
    pub domain: Option<String>,
    pub q: Option<String>,
}
