#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
pub struct SpreadsheetConfig {
    pub spreadsheet_id: Box<str>,
    /// Service account key or OAuth client secret, as downloaded from the
    /// Google Cloud console.
    pub credentials: Box<str>,
    /// Where the OAuth installed flow keeps its tokens between runs.
    pub token_cache: Box<str>,
}
