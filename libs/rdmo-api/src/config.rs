/// Localized strings used when rendering values.
///
/// Translation itself happens outside this crate. The host passes in
/// the strings for the active language.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Labels {
    /// Display of a boolean value stored as `"1"`.
    #[serde(default = "default_yes")]
    pub yes: String,
    /// Display of any other boolean value.
    #[serde(default = "default_no")]
    pub no: String,
    /// Set name used when an ancestor has no verbose name.
    #[serde(default = "default_set")]
    pub set: String,
}

fn default_yes() -> String {
    "Yes".to_string()
}

fn default_no() -> String {
    "No".to_string()
}

fn default_set() -> String {
    "Set".to_string()
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            yes: default_yes(),
            no: default_no(),
            set: default_set(),
        }
    }
}

/// Everything a value needs to build its template view.
#[derive(Debug, Clone, Copy)]
pub struct DisplayContext<'a> {
    pub labels: &'a Labels,
    /// URL template for uploaded files, `{id}` is replaced with the value id.
    pub file_url: &'a str,
}

pub const DEFAULT_FILE_URL: &str = "/api/v1/projects/values/{id}/file/";

impl DisplayContext<'_> {
    pub fn file_url_for(&self, id: i64) -> String {
        self.file_url.replace("{id}", &id.to_string())
    }
}
