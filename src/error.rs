use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no translation for `{key}`{}", in_key(.context))]
    MissingTranslation { key: String, context: Option<String> },

    #[error("line `{line}` not correct for key `{key}`")]
    MalformedHeaderData { key: String, line: String },

    #[error("layout data error in page `{page}`: {message}")]
    LayoutData { page: String, message: String },

    #[error("type `{tag}` is not a known sheet type")]
    UnsupportedVariant { tag: String },

    #[error("data key `{field}` is empty in page `{page}`")]
    MissingField { page: String, field: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("font error: {0}")]
    Font(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn in_key(context: &Option<String>) -> String {
    context
        .as_deref()
        .map(|c| format!(" in key `{c}`"))
        .unwrap_or_default()
}

impl Error {
    pub(crate) fn layout(page: &str, message: impl Into<String>) -> Self {
        Error::LayoutData {
            page: page.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn missing_field(page: &str, field: &str) -> Self {
        Error::MissingField {
            page: page.to_string(),
            field: field.to_string(),
        }
    }
}
