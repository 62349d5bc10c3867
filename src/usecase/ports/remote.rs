use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::i18n::Translator;

pub type QueryParams = [(&'static str, String)];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network failure or timeout before a response arrived.
    Transport(String),
    /// Non-2xx status; `error` holds the body's structured message if any.
    Status { status: u16, error: Option<String> },
    /// The server answered with `success: false`.
    Domain(String),
    /// The body could not be decoded into the expected shape.
    Decode(String),
    UnknownChart(String),
}

impl FetchError {
    /// Text suitable for an inline error panel. Server-provided messages are
    /// shown verbatim; everything else is localized.
    pub fn user_message(&self, t: &Translator) -> String {
        match self {
            FetchError::Transport(_) => {
                t.t_or("error_connection", "Could not connect to the server.")
            }
            FetchError::Status {
                error: Some(message),
                ..
            } => message.clone(),
            FetchError::Status { error: None, .. } => {
                t.t_or("error_connection", "Could not connect to the server.")
            }
            FetchError::Domain(message) => message.clone(),
            FetchError::Decode(_) => t.t_or(
                "error_bad_response",
                "The server returned an invalid response.",
            ),
            FetchError::UnknownChart(_) => t.t_or("chart_unknown_chart", "Unknown chart."),
        }
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Transport(message) => write!(f, "transport error: {message}"),
            FetchError::Status {
                status,
                error: Some(message),
            } => write!(f, "http {status}: {message}"),
            FetchError::Status {
                status,
                error: None,
            } => write!(f, "http {status}"),
            FetchError::Domain(message) => write!(f, "server error: {message}"),
            FetchError::Decode(message) => write!(f, "bad response: {message}"),
            FetchError::UnknownChart(id) => write!(f, "unknown chart: {id}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// The `{success, result, error}` wrapper every JSON endpoint answers with.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Like [`Envelope::into_result`] but accepts a successful envelope with a
    /// null or missing `result`.
    pub fn into_optional(self) -> Result<Option<T>, FetchError> {
        match (self.success, self.error) {
            (true, _) => Ok(self.result),
            (false, Some(message)) => Err(FetchError::Domain(message)),
            (false, None) => Err(FetchError::Decode(
                "unsuccessful response without an error message".to_string(),
            )),
        }
    }

    pub fn into_result(self) -> Result<T, FetchError> {
        self.into_optional()?
            .ok_or_else(|| FetchError::Decode("missing result".to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Binary {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Read-only access to the dashboard backend.
#[allow(async_fn_in_trait)]
pub trait RemoteClient {
    async fn get_envelope<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<Envelope<T>, FetchError>;

    /// Rendered artifacts (chart images). These use the longer render timeout.
    async fn get_binary(&self, path: &str, params: &QueryParams) -> Result<Binary, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;

    #[test]
    fn failed_envelope_keeps_server_message() {
        let envelope: Envelope<u32> =
            serde_json::from_str(r#"{"success":false,"error":"Kolumna nie istnieje"}"#)
                .expect("envelope should deserialize");

        assert_eq!(
            envelope.into_result(),
            Err(FetchError::Domain("Kolumna nie istnieje".to_string()))
        );
    }

    #[test]
    fn successful_envelope_without_result_is_a_decode_error() {
        let envelope: Envelope<u32> =
            serde_json::from_str(r#"{"success":true}"#).expect("envelope should deserialize");

        assert!(matches!(envelope.into_result(), Err(FetchError::Decode(_))));
    }

    #[test]
    fn status_error_prefers_structured_message() {
        let t = Translator::new(Language::En);
        let structured = FetchError::Status {
            status: 400,
            error: Some("Invalid mode".to_string()),
        };
        let bare = FetchError::Status {
            status: 502,
            error: None,
        };

        assert_eq!(structured.user_message(&t), "Invalid mode");
        assert_eq!(bare.user_message(&t), t.t("error_connection", None));
    }
}
