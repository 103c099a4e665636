pub mod excuse;
pub mod feedback;
pub mod history;
pub mod proof;
pub mod settings;
pub mod speech;
pub mod storage;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::app_state::AppState;
use crate::models::Settings;

/// One invoke request from the front-end: `{"cmd": "...", "args": {...}}`.
#[derive(Debug, Deserialize)]
pub struct Invoke {
    pub cmd: String,
    #[serde(default)]
    pub args: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InvokeResponse {
    Ok(Value),
    Error(String),
}

impl From<Result<Value, String>> for InvokeResponse {
    fn from(result: Result<Value, String>) -> Self {
        match result {
            Ok(value) => InvokeResponse::Ok(value),
            Err(message) => InvokeResponse::Error(message),
        }
    }
}

#[derive(Deserialize)]
struct ExcuseArgs {
    #[serde(default)]
    scenario: String,
    #[serde(default)]
    urgency: String,
    custom_excuse: Option<String>,
}

#[derive(Deserialize)]
struct ProofArgs {
    excuse: String,
    proof_type: String,
    patient_name: Option<String>,
}

#[derive(Deserialize)]
struct ToneArgs {
    #[serde(default)]
    tone: String,
}

#[derive(Deserialize)]
struct SpeechArgs {
    text: String,
    lang: Option<String>,
}

#[derive(Deserialize)]
struct RatingArgs {
    excuse: String,
    rating: u8,
}

#[derive(Deserialize)]
struct ExcuseTextArgs {
    excuse: String,
}

#[derive(Deserialize)]
struct SettingsArgs {
    settings: Settings,
}

fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, String> {
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|e| format!("invalid arguments: {}", e))
}

fn to_value<T: Serialize>(value: T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

/// Route an invoke request to its command handler.
pub async fn dispatch(state: &AppState, invoke: Invoke) -> Result<Value, String> {
    let Invoke { cmd, args } = invoke;
    match cmd.as_str() {
        // Excuse commands
        "generate_excuse" => {
            let a: ExcuseArgs = parse_args(args)?;
            to_value(excuse::generate_excuse(state, a.scenario, a.urgency, a.custom_excuse).await?)
        }
        "generate_apology" => {
            let a: ToneArgs = parse_args(args)?;
            to_value(excuse::generate_apology(state, a.tone).await?)
        }
        // Proof and speech commands
        "generate_proof" => {
            let a: ProofArgs = parse_args(args)?;
            to_value(proof::generate_proof(state, a.excuse, a.proof_type, a.patient_name).await?)
        }
        "generate_speech" => {
            let a: SpeechArgs = parse_args(args)?;
            to_value(speech::generate_speech(state, a.text, a.lang).await?)
        }
        // Feedback commands
        "rate_excuse" => {
            let a: RatingArgs = parse_args(args)?;
            to_value(feedback::rate_excuse(state, a.excuse, a.rating).await?)
        }
        "get_average_rating" => {
            let a: ExcuseTextArgs = parse_args(args)?;
            to_value(feedback::get_average_rating(state, a.excuse).await?)
        }
        "save_to_favorites" => {
            let a: ExcuseTextArgs = parse_args(args)?;
            to_value(feedback::save_to_favorites(state, a.excuse).await?)
        }
        "get_favorites" => to_value(feedback::get_favorites(state).await?),
        // History commands
        "get_history" => to_value(history::get_history(state).await?),
        "auto_schedule" => to_value(history::auto_schedule(state).await?),
        "get_session_stats" => to_value(history::get_session_stats(state).await?),
        // Storage commands
        "get_storage_stats" => to_value(storage::get_storage_stats(state).await?),
        "cleanup_temp_files" => to_value(storage::cleanup_temp_files(state).await?),
        "export_history" => to_value(storage::export_history(state).await?),
        // Settings commands
        "get_settings" => to_value(settings::get_settings(state).await?),
        "update_settings" => {
            let a: SettingsArgs = parse_args(args)?;
            to_value(settings::update_settings(state, a.settings).await?)
        }
        other => Err(format!("unknown command '{}'", other)),
    }
}

/// Parse one request line, run it, and render the response line.
pub async fn handle_line(state: &AppState, line: &str) -> String {
    let result = match serde_json::from_str::<Invoke>(line) {
        Ok(invoke) => dispatch(state, invoke).await,
        Err(e) => Err(format!("malformed request: {}", e)),
    };
    let response = InvokeResponse::from(result);
    serde_json::to_string(&response)
        .unwrap_or_else(|e| format!(r#"{{"error":"failed to encode response: {}"}}"#, e))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::path::Path;

    use crate::services::generator::tests::generator_in;

    pub(crate) fn test_state(dir: &Path) -> AppState {
        let mut settings = Settings::default();
        settings.output.directory = dir.join("artifacts");
        let mut generator = generator_in(&settings.output.directory, 11);
        generator.apply_settings(&settings);
        AppState::new(generator, settings, dir.join("config").join("settings.json"))
    }

    #[tokio::test]
    async fn dispatch_generates_excuse_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let line = r#"{"cmd":"generate_excuse","args":{"scenario":"work","urgency":"low","custom_excuse":"Flat tyre"}}"#;
        let response: Value = serde_json::from_str(&handle_line(&state, line).await).unwrap();
        assert_eq!(response["ok"], "Just a heads-up: Flat tyre");
    }

    #[tokio::test]
    async fn missing_args_use_lenient_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let response: Value =
            serde_json::from_str(&handle_line(&state, r#"{"cmd":"generate_excuse"}"#).await).unwrap();
        assert!(response["ok"].is_string());
        let history = state.generator().unwrap().view_history().to_vec();
        assert_eq!(history[0].scenario, crate::models::Scenario::Social);
    }

    #[tokio::test]
    async fn unknown_command_is_an_error_response() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let response: Value =
            serde_json::from_str(&handle_line(&state, r#"{"cmd":"teleport"}"#).await).unwrap();
        assert_eq!(response["error"], "unknown command 'teleport'");
    }

    #[tokio::test]
    async fn malformed_line_is_an_error_response() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let response: Value = serde_json::from_str(&handle_line(&state, "not json").await).unwrap();
        assert!(response["error"].as_str().unwrap().starts_with("malformed request"));
    }

    #[tokio::test]
    async fn bad_argument_types_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let line = r#"{"cmd":"rate_excuse","args":{"excuse":"X","rating":"five"}}"#;
        let response: Value = serde_json::from_str(&handle_line(&state, line).await).unwrap();
        assert!(response["error"].as_str().unwrap().starts_with("invalid arguments"));
    }
}
