//! Translation of flat send parameters into the transmissions request body

use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::domain::communication::transmissions::{ApiErrorRecord, SendParameters, SendResult};

/// A successful transmissions response
#[derive(Debug, Deserialize)]
pub(super) struct ResultsEnvelope {
    pub results: SendResult,
}

/// A failed transmissions response
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorsEnvelope {
    #[serde(default)]
    pub errors: Vec<ApiErrorRecord>,
}

/// Build the `POST /transmissions` body from flat send parameters.
pub(super) fn transmission_body(params: &SendParameters) -> Value {
    let mut body = Map::new();
    let mut content = Map::new();
    let mut options = Map::new();

    for (key, value) in params.iter() {
        match key.as_str() {
            "recipients" => {
                body.insert("recipients".into(), recipients(value));
            }
            "from_email" => {
                content.insert("from".into(), value.clone());
            }
            "subject" | "text" | "html" | "reply_to" | "use_draft_template" => {
                content.insert(key.clone(), value.clone());
            }
            "template" => {
                content.insert("template_id".into(), value.clone());
            }
            "substitution_data" | "metadata" | "description" | "return_path" => {
                body.insert(key.clone(), value.clone());
            }
            "campaign" => {
                body.insert("campaign_id".into(), value.clone());
            }
            "track_opens" => {
                options.insert("open_tracking".into(), value.clone());
            }
            "track_clicks" => {
                options.insert("click_tracking".into(), value.clone());
            }
            "transactional" | "start_time" => {
                options.insert(key.clone(), value.clone());
            }
            _ => warn!(key = %key, "ignoring unknown transmission parameter"),
        }
    }

    body.insert("content".into(), Value::Object(content));

    if !options.is_empty() {
        body.insert("options".into(), Value::Object(options));
    }

    Value::Object(body)
}

fn recipients(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(recipient).collect()),
        single => Value::Array(vec![recipient(single)]),
    }
}

fn recipient(value: &Value) -> Value {
    match value {
        Value::String(email) => json!({"address": {"email": email}}),
        other => other.clone(),
    }
}
