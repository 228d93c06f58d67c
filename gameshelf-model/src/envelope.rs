use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode a response body that may or may not be wrapped in `{ "data": ... }`.
///
/// List and detail endpoints always wrap; create and update have been seen
/// returning the bare document.
pub fn decode_payload<T: DeserializeOwned>(body: Value) -> serde_json::Result<T> {
    match body {
        Value::Object(mut map) if map.contains_key("data") => {
            let data = map.remove("data").unwrap_or(Value::Null);
            serde_json::from_value(data)
        }
        other => serde_json::from_value(other),
    }
}

/// Pull a human-readable message out of an error body, if there is one.
pub fn error_message(body: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Game;
    use serde_json::json;

    #[test]
    fn unwraps_data_envelope() {
        let games: Vec<Game> =
            decode_payload(json!({ "success": true, "data": [{ "_id": "1" }] })).unwrap();
        assert_eq!(games.len(), 1);
    }

    #[test]
    fn accepts_bare_document() {
        let game: Game = decode_payload(json!({ "_id": "7", "title": "Celeste" })).unwrap();
        assert_eq!(game.title, "Celeste");
    }

    #[test]
    fn finds_backend_message() {
        let body = json!({ "message": "title is required" });
        assert_eq!(error_message(&body).as_deref(), Some("title is required"));
        assert_eq!(error_message(&json!({})), None);
    }
}
