use serde::Deserialize;
use serde_json::{Map, Value};

use super::domain::RecordId;

/// One form submission as returned by Screendoor.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawResponse {
    pub(crate) id: RecordId,
    #[serde(default)]
    pub(crate) sequential_id: Option<RecordId>,
    #[serde(default)]
    pub(crate) status: Option<String>,
    #[serde(default)]
    pub(crate) labels: Option<Vec<String>>,
    #[serde(default)]
    pub(crate) responses: Option<Map<String, Value>>,
}

/// Address answer. Parts are kept as raw values so a numeric zipcode does not discard
/// the rest of the address.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct AddressAnswer {
    #[serde(default)]
    pub(crate) street: Option<Value>,
    #[serde(default)]
    pub(crate) city: Option<Value>,
    #[serde(default)]
    pub(crate) state: Option<Value>,
    #[serde(default)]
    pub(crate) zipcode: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ChecklistAnswer {
    #[serde(default)]
    pub(crate) checked: Option<Vec<String>>,
}

impl RawResponse {
    fn answer(&self, code: &str) -> Option<&Value> {
        self.responses.as_ref().and_then(|answers| answers.get(code))
    }

    /// Ids of an element that may not parse as a whole response.
    ///
    /// `None` when even the `id` is unreadable; a bad `sequential_id` reads as absent.
    pub(crate) fn identify(item: &Value) -> Option<(RecordId, Option<RecordId>)> {
        let id = item.get("id").and_then(|value| RecordId::deserialize(value).ok())?;
        let sequential_id = item
            .get("sequential_id")
            .and_then(|value| RecordId::deserialize(value).ok());
        Some((id, sequential_id))
    }

    /// Text answer for `code`; numbers are rendered, anything else reads as blank.
    pub(crate) fn text(&self, code: &str) -> String {
        self.answer(code).map(answer_text).unwrap_or_default()
    }

    pub(crate) fn address(&self, code: &str) -> Option<AddressAnswer> {
        self.answer(code)
            .filter(|value| value.is_object())
            .and_then(|value| AddressAnswer::deserialize(value).ok())
    }

    /// Checked entries of a checklist answer, empty when unanswered or malformed.
    pub(crate) fn checked(&self, code: &str) -> Vec<String> {
        self.answer(code)
            .filter(|value| value.is_object())
            .and_then(|value| ChecklistAnswer::deserialize(value).ok())
            .and_then(|answer| answer.checked)
            .unwrap_or_default()
            .into_iter()
            .filter(|entry| !entry.trim().is_empty())
            .collect()
    }

    pub(crate) fn labels(&self) -> &[String] {
        self.labels.as_deref().unwrap_or(&[])
    }
}

fn answer_text(value: &Value) -> String {
    match value {
        Value::String(value) => value.trim().to_string(),
        Value::Number(value) => value.to_string(),
        _ => String::new(),
    }
}

fn part_text(part: &Option<Value>) -> String {
    part.as_ref().map(answer_text).unwrap_or_default()
}

impl AddressAnswer {
    /// `"street, city, state zipcode"` with outer separators trimmed.
    ///
    /// Without a street the whole address is blank, even if city or zip were given.
    pub(crate) fn format(&self) -> String {
        let street = part_text(&self.street);
        if street.is_empty() {
            return String::new();
        }

        let formatted = format!(
            "{}, {}, {} {}",
            street,
            part_text(&self.city),
            part_text(&self.state),
            part_text(&self.zipcode),
        );
        formatted
            .trim_matches(|c: char| c == ' ' || c == ',')
            .to_string()
    }
}
