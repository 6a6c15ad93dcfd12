use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// 超過這個範圍的整數在 JSON 數字中無法精確表示
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

pub const PREDICTED_DEMAND_KEY: &str = "PredictedDemand";
pub const EOQ_KEY: &str = "EOQ";
pub const ROL_KEY: &str = "ROL";

/// Raw form fields in document order, as a form submission yields them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    entries: Vec<(String, String)>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later values for an existing name replace the earlier one in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn extend_from(&mut self, other: &FormFields) {
        for (name, value) in other.iter() {
            self.insert(name, value);
        }
    }

    pub fn to_payload(&self) -> Payload {
        let map = self
            .iter()
            .map(|(name, value)| (name.to_string(), coerce_value(value)))
            .collect();
        Payload(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = FormFields::new();
        for (name, value) in iter {
            fields.insert(name, value);
        }
        fields
    }
}

/// The coerced field set sent as the request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Turns a raw form value into a JSON number when the whole (trimmed) value
/// is a finite decimal literal. Anything else is passed through untouched.
pub fn coerce_value(raw: &str) -> Value {
    match parse_finite_number(raw) {
        Some(number) => Value::Number(number),
        None => Value::String(raw.to_string()),
    }
}

fn parse_finite_number(raw: &str) -> Option<Number> {
    let trimmed = raw.trim();
    // f64::from_str 也接受 "inf"、"NaN"，先把字元集限制在十進位字面值
    let is_decimal_literal = trimmed.chars().any(|c| c.is_ascii_digit())
        && trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !is_decimal_literal {
        return None;
    }

    let parsed: f64 = trimmed.parse().ok()?;
    if !parsed.is_finite() {
        return None;
    }

    if parsed.fract() == 0.0 && parsed.abs() <= MAX_SAFE_INTEGER {
        Some(Number::from(parsed as i64))
    } else {
        Number::from_f64(parsed)
    }
}

/// Renders a result value the way assigning it as element text would.
pub fn render_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Number(number)) => {
            if number.is_i64() || number.is_u64() {
                number.to_string()
            } else {
                number
                    .as_f64()
                    .map(format_float)
                    .unwrap_or_else(|| number.to_string())
            }
        }
        Some(other) => other.to_string(),
    }
}

/// Browser number-to-text: plain decimals in [1e-6, 1e21), exponent form
/// (`1e+21`, `1.5e-7`) outside that range.
fn format_float(float: f64) -> String {
    if float == 0.0 {
        return "0".to_string();
    }

    let magnitude = float.abs();
    if (1e-6..1e21).contains(&magnitude) {
        // f64 的 Display 不會補上 ".0"
        return float.to_string();
    }

    let formatted = format!("{:e}", float);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

/// Fields returned by the prediction service. Values stay untyped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionResult {
    fields: Map<String, Value>,
}

impl PredictionResult {
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn text(&self, key: &str) -> String {
        render_text(self.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_strings_become_numbers() {
        assert_eq!(coerce_value("42"), json!(42));
        assert_eq!(coerce_value("-7"), json!(-7));
        assert_eq!(coerce_value("19.99"), json!(19.99));
        assert_eq!(coerce_value("40.0"), json!(40));
        assert_eq!(coerce_value(" 12 "), json!(12));
        assert_eq!(coerce_value("1e3"), json!(1000));
        assert_eq!(coerce_value(".5"), json!(0.5));
    }

    #[test]
    fn test_non_numeric_values_stay_strings() {
        assert_eq!(coerce_value("S001"), json!("S001"));
        assert_eq!(coerce_value("2024-05-01"), json!("2024-05-01"));
        assert_eq!(coerce_value(""), json!(""));
        assert_eq!(coerce_value("   "), json!("   "));
        assert_eq!(coerce_value("NaN"), json!("NaN"));
        assert_eq!(coerce_value("Infinity"), json!("Infinity"));
        assert_eq!(coerce_value("inf"), json!("inf"));
        assert_eq!(coerce_value("0x10"), json!("0x10"));
        assert_eq!(coerce_value("1e999"), json!("1e999"));
        assert_eq!(coerce_value("--5"), json!("--5"));
    }

    #[test]
    fn test_payload_keeps_field_order_and_last_value() {
        let mut fields = FormFields::new();
        fields.insert("Store ID", "S001");
        fields.insert("Price", "33.5");
        fields.insert("Store ID", "S002");

        assert_eq!(fields.len(), 2);
        let payload = fields.to_payload();
        assert_eq!(payload.keys().collect::<Vec<_>>(), vec!["Store ID", "Price"]);
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"Store ID":"S002","Price":33.5}"#
        );
    }

    #[test]
    fn test_render_text() {
        assert_eq!(render_text(Some(&json!(120))), "120");
        assert_eq!(render_text(Some(&json!(120.0))), "120");
        assert_eq!(render_text(Some(&json!(40.5))), "40.5");
        assert_eq!(render_text(Some(&json!("15 units"))), "15 units");
        assert_eq!(render_text(Some(&json!(true))), "true");
        assert_eq!(render_text(Some(&Value::Null)), "");
        assert_eq!(render_text(None), "");
        assert_eq!(render_text(Some(&json!([1, 2]))), "[1,2]");
    }

    #[test]
    fn test_render_text_uses_exponent_outside_plain_range() {
        assert_eq!(render_text(Some(&json!(1e21))), "1e+21");
        assert_eq!(render_text(Some(&json!(-2.5e22))), "-2.5e+22");
        assert_eq!(render_text(Some(&json!(1e-7))), "1e-7");
        assert_eq!(render_text(Some(&json!(1.5e-7))), "1.5e-7");
        assert_eq!(render_text(Some(&json!(1e20))), "100000000000000000000");
        assert_eq!(render_text(Some(&json!(0.000001))), "0.000001");
        assert_eq!(render_text(Some(&json!(-0.0))), "0");
    }

    #[test]
    fn test_prediction_result_accessors() {
        let result: PredictionResult =
            serde_json::from_value(json!({"PredictedDemand": 120.25, "EOQ": 40, "ROL": "15"}))
                .unwrap();
        assert_eq!(result.text(PREDICTED_DEMAND_KEY), "120.25");
        assert_eq!(result.get(EOQ_KEY), Some(&json!(40)));
        assert_eq!(result.text(ROL_KEY), "15");
        assert_eq!(result.text("Missing"), "");
    }
}
