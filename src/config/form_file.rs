use crate::core::FormFields;
use crate::utils::error::{FormError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A form described in TOML: an optional endpoint and the fields in order.
///
/// ```toml
/// endpoint = "http://127.0.0.1:5000/predict"
///
/// [[field]]
/// name = "Store ID"
/// value = "S001"
///
/// [[field]]
/// name = "Target Date"
/// value = 2024-05-01
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormFile {
    pub endpoint: Option<String>,
    #[serde(default, rename = "field")]
    pub fields: Vec<FieldEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldEntry {
    pub name: String,
    pub value: toml::Value,
}

impl FormFile {
    /// 從 TOML 檔案載入表單
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FormError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析表單
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FormError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${STORE_ID})，找不到的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FormError::ConfigError {
            message: format!("Invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Field values as a form would carry them: always text.
    pub fn to_form_fields(&self) -> Result<FormFields> {
        let mut fields = FormFields::new();
        for entry in &self.fields {
            fields.insert(entry.name.trim(), field_text(&entry.name, &entry.value)?);
        }
        Ok(fields)
    }
}

fn field_text(name: &str, value: &toml::Value) -> Result<String> {
    match value {
        toml::Value::String(text) => Ok(text.clone()),
        toml::Value::Integer(number) => Ok(number.to_string()),
        toml::Value::Float(number) => Ok(number.to_string()),
        toml::Value::Boolean(flag) => Ok(flag.to_string()),
        toml::Value::Datetime(datetime) => Ok(datetime.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => Err(FormError::InvalidConfigValueError {
            field: format!("field.{}", name),
            value: value.to_string(),
            reason: "Field values must be scalars".to_string(),
        }),
    }
}

impl Validate for FormFile {
    fn validate(&self) -> Result<()> {
        if let Some(endpoint) = &self.endpoint {
            validate_url("endpoint", endpoint)?;
        }
        for entry in &self.fields {
            validate_non_empty_string("field.name", &entry.name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_fields_in_order() {
        let form = FormFile::from_toml_str(
            r#"
[[field]]
name = "Store ID"
value = "S001"

[[field]]
name = "Price"
value = 33.5

[[field]]
name = "Units Sold"
value = 127

[[field]]
name = "Target Date"
value = 2024-05-01

[[field]]
name = "Holiday/Promotion"
value = true
"#,
        )
        .unwrap();

        assert!(form.endpoint.is_none());
        assert!(form.validate().is_ok());

        let fields = form.to_form_fields().unwrap();
        let collected: Vec<_> = fields.iter().collect();
        assert_eq!(
            collected,
            vec![
                ("Store ID", "S001"),
                ("Price", "33.5"),
                ("Units Sold", "127"),
                ("Target Date", "2024-05-01"),
                ("Holiday/Promotion", "true"),
            ]
        );
    }

    #[test]
    fn test_rejects_table_values() {
        let form = FormFile::from_toml_str(
            r#"
[[field]]
name = "Region"
value = { north = 1 }
"#,
        )
        .unwrap();
        assert!(form.to_form_fields().is_err());
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("FORECAST_FORM_TEST_STORE", "S042");
        let form = FormFile::from_toml_str(
            r#"
[[field]]
name = "Store ID"
value = "${FORECAST_FORM_TEST_STORE}"

[[field]]
name = "Region"
value = "${FORECAST_FORM_TEST_UNSET_VAR}"
"#,
        )
        .unwrap();
        let fields = form.to_form_fields().unwrap();
        assert_eq!(fields.get("Store ID"), Some("S042"));
        assert_eq!(fields.get("Region"), Some("${FORECAST_FORM_TEST_UNSET_VAR}"));
    }

    #[test]
    fn test_invalid_endpoint_fails_validation() {
        let form = FormFile::from_toml_str(r#"endpoint = "localhost:5000""#).unwrap();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            FormFile::from_toml_str("[[field]\nname ="),
            Err(FormError::ConfigError { .. })
        ));
    }
}
