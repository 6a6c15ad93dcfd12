pub mod form_file;

use crate::core::client::DEFAULT_ENDPOINT;
use crate::core::FormFields;
use crate::utils::error::{FormError, Result};
use crate::utils::validation::{parse_field_assignment, validate_url, Validate};
use clap::Parser;
use form_file::FormFile;

#[derive(Debug, Clone, Parser)]
#[command(name = "forecast-form")]
#[command(about = "Submit a demand forecast form and show the predicted EOQ/ROL")]
pub struct CliConfig {
    #[arg(long, help = "Prediction endpoint [default: http://127.0.0.1:5000/predict]")]
    pub endpoint: Option<String>,

    #[arg(long, help = "TOML file describing the form fields")]
    pub form: Option<String>,

    #[arg(long = "field", value_name = "NAME=VALUE", help = "Form field, repeatable")]
    pub fields: Vec<String>,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Everything needed for one submission, after merging file and flags.
#[derive(Debug, Clone)]
pub struct Submission {
    pub endpoint: String,
    pub fields: FormFields,
}

impl CliConfig {
    /// 合併表單檔與命令列欄位；命令列的 `--field` 覆蓋同名欄位
    /// endpoint 優先順序：`--endpoint` > 表單檔 > 預設值
    pub fn resolve(&self) -> Result<Submission> {
        let mut file_endpoint = None;
        let mut fields = FormFields::new();

        if let Some(path) = &self.form {
            let file = FormFile::from_file(path)?;
            file.validate()?;
            fields.extend_from(&file.to_form_fields()?);
            file_endpoint = file.endpoint;
        }

        let endpoint = self
            .endpoint
            .clone()
            .or(file_endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        for raw in &self.fields {
            let (name, value) = parse_field_assignment("field", raw)?;
            fields.insert(name, value);
        }

        if fields.is_empty() {
            return Err(FormError::MissingConfigError {
                field: "form fields (--form or --field)".to_string(),
            });
        }

        Ok(Submission { endpoint, fields })
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(endpoint) = &self.endpoint {
            validate_url("endpoint", endpoint)?;
        }

        if self.form.is_none() && self.fields.is_empty() {
            return Err(FormError::MissingConfigError {
                field: "form fields (--form or --field)".to_string(),
            });
        }

        for raw in &self.fields {
            parse_field_assignment("field", raw)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::parse_from(std::iter::once("forecast-form").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["--field", "Store ID=S001"]);
        assert_eq!(config.endpoint, None);
        assert!(config.validate().is_ok());
        assert!(!config.verbose);
    }

    #[test]
    fn test_requires_some_field() {
        let config = parse(&[]);
        assert!(matches!(
            config.validate(),
            Err(FormError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_rejects_invalid_endpoint_flag() {
        let config = parse(&["--endpoint", "localhost:5000", "--field", "Store ID=S001"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_field() {
        let config = parse(&["--field", "Store ID"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolve_flags_only() {
        let config = parse(&[
            "--field",
            "Store ID=S001",
            "--field",
            "Price=33.5",
            "--field",
            "Store ID=S002",
        ]);
        let submission = config.resolve().unwrap();
        assert_eq!(submission.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(submission.fields.len(), 2);
        assert_eq!(submission.fields.get("Store ID"), Some("S002"));
    }
}
