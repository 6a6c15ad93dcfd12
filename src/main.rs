use clap::Parser;
use forecast_form::utils::error::ErrorSeverity;
use forecast_form::utils::{logger, validation::Validate};
use forecast_form::{
    CliConfig, FormSubmissionHandler, HttpPredictionClient, SubmitOutcome, TerminalView,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting forecast-form CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置並合併欄位
    let submission = match config.validate().and_then(|_| config.resolve()) {
        Ok(submission) => submission,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let client = match HttpPredictionClient::new(submission.endpoint.clone()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    tracing::info!("🌐 Prediction endpoint: {}", client.endpoint());

    let handler = FormSubmissionHandler::new(client);
    let mut view = TerminalView::stdio();

    match handler.submit(&submission.fields, &mut view).await {
        SubmitOutcome::Shown(_) => {
            // 終端機沒有關閉按鈕，顯示後直接關閉對話框
            handler.close(&mut view)?;
            Ok(())
        }
        SubmitOutcome::Alerted { message, severity } => {
            tracing::debug!("Alert shown: {} (Severity: {:?})", message, severity);
            let exit_code = severity_exit_code(severity);
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }
        SubmitOutcome::Ignored => Ok(()),
    }
}

fn severity_exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,      // 警告，但成功
        ErrorSeverity::Medium => 2,   // 可重試
        ErrorSeverity::High => 1,     // 處理錯誤
        ErrorSeverity::Critical => 3, // 系統錯誤
    }
}
