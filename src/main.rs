use clap::Parser;
use hypoxia_budget::utils::error::{BudgetError, ErrorSeverity};
use hypoxia_budget::utils::logger;
use hypoxia_budget::{BudgetEngine, CliConfig, InteractiveCollector, PresetCollector, Report};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("🚀 Starting hypoxia-budget");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 合併並驗證設定
    let defaults = match config.load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let result = if config.non_interactive {
        BudgetEngine::new(PresetCollector::new()).run(&defaults)
    } else {
        let stdin = std::io::stdin();
        let collector = InteractiveCollector::new(stdin.lock(), std::io::stdout());
        BudgetEngine::new(collector).run(&defaults)
    };

    let rendered = result.and_then(|report: Report| report.render(config.format));

    match rendered {
        Ok(text) => {
            print!("{}", text);
            tracing::info!("✅ Calculation completed");
        }
        Err(BudgetError::Interrupted) => {
            println!("\nCalculation interrupted by user.");
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Calculation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}
