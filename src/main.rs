use anyhow::Context;
use clap::Parser;
use drip_rate::core::ResultRenderer;
use drip_rate::utils::{logger, validation::Validate};
use drip_rate::{CalcError, Calculator, CliConfig, JsonRenderer, TextRenderer, TomlConfig};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose, config.log_json);

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config) {
        // 根據錯誤類別決定退出碼
        let exit_code = match e.downcast_ref::<CalcError>() {
            Some(calc_err) => {
                tracing::debug!(
                    "Run failed: {} (Category: {:?})",
                    calc_err,
                    calc_err.category()
                );
                calc_err.exit_code()
            }
            None => 1,
        };
        std::process::exit(exit_code);
    }
}

fn run(config: &CliConfig) -> anyhow::Result<()> {
    // 驗證命令列參數
    if let Err(e) = config.validate() {
        report(&e, None);
        return Err(e.into());
    }

    // 載入 TOML 配置（未指定時使用預設值）
    let settings = match &config.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let loaded = TomlConfig::from_file(path)
                .and_then(|settings| settings.validate().map(|_| settings));
            match loaded {
                Ok(settings) => settings,
                Err(e) => {
                    report(&e, None);
                    return Err(e)
                        .with_context(|| format!("loading config {}", path.display()));
                }
            }
        }
        None => TomlConfig::default(),
    };

    // 套用命令列覆蓋設定並計算
    let options = config.format_options(&settings);
    let calculator = Calculator::new(options);
    let input = config.resolve_input(&settings);
    tracing::debug!("Resolved input: {:?}", input);

    let result = match calculator.calculate(&input) {
        Ok(result) => result,
        Err(e) => {
            let e = CalcError::from(e);
            report(&e, Some(options.locale));
            return Err(e.into());
        }
    };

    // 輸出結果
    let renderer: Box<dyn ResultRenderer> = if config.json {
        Box::new(JsonRenderer)
    } else {
        Box::new(TextRenderer::new(options))
    };
    let output = renderer.render(&result).context("rendering result")?;
    println!("{}", output.trim_end());

    Ok(())
}

/// Prints the user-facing message and suggestion to stderr.
fn report(e: &CalcError, locale: Option<drip_rate::Locale>) {
    let message = match (e, locale) {
        (CalcError::Validation(v), Some(locale)) => v.message(locale).to_string(),
        _ => e.user_friendly_message(),
    };
    tracing::debug!("Reporting error: {}", e);
    eprintln!("❌ {}", message);
    eprintln!("💡 {}", e.recovery_suggestion());
}
