use quotex_signals::config::{Config, OutputFormat};
use quotex_signals::services::refresh;
use quotex_signals::{SignalEvaluator, SignalLabel, TimeframeReport, YahooFinanceClient};
use std::env;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn icon(label: SignalLabel) -> &'static str {
    if label.is_bullish() {
        "🟢"
    } else if label.is_bearish() {
        "🔴"
    } else {
        "🟡"
    }
}

fn render_text(report: &TimeframeReport, config: &Config) -> String {
    let now = chrono::Utc::now().with_timezone(&config.display_timezone.offset());
    let mut out = format!(
        "{} - {} ({})\n",
        report.symbol,
        now.format("%Y-%m-%d %H:%M:%S"),
        config.display_timezone.name()
    );

    for entry in &report.entries {
        let label = entry.signal.label;
        out.push_str(&format!(
            "\n{} {} Timeframe - {}",
            icon(label),
            entry.timeframe.to_uppercase(),
            label
        ));
        if let Some(score) = entry.signal.result.score {
            out.push_str(&format!(" (score {:+})", score));
        }
        if let Some(latest) = entry.series.latest() {
            out.push_str(&format!(" | close {:.5}", latest.bar.close));
        }
        out.push('\n');

        for reason in entry.signal.reasons() {
            out.push_str(&format!("  - {}\n", reason));
        }
    }

    out
}

fn render(report: &TimeframeReport, config: &Config) -> anyhow::Result<String> {
    match config.output_format {
        OutputFormat::Text => Ok(render_text(report, config)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

async fn run_once(evaluator: &SignalEvaluator<YahooFinanceClient>, config: &Config) -> anyhow::Result<()> {
    let report = if config.concurrent {
        evaluator
            .evaluate_concurrent(&config.symbol, &config.timeframes)
            .await?
    } else {
        evaluator.evaluate(&config.symbol, &config.timeframes).await?
    };

    println!("{}", render(&report, config)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quotex_signals=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration; a symbol argument overrides SYMBOL
    let mut config = Config::from_env()?;
    if let Some(symbol) = env::args().nth(1) {
        config.symbol = symbol;
    }

    info!(
        "Evaluating {} on {} timeframes",
        config.symbol,
        config.timeframes.len()
    );

    let client = YahooFinanceClient::new(config.request_timeout)?;
    let evaluator = SignalEvaluator::new(client);

    run_once(&evaluator, &config).await?;

    if !config.auto_refresh {
        return Ok(());
    }

    let (evaluator, config) = (&evaluator, &config);
    refresh::run_until(
        config.refresh_interval,
        async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for ctrl-c: {}", e);
            }
        },
        move || async move {
            if let Err(e) = run_once(evaluator, config).await {
                error!("Evaluation failed: {}", e);
            }
        },
    )
    .await;

    info!("Shutting down");
    Ok(())
}
