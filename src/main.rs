// ==========================================
// 外呼日志校验器 - 命令行入口
// ==========================================
// 退出码: 0 全部合规, 1 存在不合规文件, 2 配置或来源错误
// ==========================================

use anyhow::Context;
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use outreach_log_validator::audit::OutreachLogAudit;
use outreach_log_validator::config::ValidatorConfig;
use outreach_log_validator::domain::{SchemaVariant, Strictness, ValidationResult};
use outreach_log_validator::source::LocalDirSource;
use outreach_log_validator::validator::OutreachLogValidator;
use outreach_log_validator::{logging, report};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// 文本报告
    #[default]
    Text,
    /// JSON 格式的 ValidationResult
    Json,
}

/// 外呼日志格式与数据质量校验器
#[derive(Parser)]
#[command(name = "outreach-log-validator")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// 表头模式（A 或 B），覆盖配置文件和环境变量
    #[arg(long, global = true)]
    schema: Option<SchemaVariant>,

    /// 配置文件（默认: <config dir>/outreach-log-validator/config.json）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 表头偏差和生成时间偏差视为失败
    #[arg(long, global = true)]
    strict: bool,

    /// 报告格式
    #[arg(long, value_enum, default_value = "text", global = true)]
    format: OutputFormat,

    /// 以 JSON 输出日志
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 校验单个文件
    Validate {
        /// 外呼日志文件路径
        path: PathBuf,
    },

    /// 校验目录中最新的外呼日志
    Latest {
        #[arg(long)]
        dir: PathBuf,
    },

    /// 校验最近 N 天内修改过的全部外呼日志
    Recent {
        #[arg(long)]
        dir: PathBuf,

        #[arg(long, default_value_t = 7)]
        days: i64,
    },
}

fn build_config(cli: &Cli) -> anyhow::Result<ValidatorConfig> {
    let mut config =
        ValidatorConfig::load_or_default(cli.config.as_deref()).context("loading configuration")?;
    if let Some(variant) = cli.schema {
        config.apply_schema_override(Some(&variant.to_string()))?;
    }
    if cli.strict {
        config = config.with_strictness(Strictness::Strict);
    }
    config.validate()?;
    Ok(config)
}

fn print_result(result: &ValidationResult, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", report::render_text(result)),
        OutputFormat::Json => println!("{}", report::render_json(result)?),
    }
    Ok(())
}

fn exit_for(compliant: bool) -> ExitCode {
    if compliant {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = build_config(&cli)?;

    match &cli.command {
        Commands::Validate { path } => {
            let content = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading {}", path.display()))?;
            let validator = OutreachLogValidator::new(config)?;
            let result = validator.validate_outreach_log(&path.display().to_string(), &content);
            print_result(&result, cli.format)?;
            Ok(exit_for(result.is_compliant()))
        }
        Commands::Latest { dir } => {
            let audit = OutreachLogAudit::new(LocalDirSource::new(dir), config)?;
            let result = audit.validate_latest().await?;
            print_result(&result, cli.format)?;
            Ok(exit_for(result.is_compliant()))
        }
        Commands::Recent { dir, days } => {
            let audit = OutreachLogAudit::new(LocalDirSource::new(dir), config)?;
            let since = Utc::now() - Duration::days(*days);
            let run = audit.validate_since(since).await?;
            if run.files.is_empty() {
                anyhow::bail!("no outreach log files modified in the last {} days", days);
            }
            match cli.format {
                OutputFormat::Text => {
                    for file in &run.files {
                        if let Ok(result) = &file.outcome {
                            print!("{}", report::render_text(result));
                            println!();
                        }
                    }
                    print!("{}", report::render_batch_text(&run));
                }
                OutputFormat::Json => println!("{}", report::render_batch_json(&run)?),
            }
            if run.fetch_failures() > 0 {
                return Ok(ExitCode::from(2));
            }
            Ok(exit_for(run.all_compliant()))
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.json_logs {
        logging::init_json();
    } else {
        logging::init();
    }

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "运行失败");
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
