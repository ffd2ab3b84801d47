// ==========================================
// 外呼日志样例生成器
// ==========================================
// 用途: 生成合规的每日文件以及刻意损坏的变体
// 输出: tests/fixtures/samples/（或 --out-dir）
// ==========================================

use chrono::{Duration, Local, NaiveDateTime};
use clap::Parser;
use outreach_log_validator::config::ValidatorConfig;
use outreach_log_validator::domain::SchemaVariant;
use outreach_log_validator::generator::OutreachLogGenerator;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "generate_sample_logs")]
struct Args {
    #[arg(long, default_value = "tests/fixtures/samples")]
    out_dir: PathBuf,

    /// 表头模式（A 或 B）
    #[arg(long, default_value = "A")]
    schema: SchemaVariant,

    /// 合规文件天数，截止今天
    #[arg(long, default_value_t = 7)]
    days: i64,

    /// 每个工作日文件的记录数
    #[arg(long, default_value_t = 50)]
    records: usize,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config = ValidatorConfig::for_variant(args.schema);
    let generator = OutreachLogGenerator::new(&config);
    fs::create_dir_all(&args.out_dir)?;

    println!("Generating schema {} samples into {}", args.schema, args.out_dir.display());

    // 1. 合规的每日文件（周日/假日无数据行）
    let today = Local::now().date_naive();
    for offset in (0..args.days).rev() {
        let date = today - Duration::days(offset);
        let Some(at) = date.and_hms_opt(config.resolved_schema().expected_generation_hour, 0, 0)
        else {
            continue;
        };
        let path = generator.write_to_dir(&args.out_dir, at, args.records)?;
        println!("✓ {}", path.display());
    }

    // 2. 损坏变体
    let Some(at) = today.and_hms_opt(18, 0, 0) else {
        return Ok(());
    };
    generate_broken_samples(&generator, &args.out_dir, at)?;

    println!("✓ All sample logs generated");
    Ok(())
}

fn generate_broken_samples(
    generator: &OutreachLogGenerator,
    dir: &Path,
    at: NaiveDateTime,
) -> Result<(), Box<dyn Error>> {
    let good = generator.generate(at, 10)?;
    let stem = good.file_name.trim_end_matches(".csv");

    write(dir, &format!("broken_lf_only_{}", good.file_name), &good.content.replace("\r\n", "\n"))?;

    let (header, body) = good.content.split_once("\r\n").unwrap_or((good.content.as_str(), ""));
    write(
        dir,
        &format!("broken_lowercase_headers_{}", good.file_name),
        &format!("{}\r\n{}", header.to_lowercase(), body),
    )?;

    write(
        dir,
        &format!("broken_no_trailing_blank_{}", good.file_name),
        good.content.trim_end_matches("\r\n"),
    )?;

    write(dir, &format!("{}.csv.pgp", stem), &good.content)?;

    let mut lines: Vec<&str> = good.content.split("\r\n").collect();
    if lines.len() > 2 {
        lines.insert(2, "Text STOP to end messages");
    }
    write(dir, &format!("fragment_{}", good.file_name), &lines.join("\r\n"))?;

    Ok(())
}

fn write(dir: &Path, name: &str, content: &str) -> Result<(), Box<dyn Error>> {
    fs::write(dir.join(name), content)?;
    println!("✓ {}", name);
    Ok(())
}
