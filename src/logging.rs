// ==========================================
// 日志系统初始化
// ==========================================
// tracing + tracing-subscriber，过滤规则取自 RUST_LOG
// 事件输出到 stderr，stdout 只留报告
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// 初始化日志系统（人类可读格式）
///
/// # 环境变量
/// - RUST_LOG: 日志过滤规则（默认: info）
///   例如: RUST_LOG=debug 或 RUST_LOG=outreach_log_validator::validator=trace
///
/// # 示例
/// ```no_run
/// use outreach_log_validator::logging;
/// logging::init();
/// ```
pub fn init() {
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// JSON 格式日志，每个事件一行
pub fn init_json() {
    let _ = fmt()
        .json()
        .with_env_filter(env_filter())
        .with_current_span(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 测试环境日志（debug 级别，由测试框架捕获）
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
