// ==========================================
// 外呼日志校验器 - 核心库
// ==========================================
// 校验每日外呼日志 CSV 导出: 文件格式（CRLF 记录、命名、结构、表头）
// 以及逐条记录的数据质量
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 结果模型与策略类型
pub mod domain;

// 配置层 - 表头模式与校验器设置
pub mod config;

// 日历 - 停发日与美国中部时间
pub mod calendar;

// 校验流水线
pub mod validator;

// 日志来源 - 校验前列举/拉取
pub mod source;

// 审计服务 - 拉取后校验
pub mod audit;

// 报告渲染
pub mod report;

// 样例文件生成器
pub mod generator;

// 日志
pub mod logging;

// ==========================================
// 重导出
// ==========================================

pub use domain::{
    ComplianceFlag, DataQuality, FieldIssue, FieldIssueType, FormatCompliance, PhonePolicy,
    SchemaVariant, Strictness, ValidationResult,
};

pub use config::{ConfigError, OutreachSchema, ValidatorConfig};

pub use validator::OutreachLogValidator;

pub use source::{LocalDirSource, LogSource, SourceError};

pub use audit::{AuditError, AuditRun, OutreachLogAudit};

pub use generator::OutreachLogGenerator;

// ==========================================
// 常量
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "outreach-log-validator";
