// ==========================================
// 外呼日志校验器 - 配置层
// ==========================================
// 范围: 表头模式、校验策略、配置文件加载
// 存储: 用户配置目录下的 JSON 文件（可选）
// ==========================================

pub mod error;
pub mod schema;
pub mod validator_config;

pub use error::{ConfigError, ConfigResult};
pub use schema::{CrossFieldRule, FieldFormat, FieldRule, OutreachSchema};
pub use validator_config::{config_keys, default_config_path, SchemaSelection, ValidatorConfig};
