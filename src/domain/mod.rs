// ==========================================
// 外呼日志校验器 - 领域层
// ==========================================
// 范围: 结果模型与共享策略类型
// 约束: 不做 I/O，不含校验逻辑
// ==========================================

pub mod outreach;
pub mod types;

pub use outreach::{DataQuality, FieldIssue, FormatCompliance, ValidationResult};
pub use types::{ComplianceFlag, FieldIssueType, PhonePolicy, SchemaVariant, Strictness};
