// ==========================================
// 外呼日志校验器 - 校验流水线
// ==========================================
// 范围: 输入一个文件，输出一个 ValidationResult
// 顺序: 行结束符 -> 结尾空行 -> 停发日 -> 文件名
//       -> 生成时间 -> 最小结构 -> 表头 -> 数据质量
// ==========================================

pub mod check;
pub mod dq_validator;
pub mod file_name;
pub mod header_mapper;
pub mod line_endings;
pub mod outreach_validator;
pub mod row_cleaner;
pub mod structure;

pub use check::{LogFile, OutreachLogCheck};
pub use header_mapper::{HeaderMapping, HeaderMatch};
pub use line_endings::LineEndingStats;
pub use outreach_validator::OutreachLogValidator;
pub use row_cleaner::FragmentDetector;
