// ==========================================
// 外呼日志校验器 - 检查接口
// ==========================================
// 每类规则实现 OutreachLogCheck，写入共享的 ValidationResult
// 检查之间互不短路
// ==========================================

use crate::config::OutreachSchema;
use crate::domain::outreach::ValidationResult;
use crate::validator::header_mapper::HeaderMapping;

// ==========================================
// LogFile - 待校验文件的只读视图
// ==========================================
pub struct LogFile<'a> {
    pub file_name: &'a str,
    pub content: &'a str,
    /// 按 CRLF 或 LF 拆分的内容（末尾空项表示以换行结尾）
    pub lines: Vec<&'a str>,
    pub header: HeaderMapping,
}

impl<'a> LogFile<'a> {
    pub fn parse(file_name: &'a str, content: &'a str, schema: &OutreachSchema) -> Self {
        let lines: Vec<&str> = content
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .collect();
        let header_line = lines.first().copied().unwrap_or("");
        let header = HeaderMapping::resolve(schema, header_line);

        Self {
            file_name,
            content,
            lines,
            header,
        }
    }

    /// 去掉存储前缀（`dir/`、`dir\`）后的文件名
    pub fn base_name(&self) -> &'a str {
        base_name(self.file_name)
    }
}

pub fn base_name(file_name: &str) -> &str {
    file_name.rsplit(['/', '\\']).next().unwrap_or(file_name)
}

// ==========================================
// OutreachLogCheck Trait
// ==========================================
// 用途: 校验流水线中的一类规则
// 实现者: LineEndingCheck, TrailingBlankRowCheck, BlackoutDayCheck,
//   FileNameCheck, GenerationTimeCheck, MinimumStructureCheck, HeaderCheck,
//   DataQualityCheck
pub trait OutreachLogCheck: Send + Sync {
    /// 日志事件中使用的短名称
    fn name(&self) -> &'static str;

    fn run(&self, file: &LogFile<'_>, result: &mut ValidationResult);
}
