// ==========================================
// 外呼日志校验器 - 行处理工具
// ==========================================
// 逗号拆分、空行判断、消息片段识别
// 供行结束符、结构、数据质量检查共用
// ==========================================

use crate::config::ValidatorConfig;

/// 拆分记录行并去除首尾空白（该格式无引号规则）
pub fn split_fields(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

pub fn field_count(line: &str) -> usize {
    line.split(',').count()
}

/// 空、仅空白或仅分隔符（`,,,,,`）
pub fn is_blank_row(line: &str) -> bool {
    line.split(',').all(|f| f.trim().is_empty())
}

// ==========================================
// FragmentDetector
// ==========================================
// 片段是多行消息正文的续行，不是记录
// 区分大小写匹配，短语来自 ValidatorConfig
#[derive(Debug, Clone, Default)]
pub struct FragmentDetector {
    opt_out_phrases: Vec<String>,
    payment_prompt_phrases: Vec<String>,
}

impl FragmentDetector {
    pub fn new(opt_out_phrases: Vec<String>, payment_prompt_phrases: Vec<String>) -> Self {
        Self {
            opt_out_phrases,
            payment_prompt_phrases,
        }
    }

    pub fn from_config(config: &ValidatorConfig) -> Self {
        Self::new(
            config.opt_out_phrases.clone(),
            config.payment_prompt_phrases.clone(),
        )
    }

    pub fn is_fragment(&self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty() {
            return false;
        }
        self.opt_out_phrases
            .iter()
            .any(|p| !p.is_empty() && line.contains(p.as_str()))
            || self
                .payment_prompt_phrases
                .iter()
                .any(|p| !p.is_empty() && line.starts_with(p.as_str()))
    }
}
