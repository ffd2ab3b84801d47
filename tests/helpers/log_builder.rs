// ==========================================
// 外呼日志构建器 - 集成测试用
// ==========================================

#![allow(dead_code)]

use outreach_log_validator::config::OutreachSchema;

pub const CRLF: &str = "\r\n";
pub const LF: &str = "\n";

// ==========================================
// OutreachLogBuilder
// ==========================================
// 默认输出: 表头、数据行、仅含分隔符的空行，以 CRLF 结尾

pub struct OutreachLogBuilder {
    column_count: usize,
    header: String,
    rows: Vec<String>,
    blank_row: bool,
    trailing_terminator: bool,
    terminator: &'static str,
}

impl OutreachLogBuilder {
    pub fn new(schema: &OutreachSchema) -> Self {
        Self {
            column_count: schema.column_count(),
            header: schema.header_line(),
            rows: Vec::new(),
            blank_row: true,
            trailing_terminator: true,
            terminator: CRLF,
        }
    }

    pub fn schema_a() -> Self {
        Self::new(&OutreachSchema::schema_a())
    }

    pub fn schema_b() -> Self {
        Self::new(&OutreachSchema::schema_b())
    }

    pub fn header(mut self, header: &str) -> Self {
        self.header = header.to_string();
        self
    }

    pub fn row(mut self, row: &str) -> Self {
        self.rows.push(row.to_string());
        self
    }

    pub fn rows(mut self, rows: &[&str]) -> Self {
        self.rows.extend(rows.iter().map(|r| r.to_string()));
        self
    }

    pub fn without_blank_row(mut self) -> Self {
        self.blank_row = false;
        self
    }

    pub fn without_trailing_terminator(mut self) -> Self {
        self.trailing_terminator = false;
        self
    }

    pub fn terminator(mut self, terminator: &'static str) -> Self {
        self.terminator = terminator;
        self
    }

    pub fn build(&self) -> String {
        let mut lines = vec![self.header.clone()];
        lines.extend(self.rows.iter().cloned());
        if self.blank_row {
            lines.push(",".repeat(self.column_count.saturating_sub(1)));
        }
        let mut content = lines.join(self.terminator);
        if self.trailing_terminator {
            content.push_str(self.terminator);
        }
        content
    }
}

// ==========================================
// 行数据样例
// ==========================================

/// 2025-06-10 的合规 A 模式记录
pub fn a_row(account: &str) -> String {
    format!(
        "{},1234567890,Your statement is ready,2025-06-10 18:00:00,DELIVERED,VERIZON",
        account
    )
}

/// 2025-06-10 的合规 B 模式短信记录
pub fn b_sms_row(account: &str) -> String {
    format!(
        "{},FA-{},PAYMENT_REMINDER,Reminder,06/10/2025 18:00,smsActivities,SMS Delivered,Your payment is due",
        account, account
    )
}

/// 2025-06-10 的合规 B 模式邮件记录（SMSCOPY 为空）
pub fn b_email_row(account: &str) -> String {
    format!(
        "{},FA-{},PAYMENT_REMINDER,Reminder,06/10/2025 18:00,emailActivities,Email Delivered,",
        account, account
    )
}
