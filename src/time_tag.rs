//! # 时间标签编解码
//!
//! 时间标签有两种语法等价、括号不同的形式：
//! 行时间标签 `[mm:ss.ff]` 标记整行开始的时间，
//! 逐字时间标签 `<mm:ss.ff>` 标记行内词与词之间的计时边界。
//! 分钟可以超过两位（100 分钟以上的标签是合法的），
//! 小数部分两位按百分秒计，三位按毫秒计。

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::error::ConvertError;

/// 匹配一个行时间标签，例如 `[01:00.00]` 或 `[01:00.000]`。
pub(crate) static LINE_TIME_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(\d+):(\d{2})\.(\d{2,3})\]").expect("编译 LINE_TIME_TAG_REGEX 失败")
});

/// 匹配一个逐字时间标签，例如 `<00:18.37>` 或 `<00:18.370>`。
pub(crate) static WORD_TIME_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(\d+):(\d{2})\.(\d{2,3})>").expect("编译 WORD_TIME_TAG_REGEX 失败")
});

/// 时间标签的模式。模式由括号形状决定，两种模式的标签互不通用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeTagMode {
    /// 方括号的行时间标签。
    Line,
    /// 尖括号的逐字时间标签。
    Word,
}

impl TimeTagMode {
    pub(crate) fn regex(self) -> &'static Regex {
        match self {
            Self::Line => &LINE_TIME_TAG_REGEX,
            Self::Word => &WORD_TIME_TAG_REGEX,
        }
    }
}

/// 将捕获到的时间标签分组换算为毫秒。
///
/// 两位小数是百分秒，三位小数直接按毫秒取值，不做舍入。
pub(crate) fn captures_to_ms(caps: &Captures<'_>) -> Result<i64, ConvertError> {
    let minutes: i64 = caps[1].parse()?;
    let seconds: i64 = caps[2].parse()?;
    let fraction_str = &caps[3];
    let fraction: i64 = fraction_str.parse()?;
    let millis = if fraction_str.len() > 2 {
        fraction
    } else {
        fraction * 10
    };
    Ok((minutes * 60 + seconds) * 1000 + millis)
}

/// 解析一个时间标签字符串到毫秒。
///
/// 输入中包含多个匹配模式的标签时，取第一个匹配并忽略其余。
///
/// # Errors
///
/// 输入中不含所给模式的标签时返回 [`ConvertError::MalformedTimeTag`]。
pub fn parse_time_tag(time_tag: &str, mode: TimeTagMode) -> Result<i64, ConvertError> {
    let caps = mode
        .regex()
        .captures(time_tag)
        .ok_or_else(|| ConvertError::MalformedTimeTag(time_tag.to_string()))?;
    captures_to_ms(&caps)
}

/// 将毫秒时间换算为时间标签字符串。
///
/// 输出固定为两位分钟（超出时自然扩展）、两位秒和两位百分秒，
/// 毫秒中不足 10ms 的部分被截断。
///
/// # Errors
///
/// `milliseconds` 为负时返回 [`ConvertError::InvalidTimestamp`]。
pub fn format_time_tag(milliseconds: i64, mode: TimeTagMode) -> Result<String, ConvertError> {
    if milliseconds < 0 {
        return Err(ConvertError::InvalidTimestamp(milliseconds));
    }

    let total_seconds = milliseconds / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    let hundredths = milliseconds % 1000 / 10;

    Ok(match mode {
        TimeTagMode::Line => format!("[{minutes:02}:{seconds:02}.{hundredths:02}]"),
        TimeTagMode::Word => format!("<{minutes:02}:{seconds:02}.{hundredths:02}>"),
    })
}
