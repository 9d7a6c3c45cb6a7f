//! # 行起始时间的提取与拼接
//!
//! 一行歌词的行首可以有零个或多个 `[mm:ss.ff]` 标签。
//! 多个起始时间是合法的（同一句歌词在歌曲中多处出现），
//! 没有起始时间的行同样合法，按未计时的纯文本处理。

use crate::error::ConvertError;
use crate::time_tag::{LINE_TIME_TAG_REGEX, TimeTagMode, captures_to_ms, format_time_tag};

/// 从行首逐个取下行时间标签。
///
/// 标签可以相邻，也可以被空白隔开；返回按出现顺序排列的起始时间
/// 和去掉标签及两端空白后的歌词文本。行首没有标签不是错误，
/// 此时起始时间列表为空。行中部的标签不会被取下。
///
/// # Errors
///
/// 标签中的数字分组超出 `i64` 可表示范围时返回 [`ConvertError::ParseInt`]。
pub fn split_start_times(line: &str) -> Result<(Vec<i64>, String), ConvertError> {
    let mut start_times = Vec::new();
    let mut rest = line.trim_start();

    while let Some(caps) = LINE_TIME_TAG_REGEX.captures(rest) {
        let whole = caps.get(0).expect("整体捕获组在正则匹配成功时必然存在");
        if whole.start() != 0 {
            break;
        }
        start_times.push(captures_to_ms(&caps)?);
        rest = rest[whole.end()..].trim_start();
    }

    Ok((start_times, rest.trim_end().to_string()))
}

/// 将起始时间和歌词文本拼接成一行 LRC 文本。
///
/// 所有标签按输入顺序直接相邻排列，后跟一个空格和去除两端空白的文本：
///
/// ```text
/// [01:00.00][01:06.00] When the truth is found to be lies
/// ```
///
/// # Errors
///
/// - 起始时间列表为空时返回 [`ConvertError::MissingStartTime`]。
/// - 文本自身仍含行时间标签时返回 [`ConvertError::EmbeddedLineTag`]，
///   否则拼接结果无法再被正确解析。
/// - 存在负的起始时间时返回 [`ConvertError::InvalidTimestamp`]。
pub fn join_start_times(start_times: &[i64], text: &str) -> Result<String, ConvertError> {
    if start_times.is_empty() {
        return Err(ConvertError::MissingStartTime);
    }
    if LINE_TIME_TAG_REGEX.is_match(text) {
        return Err(ConvertError::EmbeddedLineTag(text.to_string()));
    }

    let mut line = String::new();
    for &start_ms in start_times {
        line.push_str(&format_time_tag(start_ms, TimeTagMode::Line)?);
    }
    line.push(' ');
    line.push_str(text.trim());

    Ok(line)
}
