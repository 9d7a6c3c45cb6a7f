//! # 整份 LRC/KAR 文档的解析与生成
//!
//! 文档按行处理，行与行之间不共享任何状态：
//! `[key:value]` 形式的元数据标签收集到 `raw_metadata`，
//! `@RubyN=` 行交给振假名适配器，其余行都按歌词行解码。
//! 单行的问题（例如写坏的振假名标签）只产生警告，不会中断整份文档。

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConvertError;
use crate::line::{can_decode_line, decode_line, encode_line};
use crate::model::ParsedLrcData;
use crate::ruby::{decode_ruby, encode_ruby};
use crate::timed_text::encode_timed_text;

/// 匹配 `[ti:歌曲标题]` 形式的元数据标签。键只含字母，
/// 因此不会误吞 `[01:00.00]` 这样的行时间标签。
static METADATA_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(?P<key>[a-zA-Z]+):(?P<value>.*)]$").expect("编译 METADATA_TAG_REGEX 失败")
});

/// 匹配 `@Ruby1=...` 形式的振假名行，捕获 `=` 之后的元组部分。
static RUBY_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@Ruby\d+=(?P<tuple>.*)$").expect("编译 RUBY_LINE_REGEX 失败")
});

/// 解析一份完整的 LRC/KAR 文档。
///
/// # Errors
///
/// 标签中的数字分组超出 `i64` 可表示范围时返回 [`ConvertError::ParseInt`]。
pub fn parse_lrc(content: &str) -> Result<ParsedLrcData, ConvertError> {
    let mut data = ParsedLrcData::default();

    for (line_num, line_str) in content.lines().enumerate() {
        let trimmed = line_str.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(caps) = METADATA_TAG_REGEX.captures(trimmed) {
            let key = caps["key"].to_string();
            let value = caps["value"].trim().to_string();
            data.raw_metadata.entry(key).or_default().push(value);
            continue;
        }

        if let Some(caps) = RUBY_LINE_REGEX.captures(trimmed) {
            match decode_ruby(&caps["tuple"]) {
                Ok(ruby) => data.rubies.push(ruby),
                Err(e) => {
                    tracing::warn!("跳过无法解析的振假名行 (行 {}): {e}", line_num + 1);
                    data.warnings
                        .push(format!("无法解析的振假名行 (行 {}): {e}", line_num + 1));
                }
            }
            continue;
        }

        if can_decode_line(trimmed) {
            data.lines.push(decode_line(trimmed)?);
        }
    }

    Ok(data)
}

/// 将结构化数据生成为一份 LRC/KAR 文档。
///
/// 元数据标签按键排序后输出以保证结果稳定；没有起始时间的歌词行
/// 作为纯文本行输出，与解码端对未计时行的容忍一致；
/// 振假名记录从 1 开始重新编号。
///
/// # Errors
///
/// 存在负的时间戳、文本中混入行时间标签或振假名记录不完整时返回相应错误。
pub fn generate_lrc(data: &ParsedLrcData) -> Result<String, ConvertError> {
    let mut writer = String::new();

    let mut keys: Vec<&String> = data.raw_metadata.keys().collect();
    keys.sort();
    for key in keys {
        for value in &data.raw_metadata[key] {
            writer.push_str(&format!("[{key}:{value}]\n"));
        }
    }

    for line in &data.lines {
        if line.start_times.is_empty() {
            writer.push_str(&encode_timed_text(&line.text, &line.time_tags)?);
        } else {
            writer.push_str(&encode_line(line)?);
        }
        writer.push('\n');
    }

    for (i, ruby) in data.rubies.iter().enumerate() {
        writer.push_str(&format!("@Ruby{}={}\n", i + 1, encode_ruby(ruby)?));
    }

    Ok(writer)
}
