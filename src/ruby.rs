//! # 振假名（注音）记录的编解码
//!
//! KAR 文件用 `@Ruby1=基底,读音[,开始标签][,结束标签]` 的形式
//! 为基底文本附加读音。本模块处理 `=` 之后的逗号分隔元组：
//! 读音文本复用行内逐字标签的编解码，基底文本不计时，
//! 两个可选的时间槽位使用行时间标签语法，允许留空。

use crate::error::ConvertError;
use crate::model::RubyAnnotation;
use crate::time_tag::{TimeTagMode, format_time_tag, parse_time_tag};
use crate::timed_text::{decode_timed_text, encode_timed_text};

fn parse_time_slot(slot: &str) -> Result<Option<i64>, ConvertError> {
    let slot = slot.trim();
    if slot.is_empty() {
        return Ok(None);
    }
    parse_time_tag(slot, TimeTagMode::Line).map(Some)
}

/// 解码一条振假名元组。
///
/// 读音文本中的逐字标签相对于开始时间（槽位留空时按 0 计）。
///
/// # Errors
///
/// - 元组不足两个字段，或基底、读音为空时返回 [`ConvertError::InvalidRubyTag`]。
/// - 时间槽位非空但不符合行时间标签语法时返回 [`ConvertError::MalformedTimeTag`]。
pub fn decode_ruby(tuple: &str) -> Result<RubyAnnotation, ConvertError> {
    let parts: Vec<&str> = tuple.split(',').collect();
    if parts.len() < 2 {
        return Err(ConvertError::InvalidRubyTag(tuple.to_string()));
    }

    let parent = parts[0].trim();
    let ruby_raw = parts[1].trim();
    if parent.is_empty() || ruby_raw.is_empty() {
        return Err(ConvertError::InvalidRubyTag(tuple.to_string()));
    }

    let start_ms = parts.get(2).map_or(Ok(None), |slot| parse_time_slot(slot))?;
    let end_ms = parts.get(3).map_or(Ok(None), |slot| parse_time_slot(slot))?;

    let (ruby, time_tags) = decode_timed_text(ruby_raw, start_ms.unwrap_or(0))?;

    Ok(RubyAnnotation {
        parent: parent.to_string(),
        ruby,
        start_ms,
        end_ms,
        time_tags,
    })
}

/// 将一条振假名记录编码回元组文本。
///
/// 只有结束时间时，开始时间的槽位留空占位；两个时间都缺省时不输出槽位。
///
/// # Errors
///
/// - 基底或读音为空时返回 [`ConvertError::InvalidRubyTag`]。
/// - 存在负的时间戳时返回 [`ConvertError::InvalidTimestamp`]。
pub fn encode_ruby(ruby: &RubyAnnotation) -> Result<String, ConvertError> {
    if ruby.parent.trim().is_empty() || ruby.ruby.trim().is_empty() {
        return Err(ConvertError::InvalidRubyTag(format!(
            "{},{}",
            ruby.parent, ruby.ruby
        )));
    }

    let mut tuple = String::new();
    tuple.push_str(&ruby.parent);
    tuple.push(',');
    tuple.push_str(&encode_timed_text(&ruby.ruby, &ruby.time_tags)?);

    match (ruby.start_ms, ruby.end_ms) {
        (None, None) => {}
        (Some(start_ms), None) => {
            tuple.push(',');
            tuple.push_str(&format_time_tag(start_ms, TimeTagMode::Line)?);
        }
        (start_ms, Some(end_ms)) => {
            tuple.push(',');
            if let Some(start_ms) = start_ms {
                tuple.push_str(&format_time_tag(start_ms, TimeTagMode::Line)?);
            }
            tuple.push(',');
            tuple.push_str(&format_time_tag(end_ms, TimeTagMode::Line)?);
        }
    }

    Ok(tuple)
}
