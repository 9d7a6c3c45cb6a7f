//! # 单行歌词的解码与编码
//!
//! 组合行起始时间提取和行内逐字标签编解码，构成一行歌词的完整转换。
//! 格式不正确的行不报错，而是退化为未计时的纯文本，
//! 因为实际的歌词文件经常是手工编辑、不完全符合格式的。

use crate::error::ConvertError;
use crate::model::{LrcLine, TimeTagMap};
use crate::start_time::{join_start_times, split_start_times};
use crate::timed_text::{decode_timed_text, encode_timed_text};

/// 判断一行文本是否值得送入完整的解码流程。
///
/// 这是一个廉价的预过滤谓词，批量处理时可以先行剔除空行。
#[must_use]
pub fn can_decode_line(line: &str) -> bool {
    !line.trim().is_empty()
}

/// 解码一行原始 LRC 文本。
///
/// 只有当行首恰好有一个起始时间时才解析逐字时间标签。
/// 行首有多个起始时间时，逐字标签可能与其中某些起始时间矛盾
/// （LRC 没有官方规范定义这种情况）；完全没有起始时间时，
/// 类似 `Every <00:07.56> night` 的行里第一个词拿不到时间。
/// 这两种情况都按保守的做法处理：跳过逐字标签的解析，
/// 把去掉行首标签后的文本原样返回。
///
/// # Errors
///
/// 标签中的数字分组超出 `i64` 可表示范围时返回 [`ConvertError::ParseInt`]。
pub fn decode_line(line: &str) -> Result<LrcLine, ConvertError> {
    let (start_times, raw_text) = split_start_times(line)?;

    if start_times.len() != 1 {
        return Ok(LrcLine {
            text: raw_text,
            start_times,
            time_tags: TimeTagMap::new(),
        });
    }

    let (text, time_tags) = decode_timed_text(&raw_text, start_times[0])?;

    Ok(LrcLine {
        text,
        start_times,
        time_tags,
    })
}

/// 将一行歌词编码回 LRC 文本。
///
/// 先把逐字标签拼回文本，再在行首加上所有起始时间标签。
///
/// # Errors
///
/// - 该行没有起始时间时返回 [`ConvertError::MissingStartTime`]。
/// - 文本自身含行时间标签时返回 [`ConvertError::EmbeddedLineTag`]。
/// - 存在负的时间戳时返回 [`ConvertError::InvalidTimestamp`]。
pub fn encode_line(line: &LrcLine) -> Result<String, ConvertError> {
    let timed_text = encode_timed_text(&line.text, &line.time_tags)?;
    join_start_times(&line.start_times, &timed_text)
}
