//! # 行内逐字时间标签的编解码
//!
//! 解码把内嵌 `<mm:ss.ff>` 标签的文本拆成纯文本和位置到时间的映射，
//! 编码则把映射中的标签拼回纯文本。标签值相对于行起始时间，
//! 解码结果中存放的是加上行起始时间后的值。
//!
//! 词与标签之间的空白在解码时被规整：段落首尾的空白被剪掉，
//! 标签边界上出现过空白的地方在输出中折叠为一个空格。
//! 这种规整是有损的，编码再解码只保证得到等价的、重新规整过的结果。

use crate::error::ConvertError;
use crate::model::{TextIndex, TimeTagMap};
use crate::time_tag::{TimeTagMode, WORD_TIME_TAG_REGEX, captures_to_ms, format_time_tag};

/// 解码含逐字时间标签的文本。
///
/// 返回纯文本和逐字时间映射。每个标签至多产生一个映射项：
/// 标签后跟着词文本时产生该词的 `Start` 锚点，
/// 跟着空白或行尾时结束上一个词，产生它的 `End` 锚点。
/// 不含标签的文本原样返回，映射为空。
///
/// # Errors
///
/// 标签中的数字分组超出 `i64` 可表示范围时返回 [`ConvertError::ParseInt`]。
pub fn decode_timed_text(
    timed_text: &str,
    line_start_ms: i64,
) -> Result<(String, TimeTagMap), ConvertError> {
    let mut time_tags = TimeTagMap::new();
    if timed_text.is_empty() {
        return Ok((String::new(), time_tags));
    }

    let mut boundaries: Vec<(std::ops::Range<usize>, i64)> = Vec::new();
    for caps in WORD_TIME_TAG_REGEX.captures_iter(timed_text) {
        let whole = caps.get(0).expect("整体捕获组在正则匹配成功时必然存在");
        boundaries.push((whole.range(), line_start_ms + captures_to_ms(&caps)?));
    }

    if boundaries.is_empty() {
        return Ok((timed_text.to_string(), time_tags));
    }

    // 以标签为界切分出文本段；每段记录它后面那个标签的时间，
    // 最后一段（行尾）没有后继标签。
    let mut segments: Vec<(&str, Option<i64>)> = Vec::with_capacity(boundaries.len() + 1);
    let mut cursor = 0;
    for (range, tag_ms) in &boundaries {
        segments.push((&timed_text[cursor..range.start], Some(*tag_ms)));
        cursor = range.end;
    }
    segments.push((&timed_text[cursor..], None));

    let mut text = String::new();
    let mut text_chars = 0usize;
    let mut current_ms = line_start_ms;
    let mut word_open = false;
    let mut pending_space = false;

    for (i, (segment, next_ms)) in segments.iter().enumerate() {
        let trimmed = segment.trim();
        if trimmed.is_empty() {
            // 空白段是一个间隙，结束上一个打开的词
            if word_open {
                time_tags
                    .entry(TextIndex::end(text_chars - 1))
                    .or_insert(current_ms);
                word_open = false;
            }
            if !segment.is_empty() {
                pending_space = true;
            }
        } else {
            let leading_space = segment.starts_with(char::is_whitespace);
            if (pending_space || leading_space) && text_chars > 0 {
                text.push(' ');
                text_chars += 1;
            }
            // 第一个标签之前的文本没有可归属的时间，不产生锚点
            if i > 0 {
                time_tags
                    .entry(TextIndex::start(text_chars))
                    .or_insert(current_ms);
            }
            text.push_str(trimmed);
            text_chars += trimmed.chars().count();
            word_open = true;
            pending_space = segment.ends_with(char::is_whitespace);
        }

        if let Some(tag_ms) = next_ms {
            current_ms = *tag_ms;
        }
    }

    Ok((text, time_tags))
}

/// 将逐字时间映射编码回含 `<mm:ss.ff>` 标签的文本。
///
/// 映射本身有序，标签按插入位置从左到右追加到输出缓冲区，
/// 不对原文本做原地拼接。
///
/// # Errors
///
/// 映射中存在负的时间戳时返回 [`ConvertError::InvalidTimestamp`]。
pub fn encode_timed_text(text: &str, time_tags: &TimeTagMap) -> Result<String, ConvertError> {
    if time_tags.is_empty() {
        return Ok(text.to_string());
    }

    let chars: Vec<char> = text.chars().collect();
    let mut timed_text = String::with_capacity(text.len() + time_tags.len() * 12);
    let mut cursor = 0usize;

    for (index, &tag_ms) in time_tags {
        let gap = index.to_insertion_offset().min(chars.len());
        if gap > cursor {
            timed_text.extend(&chars[cursor..gap]);
            cursor = gap;
        }
        timed_text.push_str(&format_time_tag(tag_ms, TimeTagMode::Word)?);
    }
    timed_text.extend(&chars[cursor..]);

    Ok(timed_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(entries: &[(TextIndex, i64)]) -> TimeTagMap {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_decode_fully_tagged_line() {
        let (text, time_tags) =
            decode_timed_text("<00:17.97>帰<00:18.37>り<00:18.55>道<00:18.94>は<00:19.22>", 0)
                .unwrap();

        assert_eq!(text, "帰り道は");
        assert_eq!(
            time_tags,
            tags(&[
                (TextIndex::start(0), 17970),
                (TextIndex::start(1), 18370),
                (TextIndex::start(2), 18550),
                (TextIndex::start(3), 18940),
                (TextIndex::end(3), 19220),
            ])
        );
    }

    #[test]
    fn test_decode_adds_line_start_time() {
        // 逐字标签相对于行起始时间
        let (text, time_tags) = decode_timed_text(
            "<00:00.00>帰<00:01.00>り<00:02.00>道<00:03.00>は<00:04.00>",
            17000,
        )
        .unwrap();

        assert_eq!(text, "帰り道は");
        assert_eq!(
            time_tags,
            tags(&[
                (TextIndex::start(0), 17000),
                (TextIndex::start(1), 18000),
                (TextIndex::start(2), 19000),
                (TextIndex::start(3), 20000),
                (TextIndex::end(3), 21000),
            ])
        );
    }

    #[test]
    fn test_decode_word_wrapped_by_tags() {
        let (text, time_tags) = decode_timed_text("<00:00.04> Lyric <00:00.16>", 60000).unwrap();

        assert_eq!(text, "Lyric");
        assert_eq!(
            time_tags,
            tags(&[(TextIndex::start(0), 60040), (TextIndex::end(4), 60160)])
        );
    }

    #[test]
    fn test_decode_untagged_leading_text() {
        // 第一个标签之前的文本没有 Start 锚点
        let (text, time_tags) =
            decode_timed_text("帰<00:18.37>り<00:18.55>道<00:18.94>は<00:19.22>", 0).unwrap();

        assert_eq!(text, "帰り道は");
        assert_eq!(
            time_tags,
            tags(&[
                (TextIndex::start(1), 18370),
                (TextIndex::start(2), 18550),
                (TextIndex::start(3), 18940),
                (TextIndex::end(3), 19220),
            ])
        );
    }

    #[test]
    fn test_decode_unterminated_trailing_word() {
        // 行尾的词没有结束标签时不产生 End 锚点
        let (text, time_tags) =
            decode_timed_text("<00:17.97>帰<00:18.37>り<00:18.55>道<00:18.94>は", 0).unwrap();

        assert_eq!(text, "帰り道は");
        assert_eq!(
            time_tags,
            tags(&[
                (TextIndex::start(0), 17970),
                (TextIndex::start(1), 18370),
                (TextIndex::start(2), 18550),
                (TextIndex::start(3), 18940),
            ])
        );
    }

    #[test]
    fn test_decode_untagged_word_closed_by_tag() {
        let (text, time_tags) = decode_timed_text("Word<00:01.00>", 0).unwrap();

        assert_eq!(text, "Word");
        assert_eq!(time_tags, tags(&[(TextIndex::end(3), 1000)]));
    }

    #[test]
    fn test_decode_without_tags_is_verbatim() {
        let (text, time_tags) = decode_timed_text("帰り道は", 0).unwrap();
        assert_eq!(text, "帰り道は");
        assert!(time_tags.is_empty());

        // 无标签时不做任何空白规整
        let (text, time_tags) = decode_timed_text("  Hello   world ", 60000).unwrap();
        assert_eq!(text, "  Hello   world ");
        assert!(time_tags.is_empty());
    }

    #[test]
    fn test_decode_empty_input() {
        let (text, time_tags) = decode_timed_text("", 0).unwrap();
        assert_eq!(text, "");
        assert!(time_tags.is_empty());
    }

    #[test]
    fn test_decode_collapses_gap_whitespace() {
        let (text, time_tags) =
            decode_timed_text("Hello <00:01.00>  <00:02.00>  world", 0).unwrap();

        assert_eq!(text, "Hello world", "标签间的连续空白应折叠为一个空格");
        assert_eq!(
            time_tags,
            tags(&[(TextIndex::end(4), 1000), (TextIndex::start(6), 2000)])
        );
    }

    #[test]
    fn test_decode_space_after_tag() {
        let (text, time_tags) = decode_timed_text("Hello<00:01.00> world", 0).unwrap();

        assert_eq!(text, "Hello world");
        assert_eq!(time_tags, tags(&[(TextIndex::start(6), 1000)]));
    }

    #[test]
    fn test_decode_tag_inside_word_keeps_no_space() {
        let (text, time_tags) = decode_timed_text("A<00:01.00>B", 0).unwrap();

        assert_eq!(text, "AB");
        assert_eq!(time_tags, tags(&[(TextIndex::start(1), 1000)]));
    }

    #[test]
    fn test_decode_strips_surrounding_whitespace() {
        let (text, time_tags) =
            decode_timed_text(" <00:17.97>帰<00:18.37>り<00:18.55>道<00:18.94>は<00:19.22> ", 0)
                .unwrap();

        assert_eq!(text, "帰り道は");
        assert_eq!(
            time_tags,
            tags(&[
                (TextIndex::start(0), 17970),
                (TextIndex::start(1), 18370),
                (TextIndex::start(2), 18550),
                (TextIndex::start(3), 18940),
                (TextIndex::end(3), 19220),
            ])
        );
    }

    #[test]
    fn test_encode_fully_tagged_line() {
        let encoded = encode_timed_text(
            "帰り道は",
            &tags(&[
                (TextIndex::start(0), 17970),
                (TextIndex::start(1), 18370),
                (TextIndex::start(2), 18550),
                (TextIndex::start(3), 18940),
                (TextIndex::end(3), 19220),
            ]),
        )
        .unwrap();

        assert_eq!(encoded, "<00:17.97>帰<00:18.37>り<00:18.55>道<00:18.94>は<00:19.22>");
    }

    #[test]
    fn test_encode_partial_tags() {
        let encoded = encode_timed_text(
            "帰り道は",
            &tags(&[(TextIndex::start(1), 18370), (TextIndex::end(3), 19220)]),
        )
        .unwrap();

        assert_eq!(encoded, "帰<00:18.37>り道は<00:19.22>");
    }

    #[test]
    fn test_encode_empty_map_is_verbatim() {
        assert_eq!(encode_timed_text("帰り道は", &TimeTagMap::new()).unwrap(), "帰り道は");
        assert_eq!(encode_timed_text("", &TimeTagMap::new()).unwrap(), "");
    }

    #[test]
    fn test_encode_writes_absolute_times() {
        let encoded = encode_timed_text(
            "Lyric",
            &tags(&[(TextIndex::start(0), 60040), (TextIndex::end(4), 60160)]),
        )
        .unwrap();

        assert_eq!(encoded, "<01:00.04>Lyric<01:00.16>");
    }

    #[test]
    fn test_encode_rejects_negative_time() {
        let result = encode_timed_text("A", &tags(&[(TextIndex::start(0), -5)]));
        assert!(matches!(result, Err(ConvertError::InvalidTimestamp(-5))));
    }

    #[test]
    fn test_encode_then_decode_is_stable() {
        // 编码结果再解码（起始时间取 0）应还原出相同的文本和映射
        let text = "帰り道は";
        let time_tags = tags(&[
            (TextIndex::start(1), 18370),
            (TextIndex::start(2), 18550),
            (TextIndex::end(3), 19220),
        ]);

        let encoded = encode_timed_text(text, &time_tags).unwrap();
        let (decoded_text, decoded_tags) = decode_timed_text(&encoded, 0).unwrap();

        assert_eq!(decoded_text, text);
        assert_eq!(decoded_tags, time_tags);
    }
}
