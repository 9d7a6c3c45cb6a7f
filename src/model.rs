//! # 歌词数据模型
//!
//! 该模块定义了歌词行、逐字时间标签和振假名注音的结构化表示。
//! 逐字时间信息不内嵌在文本中，而是以 [`TimeTagMap`] 的形式
//! 挂在纯文本旁边，通过字符位置与文本关联。

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// 表示时间点落在字符的哪一侧。
///
/// `Start` 表示时间从该字符开始，`End` 表示时间在该字符之后结束。
/// 同一偏移量上 `Start` 排在 `End` 之前，与扫描时先开后合的顺序一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Edge {
    /// 计时从该字符开始。
    Start,
    /// 计时在该字符之后结束。
    End,
}

/// 文本中一个零宽度的时间锚点。
///
/// 偏移量以字符数计。一个字符上的 `Start` 和 `End` 是两个不同的键，
/// 因此一个单字词可以同时携带开始和结束两个时间标签。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TextIndex {
    /// 字符偏移量。
    pub offset: usize,
    /// 锚点在字符的哪一侧。
    pub edge: Edge,
}

impl TextIndex {
    /// 创建一个位于 `offset` 处字符起始侧的锚点。
    #[must_use]
    pub const fn start(offset: usize) -> Self {
        Self {
            offset,
            edge: Edge::Start,
        }
    }

    /// 创建一个位于 `offset` 处字符结束侧的锚点。
    #[must_use]
    pub const fn end(offset: usize) -> Self {
        Self {
            offset,
            edge: Edge::End,
        }
    }

    /// 将锚点投影为字符间隙的插入位置。
    ///
    /// `Start` 在字符之前插入，`End` 在字符之后插入。
    /// 生成器据此将时间标签拼回纯文本。
    #[must_use]
    pub const fn to_insertion_offset(self) -> usize {
        match self.edge {
            Edge::Start => self.offset,
            Edge::End => self.offset + 1,
        }
    }
}

/// 从文本锚点到毫秒时间戳的有序映射。
///
/// 键唯一且有序，插入顺序无关；键冲突时保留先写入的值。
pub type TimeTagMap = BTreeMap<TextIndex, i64>;

/// 一行解码后的歌词。
///
/// 一行歌词可以有多个起始时间（例如重复出现的副歌），
/// `time_tags` 的偏移量始终相对于 `text` 的字符位置。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LrcLine {
    /// 去除所有时间标签后的纯文本。
    pub text: String,
    /// 行起始时间（毫秒），按出现顺序排列。
    pub start_times: Vec<i64>,
    /// 逐字时间标签。
    pub time_tags: TimeTagMap,
}

/// 一条振假名（注音）记录。
///
/// `ruby` 是 `parent` 的读音文本，可以独立计时；`parent` 本身不带时间标签。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubyAnnotation {
    /// 被注音的基底文本。
    pub parent: String,
    /// 注音文本。
    pub ruby: String,
    /// 注音开始生效的时间（毫秒）。
    pub start_ms: Option<i64>,
    /// 注音停止生效的时间（毫秒）。
    pub end_ms: Option<i64>,
    /// 相对于 `ruby` 文本的逐字时间标签。
    pub time_tags: TimeTagMap,
}

/// 解析一份完整 LRC/KAR 文档得到的结构化数据。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedLrcData {
    /// 解析出的歌词行。
    pub lines: Vec<LrcLine>,
    /// 解析出的振假名记录。
    pub rubies: Vec<RubyAnnotation>,
    /// 文件头部的元数据标签，例如 `[ti:歌曲标题]`。
    pub raw_metadata: HashMap<String, Vec<String>>,
    /// 解析过程中产生的警告信息。
    pub warnings: Vec<String>,
}
