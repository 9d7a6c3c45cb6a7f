use thiserror::Error;

/// 定义歌词解析和生成过程中可能发生的各种错误。
#[derive(Error, Debug)]
pub enum ConvertError {
    /// 时间标签不符合所要求模式的语法。
    #[error("无效的时间标签格式，预期为 [01:00.00] 或 <01:00.00>，实际为: {0}")]
    MalformedTimeTag(String),
    /// 向格式化函数传入了负的毫秒数。
    #[error("时间戳不能为负: {0}")]
    InvalidTimestamp(i64),
    /// 生成歌词行时缺少行起始时间。
    #[error("缺少一个或多个行起始时间")]
    MissingStartTime,
    /// 歌词文本中混入了不允许出现的行时间标签。
    #[error("歌词文本不应包含行时间标签: {0}")]
    EmbeddedLineTag(String),
    /// 振假名标签的结构不符合预期。
    #[error("无效的振假名标签: {0}")]
    InvalidRubyTag(String),
    /// 整数解析错误。
    #[error("解析错误: {0}")]
    ParseInt(#[from] std::num::ParseIntError),
}
