//! # LRC Processor: A Parser and Generator for LRC/KAR Karaoke Lyrics
//!
//! This crate provides tools for converting between time-annotated lyric text
//! (LRC files and the KAR dialect with ruby annotations) and a structured
//! representation: plain text plus a precise mapping from character positions
//! to millisecond timestamps.
//!
//! Two tag flavors are supported, sharing the same numeric grammar:
//! - **Line time tags** `[mm:ss.ff]` mark when a whole line begins. A line may
//!   carry several of them (a repeated chorus starts at several positions).
//! - **Word time tags** `<mm:ss.ff>` mark timing boundaries inside a line,
//!   relative to the line's start time.
//!
//! The decoder is deliberately forgiving: real-world lyric files are
//! hand-edited, so a line that does not match the grammar degrades to plain
//! untimed text instead of failing, and a single broken ruby record only
//! produces a warning for the rest of the document.
//!
//! All operations are pure functions over their inputs. The compiled tag
//! grammars are process-wide immutable singletons, so decoding and encoding
//! may run on any number of threads without coordination.
//!
//! ## Examples
//!
//! ```rust
//! use lrc_processor::{generate_lrc, parse_lrc, TextIndex};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let content = "[ti:Example]\n[01:00.00] <00:00.04> Lyric <00:00.16>\n";
//!     let data = parse_lrc(content)?;
//!
//!     assert_eq!(data.lines.len(), 1);
//!     let line = &data.lines[0];
//!     assert_eq!(line.text, "Lyric");
//!     assert_eq!(line.start_times, vec![60000]);
//!     // Word tags are resolved against the line start time.
//!     assert_eq!(line.time_tags[&TextIndex::start(0)], 60040);
//!     assert_eq!(line.time_tags[&TextIndex::end(4)], 60160);
//!
//!     let generated = generate_lrc(&data)?;
//!     assert!(generated.contains("[01:00.00] <01:00.04>Lyric<01:00.16>"));
//!     Ok(())
//! }
//! ```

pub mod document;
pub mod error;
pub mod line;
pub mod model;
pub mod ruby;
pub mod start_time;
pub mod time_tag;
pub mod timed_text;

pub use document::{generate_lrc, parse_lrc};
pub use error::ConvertError;
pub use line::{can_decode_line, decode_line, encode_line};
pub use model::{Edge, LrcLine, ParsedLrcData, RubyAnnotation, TextIndex, TimeTagMap};
pub use ruby::{decode_ruby, encode_ruby};
pub use start_time::{join_start_times, split_start_times};
pub use time_tag::{TimeTagMode, format_time_tag, parse_time_tag};
pub use timed_text::{decode_timed_text, encode_timed_text};
