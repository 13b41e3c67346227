//! 匹配模块：大小写不敏感的子串匹配
pub mod inurl;

pub use self::inurl::{inurl, MatchPosition};
