//! 子串匹配器
//! 判断一组待查子串（needle）中是否至少有一个命中 URL（haystack）

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::GeolinksError;

/// 匹配位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPosition {
    #[default]
    Any,   // 任意位置包含
    Begin, // 前缀匹配
    End,   // 后缀匹配
}

impl MatchPosition {
    /// 对已小写的 haystack 与 needle 进行单次比较
    fn matches(self, haystack: &str, needle: &str) -> bool {
        match self {
            MatchPosition::Any => haystack.contains(needle),
            MatchPosition::Begin => haystack.starts_with(needle),
            MatchPosition::End => haystack.ends_with(needle),
        }
    }

    /// 位置描述
    pub fn describe(&self) -> &'static str {
        match self {
            MatchPosition::Any => "any",
            MatchPosition::Begin => "begin",
            MatchPosition::End => "end",
        }
    }
}

impl fmt::Display for MatchPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

impl FromStr for MatchPosition {
    type Err = GeolinksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" => Ok(MatchPosition::Any),
            "begin" => Ok(MatchPosition::Begin),
            "end" => Ok(MatchPosition::End),
            other => Err(GeolinksError::InvalidInput(format!("未知匹配位置：{}", other))),
        }
    }
}

/// 大小写不敏感的子串匹配，任意一个 needle 命中即返回 true
///
/// needle 集合为空时返回 false
pub fn inurl(needles: &[&str], haystack: &str, position: MatchPosition) -> bool {
    let haystack = haystack.to_lowercase();

    needles
        .iter()
        .any(|needle| position.matches(&haystack, &needle.to_lowercase()))
}
