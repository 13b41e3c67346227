//! 检测模块：链接类型识别核心逻辑
pub mod global;
pub mod heuristic;
pub mod sniffer;

#[cfg(test)]
pub(crate) mod log_capture;

// 导出核心接口
pub use self::global::{init_sniffer, init_sniffer_with_config, sniff_link_extended};
pub use self::heuristic::{match_rule, sniff_link};
pub use self::sniffer::LinkSniffer;
