//! 规则模块：协议标签、规则数据模型与内置规则表
pub mod model;
pub mod table;

// 导出核心接口
pub use self::model::{LinkProtocol, NeedleSet, Rule, RuleCondition, SniffResult};
pub use self::table::BUILTIN_RULES;
