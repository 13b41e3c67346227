//! geolinks - 地理空间服务链接类型识别工具
//!
//! 依次使用启发式规则匹配 URL，得出 `OGC:WMS`、`ESRI:ArcGIS`、`WWW:DOWNLOAD`
//! 等协议标签；规则未命中时可回退到真实协议探测。

// 导出全局错误类型
pub use self::error::{GeolinksError, GeoResult};

// 导出配置模块
pub use self::config::{GlobalConfig, ConfigManager, CustomConfigBuilder};

// 导出匹配模块核心接口
pub use self::matcher::{inurl, MatchPosition};

// 导出规则模块核心接口
pub use self::rule::{LinkProtocol, NeedleSet, Rule, RuleCondition, SniffResult, BUILTIN_RULES};

// 导出探测模块核心接口
pub use self::probe::{
    default_probes, OgcApiKind, OgcApiProbe, OwsProbe, OwsService, ProbeOutcome, ServiceProbe,
};

// 导出检测模块核心接口
pub use self::detector::{
    LinkSniffer,
    init_sniffer,
    init_sniffer_with_config,
    match_rule,
    sniff_link,
    sniff_link_extended,
};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod matcher;
pub mod rule;
pub mod probe;
pub mod utils;
pub mod detector;

/// 库版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 库名称
pub const NAME: &str = env!("CARGO_PKG_NAME");
