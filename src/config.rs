//! 全局配置管理,存储所有可配置项

/// 默认 User-Agent
pub const DEFAULT_USER_AGENT: &str = concat!("geolinks/", env!("CARGO_PKG_VERSION"));

/// 全局配置
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    // 探测请求超时（单位：秒）
    pub http_timeout: u64,
    // 探测请求使用的 User-Agent
    pub user_agent: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            http_timeout: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> GlobalConfig {
        GlobalConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: GlobalConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GlobalConfig::default(),
        }
    }

    pub fn http_timeout(mut self, timeout: u64) -> Self {
        self.config.http_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> GlobalConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConfigManager::get_default();
        assert_eq!(config.http_timeout, 30);
        assert!(config.user_agent.starts_with("geolinks/"));
    }

    #[test]
    fn test_custom_builder() {
        let config = ConfigManager::custom()
            .http_timeout(5)
            .user_agent("geolinks-test/1.0")
            .build();

        assert_eq!(config.http_timeout, 5);
        assert_eq!(config.user_agent, "geolinks-test/1.0");
    }
}
