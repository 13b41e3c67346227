//! 链接嗅探器：启发式规则优先，未命中时可回退到协议探测
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};

use super::heuristic::{match_rule, sniff_link};
use crate::config::GlobalConfig;
use crate::error::GeoResult;
use crate::probe::{default_probes, ProbeOutcome, ServiceProbe};
use crate::rule::{LinkProtocol, SniffResult};
use crate::utils::UrlBuilder;

/// 链接嗅探器
#[derive(Clone)]
pub struct LinkSniffer {
    client: Client,
    config: GlobalConfig,
    probes: Arc<Vec<Arc<dyn ServiceProbe>>>,
}

impl LinkSniffer {
    /// 创建嗅探器（默认探测器列表）
    pub fn new(config: GlobalConfig) -> GeoResult<Self> {
        Self::with_probes(config, default_probes())
    }

    /// 使用自定义探测器列表创建嗅探器，列表顺序即探测顺序
    pub fn with_probes(config: GlobalConfig, probes: Vec<Arc<dyn ServiceProbe>>) -> GeoResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            config,
            probes: Arc::new(probes),
        })
    }

    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    /// 仅使用启发式规则识别，不发起网络请求
    pub fn sniff_heuristic(&self, url: &str) -> Option<LinkProtocol> {
        sniff_link(url)
    }

    /// 识别链接类型
    ///
    /// - `extended`：规则未命中时依次探测各协议
    /// - `first`：探测模式下首个命中即返回；为 false 时收集全部命中协议
    pub async fn sniff(&self, url: &str, extended: bool, first: bool) -> SniffResult {
        let link = url.trim();
        if let Some(rule) = match_rule(link) {
            debug!("规则命中：URL={}，协议={}", link, rule.protocol);
            return SniffResult::Detected(rule.protocol);
        }

        let result = if extended {
            self.probe_all(link, first).await
        } else {
            SniffResult::NotDetected
        };
        if !result.is_detected() {
            info!("未检测到链接类型（no link type detected）：{}", link);
        }
        result
    }

    /// 按顺序执行全部探测器，单个探测失败不影响后续探测
    async fn probe_all(&self, link: &str, first: bool) -> SniffResult {
        let target = match UrlBuilder::parse_target(link) {
            Ok(target) => target,
            Err(e) => {
                warn!("URL无法解析，跳过协议探测：{}，错误：{}", link, e);
                return SniffResult::Multiple(Vec::new());
            }
        };

        let mut found = Vec::new();
        for probe in self.probes.iter() {
            match probe.probe(&self.client, &target).await {
                ProbeOutcome::Identified(protocol) => {
                    debug!("探测命中：URL={}，协议={}", target, protocol);
                    if first {
                        return SniffResult::Detected(protocol);
                    }
                    found.push(protocol);
                }
                ProbeOutcome::NoMatch(reason) => {
                    debug!("探测未命中：协议={}，原因={}", probe.protocol(), reason);
                }
                ProbeOutcome::TransportError(reason) => {
                    debug!("探测请求失败：协议={}，错误={}", probe.protocol(), reason);
                }
            }
        }

        if found.is_empty() {
            debug!("所有协议探测均未命中：{}", target);
        }
        SniffResult::from_collected(found)
    }
}

impl fmt::Debug for LinkSniffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let probes: Vec<&'static str> = self.probes.iter().map(|probe| probe.protocol().as_str()).collect();
        f.debug_struct("LinkSniffer")
            .field("config", &self.config)
            .field("probes", &probes)
            .finish()
    }
}
