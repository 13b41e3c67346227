//! OWS 能力文档探测（WMS/WMTS/WPS/WFS/CSW/WCS/SOS）
//! 发起 GetCapabilities 请求，按响应根元素判断服务类型

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::{fetch_text, ProbeOutcome, ServiceProbe};
use crate::rule::LinkProtocol;
use crate::utils::{parse_root_element, RootElement, UrlBuilder};

/// OWS 服务类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwsService {
    Wms,
    Wmts,
    Wps,
    Wfs,
    Csw,
    Wcs,
    Sos,
}

impl OwsService {
    /// service 查询参数取值
    pub fn code(&self) -> &'static str {
        match self {
            OwsService::Wms => "WMS",
            OwsService::Wmts => "WMTS",
            OwsService::Wps => "WPS",
            OwsService::Wfs => "WFS",
            OwsService::Csw => "CSW",
            OwsService::Wcs => "WCS",
            OwsService::Sos => "SOS",
        }
    }

    /// 默认请求版本
    pub fn default_version(&self) -> &'static str {
        match self {
            OwsService::Wms => "1.3.0",
            OwsService::Wmts => "1.0.0",
            OwsService::Wps => "1.0.0",
            OwsService::Wfs => "1.1.0",
            OwsService::Csw => "2.0.2",
            OwsService::Wcs => "1.1.0",
            OwsService::Sos => "1.0.0",
        }
    }

    pub fn protocol(&self) -> LinkProtocol {
        match self {
            OwsService::Wms => LinkProtocol::OgcWms,
            OwsService::Wmts => LinkProtocol::OgcWmts,
            OwsService::Wps => LinkProtocol::OgcWps,
            OwsService::Wfs => LinkProtocol::OgcWfs,
            OwsService::Csw => LinkProtocol::OgcCsw,
            OwsService::Wcs => LinkProtocol::OgcWcs,
            OwsService::Sos => LinkProtocol::OgcSos,
        }
    }

    /// 根元素是否为该服务的能力文档
    pub fn accepts(&self, root: &RootElement) -> bool {
        let name = root.local_name.as_str();
        match self {
            OwsService::Wms => matches!(name, "WMS_Capabilities" | "WMT_MS_Capabilities"),
            OwsService::Wmts => name == "Capabilities" && root.namespace_contains("opengis.net/wmts"),
            OwsService::Wps => name == "Capabilities" && root.namespace_contains("opengis.net/wps"),
            OwsService::Wfs => name == "WFS_Capabilities",
            OwsService::Csw => name == "Capabilities" && root.namespace_contains("opengis.net/cat/csw"),
            OwsService::Wcs => {
                name == "WCS_Capabilities"
                    || (name == "Capabilities" && root.namespace_contains("opengis.net/wcs"))
            }
            OwsService::Sos => name == "Capabilities" && root.namespace_contains("opengis.net/sos"),
        }
    }
}

/// OWS GetCapabilities 探测器
#[derive(Debug, Clone)]
pub struct OwsProbe {
    service: OwsService,
    version: String,
}

impl OwsProbe {
    pub fn new(service: OwsService) -> Self {
        Self {
            service,
            version: service.default_version().to_string(),
        }
    }

    /// 指定请求版本
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn service(&self) -> OwsService {
        self.service
    }

    /// 判定能力文档响应体
    pub fn evaluate(&self, body: &str) -> ProbeOutcome {
        match parse_root_element(body) {
            Ok(Some(root)) if root.is_exception_report() => {
                ProbeOutcome::NoMatch(format!("服务返回异常报告：{}", root))
            }
            Ok(Some(root)) if self.service.accepts(&root) => {
                ProbeOutcome::Identified(self.service.protocol())
            }
            Ok(Some(root)) => ProbeOutcome::NoMatch(format!("根元素不匹配：{}", root)),
            Ok(None) => ProbeOutcome::NoMatch("响应中没有XML元素".to_string()),
            Err(e) => ProbeOutcome::NoMatch(e.to_string()),
        }
    }
}

#[async_trait]
impl ServiceProbe for OwsProbe {
    fn protocol(&self) -> LinkProtocol {
        self.service.protocol()
    }

    async fn probe(&self, client: &Client, url: &Url) -> ProbeOutcome {
        let request_url = UrlBuilder::capabilities_url(url, self.service.code(), &self.version);
        debug!("发起 {} GetCapabilities 探测：{}", self.service.code(), request_url);

        match fetch_text(client, request_url, None).await {
            Ok(body) => self.evaluate(&body),
            Err(e) => ProbeOutcome::TransportError(e.to_string()),
        }
    }
}
