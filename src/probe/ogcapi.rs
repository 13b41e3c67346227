//! OGC API 探测（Records/Features/Coverages）
//! 读取 /conformance 声明，按一致性类 URI 判断服务类型

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::{fetch_text, ProbeOutcome, ServiceProbe};
use crate::error::GeoResult;
use crate::rule::LinkProtocol;
use crate::utils::UrlBuilder;

/// conformance 声明
#[derive(Debug, Deserialize)]
struct ConformanceDeclaration {
    #[serde(rename = "conformsTo", default)]
    conforms_to: Vec<String>,
}

impl ConformanceDeclaration {
    fn parse(body: &str) -> GeoResult<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

/// OGC API 类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OgcApiKind {
    Records,
    Features,
    Coverages,
}

impl OgcApiKind {
    /// 一致性类 URI 中的标识片段
    pub fn conformance_marker(&self) -> &'static str {
        match self {
            OgcApiKind::Records => "ogcapi-records-1/",
            OgcApiKind::Features => "ogcapi-features-1/",
            OgcApiKind::Coverages => "ogcapi-coverages-1/",
        }
    }

    pub fn protocol(&self) -> LinkProtocol {
        match self {
            OgcApiKind::Records => LinkProtocol::OgcApiRecords,
            OgcApiKind::Features => LinkProtocol::OgcApiFeatures,
            OgcApiKind::Coverages => LinkProtocol::OgcApiCoverages,
        }
    }
}

/// OGC API conformance 探测器
#[derive(Debug, Clone)]
pub struct OgcApiProbe {
    kind: OgcApiKind,
}

impl OgcApiProbe {
    pub fn new(kind: OgcApiKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> OgcApiKind {
        self.kind
    }

    /// 判定 conformance 响应体
    pub fn evaluate(&self, body: &str) -> ProbeOutcome {
        let declaration = match ConformanceDeclaration::parse(body) {
            Ok(declaration) => declaration,
            Err(e) => return ProbeOutcome::NoMatch(format!("conformance 解析失败：{}", e)),
        };

        let marker = self.kind.conformance_marker();
        if declaration.conforms_to.iter().any(|uri| uri.to_ascii_lowercase().contains(marker)) {
            ProbeOutcome::Identified(self.kind.protocol())
        } else {
            ProbeOutcome::NoMatch(format!(
                "{} 条一致性类中没有 {}",
                declaration.conforms_to.len(),
                marker
            ))
        }
    }
}

#[async_trait]
impl ServiceProbe for OgcApiProbe {
    fn protocol(&self) -> LinkProtocol {
        self.kind.protocol()
    }

    async fn probe(&self, client: &Client, url: &Url) -> ProbeOutcome {
        let request_url = match UrlBuilder::conformance_url(url) {
            Ok(request_url) => request_url,
            Err(e) => return ProbeOutcome::TransportError(e.to_string()),
        };
        debug!("发起 {} conformance 探测：{}", self.kind.protocol(), request_url);

        match fetch_text(client, request_url, Some("application/json")).await {
            Ok(body) => self.evaluate(&body),
            Err(e) => ProbeOutcome::TransportError(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PYGEOAPI_CONFORMANCE: &str = r#"{
        "conformsTo": [
            "http://www.opengis.net/spec/ogcapi-common-1/1.0/conf/core",
            "http://www.opengis.net/spec/ogcapi-features-1/1.0/conf/core",
            "http://www.opengis.net/spec/ogcapi-features-1/1.0/conf/geojson",
            "http://www.opengis.net/spec/ogcapi-records-1/1.0/conf/core"
        ]
    }"#;

    #[test]
    fn test_matches_conformance_classes() {
        assert_eq!(
            OgcApiProbe::new(OgcApiKind::Features).evaluate(PYGEOAPI_CONFORMANCE),
            ProbeOutcome::Identified(LinkProtocol::OgcApiFeatures)
        );
        assert_eq!(
            OgcApiProbe::new(OgcApiKind::Records).evaluate(PYGEOAPI_CONFORMANCE),
            ProbeOutcome::Identified(LinkProtocol::OgcApiRecords)
        );
        assert!(matches!(
            OgcApiProbe::new(OgcApiKind::Coverages).evaluate(PYGEOAPI_CONFORMANCE),
            ProbeOutcome::NoMatch(_)
        ));
    }

    #[test]
    fn test_invalid_body_is_no_match() {
        let probe = OgcApiProbe::new(OgcApiKind::Features);
        assert!(matches!(probe.evaluate("<html></html>"), ProbeOutcome::NoMatch(_)));
        assert!(matches!(probe.evaluate("{}"), ProbeOutcome::NoMatch(_)));
    }

    #[test]
    fn test_parse_declaration_error() {
        assert!(matches!(
            ConformanceDeclaration::parse("<html></html>"),
            Err(crate::error::GeolinksError::JsonError(_))
        ));
        assert_eq!(ConformanceDeclaration::parse("{}").unwrap().conforms_to.len(), 0);
    }
}
