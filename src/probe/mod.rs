//! 探测模块：对 URL 发起真实协议请求，判断其支持的服务类型
//!
//! 每个探测器独立容错：任何失败（网络错误、超时、响应不匹配）
//! 都折叠为 [`ProbeOutcome`] 中的否定结果，不会向调用方传播。

pub mod ogcapi;
pub mod ows;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::{GeoResult, GeolinksError};
use crate::rule::LinkProtocol;

pub use self::ogcapi::{OgcApiKind, OgcApiProbe};
pub use self::ows::{OwsProbe, OwsService};

/// 单次探测结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// 端点确认支持该协议
    Identified(LinkProtocol),
    /// 端点有响应，但不是该协议
    NoMatch(String),
    /// 请求失败（连接、超时、状态码）
    TransportError(String),
}

impl ProbeOutcome {
    /// 识别出的协议，否定结果返回 None
    pub fn protocol(&self) -> Option<LinkProtocol> {
        match self {
            ProbeOutcome::Identified(protocol) => Some(*protocol),
            _ => None,
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Identified(protocol) => write!(f, "identified {}", protocol),
            ProbeOutcome::NoMatch(reason) => write!(f, "no match: {}", reason),
            ProbeOutcome::TransportError(reason) => write!(f, "transport error: {}", reason),
        }
    }
}

/// 协议探测器
#[async_trait]
pub trait ServiceProbe: Send + Sync {
    /// 该探测器可识别的协议
    fn protocol(&self) -> LinkProtocol;

    /// 对 URL 发起一次探测，不重试
    async fn probe(&self, client: &Client, url: &Url) -> ProbeOutcome;
}

/// 默认探测器列表（顺序即探测顺序）
pub fn default_probes() -> Vec<Arc<dyn ServiceProbe>> {
    vec![
        Arc::new(OwsProbe::new(OwsService::Wms)),
        Arc::new(OwsProbe::new(OwsService::Wmts)),
        Arc::new(OwsProbe::new(OwsService::Wps)),
        Arc::new(OwsProbe::new(OwsService::Wfs)),
        Arc::new(OwsProbe::new(OwsService::Csw)),
        Arc::new(OwsProbe::new(OwsService::Wcs)),
        Arc::new(OwsProbe::new(OwsService::Sos)),
        Arc::new(OgcApiProbe::new(OgcApiKind::Records)),
        Arc::new(OgcApiProbe::new(OgcApiKind::Features)),
        Arc::new(OgcApiProbe::new(OgcApiKind::Coverages)),
    ]
}

/// 单次探测响应体的最大字节数
pub const MAX_RESPONSE_BYTES: usize = 8 * 1024 * 1024;

/// 发送 GET 请求并读取响应体，非 2xx 状态视为失败
pub(crate) async fn fetch_text(client: &Client, url: Url, accept: Option<&str>) -> GeoResult<String> {
    fetch_text_limited(client, url, accept, MAX_RESPONSE_BYTES).await
}

/// 同 [`fetch_text`]，响应体超过 `limit` 字节即中止读取
async fn fetch_text_limited(client: &Client, url: Url, accept: Option<&str>, limit: usize) -> GeoResult<String> {
    let mut request = client.get(url.clone());
    if let Some(accept) = accept {
        request = request.header(reqwest::header::ACCEPT, accept);
    }

    let mut response = request.send().await?;
    if !response.status().is_success() {
        return Err(GeolinksError::StatusError(format!(
            "URL {} 返回状态码 {}",
            url,
            response.status()
        )));
    }

    let too_large = || GeolinksError::ResponseTooLarge(format!("URL {} 响应体超过 {} 字节", url, limit));
    if response.content_length().is_some_and(|len| len > limit as u64) {
        return Err(too_large());
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if body.len() + chunk.len() > limit {
            return Err(too_large());
        }
        body.extend_from_slice(&chunk);
    }

    Ok(String::from_utf8_lossy(&body).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn serve_body(body: Vec<u8>) -> (MockServer, Url) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/big"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
            .mount(&server)
            .await;
        let url = Url::parse(&format!("{}/big", server.uri())).unwrap();
        (server, url)
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let (_server, url) = serve_body(vec![b'x'; 4096]).await;

        let result = fetch_text_limited(&Client::new(), url, None, 1024).await;
        assert!(matches!(result, Err(GeolinksError::ResponseTooLarge(_))));
    }

    #[tokio::test]
    async fn test_body_within_limit_is_read() {
        let (_server, url) = serve_body(b"<WMS_Capabilities/>".to_vec()).await;

        let body = fetch_text_limited(&Client::new(), url.clone(), None, 1024).await.unwrap();
        assert_eq!(body, "<WMS_Capabilities/>");
        assert_eq!(fetch_text(&Client::new(), url, None).await.unwrap(), "<WMS_Capabilities/>");
    }

    #[test]
    fn test_default_probe_order() {
        let order: Vec<LinkProtocol> = default_probes().iter().map(|probe| probe.protocol()).collect();
        assert_eq!(
            order,
            vec![
                LinkProtocol::OgcWms,
                LinkProtocol::OgcWmts,
                LinkProtocol::OgcWps,
                LinkProtocol::OgcWfs,
                LinkProtocol::OgcCsw,
                LinkProtocol::OgcWcs,
                LinkProtocol::OgcSos,
                LinkProtocol::OgcApiRecords,
                LinkProtocol::OgcApiFeatures,
                LinkProtocol::OgcApiCoverages,
            ]
        );
    }

    #[test]
    fn test_outcome_protocol() {
        assert_eq!(ProbeOutcome::Identified(LinkProtocol::OgcSos).protocol(), Some(LinkProtocol::OgcSos));
        assert_eq!(ProbeOutcome::NoMatch("x".into()).protocol(), None);
        assert_eq!(ProbeOutcome::TransportError("x".into()).protocol(), None);
    }
}
