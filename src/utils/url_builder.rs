//! 探测请求URL构造工具
//! OWS GetCapabilities 请求与 OGC API conformance 请求的地址拼接

use url::Url;

use crate::error::{GeoResult, GeolinksError};

// 由探测请求覆盖的 OWS 查询参数（不区分大小写）
const OWS_OVERRIDDEN_KEYS: [&str; 3] = ["service", "version", "request"];

/// URL构造工具
pub struct UrlBuilder;

impl UrlBuilder {
    /// 解析待探测的目标地址
    pub fn parse_target(link: &str) -> GeoResult<Url> {
        Ok(Url::parse(link)?)
    }

    /// 构造 GetCapabilities 请求地址
    /// 保留原有查询参数，同名（不区分大小写）的 service/version/request 被替换
    pub fn capabilities_url(base: &Url, service: &str, version: &str) -> Url {
        let kept: Vec<(String, String)> = base
            .query_pairs()
            .filter(|(key, _)| !OWS_OVERRIDDEN_KEYS.iter().any(|k| key.eq_ignore_ascii_case(k)))
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        let mut url = base.clone();
        url.set_query(None);
        url.set_fragment(None);
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &kept {
                pairs.append_pair(key, value);
            }
            pairs
                .append_pair("service", service)
                .append_pair("version", version)
                .append_pair("request", "GetCapabilities");
        }
        url
    }

    /// 构造 OGC API conformance 请求地址（丢弃原查询参数，追加 f=json）
    pub fn conformance_url(base: &Url) -> GeoResult<Url> {
        let mut url = base.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| GeolinksError::InvalidInput(format!("URL不支持路径拼接：{}", base)))?
            .pop_if_empty()
            .push("conformance");
        url.query_pairs_mut().append_pair("f", "json");
        Ok(url)
    }
}
