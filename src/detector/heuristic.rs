//! 启发式识别：依次用内置规则表匹配 URL，先命中者胜出
use tracing::{debug, info};

use crate::rule::{LinkProtocol, Rule, BUILTIN_RULES};

/// 返回首条命中的内置规则
pub fn match_rule(url: &str) -> Option<&'static Rule> {
    let link = url.trim();
    BUILTIN_RULES.iter().find(|rule| rule.matches(link))
}

/// 启发式识别链接类型，未命中时返回 None
pub fn sniff_link(url: &str) -> Option<LinkProtocol> {
    match match_rule(url) {
        Some(rule) => {
            debug!("规则命中：URL={}，协议={}", url.trim(), rule.protocol);
            Some(rule.protocol)
        }
        None => {
            info!("未检测到链接类型（no link type detected）：{}", url.trim());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ogc_service_params() {
        assert_eq!(sniff_link("http://foo.org/wms?service=WMS&request=GetMap"), Some(LinkProtocol::OgcWms));
        assert_eq!(sniff_link("http://foo.org/csw?service=CSW&version=2.0.2"), Some(LinkProtocol::OgcCsw));
        assert_eq!(sniff_link("http://foo.org/sos?request=GetObservation"), Some(LinkProtocol::OgcSos));
        assert_eq!(sniff_link("http://foo.org/wcs?request=GetCoverage"), Some(LinkProtocol::OgcWcs));
        assert_eq!(sniff_link("http://foo.org/ows?service=WFS"), Some(LinkProtocol::OgcWfs));
        assert_eq!(sniff_link("http://foo.org/wps?request=Execute"), Some(LinkProtocol::OgcWps));
    }

    #[test]
    fn test_csw_wins_over_lower_rules() {
        // 同时满足 CSW、WMS、ArcGIS、下载后缀，规则 1 优先
        let url = "http://arcgis.example.org/ows?service=CSW&request=GetMap&f=data.zip";
        assert_eq!(sniff_link(url), Some(LinkProtocol::OgcCsw));
    }

    #[test]
    fn test_file_extensions() {
        assert_eq!(sniff_link("http://foo.org/data.kmz"), Some(LinkProtocol::OgcKml));
        assert_eq!(sniff_link("http://foo.org/data.mpk"), Some(LinkProtocol::EsriMpk));
        assert_eq!(sniff_link("http://foo.org/archive.tar.gz"), Some(LinkProtocol::WwwDownload));
        assert_eq!(sniff_link("http://foo.org/feature.gml"), Some(LinkProtocol::OgcGml));
        assert_eq!(sniff_link("http://foo.org/index.html"), Some(LinkProtocol::WwwLink));
    }

    #[test]
    fn test_tiger_shapefile() {
        assert_eq!(
            sniff_link("http://census.gov/geo/tiger/data.zip"),
            Some(LinkProtocol::EsriShapefile)
        );
        assert_eq!(sniff_link("http://foo.org/data.zip"), Some(LinkProtocol::WwwDownload));
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let upper = sniff_link("HTTP://X/SERVICE=WMS&REQUEST=GETMAP");
        let lower = sniff_link("http://x/service=wms&request=getmap");
        assert_eq!(upper, lower);
        assert_eq!(upper, Some(LinkProtocol::OgcWms));
        assert_eq!(sniff_link("   http://foo.org/data.mpk \n"), Some(LinkProtocol::EsriMpk));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(sniff_link("http://foo.org/unknown-resource"), None);
        assert_eq!(sniff_link(""), None);
        assert!(match_rule("http://foo.org/unknown-resource").is_none());
    }

    #[test]
    fn test_idempotent() {
        let url = "http://services.arcgisonline.com/ArcGIS/rest/services";
        assert_eq!(sniff_link(url), sniff_link(url));
        assert_eq!(sniff_link(url), Some(LinkProtocol::EsriArcGis));
    }
}
