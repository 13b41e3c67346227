//! 内置启发式规则表
//! 按声明顺序求值，先命中者优先（例如 OGC 服务参数优先于通用文件后缀）

use super::model::{LinkProtocol, NeedleSet, Rule, RuleCondition};
use crate::matcher::MatchPosition::{self, Any, End};

const fn rule(needles: &'static [&'static str], position: MatchPosition, protocol: LinkProtocol) -> Rule {
    Rule {
        condition: RuleCondition::Needles(NeedleSet::new(needles, position)),
        protocol,
    }
}

// 人口普查局 TIGER 数据以 zip 打包的 shapefile 发布
const TIGER_SHAPEFILE: &[NeedleSet] = &[
    NeedleSet::new(&["census.gov/geo/tiger"], Any),
    NeedleSet::new(&["zip"], End),
];

/// 内置规则表（顺序即优先级）
pub static BUILTIN_RULES: &[Rule] = &[
    rule(&["service=CSW", "request=GetRecords"], Any, LinkProtocol::OgcCsw),
    rule(&["service=SOS", "request=GetObservation"], Any, LinkProtocol::OgcSos),
    rule(&["service=WCS", "request=GetCoverage"], Any, LinkProtocol::OgcWcs),
    rule(&["service=WFS", "request=GetFeature"], Any, LinkProtocol::OgcWfs),
    rule(&["service=WMS", "request=GetMap"], Any, LinkProtocol::OgcWms),
    rule(&["service=WPS", "request=Execute"], Any, LinkProtocol::OgcWps),
    rule(&["arcims"], Any, LinkProtocol::EsriArcIms),
    rule(&["arcgis"], Any, LinkProtocol::EsriArcGis),
    rule(&["mpk"], End, LinkProtocol::EsriMpk),
    rule(&["opendap"], Any, LinkProtocol::Opendap),
    rule(&["ncss"], Any, LinkProtocol::UnidataNcss),
    rule(&["cdmremote"], Any, LinkProtocol::UnidataCdm),
    rule(&["gml"], End, LinkProtocol::OgcGml),
    rule(&["htm", "html", "shtml"], End, LinkProtocol::WwwLink),
    Rule {
        condition: RuleCondition::AllOf(TIGER_SHAPEFILE),
        protocol: LinkProtocol::EsriShapefile,
    },
    rule(&["7z", "bz2", "gz", "rar", "tar.gz", "tgz", "zip"], End, LinkProtocol::WwwDownload),
    rule(&["kml", "kmz"], End, LinkProtocol::OgcKml),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order() {
        let order: Vec<&str> = BUILTIN_RULES.iter().map(|rule| rule.protocol.as_str()).collect();
        assert_eq!(
            order,
            vec![
                "OGC:CSW", "OGC:SOS", "OGC:WCS", "OGC:WFS", "OGC:WMS", "OGC:WPS",
                "ESRI:ArcIMS", "ESRI:ArcGIS", "ESRI:MPK", "OPeNDAP:OPeNDAP",
                "UNIDATA:NCSS", "UNIDATA:CDM", "OGC:GML", "WWW:LINK",
                "ESRI:SHAPEFILE", "WWW:DOWNLOAD", "OGC:KML",
            ]
        );
    }

    #[test]
    fn test_shapefile_precedes_download() {
        let shapefile = BUILTIN_RULES
            .iter()
            .position(|rule| rule.protocol == LinkProtocol::EsriShapefile)
            .unwrap();
        let download = BUILTIN_RULES
            .iter()
            .position(|rule| rule.protocol == LinkProtocol::WwwDownload)
            .unwrap();
        assert!(shapefile < download);
    }
}
