//! 规则数据模型定义
//! 协议标签、启发式规则与识别结果，规则本身为 'static 不可变数据

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::GeolinksError;
use crate::matcher::{inurl, MatchPosition};

/// 协议标签（链接类型）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkProtocol {
    #[serde(rename = "OGC:CSW")]
    OgcCsw,
    #[serde(rename = "OGC:SOS")]
    OgcSos,
    #[serde(rename = "OGC:WCS")]
    OgcWcs,
    #[serde(rename = "OGC:WFS")]
    OgcWfs,
    #[serde(rename = "OGC:WMS")]
    OgcWms,
    #[serde(rename = "OGC:WMTS")]
    OgcWmts,
    #[serde(rename = "OGC:WPS")]
    OgcWps,
    #[serde(rename = "ESRI:ArcIMS")]
    EsriArcIms,
    #[serde(rename = "ESRI:ArcGIS")]
    EsriArcGis,
    #[serde(rename = "ESRI:MPK")]
    EsriMpk,
    #[serde(rename = "OPeNDAP:OPeNDAP")]
    Opendap,
    #[serde(rename = "UNIDATA:NCSS")]
    UnidataNcss,
    #[serde(rename = "UNIDATA:CDM")]
    UnidataCdm,
    #[serde(rename = "OGC:GML")]
    OgcGml,
    #[serde(rename = "WWW:LINK")]
    WwwLink,
    #[serde(rename = "ESRI:SHAPEFILE")]
    EsriShapefile,
    #[serde(rename = "WWW:DOWNLOAD")]
    WwwDownload,
    #[serde(rename = "OGC:KML")]
    OgcKml,
    #[serde(rename = "OGCAPI:records")]
    OgcApiRecords,
    #[serde(rename = "OGCAPI:features")]
    OgcApiFeatures,
    #[serde(rename = "OGCAPI:coverages")]
    OgcApiCoverages,
}

impl LinkProtocol {
    /// 全部协议标签
    pub const ALL: [LinkProtocol; 21] = [
        LinkProtocol::OgcCsw,
        LinkProtocol::OgcSos,
        LinkProtocol::OgcWcs,
        LinkProtocol::OgcWfs,
        LinkProtocol::OgcWms,
        LinkProtocol::OgcWmts,
        LinkProtocol::OgcWps,
        LinkProtocol::EsriArcIms,
        LinkProtocol::EsriArcGis,
        LinkProtocol::EsriMpk,
        LinkProtocol::Opendap,
        LinkProtocol::UnidataNcss,
        LinkProtocol::UnidataCdm,
        LinkProtocol::OgcGml,
        LinkProtocol::WwwLink,
        LinkProtocol::EsriShapefile,
        LinkProtocol::WwwDownload,
        LinkProtocol::OgcKml,
        LinkProtocol::OgcApiRecords,
        LinkProtocol::OgcApiFeatures,
        LinkProtocol::OgcApiCoverages,
    ];

    /// 标准标签字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkProtocol::OgcCsw => "OGC:CSW",
            LinkProtocol::OgcSos => "OGC:SOS",
            LinkProtocol::OgcWcs => "OGC:WCS",
            LinkProtocol::OgcWfs => "OGC:WFS",
            LinkProtocol::OgcWms => "OGC:WMS",
            LinkProtocol::OgcWmts => "OGC:WMTS",
            LinkProtocol::OgcWps => "OGC:WPS",
            LinkProtocol::EsriArcIms => "ESRI:ArcIMS",
            LinkProtocol::EsriArcGis => "ESRI:ArcGIS",
            LinkProtocol::EsriMpk => "ESRI:MPK",
            LinkProtocol::Opendap => "OPeNDAP:OPeNDAP",
            LinkProtocol::UnidataNcss => "UNIDATA:NCSS",
            LinkProtocol::UnidataCdm => "UNIDATA:CDM",
            LinkProtocol::OgcGml => "OGC:GML",
            LinkProtocol::WwwLink => "WWW:LINK",
            LinkProtocol::EsriShapefile => "ESRI:SHAPEFILE",
            LinkProtocol::WwwDownload => "WWW:DOWNLOAD",
            LinkProtocol::OgcKml => "OGC:KML",
            LinkProtocol::OgcApiRecords => "OGCAPI:records",
            LinkProtocol::OgcApiFeatures => "OGCAPI:features",
            LinkProtocol::OgcApiCoverages => "OGCAPI:coverages",
        }
    }
}

impl fmt::Display for LinkProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkProtocol {
    type Err = GeolinksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LinkProtocol::ALL
            .iter()
            .copied()
            .find(|protocol| protocol.as_str() == s)
            .ok_or_else(|| GeolinksError::InvalidInput(format!("未知协议标签：{}", s)))
    }
}

/// 一组待查子串及其匹配位置
#[derive(Debug, Clone, Copy)]
pub struct NeedleSet {
    pub needles: &'static [&'static str],
    pub position: MatchPosition,
}

impl NeedleSet {
    pub const fn new(needles: &'static [&'static str], position: MatchPosition) -> Self {
        Self { needles, position }
    }

    pub fn matches(&self, url: &str) -> bool {
        inurl(self.needles, url, self.position)
    }
}

/// 规则条件
#[derive(Debug, Clone, Copy)]
pub enum RuleCondition {
    Needles(NeedleSet),            // 单组子串
    AllOf(&'static [NeedleSet]),   // 复合条件，所有子串组均需命中
}

impl RuleCondition {
    pub fn matches(&self, url: &str) -> bool {
        match self {
            RuleCondition::Needles(set) => set.matches(url),
            RuleCondition::AllOf(sets) => !sets.is_empty() && sets.iter().all(|set| set.matches(url)),
        }
    }
}

/// 启发式规则：条件命中即得出对应协议标签
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub condition: RuleCondition,
    pub protocol: LinkProtocol,
}

impl Rule {
    pub fn matches(&self, url: &str) -> bool {
        self.condition.matches(url)
    }
}

/// 链接识别结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SniffResult {
    /// 单一协议
    Detected(LinkProtocol),
    /// 多个协议（探测模式收集全部结果时，可能为空）
    Multiple(Vec<LinkProtocol>),
    /// 未识别
    NotDetected,
}

impl SniffResult {
    /// 由探测收集的结果构造：恰好一个时折叠为单一协议
    pub fn from_collected(mut protocols: Vec<LinkProtocol>) -> Self {
        if protocols.len() == 1 {
            SniffResult::Detected(protocols.remove(0))
        } else {
            SniffResult::Multiple(protocols)
        }
    }

    /// 结果中的全部协议标签
    pub fn labels(&self) -> Vec<&'static str> {
        match self {
            SniffResult::Detected(protocol) => vec![protocol.as_str()],
            SniffResult::Multiple(protocols) => protocols.iter().map(LinkProtocol::as_str).collect(),
            SniffResult::NotDetected => Vec::new(),
        }
    }

    /// 是否识别出至少一个协议
    pub fn is_detected(&self) -> bool {
        match self {
            SniffResult::Detected(_) => true,
            SniffResult::Multiple(protocols) => !protocols.is_empty(),
            SniffResult::NotDetected => false,
        }
    }

    /// 单一协议结果
    pub fn protocol(&self) -> Option<LinkProtocol> {
        match self {
            SniffResult::Detected(protocol) => Some(*protocol),
            _ => None,
        }
    }
}

impl From<Option<LinkProtocol>> for SniffResult {
    fn from(protocol: Option<LinkProtocol>) -> Self {
        match protocol {
            Some(protocol) => SniffResult::Detected(protocol),
            None => SniffResult::NotDetected,
        }
    }
}

// ======== Display（用于 CLI 输出），多个标签以逗号分隔 ========
impl fmt::Display for SniffResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.labels().join(", "))
    }
}
