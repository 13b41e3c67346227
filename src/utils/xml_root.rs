//! XML 根元素提取工具
//! 能力文档的识别只依赖根元素的本地名与命名空间

use std::fmt;
use quick_xml::events::Event;
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;

use crate::error::GeoResult;

/// XML 根元素
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootElement {
    pub local_name: String,
    pub namespace: Option<String>,
}

impl RootElement {
    /// 是否为 OWS 异常报告
    pub fn is_exception_report(&self) -> bool {
        matches!(self.local_name.as_str(), "ExceptionReport" | "ServiceExceptionReport")
    }

    /// 命名空间是否包含给定片段
    pub fn namespace_contains(&self, fragment: &str) -> bool {
        self.namespace
            .as_deref()
            .is_some_and(|ns| ns.to_ascii_lowercase().contains(fragment))
    }
}

impl fmt::Display for RootElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}

/// 读取首个元素作为根元素，文档中没有元素时返回 None
pub fn parse_root_element(xml: &str) -> GeoResult<Option<RootElement>> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_resolved_event()? {
            (ns, Event::Start(e)) | (ns, Event::Empty(e)) => {
                let namespace = match ns {
                    ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.as_ref()).into_owned()),
                    _ => None,
                };
                return Ok(Some(RootElement {
                    local_name: String::from_utf8_lossy(e.local_name().as_ref()).into_owned(),
                    namespace,
                }));
            }
            (_, Event::Eof) => return Ok(None),
            _ => {}
        }
    }
}
