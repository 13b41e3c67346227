//! 工具模块：探测请求URL构造、XML根元素提取
pub mod url_builder;
pub mod xml_root;

pub use self::url_builder::UrlBuilder;
pub use self::xml_root::{parse_root_element, RootElement};
