//! 全局错误类型定义
//! 构造路径（HTTP 客户端、全局嗅探器、标签解析）向调用方返回错误；
//! 探测内部的错误（URL、请求、响应解析）在嗅探器内折叠为否定结果

use thiserror::Error;
use serde_json::Error as SerdeJsonError;
use url::ParseError as UrlParseError;

#[derive(Error, Debug)]
pub enum GeolinksError {
    // 网络相关错误
    #[error("网络请求失败：{0}")]
    HttpError(#[from] reqwest::Error),
    #[error("响应状态异常：{0}")]
    StatusError(String),
    #[error("响应体过大：{0}")]
    ResponseTooLarge(String),

    // 解析相关错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),
    #[error("XML解析失败：{0}")]
    XmlError(String),

    // 基础错误
    #[error("URL解析失败：{0}")]
    UrlError(#[from] UrlParseError),
    #[error("无效输入：{0}")]
    InvalidInput(String),
}

impl From<quick_xml::Error> for GeolinksError {
    fn from(e: quick_xml::Error) -> Self {
        GeolinksError::XmlError(e.to_string())
    }
}

// 全局Result类型
pub type GeoResult<T> = Result<T, GeolinksError>;
