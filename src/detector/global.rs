//! 全局嗅探器单例管理
use once_cell::sync::OnceCell;
use tracing::warn;

use super::sniffer::LinkSniffer;
use crate::config::{ConfigManager, GlobalConfig};
use crate::error::GeoResult;
use crate::rule::SniffResult;

/// 全局嗅探器实例
static GLOBAL_SNIFFER: OnceCell<LinkSniffer> = OnceCell::new();

/// 初始化全局嗅探器（默认配置）
pub fn init_sniffer() -> GeoResult<()> {
    init_sniffer_with_config(ConfigManager::get_default())
}

/// 带自定义配置初始化全局嗅探器，已初始化时保持原实例
pub fn init_sniffer_with_config(config: GlobalConfig) -> GeoResult<()> {
    if GLOBAL_SNIFFER.get().is_some() {
        warn!("全局嗅探器已初始化，忽略本次配置");
        return Ok(());
    }

    let sniffer = LinkSniffer::new(config)?;
    if GLOBAL_SNIFFER.set(sniffer).is_err() {
        warn!("全局嗅探器已被并发初始化，忽略本次配置");
    }

    Ok(())
}

/// 获取全局嗅探器，未初始化时使用默认配置初始化
pub(crate) fn get_global_sniffer() -> GeoResult<&'static LinkSniffer> {
    GLOBAL_SNIFFER.get_or_try_init(|| LinkSniffer::new(ConfigManager::get_default()))
}

/// 使用全局嗅探器识别链接类型（启用协议探测回退）
pub async fn sniff_link_extended(url: &str, first: bool) -> GeoResult<SniffResult> {
    let sniffer = get_global_sniffer()?;
    Ok(sniffer.sniff(url, true, first).await)
}
