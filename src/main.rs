//! geolinks 命令行：识别一个或多个 URL 的链接类型
//!
//! 标准输出每行一个结果，日志输出到标准错误

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use geolinks::{ConfigManager, LinkSniffer, SniffResult};

/// 地理空间服务链接类型识别
#[derive(Debug, Parser)]
#[command(name = "geolinks", version, about)]
struct Cli {
    /// 待识别的 URL
    #[arg(required = true)]
    urls: Vec<String>,

    /// 规则未命中时，发起真实协议探测
    #[arg(short, long)]
    extended: bool,

    /// 与 --extended 一起使用：收集全部命中协议，而非首个命中即返回
    #[arg(short, long, requires = "extended")]
    all: bool,

    /// 探测请求超时（秒）
    #[arg(short, long, default_value_t = 30)]
    timeout: u64,

    /// 以 JSON 行格式输出
    #[arg(long)]
    json: bool,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

/// JSON 输出行
#[derive(Debug, Serialize)]
struct OutputLine<'a> {
    url: &'a str,
    result: &'a SniffResult,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(cli.verbose)?;

    let config = ConfigManager::custom()
        .http_timeout(cli.timeout)
        .build();
    let sniffer = LinkSniffer::new(config)?;

    for url in &cli.urls {
        let result = sniffer.sniff(url, cli.extended, !cli.all).await;
        print_result(url, &result, cli.json)?;
    }

    Ok(())
}

/// 初始化日志：RUST_LOG 优先，否则按 --verbose 选择级别
fn initialize_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn print_result(url: &str, result: &SniffResult, json: bool) -> Result<()> {
    if json {
        let line = OutputLine { url: url.trim(), result };
        println!("{}", serde_json::to_string(&line)?);
    } else if result.is_detected() {
        println!("{}\t{}", url.trim(), result);
    } else {
        println!("{}\t-", url.trim());
    }
    Ok(())
}
