// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

/// 抓取响应
///
/// 响应体以原始字节保留，页面内容与图片数据走同一条通路
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// HTTP状态码
    pub status_code: u16,
    /// 响应体
    pub body: Bytes,
    /// 内容类型
    pub content_type: String,
}

impl FetchResponse {
    /// 判断状态码是否为2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// 将响应体按UTF-8解码为文本
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// 抓取引擎特质
///
/// 抽象`fetch(url) -> (status, bytes)`能力，超时与请求头等
/// 传输配置在引擎构造时确定，而非隐式共享状态
#[async_trait]
pub trait FetchEngine: Send + Sync {
    /// 执行抓取
    async fn fetch(&self, url: &str) -> Result<FetchResponse, EngineError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}
