// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::{EngineError, FetchEngine, FetchResponse};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use std::time::{Duration, Instant};

/// 抓取引擎
///
/// 基于reqwest实现的顺序HTTP抓取引擎，整个爬取过程
/// 复用同一个客户端以保持连接与Cookie
pub struct ReqwestEngine {
    client: reqwest::Client,
}

impl ReqwestEngine {
    /// 创建新的抓取引擎实例
    ///
    /// # 参数
    ///
    /// * `user_agent` - 请求使用的User-Agent
    /// * `timeout` - 单次请求的超时时间
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(Policy::limited(10))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FetchEngine for ReqwestEngine {
    /// 执行HTTP抓取
    ///
    /// # 返回值
    ///
    /// * `Ok(FetchResponse)` - 抓取响应，非2xx状态码也通过响应返回
    /// * `Err(EngineError)` - 传输层错误
    async fn fetch(&self, url: &str) -> Result<FetchResponse, EngineError> {
        let started = Instant::now();
        let response = self.client.get(url).send().await?;

        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let body = response.bytes().await?;

        tracing::debug!(
            url,
            status_code,
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "fetch completed"
        );

        Ok(FetchResponse {
            status_code,
            body,
            content_type,
        })
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}
