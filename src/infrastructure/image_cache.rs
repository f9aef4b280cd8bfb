// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::{EngineError, FetchEngine};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};
use url::Url;

/// 缓存错误类型
#[derive(Error, Debug)]
pub enum CacheError {
    /// 引擎错误
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
    /// 非成功状态码
    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 图片缓存键
///
/// 决定本地文件的命名空间与文件名，两种策略对应两类部署：
/// URL哈希文件名按分类目录分组，或handle+角色文件名平铺存放
#[derive(Debug, Clone, Copy)]
pub enum ImageKey<'a> {
    /// sha256(源URL)十六进制文件名，置于清洗后的分类子目录
    UrlHash { category: &'a str },
    /// `{handle}_{role}{ext}`文件名，置于缓存根目录
    HandleRole { handle: &'a str, role: &'a str },
}

/// 内容寻址图片缓存
///
/// 文件名由源URL确定性导出，与下载字节无关。同一URL在
/// 多次运行间对应同一路径，已存在的文件不再发起网络请求。
pub struct ImageCache {
    base_dir: PathBuf,
    engine: Arc<dyn FetchEngine>,
}

impl ImageCache {
    pub fn new(base_dir: impl Into<PathBuf>, engine: Arc<dyn FetchEngine>) -> Self {
        Self {
            base_dir: base_dir.into(),
            engine,
        }
    }

    /// 下载图片并写入本地缓存
    ///
    /// 幂等：目标文件已存在时完全跳过网络请求，直接返回现有路径。
    /// 命名空间目录按需创建，重复创建安全。
    ///
    /// # 参数
    ///
    /// * `source_url` - 图片源URL
    /// * `key` - 缓存键，决定本地路径
    ///
    /// # 返回值
    ///
    /// * `Ok(PathBuf)` - 本地缓存路径
    /// * `Err(CacheError)` - 下载或写入失败，调用方继续且记录保持无图
    pub async fn fetch_and_cache(
        &self,
        source_url: &str,
        key: ImageKey<'_>,
    ) -> Result<PathBuf, CacheError> {
        let path = self.local_path(source_url, &key);

        if fs::try_exists(&path).await? {
            debug!(url = source_url, path = %path.display(), "image cache hit");
            return Ok(path);
        }

        let response = self.engine.fetch(source_url).await?;
        if !response.is_success() {
            return Err(CacheError::Status {
                url: source_url.to_string(),
                status: response.status_code,
            });
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, &response.body).await?;

        info!(url = source_url, path = %path.display(), "downloaded image");
        Ok(path)
    }

    /// 计算源URL对应的确定性本地路径
    pub fn local_path(&self, source_url: &str, key: &ImageKey<'_>) -> PathBuf {
        let ext = extension_of(source_url);
        match key {
            ImageKey::UrlHash { category } => {
                let digest = hex::encode(Sha256::digest(source_url.as_bytes()));
                self.base_dir
                    .join(sanitize_component(category))
                    .join(format!("{}{}", digest, ext))
            }
            ImageKey::HandleRole { handle, role } => self
                .base_dir
                .join(format!("{}_{}{}", sanitize_component(handle), role, ext)),
        }
    }
}

/// 从URL路径部分取文件扩展名，缺失或无法解析时回退为.jpg
fn extension_of(source_url: &str) -> String {
    Url::parse(source_url)
        .ok()
        .and_then(|url| {
            Path::new(url.path())
                .extension()
                .map(|ext| format!(".{}", ext.to_string_lossy()))
        })
        .unwrap_or_else(|| ".jpg".to_string())
}

/// 清洗路径组件：保留字母数字、空格、`-`与`_`，其余替换为`_`
fn sanitize_component(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
