// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::item::ItemRecord;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// 导出错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    /// CSV序列化错误
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CSV导出行
///
/// 固定列集，缺失字段导出为空字符串，图片路径
/// 相对于输出文件所在目录
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    title: &'a str,
    price: &'a str,
    sale_price: &'a str,
    rating: &'a str,
    availability: &'a str,
    primary_image: String,
    secondary_image: String,
    link: &'a str,
    category: &'a str,
}

/// CSV导出服务
///
/// 在整个爬取结束后一次性落盘，记录顺序即写入顺序
pub struct CsvExporter {
    output_path: PathBuf,
}

impl CsvExporter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    /// 导出全部记录
    ///
    /// 空数据仅记录警告，不产生输出文件
    pub fn export(&self, records: &[ItemRecord]) -> Result<(), ExportError> {
        if records.is_empty() {
            warn!("no records to export");
            return Ok(());
        }

        let base_dir = self.output_path.parent().unwrap_or_else(|| Path::new(""));
        let mut writer = csv::Writer::from_path(&self.output_path)?;
        for record in records {
            writer.serialize(ExportRow {
                title: &record.title,
                price: record.price_text.as_deref().unwrap_or(""),
                sale_price: record.sale_price_text.as_deref().unwrap_or(""),
                rating: record.rating_or_status.as_deref().unwrap_or(""),
                availability: record.availability_text.as_deref().unwrap_or(""),
                primary_image: relative_image_path(record.primary_image_path.as_deref(), base_dir),
                secondary_image: relative_image_path(
                    record.secondary_image_path.as_deref(),
                    base_dir,
                ),
                link: record.link.as_deref().unwrap_or(""),
                category: &record.category,
            })?;
        }
        writer.flush()?;

        info!(
            count = records.len(),
            path = %self.output_path.display(),
            "saved records"
        );
        Ok(())
    }
}

fn relative_image_path(path: Option<&Path>, base_dir: &Path) -> String {
    path.map(|p| relative_to(p, base_dir).to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// 将路径改写为相对于base目录的形式
///
/// 绝对/相对混用时原样返回，避免猜测工作目录
pub(crate) fn relative_to(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() != base.is_absolute() {
        return path.to_path_buf();
    }

    let path_parts: Vec<Component> = path.components().collect();
    let base_parts: Vec<Component> = base.components().collect();

    let mut common = 0;
    while common < path_parts.len()
        && common < base_parts.len()
        && path_parts[common] == base_parts[common]
    {
        common += 1;
    }

    let mut result = PathBuf::new();
    for _ in common..base_parts.len() {
        result.push("..");
    }
    for part in &path_parts[common..] {
        result.push(part);
    }
    if result.as_os_str().is_empty() {
        result.push(".");
    }
    result
}
