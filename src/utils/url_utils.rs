// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{ParseError, Url};

/// 将可能为相对路径的URL转换为绝对路径URL
pub fn resolve_url(base_url: &Url, path: &str) -> Result<Url, ParseError> {
    base_url.join(path)
}

/// 规范化图片URL为绝对地址
///
/// 协议相对地址（`//host/path`）一律补全为https，
/// 站内相对路径基于页面URL解析
pub fn normalize_image_url(page_url: &Url, raw: &str) -> Result<Url, ParseError> {
    let trimmed = raw.trim();
    if let Some(rest) = trimmed.strip_prefix("//") {
        return Url::parse(&format!("https://{}", rest));
    }
    page_url.join(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_absolute_url() {
        let base = Url::parse("http://example.com/a/b").unwrap();
        let path = "http://t.co/c";
        assert_eq!(resolve_url(&base, path).unwrap().as_str(), "http://t.co/c");
    }

    #[test]
    fn test_resolve_protocol_relative_url() {
        let base = Url::parse("https://example.com/a/b").unwrap();
        let path = "//t.co/c";
        assert_eq!(resolve_url(&base, path).unwrap().as_str(), "https://t.co/c");
    }

    #[test]
    fn test_resolve_root_relative_url() {
        let base = Url::parse("http://example.com/a/b").unwrap();
        let path = "/c";
        assert_eq!(resolve_url(&base, path).unwrap().as_str(), "http://example.com/c");
    }

    #[test]
    fn test_resolve_relative_url() {
        let base = Url::parse("http://example.com/a/b").unwrap();
        let path = "c";
        assert_eq!(
            resolve_url(&base, path).unwrap().as_str(),
            "http://example.com/a/c"
        );
    }

    #[test]
    fn test_normalize_protocol_relative_image_url() {
        // Protocol-relative sources always upgrade to https, even from http pages
        let page = Url::parse("http://example.com/catalogue/index.html").unwrap();
        let raw = "//cdn.example.com/img.jpg";
        assert_eq!(
            normalize_image_url(&page, raw).unwrap().as_str(),
            "https://cdn.example.com/img.jpg"
        );
    }

    #[test]
    fn test_normalize_site_relative_image_url() {
        let page = Url::parse("https://example.com/catalogue/page-2.html").unwrap();
        let raw = "../media/img.png";
        assert_eq!(
            normalize_image_url(&page, raw).unwrap().as_str(),
            "https://example.com/media/img.png"
        );
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        let page = Url::parse("https://example.com/").unwrap();
        let raw = "  /media/img.png ";
        assert_eq!(
            normalize_image_url(&page, raw).unwrap().as_str(),
            "https://example.com/media/img.png"
        );
    }
}
