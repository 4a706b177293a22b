//! 构建期配置模块
//!
//! API 基地址在编译时通过 `SCUFFERS_API_URL` 注入，
//! 未设置时退回本地开发后端。媒体基地址由 API 地址派生
//! （去掉 `/api` 后缀），与后端的 MEDIA_URL 约定一致。

/// 本地开发后端（Django runserver）
const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";

/// REST API 基地址（不带结尾斜杠）
pub fn api_base() -> &'static str {
    option_env!("SCUFFERS_API_URL").unwrap_or(DEFAULT_API_URL)
}

/// 图片等媒体文件的基地址
pub fn media_base() -> &'static str {
    derive_media_base(api_base())
}

fn derive_media_base(base: &str) -> &str {
    base.strip_suffix("/api/")
        .or_else(|| base.strip_suffix("/api"))
        .unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_base_drops_api_suffix() {
        assert_eq!(
            derive_media_base("http://127.0.0.1:8000/api"),
            "http://127.0.0.1:8000"
        );
        assert_eq!(
            derive_media_base("https://shop.example.com/api/"),
            "https://shop.example.com"
        );
        assert_eq!(derive_media_base("https://cdn.example.com"), "https://cdn.example.com");
    }
}
