//! Error types for the holiday fetch path.

/// Failure modes of a holiday fetch.
///
/// `Transport` and `Status` cover the network layer, `Upstream` a
/// well-formed response whose application `code` is non-zero. `Cancelled`
/// is not a true error: it marks a fetch whose caller lost interest before
/// completion. Cancelled fetches never mutate observable state and callers
/// are expected to swallow them silently.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HolidayError {
    /// Network unreachable, timeout, or an unreadable response body.
    #[error("节假日服务请求失败：{0}")]
    Transport(String),

    /// Non-success HTTP status from the endpoint.
    #[error("节假日服务返回错误状态：{status}")]
    Status { status: u16 },

    /// HTTP succeeded but the body carried a non-zero application code.
    #[error("节假日服务返回异常，请稍后重试")]
    Upstream { code: i32 },

    /// The caller abandoned the request before it completed.
    #[error("请求已取消")]
    Cancelled,
}
