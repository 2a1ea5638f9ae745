use std::fmt;

use crate::models::match_event::ResolvedMatch;

/// Failure classes surfaced to callers. The code strings are part of the
/// HTTP contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleErrorKind {
    Timeout,
    DnsResolutionFailed,
    NetworkError,
    UnexpectedError,
    UpstreamUnavailable,
}

impl ScheduleErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ScheduleErrorKind::Timeout => "TIMEOUT",
            ScheduleErrorKind::DnsResolutionFailed => "DNS_RESOLUTION_FAILED",
            ScheduleErrorKind::NetworkError => "NETWORK_ERROR",
            ScheduleErrorKind::UnexpectedError => "UNEXPECTED_ERROR",
            ScheduleErrorKind::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
        }
    }

    /// Fixed user-facing message for this failure class.
    pub fn message(&self) -> &'static str {
        match self {
            ScheduleErrorKind::Timeout => "抓取懂球帝赛程超时，请稍后重试。",
            ScheduleErrorKind::DnsResolutionFailed => {
                "服务器无法解析懂球帝域名，当前网络环境不可达。"
            }
            ScheduleErrorKind::NetworkError => "抓取懂球帝赛程时发生网络错误。",
            ScheduleErrorKind::UnexpectedError => "抓取赛程时发生未预期错误。",
            ScheduleErrorKind::UpstreamUnavailable => "懂球帝暂时不可用或返回异常页面。",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleError {
    pub kind: ScheduleErrorKind,
    pub message: String,
}

impl ScheduleError {
    pub fn from_kind(kind: ScheduleErrorKind) -> Self {
        Self {
            kind,
            message: kind.message().to_string(),
        }
    }
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.code(), self.message)
    }
}

impl std::error::Error for ScheduleError {}

/// Outcome of one schedule fetch: the sorted matches, or a classified
/// failure. Per-record parse problems never show up here; they drop the
/// record, not the batch.
pub type ScheduleResult = Result<Vec<ResolvedMatch>, ScheduleError>;
