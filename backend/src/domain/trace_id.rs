//! Correlation identifier carried by each request.
//!
//! The identifier lives in Tokio task-local storage for the duration of a
//! request, so errors and log events can pick it up without it being passed
//! through every call. Task locals do not follow `tokio::spawn`; wrap spawned
//! work in [`TraceId::scope`] to keep the id attached.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static CURRENT: TraceId;
}

/// UUID identifying one request across logs, headers, and error bodies.
///
/// # Examples
/// ```
/// use users_backend::TraceId;
///
/// let upstream = TraceId::adopt_or_generate(Some("6f1c1f2a-3f44-4b8e-9d6a-2d1c5e0b7a10"));
/// assert_eq!(upstream.to_string(), "6f1c1f2a-3f44-4b8e-9d6a-2d1c5e0b7a10");
///
/// let fresh = TraceId::adopt_or_generate(Some("not-a-uuid"));
/// assert_ne!(fresh.to_string(), "not-a-uuid");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Reuse an identifier supplied by an upstream caller when it parses as a
    /// UUID, otherwise mint a new one.
    #[must_use]
    pub fn adopt_or_generate(candidate: Option<&str>) -> Self {
        candidate
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or_else(Self::generate)
    }

    /// Identifier of the request currently being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current identifier.
    pub async fn scope<Fut: Future>(trace_id: Self, fut: Fut) -> Fut::Output {
        CURRENT.scope(trace_id, fut).await
    }
}

impl From<Uuid> for TraceId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("abc"))]
    #[case(Some("00000000-0000-0000-0000"))]
    fn unusable_candidates_are_replaced(#[case] candidate: Option<&str>) {
        let id = TraceId::adopt_or_generate(candidate);

        assert_eq!(id.0.get_version_num(), 4);
    }

    #[test]
    fn upstream_ids_are_kept_and_normalised() {
        let id = TraceId::adopt_or_generate(Some(" 6F1C1F2A-3F44-4B8E-9D6A-2D1C5E0B7A10 "));

        assert_eq!(id.to_string(), "6f1c1f2a-3f44-4b8e-9d6a-2d1c5e0b7a10");
    }

    #[tokio::test]
    async fn scope_controls_what_current_sees() {
        let outer = TraceId::generate();
        let inner = TraceId::generate();

        let seen = TraceId::scope(outer, async move {
            let nested = TraceId::scope(inner, async { TraceId::current() }).await;
            (TraceId::current(), nested)
        })
        .await;

        assert_eq!(seen, (Some(outer), Some(inner)));
        assert_eq!(TraceId::current(), None);
    }
}
