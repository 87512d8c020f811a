//! Request lifecycle for one analysis action.
//!
//! Each `begin` hands out a ticket carrying a sequence number. A result is
//! only stored when its ticket is still current, so a response that arrives
//! after `reset` (or after a newer request) is dropped.

use super::{user_message, AnalysisError};
use std::future::Future;
use tracing::{debug, error};

#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    Idle,
    InFlight { seq: u64 },
    Completed(T),
    Failed(String),
}

/// Proof of a started request, consumed by [`AnalysisRequest::finish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    seq: u64,
}

impl RequestTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug)]
pub struct AnalysisRequest<T> {
    state: RequestState<T>,
    seq: u64,
    failure_message: &'static str,
}

impl<T> AnalysisRequest<T> {
    /// `failure_message` is shown when the service fails for reasons the
    /// user cannot fix.
    pub fn new(failure_message: &'static str) -> Self {
        Self {
            state: RequestState::Idle,
            seq: 0,
            failure_message,
        }
    }

    pub fn state(&self) -> &RequestState<T> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, RequestState::InFlight { .. })
    }

    pub fn result(&self) -> Option<&T> {
        match &self.state {
            RequestState::Completed(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Start a request. Returns `None` while another one is in flight.
    pub fn begin(&mut self) -> Option<RequestTicket> {
        if self.is_loading() {
            return None;
        }
        self.seq += 1;
        self.state = RequestState::InFlight { seq: self.seq };
        Some(RequestTicket { seq: self.seq })
    }

    /// Store the outcome for `ticket`. Returns `false` if the ticket is stale.
    pub fn finish(&mut self, ticket: RequestTicket, result: Result<T, AnalysisError>) -> bool {
        let current = matches!(self.state, RequestState::InFlight { seq } if seq == ticket.seq);
        if !current {
            debug!(
                ticket = ticket.seq,
                current = self.seq,
                "Discarding stale analysis response"
            );
            return false;
        }

        self.state = match result {
            Ok(value) => RequestState::Completed(value),
            Err(e) => {
                error!(error = %e, "Analysis request failed");
                RequestState::Failed(user_message(&e, self.failure_message))
            }
        };
        true
    }

    /// Forget any result and invalidate outstanding tickets.
    pub fn reset(&mut self) {
        self.seq += 1;
        self.state = RequestState::Idle;
    }

    /// Begin, await `call`, then finish. Returns `false` if nothing was stored.
    pub async fn run<F, Fut>(&mut self, call: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AnalysisError>>,
    {
        let Some(ticket) = self.begin() else {
            return false;
        };
        let result = call().await;
        self.finish(ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisService, ChartAnalysis, TEXT_FAILURE_MESSAGE};
    use async_trait::async_trait;

    struct FakeService {
        narrative: Option<&'static str>,
    }

    #[async_trait]
    impl AnalysisService for FakeService {
        async fn analyze_image(
            &self,
            _image: &[u8],
            _mime_type: &str,
        ) -> Result<ChartAnalysis, AnalysisError> {
            Ok(ChartAnalysis {
                chart_type: "bar".to_string(),
                ..ChartAnalysis::default()
            })
        }

        async fn analyze_text(&self, _snippet: &str) -> Result<String, AnalysisError> {
            self.narrative
                .map(str::to_string)
                .ok_or(AnalysisError::EmptyResponse)
        }
    }

    #[tokio::test]
    async fn test_run_completes() {
        let service = FakeService {
            narrative: Some("Sales rise steadily."),
        };
        let mut request = AnalysisRequest::new(TEXT_FAILURE_MESSAGE);

        assert!(request.run(|| service.analyze_text("A,B")).await);
        assert_eq!(
            request.result().map(String::as_str),
            Some("Sales rise steadily.")
        );
        assert!(!request.is_loading());
    }

    #[tokio::test]
    async fn test_run_failure_stores_generic_message() {
        let service = FakeService { narrative: None };
        let mut request = AnalysisRequest::new(TEXT_FAILURE_MESSAGE);

        assert!(request.run(|| service.analyze_text("A,B")).await);
        assert_eq!(request.error(), Some(TEXT_FAILURE_MESSAGE));
        assert!(request.result().is_none());
    }

    #[tokio::test]
    async fn test_image_request() {
        let service = FakeService { narrative: None };
        let mut request = AnalysisRequest::new(TEXT_FAILURE_MESSAGE);

        assert!(request.run(|| service.analyze_image(b"png", "image/png")).await);
        assert_eq!(request.result().map(|a| a.chart_type.as_str()), Some("bar"));
    }

    #[test]
    fn test_begin_blocked_while_in_flight() {
        let mut request: AnalysisRequest<String> = AnalysisRequest::new(TEXT_FAILURE_MESSAGE);
        let ticket = request.begin().unwrap();
        assert!(request.is_loading());
        assert!(request.begin().is_none());

        assert!(request.finish(ticket, Ok("done".to_string())));
        assert!(request.begin().is_some());
    }

    #[test]
    fn test_reset_discards_late_response() {
        let mut request: AnalysisRequest<String> = AnalysisRequest::new(TEXT_FAILURE_MESSAGE);
        let stale = request.begin().unwrap();
        request.reset();

        assert!(!request.finish(stale, Ok("old payload".to_string())));
        assert_eq!(request.state(), &RequestState::Idle);

        let fresh = request.begin().unwrap();
        assert_ne!(fresh.seq(), stale.seq());
        assert!(!request.finish(stale, Ok("old payload".to_string())));
        assert!(request.is_loading());
        assert!(request.finish(fresh, Ok("new payload".to_string())));
        assert_eq!(request.result().map(String::as_str), Some("new payload"));
    }

    #[test]
    fn test_ticket_used_twice_is_stale() {
        let mut request: AnalysisRequest<String> = AnalysisRequest::new(TEXT_FAILURE_MESSAGE);
        let ticket = request.begin().unwrap();
        assert!(request.finish(ticket, Ok("first".to_string())));
        assert!(!request.finish(ticket, Ok("second".to_string())));
        assert_eq!(request.result().map(String::as_str), Some("first"));
    }
}
