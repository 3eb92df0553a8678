use crate::ports::{StatisticsSink, UpstreamResolver};
use crate::services::{filter_questions, synthesize_blocked_answers};
use chrono::Utc;
use dnsfilter_domain::{DnsHeader, DnsMessage, DomainError, FilterLists, QueryEvent};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::debug;

/// Per-request pipeline: filter, sinkhole the blocked questions, forward the
/// allowed ones, compose the reply.
pub struct HandleDnsQueryUseCase {
    lists: Arc<FilterLists>,
    resolver: Arc<dyn UpstreamResolver>,
    statistics: Arc<dyn StatisticsSink>,
    skip_empty_queries: bool,
}

impl HandleDnsQueryUseCase {
    pub fn new(
        lists: Arc<FilterLists>,
        resolver: Arc<dyn UpstreamResolver>,
        statistics: Arc<dyn StatisticsSink>,
    ) -> Self {
        Self {
            lists,
            resolver,
            statistics,
            skip_empty_queries: true,
        }
    }

    /// When false, a request whose questions were all blocked still makes an
    /// upstream round trip with an empty question section.
    pub fn with_skip_empty_queries(mut self, skip: bool) -> Self {
        self.skip_empty_queries = skip;
        self
    }

    pub async fn execute(&self, request: &DnsMessage) -> Result<DnsMessage, DomainError> {
        if request.questions.is_empty() {
            return Err(DomainError::EmptyQuery);
        }

        let snapshot = self.lists.snapshot();
        let outcome = filter_questions(&request.questions, &snapshot.whitelist, &snapshot.blacklist);
        drop(snapshot);

        for question in &outcome.blocked {
            debug!(
                id = request.header.id,
                domain = %question.name,
                record_type = %question.record_type,
                "Question blocked"
            );
        }

        let mut answers = synthesize_blocked_answers(&outcome.blocked);

        if outcome.allowed.is_empty() && self.skip_empty_queries {
            debug!(id = request.header.id, "All questions blocked, skipping upstream");
        } else {
            let upstream = self
                .resolver
                .resolve(&outcome.allowed, &request.header)
                .await?;
            answers.extend(upstream);
        }

        Ok(DnsMessage {
            header: DnsHeader::reply_to(&request.header),
            questions: request.questions.clone(),
            answers,
        })
    }

    /// Emits one statistics event per transmitted answer. Call only after the
    /// reply has been sent.
    pub async fn record_delivery(&self, client: IpAddr, response: &DnsMessage) {
        let timestamp = Utc::now();
        for record in &response.answers {
            self.statistics
                .emit(QueryEvent::from_record(client, record, timestamp))
                .await;
        }
    }
}
