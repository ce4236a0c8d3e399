//! Fetch bookkeeping shared by the page controllers.
//!
//! A page issues one [`FetchTicket`] per request. The ticket carries a
//! sequence number and a cancellation token scoped to the page's mount; the
//! page later feeds the result back together with the ticket's sequence
//! number and [`FetchSequence::accept`] decides whether it may be applied.
//!
//! Results are applied in issue order: once fetch `n` has been applied, a
//! late result from any fetch `< n` is dropped. A result from before an
//! unmount is always dropped.

use std::future::Future;

use tokio_util::sync::CancellationToken;

/// Handle for one outbound fetch.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    seq: u64,
    cancel: CancellationToken,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Drive `fut` unless the owning page unmounts first.
    ///
    /// Returns `None` when cancelled; the request future is dropped at that
    /// point, which aborts it.
    pub async fn run<F, T>(self, fut: F) -> Option<(u64, T)>
    where
        F: Future<Output = T>,
    {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            out = fut => Some((self.seq, out)),
        }
    }
}

/// Verdict on a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// Apply it. `latest` is true when no newer fetch is outstanding.
    Apply { latest: bool },
    /// A newer fetch has already been applied.
    Stale,
    /// Issued under a scope that has since been cancelled.
    Detached,
}

#[derive(Debug)]
pub struct FetchSequence {
    next_seq: u64,
    latest_issued: Option<u64>,
    latest_applied: Option<u64>,
    /// First sequence number of the current mount.
    scope_start: u64,
    scope: CancellationToken,
}

impl Default for FetchSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchSequence {
    pub fn new() -> Self {
        Self {
            next_seq: 1,
            latest_issued: None,
            latest_applied: None,
            scope_start: 1,
            scope: CancellationToken::new(),
        }
    }

    pub fn issue(&mut self) -> FetchTicket {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.latest_issued = Some(seq);
        FetchTicket {
            seq,
            cancel: self.scope.child_token(),
        }
    }

    pub fn accept(&mut self, seq: u64) -> Acceptance {
        if seq < self.scope_start || seq >= self.next_seq || self.scope.is_cancelled() {
            return Acceptance::Detached;
        }
        if self.latest_applied.is_some_and(|applied| seq <= applied) {
            return Acceptance::Stale;
        }
        self.latest_applied = Some(seq);
        Acceptance::Apply {
            latest: self.latest_issued == Some(seq),
        }
    }

    /// True while the most recently issued fetch has not been applied.
    pub fn is_pending(&self) -> bool {
        !self.scope.is_cancelled()
            && self.latest_issued.is_some()
            && self.latest_issued != self.latest_applied
    }

    /// Cancel every ticket issued so far. Results they still deliver come
    /// back as [`Acceptance::Detached`].
    pub fn cancel_all(&mut self) {
        self.scope.cancel();
    }

    /// Start a new scope after [`cancel_all`](Self::cancel_all). Tickets from
    /// the previous scope stay detached.
    pub fn rescope(&mut self) {
        self.scope.cancel();
        self.scope = CancellationToken::new();
        self.scope_start = self.next_seq;
        self.latest_issued = None;
        self.latest_applied = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn in_order_results_apply() {
        let mut seq = FetchSequence::new();
        let a = seq.issue();
        assert!(seq.is_pending());
        assert_eq!(seq.accept(a.seq()), Acceptance::Apply { latest: true });
        assert!(!seq.is_pending());

        let b = seq.issue();
        assert_eq!(seq.accept(b.seq()), Acceptance::Apply { latest: true });
    }

    #[test]
    fn older_result_after_newer_is_stale() {
        let mut seq = FetchSequence::new();
        let a = seq.issue();
        let b = seq.issue();
        assert_eq!(seq.accept(b.seq()), Acceptance::Apply { latest: true });
        assert_eq!(seq.accept(a.seq()), Acceptance::Stale);
    }

    #[test]
    fn older_result_before_newer_applies_as_not_latest() {
        let mut seq = FetchSequence::new();
        let a = seq.issue();
        let b = seq.issue();
        assert_eq!(seq.accept(a.seq()), Acceptance::Apply { latest: false });
        assert!(seq.is_pending());
        assert_eq!(seq.accept(b.seq()), Acceptance::Apply { latest: true });
    }

    #[test]
    fn duplicate_delivery_is_stale() {
        let mut seq = FetchSequence::new();
        let a = seq.issue();
        assert_eq!(seq.accept(a.seq()), Acceptance::Apply { latest: true });
        assert_eq!(seq.accept(a.seq()), Acceptance::Stale);
    }

    #[test]
    fn cancelled_scope_detaches_tickets() {
        let mut seq = FetchSequence::new();
        let a = seq.issue();
        seq.cancel_all();
        assert!(a.is_cancelled());
        assert_eq!(seq.accept(a.seq()), Acceptance::Detached);
        assert!(!seq.is_pending());
    }

    #[test]
    fn rescope_keeps_old_tickets_detached() {
        let mut seq = FetchSequence::new();
        let old = seq.issue();
        seq.rescope();
        let new = seq.issue();
        assert!(old.is_cancelled());
        assert!(!new.is_cancelled());
        assert_eq!(seq.accept(old.seq()), Acceptance::Detached);
        assert_eq!(seq.accept(new.seq()), Acceptance::Apply { latest: true });
    }

    #[test]
    fn unknown_sequence_is_detached() {
        let mut seq = FetchSequence::new();
        assert_eq!(seq.accept(7), Acceptance::Detached);
    }

    #[tokio::test]
    async fn run_yields_output_with_sequence() {
        let mut seq = FetchSequence::new();
        let ticket = seq.issue();
        let out = ticket.run(async { 42 }).await;
        assert_eq!(out, Some((1, 42)));
    }

    #[tokio::test]
    async fn run_stops_on_cancel() {
        let mut seq = FetchSequence::new();
        let ticket = seq.issue();
        let handle = tokio::spawn(ticket.run(async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            "never"
        }));
        seq.cancel_all();
        let out = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("cancelled fetch should finish promptly")
            .unwrap();
        assert_eq!(out, None);
    }
}
