//! Schedule page controller: one fetch on mount, then a static sorted list.
//!
//! A failed fetch is only logged. The page keeps rendering with no records,
//! the same as an empty schedule.

use tracing::{debug, info, warn};

use crate::api::FetchError;
use crate::format::{schedule_cards, VideoCard, ZoneProvider};
use crate::protocol::ScheduledVideoEntry;
use crate::refresh::{Acceptance, FetchSequence, FetchTicket};

#[derive(Debug, Default)]
pub struct ScheduleView {
    records: Option<Vec<ScheduledVideoEntry>>,
    fetches: FetchSequence,
}

impl ScheduleView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the page's single fetch. Each mount starts with no records.
    pub fn mount(&mut self) -> FetchTicket {
        self.fetches.rescope();
        self.records = None;
        let ticket = self.fetches.issue();
        debug!("[schedule] mount, fetch #{}", ticket.seq());
        ticket
    }

    /// Drop interest in any outstanding fetch.
    pub fn unmount(&mut self) {
        self.fetches.cancel_all();
    }

    /// Apply a completed fetch. Returns `true` if the view changed.
    pub fn on_fetch_complete(
        &mut self,
        seq: u64,
        result: Result<Vec<ScheduledVideoEntry>, FetchError>,
    ) -> bool {
        match self.fetches.accept(seq) {
            Acceptance::Apply { .. } => {}
            other => {
                debug!("[schedule] discarding fetch #{} ({:?})", seq, other);
                return false;
            }
        }

        match result {
            Ok(records) => {
                info!("[schedule] {} upcoming video(s)", records.len());
                self.records = Some(records);
            }
            Err(e) => {
                warn!("[schedule] fetch failed: {}", e.status_text());
            }
        }
        true
    }

    pub fn records(&self) -> Option<&[ScheduledVideoEntry]> {
        self.records.as_deref()
    }

    /// True while the mount fetch is outstanding.
    pub fn is_pending(&self) -> bool {
        self.fetches.is_pending()
    }

    pub fn cards<Z: ZoneProvider + ?Sized>(&self, zone: &Z) -> Vec<VideoCard> {
        schedule_cards(self.records(), zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FixedZone;

    fn entry(id: &str, at: &str) -> ScheduledVideoEntry {
        ScheduledVideoEntry {
            title: id.to_uppercase(),
            kind: "stream".to_string(),
            scheduled_time: at.parse().unwrap(),
            channel_name: String::new(),
            video_id: id.to_string(),
        }
    }

    #[test]
    fn renders_nothing_before_fetch() {
        let view = ScheduleView::new();
        assert!(view.records().is_none());
        assert!(view.cards(&FixedZone::utc()).is_empty());
        assert!(!view.is_pending());
    }

    #[test]
    fn success_stores_sorted_cards() {
        let mut view = ScheduleView::new();
        let ticket = view.mount();
        assert!(view.is_pending());

        let changed = view.on_fetch_complete(
            ticket.seq(),
            Ok(vec![
                entry("a", "2024-06-02T10:00:00Z"),
                entry("b", "2024-06-01T10:00:00Z"),
            ]),
        );
        assert!(changed);
        assert!(!view.is_pending());

        let ids: Vec<_> = view
            .cards(&FixedZone::utc())
            .into_iter()
            .map(|c| c.video_id)
            .collect();
        assert_eq!(ids, ["b", "a"]);
        // Stored order is the response order; sorting happens at render.
        assert_eq!(view.records().unwrap()[0].video_id, "a");
    }

    #[test]
    fn failure_renders_empty_list() {
        let mut view = ScheduleView::new();
        let ticket = view.mount();
        let changed = view.on_fetch_complete(
            ticket.seq(),
            Err(FetchError::Status {
                code: 500,
                reason: "Internal Server Error".to_string(),
            }),
        );
        assert!(changed);
        assert!(view.records().is_none());
        assert!(view.cards(&FixedZone::utc()).is_empty());
        assert!(!view.is_pending());
    }

    #[test]
    fn result_after_unmount_is_ignored() {
        let mut view = ScheduleView::new();
        let ticket = view.mount();
        view.unmount();
        assert!(ticket.is_cancelled());
        let changed =
            view.on_fetch_complete(ticket.seq(), Ok(vec![entry("a", "2024-06-02T10:00:00Z")]));
        assert!(!changed);
        assert!(view.records().is_none());
    }

    #[test]
    fn remount_ignores_previous_mount() {
        let mut view = ScheduleView::new();
        let first = view.mount();
        view.unmount();
        let second = view.mount();

        assert!(!view.on_fetch_complete(first.seq(), Ok(vec![entry("old", "2024-01-01T00:00:00Z")])));
        assert!(view.on_fetch_complete(second.seq(), Ok(vec![entry("new", "2024-01-02T00:00:00Z")])));
        assert_eq!(view.records().unwrap()[0].video_id, "new");
    }

    #[test]
    fn failed_remount_does_not_show_previous_records() {
        let mut view = ScheduleView::new();
        let first = view.mount();
        assert!(view.on_fetch_complete(first.seq(), Ok(vec![entry("old", "2024-01-01T00:00:00Z")])));
        view.unmount();

        let second = view.mount();
        assert!(view.records().is_none());
        assert!(view.on_fetch_complete(
            second.seq(),
            Err(FetchError::Status {
                code: 500,
                reason: "Internal Server Error".to_string(),
            }),
        ));
        assert!(view.records().is_none());
        assert!(view.cards(&FixedZone::utc()).is_empty());
    }
}
