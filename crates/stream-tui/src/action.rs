//! Action enum: all user-initiated intents and internal events.

/// Unique identifier for a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    NavBar,
    LivePanel,
    SchedulePanel,
}

/// The two pages reachable from the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Live,
    Schedule,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::Live, Page::Schedule];

    pub fn label(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Schedule => "schedule",
        }
    }

    pub fn number_key(self) -> char {
        match self {
            Self::Live => '1',
            Self::Schedule => '2',
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Live => Self::Schedule,
            Self::Schedule => Self::Live,
        }
    }
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Navigation ───────────────────────────────────────────────────────────
    SwitchPage(Page),
    NextPage,
    SelectUp(usize),
    SelectDown(usize),
    SelectFirst,
    SelectLast,

    // ── Live page ────────────────────────────────────────────────────────────
    ToggleAutoRefresh,
    /// The refresh countdown completed a cycle.
    IntervalElapsed,

    // ── Misc ─────────────────────────────────────────────────────────────────
    CopyToClipboard(String),
    Quit,
}
