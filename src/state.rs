use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::classify;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Splash,
    List,
    Details { match_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Upcoming,
    Completed,
}

/// Per-request lifecycle of an asynchronous read. A screen entry starts at
/// `Loading` and settles on exactly one of `Loaded` or `Failed`; there is no
/// retry within the same screen instance.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Loaded(T),
    Failed,
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

/// Linear screen history. Depth never exceeds 2: the list is the root once
/// the splash is replaced, details sit on top of it.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Screen>,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            stack: vec![Screen::Splash],
        }
    }

    pub fn current(&self) -> &Screen {
        self.stack.last().expect("navigator stack is never empty")
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Swap the top screen without creating a back entry. Used once, for the
    /// splash-to-list transition.
    pub fn replace(&mut self, screen: Screen) {
        let top = self
            .stack
            .last_mut()
            .expect("navigator stack is never empty");
        *top = screen;
    }

    /// Push details on top of the list. Pushing from anywhere else is a
    /// no-op; the stack never grows past depth 2.
    pub fn push(&mut self, screen: Screen) {
        if !matches!(self.current(), Screen::List) {
            return;
        }
        self.stack.push(screen);
    }

    /// Pop back to the list. Popping at the root is a no-op.
    pub fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub nav: Navigator,
    pub tab: Tab,
    pub selected: usize,
    pub all_matches: FetchState<Vec<MatchSummary>>,
    pub current_matches: FetchState<Vec<MatchSummary>>,
    pub match_detail: FetchState<MatchDetail>,
    // Screen-instance counters. Deltas carry the epoch of the command that
    // produced them; a mismatch means the owning screen instance is gone.
    pub list_epoch: u64,
    pub detail_epoch: u64,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            nav: Navigator::new(),
            tab: Tab::Upcoming,
            selected: 0,
            all_matches: FetchState::Loading,
            current_matches: FetchState::Loading,
            match_detail: FetchState::Loading,
            list_epoch: 0,
            detail_epoch: 0,
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
        }
    }

    /// Replace the current screen with a fresh list instance and return the
    /// epoch its fetches must be stamped with.
    pub fn enter_list(&mut self) -> u64 {
        self.nav.replace(Screen::List);
        self.list_epoch = self.list_epoch.wrapping_add(1);
        self.all_matches = FetchState::Loading;
        self.current_matches = FetchState::Loading;
        self.tab = Tab::Upcoming;
        self.selected = 0;
        self.list_epoch
    }

    /// Push a details instance for `match_id` and return its epoch, or None
    /// when the transition is not legal from the current screen.
    pub fn enter_details(&mut self, match_id: String) -> Option<u64> {
        if !matches!(self.nav.current(), Screen::List) {
            return None;
        }
        self.nav.push(Screen::Details { match_id });
        self.detail_epoch = self.detail_epoch.wrapping_add(1);
        self.match_detail = FetchState::Loading;
        Some(self.detail_epoch)
    }

    /// Pop details and invalidate its in-flight fetch, if any.
    pub fn leave_details(&mut self) {
        if !matches!(self.nav.current(), Screen::Details { .. }) {
            return;
        }
        self.nav.pop();
        self.detail_epoch = self.detail_epoch.wrapping_add(1);
        self.match_detail = FetchState::Loading;
    }

    /// The list screen stays in its loading state until both reads resolve.
    pub fn list_loading(&self) -> bool {
        self.all_matches.is_loading() || self.current_matches.is_loading()
    }

    fn all_slice(&self) -> &[MatchSummary] {
        self.all_matches.loaded().map(Vec::as_slice).unwrap_or(&[])
    }

    fn current_slice(&self) -> &[MatchSummary] {
        self.current_matches
            .loaded()
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn upcoming_rows(&self) -> Vec<&MatchSummary> {
        classify::upcoming(self.all_slice())
    }

    pub fn completed_rows(&self) -> Vec<&MatchSummary> {
        classify::completed(self.all_slice(), self.current_slice())
    }

    /// Rows for the active tab, re-derived from fetch state on every call.
    pub fn active_rows(&self) -> Vec<&MatchSummary> {
        match self.tab {
            Tab::Upcoming => self.upcoming_rows(),
            Tab::Completed => self.completed_rows(),
        }
    }

    pub fn selected_match_id(&self) -> Option<String> {
        self.active_rows()
            .get(self.selected)
            .map(|m| m.id.clone())
            .filter(|id| !id.is_empty())
    }

    pub fn toggle_tab(&mut self) {
        self.tab = match self.tab {
            Tab::Upcoming => Tab::Completed,
            Tab::Completed => Tab::Upcoming,
        };
        self.selected = 0;
    }

    pub fn select_next(&mut self) {
        let total = self.active_rows().len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1) % total;
    }

    pub fn select_prev(&mut self) {
        let total = self.active_rows().len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        if self.selected == 0 {
            self.selected = total - 1;
        } else {
            self.selected -= 1;
        }
    }

    pub fn clamp_selection(&mut self) {
        let total = self.active_rows().len();
        if total == 0 {
            self.selected = 0;
        } else if self.selected >= total {
            self.selected = total - 1;
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

/// One row of the `matches` / `currentMatches` responses. Wire fields beyond
/// these are ignored; absent display strings default to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, rename = "matchStarted")]
    pub match_started: bool,
    #[serde(default, rename = "matchEnded")]
    pub match_ended: bool,
}

/// The `match_info` response body. `teamInfo` and `score` are frequently
/// absent for fixtures that have not started.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchDetail {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub date: String,
    #[serde(default, rename = "dateTimeGMT")]
    pub date_time_gmt: String,
    #[serde(default, rename = "tossWinner")]
    pub toss_winner: Option<String>,
    #[serde(default, rename = "tossChoice")]
    pub toss_choice: Option<String>,
    #[serde(default, rename = "teamInfo")]
    pub team_info: Vec<TeamInfo>,
    #[serde(default)]
    pub score: Vec<InningScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub name: String,
    #[serde(default, rename = "img")]
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InningScore {
    #[serde(default)]
    pub inning: String,
    #[serde(default, rename = "r")]
    pub runs: u32,
    #[serde(default, rename = "w")]
    pub wickets: u32,
    #[serde(default, rename = "o")]
    pub overs: f64,
}

#[derive(Debug, Clone)]
pub enum Delta {
    AllMatchesLoaded {
        epoch: u64,
        matches: Vec<MatchSummary>,
    },
    AllMatchesFailed {
        epoch: u64,
    },
    CurrentMatchesLoaded {
        epoch: u64,
        matches: Vec<MatchSummary>,
    },
    CurrentMatchesFailed {
        epoch: u64,
    },
    MatchDetailLoaded {
        epoch: u64,
        detail: MatchDetail,
    },
    MatchDetailFailed {
        epoch: u64,
    },
    Log(String),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    FetchAllMatches { epoch: u64 },
    FetchCurrentMatches { epoch: u64 },
    FetchMatchDetail { epoch: u64, match_id: String },
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::AllMatchesLoaded { epoch, matches } => {
            if epoch != state.list_epoch {
                return;
            }
            state.all_matches = FetchState::Loaded(matches);
            state.clamp_selection();
        }
        Delta::AllMatchesFailed { epoch } => {
            if epoch != state.list_epoch {
                return;
            }
            state.all_matches = FetchState::Failed;
            state.clamp_selection();
        }
        Delta::CurrentMatchesLoaded { epoch, matches } => {
            if epoch != state.list_epoch {
                return;
            }
            state.current_matches = FetchState::Loaded(matches);
            state.clamp_selection();
        }
        Delta::CurrentMatchesFailed { epoch } => {
            if epoch != state.list_epoch {
                return;
            }
            state.current_matches = FetchState::Failed;
            state.clamp_selection();
        }
        Delta::MatchDetailLoaded { epoch, detail } => {
            if epoch != state.detail_epoch {
                return;
            }
            state.match_detail = FetchState::Loaded(detail);
        }
        Delta::MatchDetailFailed { epoch } => {
            if epoch != state.detail_epoch {
                return;
            }
            state.match_detail = FetchState::Failed;
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
