// crates/nationality-core/src/selector/mod.rs
//! The nationality dropdown as a headless state machine.
//!
//! [`NationalitySelector`] owns the interaction state of one picker
//! instance: open/closed, the search text, the keyboard focus and the
//! committed selection. It knows nothing about rendering. Hosts feed it
//! input ([`SelectorKey`], clicks, blur) and render from its accessors.
//!
//! ```text
//!            activate / Enter / ↑ / ↓
//!   Closed ───────────────────────────▶ Open
//!     ▲                                  │
//!     └──── commit │ Escape │ blur ◀─────┘
//! ```
//!
//! Committing the sentinel entry yields `None`; consumers never see the
//! literal `"unknown"` code as a selection.

mod keys;
pub mod persist;

pub use keys::SelectorKey;
pub use persist::{Deferred, Immediate, PersistStrategy};

use crate::model::{Country, NationalityDb, SENTINEL_CODE};
use crate::profile::ProfileSnapshot;
use crate::traits::{NameMatch, NationalitySearch};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Result of feeding one input to the selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SelectorOutcome {
    /// Input handled; the widget is (still) open.
    Pending,
    /// The widget went from closed to open.
    Opened,
    /// An entry was committed. `None` means "no nationality set".
    Committed(Option<String>),
    /// Closed without committing (Escape or blur).
    Dismissed,
    /// Input had no effect in the current state.
    Ignored,
}

/// Plain snapshot of the interaction state, for rendering and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectorState {
    pub is_open: bool,
    pub search_query: String,
    pub focused_index: usize,
    pub selected_code: Option<String>,
    pub current_nationality: Option<String>,
}

pub type ChangeCallback = Box<dyn Fn(Option<&str>)>;

pub struct NationalitySelector {
    db: Arc<NationalityDb>,
    state: SelectorState,
    filtered: Arc<[u16]>,
    on_change: Option<ChangeCallback>,
    persist: Box<dyn PersistStrategy>,
}

impl fmt::Debug for NationalitySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NationalitySelector")
            .field("state", &self.state)
            .field("filtered", &self.filtered.len())
            .finish()
    }
}

impl NationalitySelector {
    /// A closed selector that leaves persistence to the caller.
    pub fn new(db: Arc<NationalityDb>) -> Self {
        Self::with_strategy(db, Deferred)
    }

    pub fn with_strategy(db: Arc<NationalityDb>, persist: impl PersistStrategy + 'static) -> Self {
        let filtered = db.search_positions(None);
        Self {
            db,
            state: SelectorState::default(),
            filtered,
            on_change: None,
            persist: Box::new(persist),
        }
    }

    /// Notified with the committed code after every commit.
    pub fn on_change(mut self, callback: impl Fn(Option<&str>) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /* ----------------------------------------------------------------------
       Accessors
    ---------------------------------------------------------------------- */

    pub fn state(&self) -> &SelectorState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    pub fn query(&self) -> &str {
        &self.state.search_query
    }

    /// Index into [`filtered`](Self::filtered); always in range, or 0 when
    /// the list is empty.
    pub fn focused_index(&self) -> usize {
        self.state.focused_index
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// The current search results backing keyboard navigation.
    pub fn filtered(&self) -> Vec<&Country> {
        self.filtered.iter().map(|&id| self.db.country_at(id)).collect()
    }

    pub fn focused(&self) -> Option<&Country> {
        self.filtered
            .get(self.state.focused_index)
            .map(|&id| self.db.country_at(id))
    }

    /// The externally supplied nationality when present, otherwise the
    /// locally committed one.
    pub fn selected_code(&self) -> Option<&str> {
        self.state
            .current_nationality
            .as_deref()
            .or(self.state.selected_code.as_deref())
    }

    /// The country to display in the trigger; the sentinel when nothing is
    /// selected.
    pub fn selected_country(&self) -> &Country {
        self.db.resolve(self.selected_code())
    }

    pub fn db(&self) -> &Arc<NationalityDb> {
        &self.db
    }

    /* ----------------------------------------------------------------------
       External seeding
    ---------------------------------------------------------------------- */

    /// Seed or override the displayed selection, e.g. from the user's
    /// profile. The sentinel and empty codes are stored as `None`.
    pub fn set_current_nationality(&mut self, code: Option<String>) {
        self.state.current_nationality =
            code.filter(|c| !c.is_empty() && c.as_str() != SENTINEL_CODE);
    }

    /// Apply a profile reader snapshot. Only a loaded profile seeds the
    /// selection; loading and error snapshots leave it untouched.
    pub fn apply_profile(&mut self, snapshot: &ProfileSnapshot) {
        if let ProfileSnapshot::Ready(code) = snapshot {
            self.set_current_nationality(code.clone());
        }
    }

    /* ----------------------------------------------------------------------
       Transitions
    ---------------------------------------------------------------------- */

    /// Closed → Open. Resets the query and focus.
    pub fn activate(&mut self) -> SelectorOutcome {
        if self.state.is_open {
            return SelectorOutcome::Ignored;
        }
        self.state.is_open = true;
        self.state.search_query.clear();
        self.state.focused_index = 0;
        self.refresh();
        SelectorOutcome::Opened
    }

    /// Trigger click: opens a closed widget, dismisses an open one.
    pub fn toggle(&mut self) -> SelectorOutcome {
        if self.state.is_open {
            self.dismiss()
        } else {
            self.activate()
        }
    }

    pub fn escape(&mut self) -> SelectorOutcome {
        self.dismiss()
    }

    /// Focus left the widget (click outside, tab away).
    pub fn blur(&mut self) -> SelectorOutcome {
        self.dismiss()
    }

    fn dismiss(&mut self) -> SelectorOutcome {
        if !self.state.is_open {
            return SelectorOutcome::Ignored;
        }
        self.state.is_open = false;
        SelectorOutcome::Dismissed
    }

    /// Replace the search text and re-run the search. Focus returns to the
    /// first result.
    pub fn set_query(&mut self, text: &str) -> SelectorOutcome {
        if !self.state.is_open {
            return SelectorOutcome::Ignored;
        }
        self.state.search_query = text.to_owned();
        self.state.focused_index = 0;
        self.refresh();
        SelectorOutcome::Pending
    }

    pub fn focus_next(&mut self) -> SelectorOutcome {
        if !self.state.is_open {
            return SelectorOutcome::Ignored;
        }
        let len = self.filtered.len();
        if len > 0 {
            self.state.focused_index = (self.state.focused_index + 1) % len;
        }
        SelectorOutcome::Pending
    }

    pub fn focus_previous(&mut self) -> SelectorOutcome {
        if !self.state.is_open {
            return SelectorOutcome::Ignored;
        }
        let len = self.filtered.len();
        if len > 0 {
            self.state.focused_index = match self.state.focused_index {
                0 => len - 1,
                i => i - 1,
            };
        }
        SelectorOutcome::Pending
    }

    /// Type-ahead: focus the next entry after the current one (wrapping)
    /// whose name starts with `letter`, ignoring case and accents.
    pub fn focus_letter(&mut self, letter: char) -> SelectorOutcome {
        if !self.state.is_open {
            return SelectorOutcome::Ignored;
        }
        let len = self.filtered.len();
        let start = self.state.focused_index;
        let hit = (1..=len)
            .map(|step| (start + step) % len)
            .find(|&i| self.db.country_at(self.filtered[i]).name_starts_with(letter));
        if let Some(i) = hit {
            self.state.focused_index = i;
        }
        SelectorOutcome::Pending
    }

    /// Commit the focused entry (Enter). No-op on an empty result list.
    pub fn commit_focused(&mut self) -> SelectorOutcome {
        if !self.state.is_open {
            return SelectorOutcome::Ignored;
        }
        match self.filtered.get(self.state.focused_index) {
            Some(&id) => self.commit(id),
            None => SelectorOutcome::Pending,
        }
    }

    /// Pointer activation of the entry at `index` in the filtered list.
    pub fn click(&mut self, index: usize) -> SelectorOutcome {
        if !self.state.is_open {
            return SelectorOutcome::Ignored;
        }
        match self.filtered.get(index) {
            Some(&id) => {
                self.state.focused_index = index;
                self.commit(id)
            }
            None => SelectorOutcome::Ignored,
        }
    }

    /// Keyboard dispatch.
    pub fn handle_key(&mut self, key: SelectorKey) -> SelectorOutcome {
        if !self.state.is_open {
            return match key {
                SelectorKey::Enter | SelectorKey::Down | SelectorKey::Up => self.activate(),
                _ => SelectorOutcome::Ignored,
            };
        }

        match key {
            SelectorKey::Down => self.focus_next(),
            SelectorKey::Up => self.focus_previous(),
            SelectorKey::Home => {
                self.state.focused_index = 0;
                SelectorOutcome::Pending
            }
            SelectorKey::End => {
                self.state.focused_index = self.filtered.len().saturating_sub(1);
                SelectorOutcome::Pending
            }
            SelectorKey::Enter => self.commit_focused(),
            SelectorKey::Escape => self.escape(),
            SelectorKey::Backspace => {
                let mut text = self.state.search_query.clone();
                text.pop();
                self.set_query(&text)
            }
            SelectorKey::Char(c) if !c.is_control() => {
                let mut text = self.state.search_query.clone();
                text.push(c);
                self.set_query(&text)
            }
            SelectorKey::Char(_) => SelectorOutcome::Ignored,
            SelectorKey::Letter(c) => self.focus_letter(c),
        }
    }

    fn commit(&mut self, id: u16) -> SelectorOutcome {
        let code = self
            .db
            .country_at(id)
            .selection_code()
            .map(str::to_owned);
        debug!(code = ?code, "nationality committed");

        self.state.selected_code = code.clone();
        self.state.is_open = false;

        if let Some(callback) = &self.on_change {
            callback(code.as_deref());
        }
        self.persist.on_commit(code.as_deref());

        SelectorOutcome::Committed(code)
    }

    /// Re-run the search for the current query and clamp the focus into the
    /// new result list.
    fn refresh(&mut self) {
        let query = self.state.search_query.as_str();
        self.filtered = self.db.search_positions(Some(query));
        let len = self.filtered.len();
        self.state.focused_index = if len == 0 {
            0
        } else {
            self.state.focused_index.min(len - 1)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn selector() -> NationalitySelector {
        NationalitySelector::new(Arc::new(NationalityDb::builtin()))
    }

    #[test]
    fn starts_closed_with_nothing_selected() {
        let s = selector();
        assert!(!s.is_open());
        assert_eq!(s.selected_code(), None);
        assert!(s.selected_country().is_sentinel());
    }

    #[test]
    fn activate_resets_query_and_focus() {
        let mut s = selector();
        s.activate();
        s.set_query("kor");
        s.focus_next();
        s.escape();
        assert!(!s.is_open());

        assert_eq!(s.activate(), SelectorOutcome::Opened);
        assert_eq!(s.query(), "");
        assert_eq!(s.focused_index(), 0);
        assert_eq!(s.filtered_len(), s.db().catalog().len());
    }

    #[test]
    fn focus_wraps_in_both_directions() {
        let mut s = selector();
        s.activate();
        s.set_query("korea");
        assert_eq!(s.filtered_len(), 2);

        s.focus_next();
        assert_eq!(s.focused_index(), 1);
        s.focus_next();
        assert_eq!(s.focused_index(), 0);
        s.focus_previous();
        assert_eq!(s.focused_index(), 1);
    }

    #[test]
    fn focus_movement_on_empty_list_stays_at_zero() {
        let mut s = selector();
        s.activate();
        s.set_query("no such place");
        assert_eq!(s.filtered_len(), 0);

        s.handle_key(SelectorKey::Up);
        assert_eq!(s.focused_index(), 0);
        s.handle_key(SelectorKey::Down);
        assert_eq!(s.focused_index(), 0);
        s.handle_key(SelectorKey::End);
        assert_eq!(s.focused_index(), 0);
        s.handle_key(SelectorKey::Letter('a'));
        assert_eq!(s.focused_index(), 0);
        assert_eq!(s.commit_focused(), SelectorOutcome::Pending);
        assert!(s.is_open());
    }

    #[test]
    fn focus_is_clamped_when_results_shrink() {
        let mut s = selector();
        s.activate();
        s.handle_key(SelectorKey::End);
        assert_eq!(s.focused_index(), s.filtered_len() - 1);

        s.handle_key(SelectorKey::Char('z'));
        assert!(s.focused_index() < s.filtered_len().max(1));
    }

    #[test]
    fn committing_sentinel_yields_none() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut s = selector().on_change(move |code| sink.borrow_mut().push(code.map(str::to_owned)));

        s.activate();
        assert!(s.focused().is_some_and(Country::is_sentinel));
        assert_eq!(s.commit_focused(), SelectorOutcome::Committed(None));
        assert_eq!(s.state().selected_code, None);
        assert_eq!(*seen.borrow(), vec![None]);
    }

    #[test]
    fn click_commits_that_row() {
        let mut s = selector();
        s.activate();
        s.set_query("kor");
        let south = s.filtered().iter().position(|c| c.code() == "KR").unwrap();
        assert_eq!(s.click(south), SelectorOutcome::Committed(Some("KR".into())));
        assert!(!s.is_open());
        assert_eq!(s.selected_code(), Some("KR"));
        assert_eq!(s.selected_country().name(), "South Korea");
    }

    #[test]
    fn click_out_of_range_is_ignored() {
        let mut s = selector();
        assert_eq!(s.click(0), SelectorOutcome::Ignored);
        s.activate();
        assert_eq!(s.click(10_000), SelectorOutcome::Ignored);
        assert!(s.is_open());
    }

    #[test]
    fn typing_filters_and_backspace_widens() {
        let mut s = selector();
        s.handle_key(SelectorKey::Enter);
        for c in "swe".chars() {
            s.handle_key(SelectorKey::Char(c));
        }
        let names: Vec<&str> = s.filtered().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Sweden"]);

        s.handle_key(SelectorKey::Backspace);
        assert_eq!(s.query(), "sw");
        assert!(s.filtered_len() > 1);
    }

    #[test]
    fn closed_widget_ignores_typing() {
        let mut s = selector();
        assert_eq!(s.handle_key(SelectorKey::Char('a')), SelectorOutcome::Ignored);
        assert_eq!(s.handle_key(SelectorKey::Escape), SelectorOutcome::Ignored);
        assert_eq!(s.handle_key(SelectorKey::Down), SelectorOutcome::Opened);
    }

    #[test]
    fn escape_and_blur_dismiss_without_commit() {
        let mut s = selector();
        s.activate();
        s.focus_next();
        assert_eq!(s.escape(), SelectorOutcome::Dismissed);
        assert_eq!(s.selected_code(), None);

        s.toggle();
        assert_eq!(s.blur(), SelectorOutcome::Dismissed);
        assert_eq!(s.blur(), SelectorOutcome::Ignored);
    }

    #[test]
    fn letter_jump_wraps_and_skips_current() {
        let mut s = selector();
        s.activate();
        s.handle_key(SelectorKey::Letter('z'));
        assert_eq!(s.focused().map(Country::name), Some("Zambia"));
        s.handle_key(SelectorKey::Letter('z'));
        assert_eq!(s.focused().map(Country::name), Some("Zimbabwe"));
        s.handle_key(SelectorKey::Letter('z'));
        assert_eq!(s.focused().map(Country::name), Some("Zambia"));
    }

    #[test]
    fn external_nationality_takes_precedence() {
        let mut s = selector();
        s.activate();
        s.set_query("japan");
        s.commit_focused();
        assert_eq!(s.selected_code(), Some("JP"));

        s.apply_profile(&ProfileSnapshot::Ready(Some("KR".into())));
        assert_eq!(s.selected_code(), Some("KR"));

        s.apply_profile(&ProfileSnapshot::Loading);
        assert_eq!(s.selected_code(), Some("KR"));

        s.set_current_nationality(Some("unknown".into()));
        assert_eq!(s.selected_code(), Some("JP"));

        s.apply_profile(&ProfileSnapshot::Ready(None));
        assert_eq!(s.selected_code(), Some("JP"));
    }
}
