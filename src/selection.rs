//! Tag selection state machine
//!
//! Tracks which candidate record (CDDB, CD-TEXT or custom) is on display and
//! reacts to menu choices. Rendering the menu and reading input is left to
//! the caller.

use crate::album::{AlbumRecord, TagSource};
use tracing::debug;

/// Which record the menu is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    ShowingCddb,
    ShowingCdText,
    ShowingCustom,
}

/// Menu choices, numbered as presented to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Quit = 0,
    Use = 1,
    Switch = 2,
    Custom = 3,
    ApplyArtist = 4,
}

impl MenuOption {
    /// Parse a menu choice; anything unrecognised is `None`
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim() {
            "0" => Some(MenuOption::Quit),
            "1" => Some(MenuOption::Use),
            "2" => Some(MenuOption::Switch),
            "3" => Some(MenuOption::Custom),
            "4" => Some(MenuOption::ApplyArtist),
            _ => None,
        }
    }
}

/// Result of handling one menu choice
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    /// The user accepted this record
    Selected(AlbumRecord),
    /// The menu stays open, possibly in a new state
    Continue(DisplayState),
    /// `Use` was chosen while the displayed slot is empty
    NothingToUse,
    Quit,
}

/// Candidate records and the one currently displayed
#[derive(Debug, Clone)]
pub struct TagMenu {
    cddb: Option<AlbumRecord>,
    cd_text: Option<AlbumRecord>,
    custom: Option<AlbumRecord>,
    state: DisplayState,
}

impl TagMenu {
    /// Start on CDDB tags if there are any, else CD-TEXT, else custom entry
    pub fn new(cddb: Option<AlbumRecord>, cd_text: Option<AlbumRecord>) -> Self {
        let state = if cddb.is_some() {
            DisplayState::ShowingCddb
        } else if cd_text.is_some() {
            DisplayState::ShowingCdText
        } else {
            DisplayState::ShowingCustom
        };

        Self {
            cddb,
            cd_text,
            custom: None,
            state,
        }
    }

    pub fn state(&self) -> DisplayState {
        self.state
    }

    /// The record on display, if its slot is filled
    pub fn current(&self) -> Option<&AlbumRecord> {
        match self.state {
            DisplayState::ShowingCddb => self.cddb.as_ref(),
            DisplayState::ShowingCdText => self.cd_text.as_ref(),
            DisplayState::ShowingCustom => self.custom.as_ref(),
        }
    }

    fn current_mut(&mut self) -> Option<&mut AlbumRecord> {
        match self.state {
            DisplayState::ShowingCddb => self.cddb.as_mut(),
            DisplayState::ShowingCdText => self.cd_text.as_mut(),
            DisplayState::ShowingCustom => self.custom.as_mut(),
        }
    }

    /// Store manually entered tags and show them
    pub fn set_custom(&mut self, record: AlbumRecord) {
        self.custom = Some(record);
        self.state = DisplayState::ShowingCustom;
    }

    fn switch_target(&self) -> Option<DisplayState> {
        let target = match self.state {
            DisplayState::ShowingCddb => DisplayState::ShowingCdText,
            DisplayState::ShowingCdText => DisplayState::ShowingCddb,
            DisplayState::ShowingCustom if self.cddb.is_some() => DisplayState::ShowingCddb,
            DisplayState::ShowingCustom => DisplayState::ShowingCdText,
        };

        let available = match target {
            DisplayState::ShowingCddb => self.cddb.is_some(),
            DisplayState::ShowingCdText => self.cd_text.is_some(),
            DisplayState::ShowingCustom => self.custom.is_some(),
        };
        available.then_some(target)
    }

    pub fn handle(&mut self, option: MenuOption) -> MenuOutcome {
        debug!("Tag menu: {:?} while {:?}", option, self.state);

        match option {
            MenuOption::Use => match self.current() {
                Some(record) => MenuOutcome::Selected(record.clone()),
                None => MenuOutcome::NothingToUse,
            },
            MenuOption::Switch => {
                if let Some(target) = self.switch_target() {
                    self.state = target;
                }
                MenuOutcome::Continue(self.state)
            }
            MenuOption::Custom => {
                if self.custom.is_none() {
                    self.custom = Some(AlbumRecord::new(TagSource::Custom));
                }
                self.state = DisplayState::ShowingCustom;
                MenuOutcome::Continue(self.state)
            }
            MenuOption::ApplyArtist => {
                if let Some(record) = self.current_mut() {
                    let artist = record.album_artist.clone();
                    record.apply_artist_to_all(&artist);
                }
                MenuOutcome::Continue(self.state)
            }
            MenuOption::Quit => MenuOutcome::Quit,
        }
    }
}
