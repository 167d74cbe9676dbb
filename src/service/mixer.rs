//! Two-deck mixing engine.
//!
//! Each deck exclusively owns a prepared copy of a track. Loading always targets
//! the inactive deck; once the new track is in place, the previously active deck
//! is unloaded and the target becomes active (an instant transition).

use crate::config::MixerSettings;
use crate::error::{CloneError, MixerError};
use crate::handle::Owned;
use crate::resource::Resource;
use crate::track::Track;
use core::fmt;
use tracing::{debug, info};

/// Number of decks on the mixer.
pub const DECK_COUNT: usize = 2;

/// Two decks, an active-deck pointer, and tempo matching settings.
#[derive(Debug, Default)]
pub struct MixingEngine {
    decks: [Owned<Track>; DECK_COUNT],
    active_deck: usize,
    auto_sync: bool,
    bpm_tolerance: u32,
}

impl MixingEngine {
    /// Creates an engine with both decks empty, auto-sync off and zero tolerance.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: &MixerSettings) -> Self {
        Self {
            auto_sync: settings.auto_sync,
            bpm_tolerance: settings.bpm_tolerance,
            ..Self::default()
        }
    }

    pub fn auto_sync(&self) -> bool {
        self.auto_sync
    }

    pub fn set_auto_sync(&mut self, auto_sync: bool) {
        self.auto_sync = auto_sync;
    }

    pub fn bpm_tolerance(&self) -> u32 {
        self.bpm_tolerance
    }

    pub fn set_bpm_tolerance(&mut self, bpm_tolerance: u32) {
        self.bpm_tolerance = bpm_tolerance;
    }

    #[inline]
    pub fn active_deck(&self) -> usize {
        self.active_deck
    }

    /// The track on deck `index`, if any.
    pub fn deck(&self, index: usize) -> Result<Option<&Track>, MixerError> {
        self.decks
            .get(index)
            .map(Owned::view)
            .ok_or(MixerError::InvalidDeck { deck: index })
    }

    /// Removes and returns the track on deck `index`.
    pub fn unload_deck(&mut self, index: usize) -> Result<Owned<Track>, MixerError> {
        let deck = self
            .decks
            .get_mut(index)
            .ok_or(MixerError::InvalidDeck { deck: index })?;
        Ok(deck.take())
    }

    /// Loads a prepared copy of `track` and returns the deck it landed on.
    ///
    /// # Errors
    ///
    /// Returns [`MixerError::Clone`] if the copy could not be made. Both decks are
    /// left as they were.
    pub fn load_track_to_deck(&mut self, track: &Track) -> Result<usize, MixerError> {
        self.place_copy(track.try_clone_owned())
    }

    fn place_copy(&mut self, copy: Result<Owned<Track>, CloneError>) -> Result<usize, MixerError> {
        let mut incoming = copy?;
        let title = incoming.view().map(|t| t.title().to_string()).unwrap_or_default();

        if self.decks.iter().all(Owned::is_empty) {
            if let Ok(copy) = incoming.get_mut() {
                copy.prepare();
            }
            self.decks[0].transfer_from(&mut incoming);
            self.active_deck = 0;
            info!(title = %title, deck = 0, "loaded first track");
            return Ok(0);
        }

        let target = DECK_COUNT - 1 - self.active_deck;
        debug!(deck = target, "switching to target deck");
        self.decks[target].clear();

        if let Ok(copy) = incoming.get_mut() {
            copy.prepare();
            let active_loaded = self.decks[self.active_deck].is_some();
            if self.auto_sync && active_loaded && !self.can_mix_tracks(copy) {
                self.sync_bpm(copy);
            }
        }
        self.decks[target].transfer_from(&mut incoming);
        info!(title = %title, deck = target, "loaded track");

        let previous = self.active_deck;
        self.decks[previous].clear();
        self.active_deck = target;
        debug!(unloaded = previous, active = target, "deck transition");
        Ok(target)
    }

    /// Whether `track` is within `bpm_tolerance` of the active deck's track.
    ///
    /// Always `false` while the active deck is empty.
    pub fn can_mix_tracks(&self, track: &Track) -> bool {
        self.decks[self.active_deck]
            .view()
            .is_some_and(|active| active.bpm().abs_diff(track.bpm()) <= self.bpm_tolerance)
    }

    /// Sets `track`'s BPM to the rounded average of its BPM and the active deck's.
    ///
    /// No-op while the active deck is empty.
    pub fn sync_bpm(&self, track: &mut Track) {
        let Some(active) = self.decks[self.active_deck].view() else {
            return;
        };
        let average = (u64::from(active.bpm()) + u64::from(track.bpm()) + 1) / 2;
        let synced = u32::try_from(average).unwrap_or(u32::MAX);
        info!(
            title = track.title(),
            from = track.bpm(),
            to = synced,
            "synced BPM to active deck"
        );
        track.set_bpm(synced);
    }

    /// Snapshot of both decks.
    pub fn status(&self) -> DeckStatus {
        DeckStatus {
            decks: core::array::from_fn(|i| self.decks[i].view().map(|t| t.title().to_string())),
            active_deck: self.active_deck,
        }
    }
}

/// Titles loaded on each deck, plus the active deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckStatus {
    pub decks: [Option<String>; DECK_COUNT],
    pub active_deck: usize,
}

impl fmt::Display for DeckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, deck) in self.decks.iter().enumerate() {
            match deck {
                Some(title) => writeln!(f, "Deck {}: {}", i, title)?,
                None => writeln!(f, "Deck {}: [EMPTY]", i)?,
            }
        }
        writeln!(f, "Active Deck: {}", self.active_deck)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(title: &str, bpm: u32) -> Track {
        Track::mp3(title, vec![], 2, bpm, 320, true)
    }

    fn failed_clone(title: &str) -> CloneError {
        let mut buf: Vec<u8> = Vec::new();
        CloneError {
            title: title.to_string(),
            source: buf.try_reserve_exact(usize::MAX).unwrap_err(),
        }
    }

    #[test]
    fn test_clone_failure_leaves_decks_unchanged() {
        let mut engine = MixingEngine::new();
        assert!(matches!(
            engine.place_copy(Err(failed_clone("A"))),
            Err(MixerError::Clone(_))
        ));
        assert!(engine.deck(0).unwrap().is_none());
        assert!(engine.deck(1).unwrap().is_none());

        engine.load_track_to_deck(&track("A", 120)).unwrap();
        let before = engine.status();
        assert!(matches!(
            engine.place_copy(Err(failed_clone("B"))),
            Err(MixerError::Clone(_))
        ));
        assert_eq!(engine.status(), before);
        assert_eq!(engine.active_deck(), 0);
        assert_eq!(engine.deck(0).unwrap().map(Track::title), Some("A"));
    }

    #[test]
    fn test_first_load_goes_to_deck_zero() {
        let mut engine = MixingEngine::new();
        assert_eq!(engine.load_track_to_deck(&track("A", 120)), Ok(0));
        assert_eq!(engine.active_deck(), 0);
        let loaded = engine.deck(0).unwrap().unwrap();
        assert_eq!(loaded.title(), "A");
        assert!(loaded.is_loaded());
        assert!(engine.deck(1).unwrap().is_none());
    }

    #[test]
    fn test_loads_alternate_decks_with_instant_transition() {
        let mut engine = MixingEngine::new();
        engine.load_track_to_deck(&track("A", 120)).unwrap();
        assert_eq!(engine.load_track_to_deck(&track("B", 120)), Ok(1));
        assert_eq!(engine.active_deck(), 1);
        assert!(engine.deck(0).unwrap().is_none());
        assert_eq!(engine.deck(1).unwrap().map(Track::title), Some("B"));

        assert_eq!(engine.load_track_to_deck(&track("C", 120)), Ok(0));
        assert_eq!(
            engine.status(),
            DeckStatus {
                decks: [Some("C".into()), None],
                active_deck: 0,
            }
        );
    }

    #[test]
    fn test_can_mix_tracks() {
        let mut engine = MixingEngine::new();
        engine.set_bpm_tolerance(4);
        assert!(!engine.can_mix_tracks(&track("X", 120)));

        engine.load_track_to_deck(&track("A", 120)).unwrap();
        assert!(engine.can_mix_tracks(&track("X", 124)));
        assert!(engine.can_mix_tracks(&track("X", 116)));
        assert!(!engine.can_mix_tracks(&track("X", 125)));
    }

    #[test]
    fn test_sync_bpm_rounds_average() {
        let mut engine = MixingEngine::new();
        let mut incoming = track("X", 125);
        engine.sync_bpm(&mut incoming);
        assert_eq!(incoming.bpm(), 125);

        engine.load_track_to_deck(&track("A", 120)).unwrap();
        engine.sync_bpm(&mut incoming);
        assert_eq!(incoming.bpm(), 123);
    }

    #[test]
    fn test_auto_sync_on_load() {
        let mut engine = MixingEngine::with_settings(&MixerSettings {
            auto_sync: true,
            bpm_tolerance: 2,
        });
        engine.load_track_to_deck(&track("A", 120)).unwrap();
        engine.load_track_to_deck(&track("B", 130)).unwrap();
        assert_eq!(engine.deck(1).unwrap().map(Track::bpm), Some(125));

        // within tolerance, no sync
        engine.load_track_to_deck(&track("C", 127)).unwrap();
        assert_eq!(engine.deck(0).unwrap().map(Track::bpm), Some(127));
    }

    #[test]
    fn test_source_track_untouched() {
        let mut engine = MixingEngine::new();
        engine.set_auto_sync(true);
        let a = track("A", 100);
        let b = track("B", 140);
        engine.load_track_to_deck(&a).unwrap();
        engine.load_track_to_deck(&b).unwrap();
        assert_eq!(b.bpm(), 140);
        assert!(!b.is_loaded());
    }

    #[test]
    fn test_invalid_deck() {
        let mut engine = MixingEngine::new();
        assert_eq!(engine.deck(2), Err(MixerError::InvalidDeck { deck: 2 }));
        assert!(engine.unload_deck(5).is_err());
        engine.load_track_to_deck(&track("A", 120)).unwrap();
        let unloaded = engine.unload_deck(0).unwrap();
        assert_eq!(unloaded.get().map(Track::title), Ok("A"));
        assert!(engine.deck(0).unwrap().is_none());
    }

    #[test]
    fn test_status_display() {
        let mut engine = MixingEngine::new();
        engine.load_track_to_deck(&track("A", 120)).unwrap();
        assert_eq!(
            engine.status().to_string(),
            "Deck 0: A\nDeck 1: [EMPTY]\nActive Deck: 0\n"
        );
    }
}
