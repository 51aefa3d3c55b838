//! User preferences and the login session flag.
//!
//! Each toggle is an ordinary boolean slot in the store; the keys match
//! what the web dashboard persisted so existing data keeps working. Login
//! is a persisted flag, not authentication.

use serde::Serialize;

use crate::storage::Store;
use crate::streak::STREAK_KEY;

pub const DARK_MODE_KEY: &str = "darkMode";
pub const NOTIFICATIONS_KEY: &str = "notifications";
pub const EMAIL_UPDATES_KEY: &str = "emailUpdates";
pub const SOUND_EFFECTS_KEY: &str = "soundEffects";
pub const LOGGED_IN_KEY: &str = "isLoggedIn";

/// Snapshot of all preference toggles, for display.
#[derive(Debug, Clone, Serialize)]
pub struct PreferencesSnapshot {
    pub dark_mode: bool,
    pub notifications: bool,
    pub email_updates: bool,
    pub sound_effects: bool,
    pub logged_in: bool,
}

/// Preference accessors over a shared store.
#[derive(Clone)]
pub struct Preferences {
    store: Store,
}

impl Preferences {
    pub fn new(store: &Store) -> Self {
        Self {
            store: store.clone(),
        }
    }

    pub fn dark_mode(&self) -> bool {
        self.store.get_or_init(DARK_MODE_KEY, false)
    }

    pub fn toggle_dark_mode(&self) -> bool {
        self.store.update(DARK_MODE_KEY, false, |on| !on)
    }

    pub fn notifications(&self) -> bool {
        self.store.get_or_init(NOTIFICATIONS_KEY, true)
    }

    pub fn email_updates(&self) -> bool {
        self.store.get_or_init(EMAIL_UPDATES_KEY, true)
    }

    pub fn sound_effects(&self) -> bool {
        self.store.get_or_init(SOUND_EFFECTS_KEY, true)
    }

    /// Set a toggle by its settings-surface name. Returns the new value,
    /// or `None` for an unknown name.
    pub fn set_toggle(&self, name: &str, on: bool) -> Option<bool> {
        Self::toggle_key(name).map(|key| self.store.set(key, on))
    }

    /// Map a settings-surface name to its storage key.
    pub fn toggle_key(name: &str) -> Option<&'static str> {
        match name {
            "dark-mode" => Some(DARK_MODE_KEY),
            "notifications" => Some(NOTIFICATIONS_KEY),
            "email-updates" => Some(EMAIL_UPDATES_KEY),
            "sound-effects" => Some(SOUND_EFFECTS_KEY),
            _ => None,
        }
    }

    pub fn logged_in(&self) -> bool {
        self.store.get_or_init(LOGGED_IN_KEY, false)
    }

    pub fn log_in(&self) {
        self.store.set(LOGGED_IN_KEY, true);
    }

    pub fn log_out(&self) {
        self.store.set(LOGGED_IN_KEY, false);
    }

    pub fn snapshot(&self) -> PreferencesSnapshot {
        PreferencesSnapshot {
            dark_mode: self.dark_mode(),
            notifications: self.notifications(),
            email_updates: self.email_updates(),
            sound_effects: self.sound_effects(),
            logged_in: self.logged_in(),
        }
    }

    /// Reset the streak alone.
    pub fn reset_streak(&self) {
        self.store.remove(STREAK_KEY);
    }

    /// Clear all learning progress: the streak plus the given modules'
    /// task lists.
    pub fn reset_progress(&self, modules: &[&str]) {
        self.store.remove(STREAK_KEY);
        for module in modules {
            self.store.remove(&format!("{module}-tasks"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{default_coding_tasks, ModuleProgress};
    use crate::storage::MemoryBackend;
    use crate::streak::StreakTracker;

    fn prefs() -> (Preferences, Store) {
        let store = Store::new(MemoryBackend::new());
        (Preferences::new(&store), store)
    }

    #[test]
    fn defaults_match_the_original_app() {
        let (prefs, _) = prefs();
        assert!(!prefs.dark_mode());
        assert!(prefs.notifications());
        assert!(prefs.email_updates());
        assert!(prefs.sound_effects());
        assert!(!prefs.logged_in());
    }

    #[test]
    fn toggle_dark_mode_flips_and_persists() {
        let (prefs, store) = prefs();
        assert!(prefs.toggle_dark_mode());
        assert!(prefs.dark_mode());
        // A second accessor over the same store agrees.
        assert!(Preferences::new(&store).dark_mode());
        assert!(!prefs.toggle_dark_mode());
    }

    #[test]
    fn set_toggle_by_name() {
        let (prefs, _) = prefs();
        assert_eq!(prefs.set_toggle("notifications", false), Some(false));
        assert!(!prefs.notifications());
        assert_eq!(prefs.set_toggle("not-a-toggle", true), None);
    }

    #[test]
    fn login_flag_roundtrip() {
        let (prefs, _) = prefs();
        prefs.log_in();
        assert!(prefs.logged_in());
        prefs.log_out();
        assert!(!prefs.logged_in());
    }

    #[test]
    fn reset_progress_clears_streak_and_module_tasks() {
        let (prefs, store) = prefs();
        let tracker = StreakTracker::new(&store);
        let progress = ModuleProgress::new(&store, "javascript", default_coding_tasks());

        tracker.register_activity_on("2024-06-10".parse().unwrap());
        progress.toggle("react-hooks");
        assert_eq!(tracker.current_count(), 1);
        assert_eq!(progress.completed_count(), 3);

        prefs.reset_progress(&["javascript"]);

        assert_eq!(tracker.current_count(), 0);
        // Task list re-seeds from the initial set.
        assert_eq!(progress.completed_count(), 2);
    }

    #[test]
    fn reset_streak_leaves_tasks_alone() {
        let (prefs, store) = prefs();
        let tracker = StreakTracker::new(&store);
        let progress = ModuleProgress::new(&store, "javascript", default_coding_tasks());

        tracker.register_activity_on("2024-06-10".parse().unwrap());
        progress.toggle("react-hooks");

        prefs.reset_streak();

        assert_eq!(tracker.current_count(), 0);
        assert_eq!(progress.completed_count(), 3);
    }
}
