use clap::Subcommand;
use learnlog_core::{Preferences, Store};

use super::MODULES;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show all settings
    Show,
    /// Turn a toggle on or off
    Set {
        /// Toggle name: dark-mode, notifications, email-updates, sound-effects
        name: String,
        /// New value: on/off (or true/false)
        value: String,
    },
    /// Reset the daily streak
    ResetStreak,
    /// Reset all learning progress (streak and task lists)
    ResetProgress,
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let prefs = Preferences::new(&store);

    match action {
        SettingsAction::Show => {
            println!("{}", serde_json::to_string_pretty(&prefs.snapshot())?);
        }
        SettingsAction::Set { name, value } => {
            let on = match value.as_str() {
                "on" | "true" => true,
                "off" | "false" => false,
                other => {
                    eprintln!("invalid value: {other} (expected on/off)");
                    std::process::exit(1);
                }
            };
            match prefs.set_toggle(&name, on) {
                Some(new_value) => println!("{name} = {new_value}"),
                None => {
                    eprintln!("unknown setting: {name}");
                    std::process::exit(1);
                }
            }
        }
        SettingsAction::ResetStreak => {
            prefs.reset_streak();
            println!("streak reset");
        }
        SettingsAction::ResetProgress => {
            prefs.reset_progress(MODULES);
            println!("all learning progress reset");
        }
    }
    Ok(())
}
