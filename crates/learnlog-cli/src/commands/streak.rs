use clap::Subcommand;
use learnlog_core::{Store, StreakTracker};

#[derive(Subcommand)]
pub enum StreakAction {
    /// Show the current streak
    Show,
    /// Register activity for today
    Checkin,
    /// Reset the streak to zero
    Reset,
}

pub fn run(action: StreakAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let tracker = StreakTracker::new(&store);

    match action {
        StreakAction::Show => {
            println!("{} day(s)", tracker.current_count());
        }
        StreakAction::Checkin => {
            let count = tracker.register_activity();
            println!("checked in, streak is {count} day(s)");
        }
        StreakAction::Reset => {
            tracker.reset();
            println!("streak reset");
        }
    }
    Ok(())
}
