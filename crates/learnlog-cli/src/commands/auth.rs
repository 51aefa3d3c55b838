use clap::Subcommand;
use learnlog_core::{Preferences, Store};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Mark the session as logged in
    Login,
    /// Mark the session as logged out
    Logout,
    /// Show the current session state
    Status,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let prefs = Preferences::new(&store);

    match action {
        AuthAction::Login => {
            prefs.log_in();
            println!("logged in");
        }
        AuthAction::Logout => {
            prefs.log_out();
            println!("logged out");
        }
        AuthAction::Status => {
            if prefs.logged_in() {
                println!("logged in");
            } else {
                println!("logged out");
            }
        }
    }
    Ok(())
}
