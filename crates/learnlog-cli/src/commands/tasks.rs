use clap::Subcommand;
use learnlog_core::{default_coding_tasks, ModuleProgress, Store, Task};

#[derive(Subcommand)]
pub enum TasksAction {
    /// List tasks for a module
    List {
        /// Module name (e.g. "javascript")
        #[arg(default_value = "javascript")]
        module: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Toggle a task's completed state
    Toggle {
        /// Task id
        id: String,
        /// Module name
        #[arg(long, default_value = "javascript")]
        module: String,
    },
}

fn initial_tasks(module: &str) -> Vec<Task> {
    if module == "javascript" {
        default_coding_tasks()
    } else {
        Vec::new()
    }
}

pub fn run(action: TasksAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;

    match action {
        TasksAction::List { module, json } => {
            let progress = ModuleProgress::new(&store, &module, initial_tasks(&module));
            let tasks = progress.tasks();
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                for task in &tasks {
                    let mark = if task.completed { "x" } else { " " };
                    println!("[{mark}] {}  {}", task.id, task.title);
                }
                println!(
                    "{}/{} completed ({}%)",
                    progress.completed_count(),
                    tasks.len(),
                    progress.percent_complete()
                );
            }
        }
        TasksAction::Toggle { id, module } => {
            let progress = ModuleProgress::new(&store, &module, initial_tasks(&module));
            if !progress.toggle(&id) {
                eprintln!("unknown task: {id}");
                std::process::exit(1);
            }
            let completed = progress
                .tasks()
                .into_iter()
                .find(|t| t.id == id)
                .map(|t| t.completed)
                .unwrap_or(false);
            println!(
                "{} is now {}",
                id,
                if completed { "completed" } else { "open" }
            );
        }
    }
    Ok(())
}
