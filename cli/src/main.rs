use clap::{Parser, Subcommand};
use travel_tasks_cli::{ApiClient, Task, validate_form};

#[derive(Parser, Debug)]
#[command(about = "Command-line client for the travel task tracker")]
struct Cli {
    /// Base URL of the task API
    #[arg(
        long,
        env = "TRAVEL_TASKS_API_URL",
        default_value = "http://localhost:8080"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
enum Commands {
    /// List every task
    List,
    /// Show a single task
    Show { id: u32 },
    /// Add a new task
    Add {
        title: String,
        #[arg(default_value = "")]
        description: String,
    },
    /// Toggle a task between done and not done
    Done { id: u32 },
    /// Delete a task
    Rm { id: u32 },
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let client = ApiClient::new(args.api_url);

    match args.command {
        Commands::List => {
            for task in client.list_tasks()? {
                print_task(&task);
            }
        }
        Commands::Show { id } => print_task(&client.get_task(id)?),
        Commands::Add { title, description } => {
            validate_form(&title, &description)?;
            let task = client.create_task(title, description)?;
            println!("Task added with ID {}", task.id);
        }
        Commands::Done { id } => {
            let task = client.toggle_task_completion(id)?;
            let state = if task.is_completed { "done" } else { "not done" };
            println!("Task {} is now {}", task.id, state);
        }
        Commands::Rm { id } => {
            client.delete_task(id)?;
            println!("Task {id} deleted");
        }
    };

    Ok(())
}

fn print_task(task: &Task) {
    let marker = if task.is_completed { "x" } else { " " };
    println!(
        "[{marker}] {} {} ({}) {}",
        task.id,
        task.title,
        task.date.format("%Y-%m-%d"),
        task.description
    );
}
