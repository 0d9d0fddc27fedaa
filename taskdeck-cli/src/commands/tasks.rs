use anyhow::{Result, anyhow, bail};
use clap::Subcommand;
use shared::{
    guards::Route,
    models::{Task, TaskStatus},
    workflow::{TaskBoard, TaskForm, load_task, remove_task},
};

use crate::context::{Context, report};

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// List tasks one page at a time
    List {
        /// Page to show, starting at 1
        #[arg(long, short, default_value_t = 1)]
        page: u32,

        /// Tasks per page; defaults to the configured page size
        #[arg(long, short)]
        limit: Option<u32>,

        /// Print the raw page as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single task
    Show {
        #[arg(value_parser = parse_id)]
        id: String,

        #[arg(long)]
        json: bool,
    },
    /// Create a task
    Add {
        #[arg(long, short)]
        title: Option<String>,

        #[arg(long, short)]
        description: Option<String>,

        /// Pending or Completed
        #[arg(long, short, default_value = "Pending", value_parser = parse_status)]
        status: TaskStatus,
    },
    /// Change an existing task; omitted fields keep their value
    Edit {
        #[arg(value_parser = parse_id)]
        id: String,

        #[arg(long, short)]
        title: Option<String>,

        #[arg(long, short)]
        description: Option<String>,

        #[arg(long, short, value_parser = parse_status)]
        status: Option<TaskStatus>,
    },
    /// Delete a task (administrators only)
    Delete {
        #[arg(value_parser = parse_id)]
        id: String,
    },
}

fn parse_status(value: &str) -> Result<TaskStatus, String> {
    TaskStatus::parse(value).ok_or_else(|| {
        let known: Vec<&str> = TaskStatus::all().map(TaskStatus::as_str).collect();
        format!("expected one of: {}", known.join(", "))
    })
}

fn parse_id(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        return Err("task id must not be empty".to_string());
    }
    Ok(value.to_string())
}

pub async fn run(ctx: &Context, command: TaskCommand) -> Result<()> {
    match command {
        TaskCommand::List { page, limit, json } => list(ctx, page, limit, json).await,
        TaskCommand::Show { id, json } => show(ctx, &id, json).await,
        TaskCommand::Add {
            title,
            description,
            status,
        } => {
            ctx.enter(&Route::AddTask)?;
            let form = TaskForm {
                title: title.unwrap_or_default(),
                description: description.unwrap_or_default(),
                status,
            };
            let (task, note) = form.create(&ctx.client, &ctx.auth).await?;
            report(&note);
            println!("id: {}", task.id);
            Ok(())
        }
        TaskCommand::Edit {
            id,
            title,
            description,
            status,
        } => {
            ctx.enter(&Route::EditTask { id: id.clone() })?;
            let mut form = load_task(&ctx.client, &ctx.auth, &id).await?;
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(description) = description {
                form.description = description;
            }
            if let Some(status) = status {
                form.status = status;
            }
            let (_, note) = form.update(&ctx.client, &ctx.auth, &id).await?;
            report(&note);
            Ok(())
        }
        TaskCommand::Delete { id } => {
            ctx.enter(&Route::Dashboard)?;
            let note = remove_task(&ctx.client, &ctx.auth, &id).await?;
            report(&note);
            Ok(())
        }
    }
}

async fn list(ctx: &Context, page: u32, limit: Option<u32>, json: bool) -> Result<()> {
    ctx.enter(&Route::Dashboard)?;
    let mut board = TaskBoard::new(limit.unwrap_or(ctx.page_size));
    if let Some(note) = board.load(&ctx.client, &ctx.auth, page).await {
        bail!(note.message);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(board.page())?);
        return Ok(());
    }

    let stats = board.stats();
    println!(
        "Total: {} | On this page: {} | Pages: {}",
        stats.total_tasks, stats.on_page, stats.total_pages
    );
    if board.tasks().is_empty() {
        println!("No tasks yet. Add one with `taskdeck tasks add`.");
    }
    for task in board.tasks() {
        print_row(task);
    }
    if board.page().shows_pagination() {
        println!("{}", board.page().label());
        if let Some(next) = board.next_page() {
            println!("next: taskdeck tasks list --page {next}");
        }
    }
    Ok(())
}

async fn show(ctx: &Context, id: &str, json: bool) -> Result<()> {
    ctx.enter(&Route::EditTask { id: id.to_string() })?;
    let task = ctx
        .client
        .get_task(id)
        .await
        .map_err(|err| anyhow!("Failed to load task: {err}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&task)?);
        return Ok(());
    }
    print_row(&task);
    if let Some(created_at) = task.created_at {
        println!("    created {}", created_at.format("%Y-%m-%d %H:%M"));
    }
    Ok(())
}

fn print_row(task: &Task) {
    println!("{}  [{}]  {}", task.id, task.status, task.title);
    if !task.description.is_empty() {
        println!("    {}", task.description);
    }
}
