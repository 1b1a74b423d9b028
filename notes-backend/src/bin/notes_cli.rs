//! Command-line front end for the notes API.
//!
//! ```text
//! notes-cli list
//! notes-cli create <title> <content>
//! notes-cli update <id> [--title <title>] [--content <content>]
//! notes-cli delete <id>
//! ```
//!
//! The target is `NOTES_API_URL` (default http://localhost:3000/api/notes).

use dotenv::dotenv;
use notes_backend::client::NotesClient;
use notes_backend::config;
use notes_types::{MessageResponse, UpdateNoteRequest};
use serde::Serialize;

const USAGE: &str = "usage:
  notes-cli list
  notes-cli create <title> <content>
  notes-cli update <id> [--title <title>] [--content <content>]
  notes-cli delete <id>";

const REQUEST_TIMEOUT_SECS: u64 = 10;

enum Command {
    List,
    Create { title: String, content: String },
    Update { id: String, update: UpdateNoteRequest },
    Delete { id: String },
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let (cmd, rest) = args.split_first().ok_or("missing command")?;
    match (cmd.as_str(), rest) {
        ("list", []) => Ok(Command::List),
        ("create", [title, content]) => Ok(Command::Create {
            title: title.clone(),
            content: content.clone(),
        }),
        ("update", [id, flags @ ..]) => {
            let mut update = UpdateNoteRequest::default();
            let mut iter = flags.iter();
            while let Some(flag) = iter.next() {
                let value = iter
                    .next()
                    .ok_or_else(|| format!("{} needs a value", flag))?
                    .clone();
                match flag.as_str() {
                    "--title" => update.title = Some(value),
                    "--content" => update.content = Some(value),
                    other => return Err(format!("unknown flag {}", other)),
                }
            }
            Ok(Command::Update {
                id: id.clone(),
                update,
            })
        }
        ("delete", [id]) => Ok(Command::Delete { id: id.clone() }),
        (other, _) => Err(format!("unrecognised arguments for {:?}", other)),
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("failed to render output: {}", e),
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    let http = match reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    let client = NotesClient::with_client(&config::notes_api_url(), http);
    log::debug!("Using notes API at {}", client.base_url());

    let result = match command {
        Command::List => client.list_notes().await.map(|notes| print_json(&notes)),
        Command::Create { title, content } => client
            .create_note(&title, &content)
            .await
            .map(|note| print_json(&note)),
        Command::Update { id, update } => client
            .update_note(&id, &update)
            .await
            .map(|note| print_json(&note)),
        Command::Delete { id } => client
            .delete_note(&id)
            .await
            .map(|message| print_json(&MessageResponse::new(message))),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
