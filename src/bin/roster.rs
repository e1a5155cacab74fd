use std::io::{stdin, stdout, Write};
use std::path::Path;
use std::process::exit;

use chrono::Local;

use sunday_roster::store::FolderStore;
use sunday_roster::traits::Prompter;
use sunday_roster::{SundayDate, Tracker, VolunteerId};

const USAGE: &str = "Usage: roster <data-folder> <command> [args]

Commands:
    rank                    list volunteers, by rotation priority (default)
    sundays                 list the Sundays of the window
    add <name>              add a volunteer
    rename <name> <new>     rename a volunteer
    remove <name>           remove a volunteer and their history
    serve <date> <name>     mark a volunteer as having served on a Sunday
    unserve <date> <name>   clear that mark
    current <date>          use another Sunday as the reference for rotation
    past | future           show more Sundays
    today                   center the window on today
    export <file>           write everything to a JSON file
    import <file>           replace everything with a JSON file
    reset                   forget everything";

/// Asks questions on the terminal
struct TerminalPrompter;

impl TerminalPrompter {
    fn read_line(message: &str) -> Option<String> {
        let mut stdout = stdout();
        let _ = write!(stdout, "{} ", message);
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()),
        }
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, message: &str) -> bool {
        match Self::read_line(&format!("{} [y/N]", message)) {
            Some(answer) => answer.trim().eq_ignore_ascii_case("y"),
            None => false,
        }
    }

    fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        Self::read_line(&format!("{} [{}]", message, default))
            .map(|answer| if answer.trim().is_empty() { default.to_string() } else { answer })
    }
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    exit(1);
}

fn arg<'a>(args: &'a [String], index: usize) -> &'a str {
    match args.get(index) {
        Some(value) => value.as_str(),
        None => fail(USAGE),
    }
}

fn sunday_arg(args: &[String], index: usize) -> SundayDate {
    match arg(args, index).parse() {
        Ok(sunday) => sunday,
        Err(err) => fail(&format!("{}", err)),
    }
}

fn volunteer_arg(tracker: &Tracker<FolderStore>, args: &[String], index: usize) -> VolunteerId {
    let name = arg(args, index);
    match tracker.state().roster().find_by_name(name) {
        Some(volunteer) => volunteer.id().clone(),
        None => fail(&format!("No volunteer named {:?}", name)),
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let folder = arg(&args, 0);
    let command = args.get(1).map(String::as_str).unwrap_or("rank");
    let today = Local::now().date_naive();

    let mut tracker = Tracker::load(FolderStore::new(Path::new(folder)), today);
    let mut prompter = TerminalPrompter;

    match command {
        "rank" => {},
        "sundays" => {
            let state = tracker.state();
            sunday_roster::utils::print_window(state.window(), &state.current_sunday(), &state.selected_sunday());
            return;
        },
        "add" => {
            if let Err(err) = tracker.add_volunteer(arg(&args, 2)) {
                fail(&err.to_string());
            }
        },
        "rename" => {
            let id = volunteer_arg(&tracker, &args, 2);
            if let Err(err) = tracker.rename_volunteer(&id, arg(&args, 3)) {
                fail(&err.to_string());
            }
        },
        "remove" => {
            let id = volunteer_arg(&tracker, &args, 2);
            tracker.remove_volunteer(&id, &mut prompter);
        },
        "serve" | "unserve" => {
            let sunday = sunday_arg(&args, 2);
            let id = volunteer_arg(&tracker, &args, 3);
            tracker.set_selected_sunday(sunday);
            tracker.set_served(&id, command == "serve");
        },
        "current" => tracker.set_current_sunday(sunday_arg(&args, 2)),
        "past" => tracker.show_previous_sundays(),
        "future" => tracker.show_next_sundays(),
        "today" => tracker.jump_to_today(today),
        "export" => {
            let path = args.get(2).cloned().unwrap_or_else(|| sunday_roster::tracker::export_file_name(today));
            let document = match tracker.export() {
                Ok(document) => document,
                Err(err) => fail(&format!("Unable to export: {}", err)),
            };
            if let Err(err) = std::fs::write(&path, document) {
                fail(&format!("Unable to write {}: {}", path, err));
            }
            println!("Exported to {}", path);
            return;
        },
        "import" => {
            let path = arg(&args, 2);
            let document = match std::fs::read_to_string(path) {
                Ok(document) => document,
                Err(err) => fail(&format!("Could not import that file: {}", err)),
            };
            match tracker.import(&document) {
                Ok(()) => println!("Imported!"),
                Err(err) => fail(&err.to_string()),
            }
        },
        "reset" => {
            tracker.reset(&mut prompter, today);
        },
        _ => fail(USAGE),
    }

    println!("Weeks since last served, as of {}:", sunday_roster::utils::format_sunday(&tracker.state().current_sunday()));
    sunday_roster::utils::print_ranking(&tracker.ranking());
}
