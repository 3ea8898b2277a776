// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Backboard preferences CLI
//!
//! Reads and edits the preferences store the desktop app persists its state in.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use backboard_app_core::prefs::{PREFERENCES_KEY, PREFERENCES_VERSION};
use backboard_app_core::{
    AppPreferences, ColorScheme, PersistService, PreferencesStorage, StateStorage,
};
use backboard_grades::{collect_grades, process_grades_csv_file, process_students_csv_file};
use backboard_store_fs::{preferences_storage, LazyStore};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Preferences file to use instead of the one in the user config directory
    #[clap(long, global = true)]
    store: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    cmd: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Print the value stored under KEY (exit status 1 if absent)
    Get { key: String },
    /// Store VALUE under KEY
    Set { key: String, value: String },
    /// Remove KEY (succeeds if already absent)
    Delete { key: String },
    /// List stored keys
    Keys,
    /// Remove every entry
    Clear,
    /// Show or change the window color scheme
    Theme {
        #[clap(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Parse a grade export and show what an import would send, per student
    Grades {
        /// `;`-delimited grade export
        grades: PathBuf,
        /// `;`-delimited student export supplying names and classes
        #[clap(long)]
        students: Option<PathBuf>,
        /// Print the collections as JSON instead of a summary
        #[clap(long)]
        json: bool,
    },
}

#[derive(clap::Subcommand, Debug, Clone, Copy)]
enum ThemeAction {
    /// Print the current scheme
    Show,
    /// Switch between light and dark
    Toggle,
    /// Use the light scheme
    Light,
    /// Use the dark scheme
    Dark,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // 1 is reserved for "absent", like grep's "no match"
    match run(args).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let custom;
    let storage = match &args.store {
        Some(path) => {
            custom = LazyStore::at_path(path);
            PreferencesStorage::new(&custom)
        }
        None => preferences_storage(),
    };
    let store: &LazyStore = *storage.store();
    debug!(path = ?store.path().ok(), "using preferences store");

    match args.cmd {
        Command::Get { key } => {
            let value = storage
                .read(&key)
                .await
                .with_context(|| format!("failed to read {key:?}"))?;
            match value {
                Some(value) => println!("{value}"),
                None => return Ok(ExitCode::FAILURE),
            }
        }
        Command::Set { key, value } => {
            storage
                .write(&key, &value)
                .await
                .with_context(|| format!("failed to write {key:?}"))?;
        }
        Command::Delete { key } => {
            storage
                .delete(&key)
                .await
                .with_context(|| format!("failed to delete {key:?}"))?;
        }
        Command::Keys => {
            for key in store.keys().await.context("failed to list keys")? {
                println!("{key}");
            }
        }
        Command::Clear => {
            store.clear().await.context("failed to clear store")?;
        }
        Command::Theme { action } => {
            let scheme = theme(storage, action.unwrap_or(ThemeAction::Show)).await?;
            println!("{scheme}");
        }
        Command::Grades {
            grades,
            students,
            json,
        } => import_dry_run(&grades, students.as_deref(), json)?,
    }

    Ok(ExitCode::SUCCESS)
}

async fn theme<S: StateStorage>(storage: S, action: ThemeAction) -> Result<ColorScheme> {
    let persist = PersistService::new(storage);
    let mut prefs: AppPreferences = persist
        .load(PREFERENCES_KEY, PREFERENCES_VERSION)
        .await
        .context("failed to load preferences")?
        .unwrap_or_default();

    let next = match action {
        ThemeAction::Show => return Ok(prefs.color_scheme),
        ThemeAction::Toggle => prefs.color_scheme.toggle(),
        ThemeAction::Light => ColorScheme::Light,
        ThemeAction::Dark => ColorScheme::Dark,
    };
    prefs.color_scheme = next;
    persist
        .save(PREFERENCES_KEY, &prefs, PREFERENCES_VERSION)
        .await
        .context("failed to save preferences")?;
    Ok(next)
}

fn import_dry_run(grades: &Path, students: Option<&Path>, json: bool) -> Result<()> {
    let grades = process_grades_csv_file(grades)
        .with_context(|| format!("failed to import grades from {}", grades.display()))?;
    let students = match students {
        Some(path) => process_students_csv_file(path)
            .with_context(|| format!("failed to import students from {}", path.display()))?,
        None => BTreeMap::new(),
    };
    let collections = collect_grades(grades, &students);

    if json {
        println!("{}", serde_json::to_string_pretty(&collections)?);
        return Ok(());
    }
    for collection in &collections {
        println!(
            "{}\t{}\t{}\t{}",
            collection.om_code_hashed,
            collection.student_name,
            collection.school_class.as_deref().unwrap_or("-"),
            collection.grades.len()
        );
    }
    Ok(())
}
