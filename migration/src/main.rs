use migration::Migrator;
use std::{env, fs, path::Path};
use util::config;

mod runner;

#[tokio::main]
async fn main() {
    let db_path = config::database_path();
    let url = format!("sqlite://{}?mode=rwc", db_path);
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("clean") => {
            remove_db_file(&db_path);
            remove_storage();
        }
        Some("fresh") => {
            remove_db_file(&db_path);
            remove_storage();
            create_db_dir(&db_path);
            runner::run_all_migrations::<Migrator>(&url).await;
        }
        _ => {
            create_db_dir(&db_path);
            runner::run_all_migrations::<Migrator>(&url).await;
        }
    }
}

fn remove_db_file(path: &str) {
    let db_path = Path::new(path);
    if db_path.exists() {
        fs::remove_file(db_path).expect("Failed to delete DB file");
        println!("Deleted DB: {}", db_path.display());
    } else {
        println!("DB file does not exist: {}", db_path.display());
    }
}

/// Stored course images only make sense next to the rows that reference them.
fn remove_storage() {
    let storage_path = util::paths::storage_root();
    if storage_path.exists() {
        fs::remove_dir_all(&storage_path).expect("Failed to delete image storage");
        println!("Deleted image storage: {}", storage_path.display());
    } else {
        println!("Image storage does not exist: {}", storage_path.display());
    }
}

fn create_db_dir(path: &str) {
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent).expect("Failed to create DB directory");
    }
}
