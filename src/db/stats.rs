use crate::db::gateway::Session;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use std::fs;
use std::path::Path;

/// Names of the user tables, alphabetically.
pub fn user_tables(session: &Session) -> AppResult<Vec<String>> {
    let mut stmt = session.connection().prepare(
        "SELECT name FROM sqlite_master
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
         ORDER BY name ASC",
    )?;

    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(names)
}

/// Result of `PRAGMA integrity_check`: `"ok"` when the file is healthy.
pub fn integrity_check(session: &Session) -> AppResult<String> {
    let result: String = session
        .connection()
        .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
    Ok(result)
}

pub fn print_db_info(session: &Session, db_path: &Path) -> AppResult<()> {
    println!();

    //
    // 1) FILE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path.display(), RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);
    println!("{}• URL:{}  {}", CYAN, RESET, session.url());
    println!("{}• User:{} {}", CYAN, RESET, session.username());
    println!(
        "{}• Autocommit:{} {}",
        CYAN,
        RESET,
        if session.is_autocommit() { "on" } else { "off" }
    );

    //
    // 2) TABLES
    //
    let tables = user_tables(session)?;
    println!("{}• Tables:{}", CYAN, RESET);
    if tables.is_empty() {
        println!("    {GREY}--{RESET}");
    }
    for table in tables {
        // Names come from sqlite_master; quote them to survive odd characters.
        let sql = format!("SELECT COUNT(*) FROM \"{}\"", table.replace('"', "\"\""));
        let count: i64 = session.connection().query_row(&sql, [], |row| row.get(0))?;
        println!("    {:<20} {}{}{}", table, GREEN, count, RESET);
    }

    println!();
    Ok(())
}
