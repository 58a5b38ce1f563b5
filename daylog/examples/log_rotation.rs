use std::{path::PathBuf, sync::Arc};

use chrono::NaiveDate;
use daylog::{Config, Daylog, ManualClock, Severity};

fn main() {
    let dir = PathBuf::from("/tmp/daylog_example_rotation");
    let _ = std::fs::remove_dir_all(&dir);

    // Pretend a week goes by instead of waiting for midnight.
    let clock = Arc::new(ManualClock::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
    let config = Config::new(dir.join("app").to_string_lossy(), Severity::Info, true);
    let logger = Daylog::builder(&config)
        .with_clock(clock.clone())
        .open()
        .expect("Unable to open log files");

    for day in 0..7 {
        for i in 0..5 {
            logger.info(format_args!("Log message number {i} of day {day}"));
        }
        if day % 3 == 0 {
            logger.error(format_args!("Something went wrong on day {day}"));
        }
        clock.advance_days(1);
    }
    logger.close();

    let mut files: Vec<String> = std::fs::read_dir(&dir)
        .unwrap()
        .flatten()
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    files.sort();

    println!("\n--- Rotation Summary ---");
    println!("Log directory: {}", dir.display());
    for f in &files {
        println!("  {f}");
    }
    assert_eq!(files.iter().filter(|f| f.starts_with("app_logs_")).count(), 7);
    assert_eq!(files.iter().filter(|f| f.starts_with("app_errors_")).count(), 3);
}
