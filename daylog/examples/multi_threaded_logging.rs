use std::sync::mpsc::channel;

use daylog::{Config, Severity};

fn main() {
    let config = daylog::read_yaml::<Config, _>("daylog/examples/log.yaml").unwrap_or_else(|e| {
        eprintln!("{e}, falling back to console logging");
        Config::console(Severity::Debug)
    });
    if let Err(e) = daylog::open(&config) {
        eprintln!("Unable to open log files: {e}");
        std::process::exit(1);
    }
    daylog::important!("Hello, world!");

    let (handles, senders): (Vec<_>, Vec<_>) = (0..5)
        .map(|i| {
            let (sender, receiver) = channel::<&'static str>();
            (
                std::thread::spawn(move || {
                    for message in receiver {
                        daylog::warning!("thread {i} received: {message}");
                    }
                    daylog::debug!("thread {i} done");
                }),
                sender,
            )
        })
        .unzip();
    for sender in senders {
        sender.send("Hello, world!").unwrap();
    }
    for handle in handles {
        handle.join().unwrap();
    }
    daylog::error("every thread is done, this line also lands in the error file");
    daylog::close();
}
