//! Escape Calendar native entry point
//!
//! The game itself runs in the browser (the wasm build starts from
//! `web::start`). Natively this replays console commands against an
//! in-memory store and prints the resulting calendar.
//!
//! Usage: `escape-calendar [unlock N | lock N | complete N | reset | unlock-all | clear]...`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use escape_calendar::dev::DevCommands;
    use escape_calendar::{Calendar, MemoryStore, ProgressStore};

    env_logger::init();
    log::info!("Escape Calendar (native) starting...");
    log::info!("Native mode uses an in-memory store - serve the wasm build for the real game");

    let mut progress = ProgressStore::new(MemoryStore::new());
    let mut args = std::env::args().skip(1);

    while let Some(command) = args.next() {
        let mut day_arg = || args.next().and_then(|a| a.parse::<i64>().ok());
        let mut dev = DevCommands::new(&mut progress);
        match command.as_str() {
            "unlock" => match day_arg() {
                Some(n) => {
                    dev.unlock_day(n);
                }
                None => log::error!("unlock needs a day number"),
            },
            "lock" => match day_arg() {
                Some(n) => {
                    dev.lock_day(n);
                }
                None => log::error!("lock needs a day number"),
            },
            "complete" => match day_arg() {
                Some(n) => {
                    dev.complete_day(n);
                }
                None => log::error!("complete needs a day number"),
            },
            "reset" => {
                dev.reset_progress();
            }
            "unlock-all" => {
                dev.unlock_all_days();
            }
            "clear" => {
                dev.clear_completed_days();
            }
            other => log::error!("Unknown command: {}", other),
        }
    }

    println!("{}", Calendar::build(&progress).to_text());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}
