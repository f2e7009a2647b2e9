//! Local REPL: talk to the engine without Telegram, against the same
//! persistent ledger the bot uses.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use mentor_core::{Engine, Store, UserId};

pub fn run(engine: &Engine, store: &dyn Store, user: UserId) -> Result<()> {
    println!("mentor chat (local, user {user}). Type a message, or 'quit' to exit.");
    store.touch_user(user, "local")?;

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }

        match engine.handle_message(store, user, line) {
            Ok(reply) => println!("{reply}"),
            Err(err) => {
                eprintln!("error: {err:#}");
                println!("{}", engine.replies().processing_failed());
            }
        }
    }
    Ok(())
}
