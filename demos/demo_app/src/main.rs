mod commands;
mod stream;
mod terminal;

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use serial_command::{ByteStream, Config, SerialCommand, Tokens};
use serial_config::*;

use commands::Board;
use stream::StdinStream;
use terminal::RawMode;

const NAMES: [&str; 6] = ["LED", "HELLO", "ADD", "SAY", "HELP", "QUIT"];

fn prompt() {
    print!("{PROMPT}");
    let _ = io::stdout().flush();
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Piped input has no terminal to switch; bytes arrive raw anyway.
    let terminal = match RawMode::new(0) {
        Ok(raw) => Some(raw),
        Err(e) => {
            log::info!("stdin is not a terminal ({e}), running without raw mode");
            None
        }
    };

    let board = Board::default();
    board.running.set(true);

    let mut led = |args: &mut Tokens<'_>| commands::led(&board, args);
    let mut hello = commands::hello;
    let mut add = commands::add;
    let mut say = commands::say;
    let mut help = |_: &mut Tokens<'_>| commands::help(&NAMES);
    let mut quit = |_: &mut Tokens<'_>| commands::quit(&board);
    let mut unrecognized = |command: &str, _: &mut Tokens<'_>| commands::unrecognized(command);
    let mut empty = || {};

    let mut config = Config::default();
    config.set_delimiters(DELIMITERS);
    config.echo = terminal.is_some();

    let mut sc: SerialCommand<'_, MAX_COMMANDS, BUFFER_SIZE, MAX_COMMAND_LENGTH> =
        SerialCommand::with_config(config);
    sc.add_command(NAMES[0], &mut led);
    sc.add_command(NAMES[1], &mut hello);
    sc.add_command(NAMES[2], &mut add);
    sc.add_command(NAMES[3], &mut say);
    sc.add_command(NAMES[4], &mut help);
    sc.add_command(NAMES[5], &mut quit);
    sc.set_default_handler(&mut unrecognized);
    sc.set_null_handler(&mut empty);

    log::info!(
        "{} commands registered, line buffer {} bytes (try HELP)",
        sc.command_count(),
        BUFFER_SIZE
    );

    let mut port = StdinStream::spawn();
    let poll = Duration::from_millis(POLL_INTERVAL_MS);
    prompt();

    while board.running.get() {
        // Same drain as `read_serial`, but a prompt follows every dispatched line.
        while port.available() > 0 {
            let Some(byte) = port.read() else {
                break;
            };
            if sc.config().echo {
                port.write(byte);
            }
            if sc.process_byte(byte).is_some() && board.running.get() {
                prompt();
            }
        }
        if port.is_drained() {
            break;
        }
        thread::sleep(poll);
    }

    println!("bye");
    io::stdout().flush()?;
    Ok(())
}
