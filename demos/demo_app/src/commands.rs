use std::cell::Cell;

use serial_command::Tokens;

/// Application state the handlers act on.
#[derive(Default)]
pub struct Board {
    pub led: Cell<bool>,
    pub running: Cell<bool>,
}

pub fn led(board: &Board, args: &mut Tokens<'_>) {
    match args.next() {
        Some("1") | Some("on") => board.led.set(true),
        Some("0") | Some("off") => board.led.set(false),
        Some(other) => {
            println!("led | bad state '{other}', expected 0/1/on/off");
            return;
        }
        None => {}
    }
    println!("led | {}", if board.led.get() { "ON" } else { "OFF" });
}

pub fn hello(args: &mut Tokens<'_>) {
    match args.next() {
        Some(name) => println!("Hello {name}"),
        None => println!("Hello, whoever you are"),
    }
}

pub fn add(args: &mut Tokens<'_>) {
    let mut sum: i64 = 0;
    for (i, tok) in args.enumerate() {
        match tok.parse::<i64>() {
            Ok(v) => sum = sum.saturating_add(v),
            Err(_) => {
                println!("add | argument {} is not a number: '{tok}'", i + 1);
                return;
            }
        }
    }
    println!("add | {sum}");
}

pub fn say(args: &mut Tokens<'_>) {
    println!("{}", args.remaining());
}

pub fn help(names: &[&str]) {
    println!("commands: {}", names.join(" "));
}

pub fn quit(board: &Board) {
    board.running.set(false);
}

pub fn unrecognized(command: &str) {
    println!("What? '{command}'");
}
