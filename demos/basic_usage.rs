//! Basic usage: defining errors, tracing failures and inspecting chains.
//!
//! Run with: cargo run --example basic_usage

use std::io;

use cairn_errors::{internal_error, trace, Error, Options, ResultExt};

fn parse_threshold(raw: &str) -> cairn_errors::Result<u32> {
    raw.parse::<u32>().trace()
}

fn main() {
    // A plain error: no namespace, displays as the bare message.
    let invalid_input = Error::new("ERR_1", "Invalid input");
    println!("plain:\n{invalid_input}\n");

    // Namespaced, with metadata carried along for the caller to branch on.
    let unauthorized = Error::new_with(
        "E_AUTH_1",
        "token expired",
        Options::new()
            .namespace("auth")
            .add_metadata("httpStatus", 401),
    );
    println!("namespaced:\n{unauthorized}");
    println!("metadata: {:?}\n", unauthorized.metadata());

    // Promote a foreign error: it becomes the cause of an internal error,
    // with a trace entry attributed to this call site.
    let promoted = trace(io::Error::new(
        io::ErrorKind::InvalidData,
        "invalid email format",
    ));
    println!("promoted:\n{promoted}\n");
    assert!(promoted.is(&internal_error()));

    // Result pass-through: Ok flows untouched, Err gets traced.
    match parse_threshold("not-a-number") {
        Ok(v) => println!("threshold = {v}"),
        Err(err) => println!("failed:\n{err}\n"),
    }

    // Identity comparison survives wrapping.
    let wrapped = internal_error().wrap(unauthorized.clone());
    assert!(wrapped.is(&unauthorized));
    println!("wrapped:\n{wrapped}");
}
