use std::io::{self, Write};

use chrono::{Duration, Local, NaiveDateTime};
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

mod config;
mod lunar;
mod zodiac;

use config::{AlmanacConfig, DAY_FORMAT, TIMESTAMP_FORMAT};
use lunar::{days_until_phase, moon_age, moon_phase, PrimaryPhase};
use zodiac::{moon_sign, sun_sign, ZodiacSign};

const BORDER: &str = "*********************************************************";

#[derive(Debug, thiserror::Error)]
pub enum AlmanacError {
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("invalid timestamp: {0}")]
    Timestamp(#[from] chrono::format::ParseError),
}

/// Parses user input in the fixed `YYYY-MM-DD HH:MM:SS` format.
fn parse_timestamp(input: &str) -> Result<NaiveDateTime, AlmanacError> {
    Ok(NaiveDateTime::parse_from_str(input.trim(), TIMESTAMP_FORMAT)?)
}

fn sign_label(sign: Option<ZodiacSign>) -> &'static str {
    match sign {
        Some(sign) => sign.label(),
        None => "unknown",
    }
}

/// Prints the prompt, then reads one trimmed line. `None` means stdin was
/// closed.
fn prompt(text: &str) -> Result<Option<String>, AlmanacError> {
    print!("{text}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Welcome box with the current phase, age and signs.
fn print_welcome(config: &AlmanacConfig, now: NaiveDateTime) {
    let age = moon_age(config, now);

    println!("{BORDER}");
    println!(
        "* {:<53} *",
        format!("Hello! Today is {}", now.format(TIMESTAMP_FORMAT))
    );
    println!(
        "* {:<53} *",
        format!("The moon age since last New Moon is: {:.2}", age)
    );
    println!("* {:<53} *", format!("The moon's phase is: {}", moon_phase(age)));
    println!("* {:<53} *", format!("The sun is in: {}", sign_label(sun_sign(now))));
    println!("* {:<53} *", format!("The moon is in: {}", moon_sign(config, now)));
    println!("{BORDER}");
}

/// Upcoming-phase box: days until each primary phase, with the projected
/// calendar date.
fn print_upcoming(config: &AlmanacConfig, now: NaiveDateTime) {
    println!("{BORDER}");
    for phase in PrimaryPhase::ALL {
        if let Some(days) = days_until_phase(config, now, phase) {
            let on = now + Duration::minutes((days * 24.0 * 60.0).round() as i64);
            println!(
                "* {:<53} *",
                format!(
                    "{:>5.2} days until next {:<18} on {}",
                    days,
                    phase.label(),
                    on.format(DAY_FORMAT)
                )
            );
        }
    }
    println!("{BORDER}");
}

/// Asks for a timestamp, re-prompting with the fixed message until the
/// input parses. `None` means stdin was closed.
fn prompt_timestamp() -> Result<Option<(String, NaiveDateTime)>, AlmanacError> {
    let Some(mut line) = prompt("Enter a timestamp to find the moon's phase: ")? else {
        return Ok(None);
    };
    println!();
    loop {
        match parse_timestamp(&line) {
            Ok(when) => return Ok(Some((line, when))),
            Err(err) => {
                debug!("rejected timestamp input {:?}: {}", line, err);
                let retry =
                    prompt("Invalid input, enter a timestamp in the form yyyy-MM-dd HH:mm:ss: ")?;
                match retry {
                    Some(next) => line = next,
                    None => return Ok(None),
                }
            }
        }
    }
}

/// Asks whether to continue; only `y` or `n` (either case) is accepted.
/// Returns false on `n` or a closed stdin.
fn prompt_continue() -> Result<bool, AlmanacError> {
    let Some(mut answer) = prompt("Would you like to see another timestamp? (y/n) ")? else {
        return Ok(false);
    };
    while !answer.eq_ignore_ascii_case("y") && !answer.eq_ignore_ascii_case("n") {
        println!("Please enter 'y' to input another timestamp or 'n' to quit (without quotes)");
        match prompt("")? {
            Some(next) => answer = next,
            None => return Ok(false),
        }
    }
    Ok(answer.eq_ignore_ascii_case("y"))
}

fn main() -> Result<(), AlmanacError> {
    // Structured logging; stdout is the user interface, so default to warn
    // and let RUST_LOG raise verbosity.
    tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::WARN.into()))
        .with_target(false)
        .compact()
        .init();

    let config = AlmanacConfig::standard();
    let now = Local::now().naive_local();

    println!();
    println!();
    print_welcome(&config, now);
    println!();
    println!();
    print_upcoming(&config, now);
    println!();
    println!();

    while let Some((input, when)) = prompt_timestamp()? {
        let age = moon_age(&config, when);
        println!("Moon phase at {} is {}", input, moon_phase(age));
        println!("The sun is in: {}", sign_label(sun_sign(when)));
        println!("The moon is in: {}", moon_sign(&config, when));
        println!();
        println!();
        println!();

        if !prompt_continue()? {
            break;
        }
    }

    Ok(())
}
