use clap::Parser;

use cbcflip_token::TokenCodec;

#[derive(Parser)]
#[command(
    name = "cbcflip-attack",
    about = "Forge the admin flag of a CBC session token without the key"
)]
struct Cli {
    /// Length of the registered user name; it controls where the admin flag
    /// lands in the plaintext stream (15 keeps the edit inside one block)
    #[arg(short, long, default_value_t = 15)]
    name_length: usize,
}

fn main() {
    let cli = Cli::parse();
    cbcflip_attack::logging::init();

    let name = "A".repeat(cli.name_length);
    let codec = TokenCodec::generate();

    let outcome = match cbcflip_attack::scenario::run(&codec, &name) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("scenario failed: {e}");
            std::process::exit(1);
        }
    };

    println!("issued: {}", outcome.issued_token);
    println!("forged: {}", outcome.forged_token);
    println!(
        "user:   {}",
        outcome.user.as_deref().unwrap_or("<garbled away>")
    );

    if outcome.admin {
        println!("admin flag flipped");
    } else {
        eprintln!("forged token decoded but the admin flag did not flip");
        std::process::exit(1);
    }
}
