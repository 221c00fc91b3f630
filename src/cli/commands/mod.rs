pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_PORT: &str = "port";
pub const ARG_IDENTITY_URL: &str = "identity-url";
pub const ARG_IDENTITY_API_KEY: &str = "identity-api-key";
pub const ARG_STORE_URL: &str = "store-url";
pub const ARG_STORE_API_KEY: &str = "store-api-key";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("aprobi")
        .about("Approval-gated account registration and login")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("APROBI_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_IDENTITY_URL)
                .long("identity-url")
                .help("Identity provider base URL, example: https://identitytoolkit.googleapis.com")
                .env("APROBI_IDENTITY_URL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_IDENTITY_API_KEY)
                .long("identity-api-key")
                .help("Identity provider API key")
                .env("APROBI_IDENTITY_API_KEY"),
        )
        .arg(
            Arg::new(ARG_STORE_URL)
                .long("store-url")
                .help("Document store base URL")
                .env("APROBI_STORE_URL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_STORE_API_KEY)
                .long("store-api-key")
                .help("Document store API key")
                .env("APROBI_STORE_API_KEY"),
        );

    logging::with_args(command)
}
