pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

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

    let command = Command::new("pordisto")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("PORDISTO_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("secret")
                .short('s')
                .long("secret")
                .help("Shared server secret used to validate credentials")
                .long_help(
                    "Shared server secret used to validate credentials. When unset the \
                     service starts but fails closed: every gated request is redirected \
                     to /warning.",
                )
                .env("PORDISTO_SECRET"),
        )
        .arg(
            Arg::new("storage-type")
                .long("storage-type")
                .help("Credential storage type: localstorage (password mode) or anything else (signature mode)")
                .default_value("localstorage")
                .env("PORDISTO_STORAGE_TYPE"),
        );

    logging::with_args(command)
}
