use std::io::Write;
use std::process;

use anyhow::Context;
use clap::Parser;
use uwutils::config::{self, UwConfig};
use uwutils::styling::{
    eprintln, error_message, format_heading, hint_message, info_message, print, println,
    warning_message,
};
use uwutils::system::{self, Stream};
use uwutils::{UwError, bean, path, string};

mod cli;

use cli::{Cli, Commands, ConfigCommand, PathCommand, StringCommand};

/// What a command produced.
enum Outcome {
    Done,
    /// The lookup ran but had nothing to print.
    NoValue,
}

impl From<Option<String>> for Outcome {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(value) => {
                println!("{value}");
                Outcome::Done
            }
            None => Outcome::NoValue,
        }
    }
}

fn init_logging(verbose: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(log::LevelFilter::Info);
        }
        2 => {
            builder.filter_level(log::LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
        }
    }
    builder
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    if let Some(path) = cli.config {
        config::set_config_path(path);
    }

    let Some(command) = cli.command else {
        // arg_required_else_help prints help before we get here
        return;
    };

    match run(command) {
        Ok(Outcome::Done) => {}
        Ok(Outcome::NoValue) => process::exit(2),
        Err(err) => {
            eprintln!("{}", error_message(format!("{err:#}")));
            if let Some(hint) = hint_for(&err) {
                eprintln!("{}", hint_message(hint));
            }
            process::exit(1);
        }
    }
}

fn hint_for(err: &anyhow::Error) -> Option<String> {
    match err.downcast_ref::<UwError>()? {
        UwError::InvalidConfig { .. } => Some(format!(
            "Fix the file, or point {} at another one",
            config::CONFIG_PATH_ENV
        )),
        UwError::InvalidEnvOverride { name, .. } => {
            Some(format!("Unset {name} to use the config file value"))
        }
        _ => None,
    }
}

fn warn_unknown_keys(config: &UwConfig) {
    if config.unknown.is_empty() {
        return;
    }
    let location = config::get_config_path()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "config file".to_string());
    for key in config.unknown.keys() {
        eprintln!(
            "{}",
            warning_message(format!("Ignoring unknown key {key:?} in {location}"))
        );
    }
}

fn run(command: Commands) -> anyhow::Result<Outcome> {
    let config = UwConfig::load()?;
    warn_unknown_keys(&config);
    system::configure(&config.redirect);

    match command {
        Commands::Path { action } => Ok(match action {
            PathCommand::Normalize { path } => path::normalize(&path).into(),
            PathCommand::Name { path } => path::file_name(&path).into(),
        }),
        Commands::String { action } => Ok(match action {
            StringCommand::Trim { text, diff } => string::trim(&text, diff).into(),
            StringCommand::Rebase { text, from, to } => string::to_base(&text, &from, &to).into(),
        }),
        Commands::Services { interface, roots } => {
            let mut resource = config.resource;
            if !roots.is_empty() {
                resource.roots = roots;
            }
            let names = bean::find_service_names(&resource.locator(), &interface);
            if names.is_empty() {
                return Ok(Outcome::NoValue);
            }
            for name in names {
                println!("{name}");
            }
            Ok(Outcome::Done)
        }
        Commands::Resource { path, roots, lossy } => {
            let mut resource = config.resource;
            if !roots.is_empty() {
                resource.roots = roots;
            }
            resource.lossy |= lossy;
            match resource.locator().read_to_string(&path) {
                Some(contents) => {
                    print!("{contents}");
                    Ok(Outcome::Done)
                }
                None => Ok(Outcome::NoValue),
            }
        }
        Commands::Quiet { stderr, text } => {
            let stream = if stderr { Stream::Error } else { Stream::Output };
            quiet(stream, text)
        }
        Commands::Config {
            action: ConfigCommand::Show,
        } => {
            let location = config::get_config_path()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "(no config directory)".to_string());
            eprintln!("{}", format_heading("CONFIG", Some(&location)));
            let rendered = config.to_toml().context("Failed to render config")?;
            println!("{}", rendered.trim_end());
            Ok(Outcome::Done)
        }
    }
}

fn quiet(stream: Stream, text: Vec<String>) -> anyhow::Result<Outcome> {
    let line = text.join(" ");
    let written = system::disable_print_during(stream, None, || {
        system::println(stream, &line)?;
        Ok(line.len() + 1)
    })?;

    let Some(written) = written else {
        return Ok(Outcome::NoValue);
    };
    let state = if system::is_print_enabled(stream, None) {
        "enabled"
    } else {
        "disabled"
    };
    eprintln!(
        "{}",
        info_message(format!(
            "Suppressed {written} byte(s) on {stream}; {stream} is {state} again"
        ))
    );
    Ok(Outcome::Done)
}
