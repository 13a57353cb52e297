use std::{env, process::ExitCode, time::Duration};

use clap::{value_parser, Arg, ArgAction, ArgGroup, ArgMatches, Command};
use thiserror::Error;
use tracing::{debug, error};
use trashbin_core::{BatchKind, CollectingNotifier, Settings, TrashBin, TrashError};
use trashbin_dav::{DavError, DavTransport};

mod print;

const PASSWORD_ENV: &str = "TRASHBIN_PASSWORD";

#[derive(Debug, Error)]
pub enum Error {
    #[error("Connecting to server failed: {0}")]
    Dav(#[from] DavError),
    #[error("No deleted entry named {name} in {dir}")]
    EntryNotFound { dir: String, name: String },
    #[error("Initialization error")]
    Initialization,
    #[error("{0}")]
    Trash(#[from] TrashError),
}

#[tokio::main]
async fn main() -> ExitCode {
    let logpath = match get_logging_path() {
        Ok(it) => it,
        Err(_) => return ExitCode::FAILURE,
    };

    let logfile = tracing_appender::rolling::daily(logpath, "log");
    tracing_subscriber::fmt()
        .compact()
        .with_writer(logfile)
        .init();

    debug!("starting application");

    let args = cli().get_matches();
    let mut settings = Settings::default();
    map_args_to_settings(&args, &mut settings);

    match run(&args, &settings).await {
        Ok(true) => {
            debug!("closing application");
            ExitCode::SUCCESS
        }
        Ok(false) => {
            debug!("closing application with failed entries");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("closing application with error: {:?}", err);
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn cli() -> Command {
    Command::new("trashbin")
        .about("trashbin - list, restore and purge deleted files of a cloud trash bin")
        .subcommand_required(true)
        .args([
            Arg::new("server")
                .long("server")
                .global(true)
                .action(ArgAction::Set)
                .help("base url of the server, e.g. https://cloud.example.com"),
            Arg::new("web-root")
                .long("web-root")
                .global(true)
                .action(ArgAction::Set)
                .help("path prefix of the installation, e.g. /nextcloud"),
            Arg::new("user")
                .long("user")
                .short('u')
                .global(true)
                .action(ArgAction::Set)
                .help("user owning the trash bin"),
            Arg::new("password")
                .long("password")
                .global(true)
                .action(ArgAction::Set)
                .help("password or app token, falls back to TRASHBIN_PASSWORD"),
            Arg::new("timeout")
                .long("timeout")
                .global(true)
                .action(ArgAction::Set)
                .value_parser(value_parser!(u64))
                .help("request timeout in seconds"),
            Arg::new("sort")
                .long("sort")
                .global(true)
                .action(ArgAction::Set)
                .value_parser(["mtime", "name"])
                .help("presentation order of listed entries"),
        ])
        .subcommands([
            Command::new("list").about("list deleted entries").arg(
                Arg::new("path")
                    .action(ArgAction::Set)
                    .help("trash directory to list, defaults to the trash root"),
            ),
            batch_command("restore", "restore deleted entries to their origin"),
            batch_command("delete", "delete entries permanently"),
        ])
}

fn batch_command(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .args([
            Arg::new("names")
                .action(ArgAction::Append)
                .help("stored names of the entries as shown by list"),
            Arg::new("all")
                .long("all")
                .action(ArgAction::SetTrue)
                .help("select every entry of the directory"),
            Arg::new("path")
                .long("path")
                .action(ArgAction::Set)
                .help("trash directory containing the entries"),
        ])
        .group(
            ArgGroup::new("target")
                .args(["names", "all"])
                .required(true),
        )
}

fn map_args_to_settings(args: &ArgMatches, settings: &mut Settings) {
    if let Some(server) = args.get_one::<String>("server") {
        settings.server = server.to_owned();
    }

    if let Some(web_root) = args.get_one::<String>("web-root") {
        settings.web_root = web_root.to_owned();
    }

    if let Some(user) = args.get_one::<String>("user") {
        settings.user = user.to_owned();
    }

    settings.password = args
        .get_one::<String>("password")
        .cloned()
        .or_else(|| env::var(PASSWORD_ENV).ok());

    if let Some(timeout) = args.get_one::<u64>("timeout") {
        settings.timeout = Duration::from_secs(*timeout);
    }

    if let Some(sort) = args.get_one::<String>("sort") {
        settings.sort = sort.parse().unwrap_or_default();
    }

    if let Some((_, sub)) = args.subcommand() {
        settings.startup_path = sub.get_one::<String>("path").cloned();
    }
}

async fn run(args: &ArgMatches, settings: &Settings) -> Result<bool, Error> {
    let transport = DavTransport::new(settings)?;
    let mut bin = TrashBin::new(transport, CollectingNotifier::default());

    let path = settings.startup_path.as_deref().unwrap_or("/");
    bin.load_directory(path).await?;

    let (kind, sub) = match args.subcommand() {
        Some(("restore", sub)) => (BatchKind::Restore, sub),
        Some(("delete", sub)) => (BatchKind::Delete, sub),
        Some(("list", _)) => {
            print::listing(bin.model(), settings);
            return Ok(true);
        }
        _ => return Err(Error::Initialization),
    };

    if sub.get_flag("all") {
        bin.select_all()?;
    } else {
        for name in sub.get_many::<String>("names").into_iter().flatten() {
            let id = match bin.model().view.find(name) {
                Some(entry) => entry.id,
                None => {
                    return Err(Error::EntryNotFound {
                        dir: bin.model().view.dir(),
                        name: name.to_owned(),
                    })
                }
            };

            if !bin.model().selection.is_selected(id) {
                bin.toggle(id)?;
            }
        }
    }

    let report = match kind {
        BatchKind::Delete => bin.delete_selected().await?,
        BatchKind::Restore => bin.restore_selected().await?,
    };

    print::report(&report);
    print::failures(&bin.notifier().take());

    Ok(report.is_success())
}

fn get_logging_path() -> Result<String, Error> {
    let cache_dir = match dirs::cache_dir() {
        Some(cache_dir) => match cache_dir.to_str() {
            Some(cache_dir_string) => cache_dir_string.to_string(),
            None => return Err(Error::Initialization),
        },
        None => return Err(Error::Initialization),
    };

    Ok(format!("{}{}", cache_dir, "/trashbin/logs"))
}
