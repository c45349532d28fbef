// Twinline: compare two text files side by side and assemble a merged file
// from the differing blocks, one command per line.

mod cli;
mod command;
mod files;
mod render;
mod session;
mod settings;
mod theme;

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use twinline_core::Side;
use twinline_engine::matcher::AlignerOptions;
use twinline_engine::DiffEngine;

use cli::Cli;
use command::Command;
use render::RenderOptions;
use session::{Session, GREETING};

fn terminal_width() -> usize {
    match crossterm::terminal::size() {
        Ok((cols, _)) if cols > 0 => cols as usize,
        _ => theme::DEFAULT_WIDTH,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter())).init();

    let mut settings = settings::load_settings();
    cli.apply_to(&mut settings);
    if cli.save_settings {
        settings::save_settings(&settings);
    }
    log::debug!("effective settings: {:?}", settings);

    let mut engine = DiffEngine::with_options(AlignerOptions { autojunk: settings.autojunk });
    engine.set_alignment_enabled(settings.sync_view);

    let stdout = io::stdout();
    let render = RenderOptions {
        width: terminal_width(),
        context: settings.context,
        color: settings.color && stdout.is_terminal(),
        gutter: settings.gutter,
    };
    let mut session = Session::new(engine, render, stdout.lock()).with_output_path(cli.output.clone());

    match run(&mut session, &cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("session ended: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run<W: io::Write>(session: &mut Session<W>, cli: &Cli) -> io::Result<()> {
    for (side, path) in [(Side::Left, &cli.left), (Side::Right, &cli.right)] {
        if let Some(path) = path {
            session.execute(Command::Load(side, path.clone()))?;
        }
    }
    if cli.left.is_some() && cli.right.is_some() {
        session.execute(Command::Compare)?;
    } else {
        session.status(GREETING)?;
    }

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    session.run(stdin.lock(), interactive)
}
