pub mod cli;
pub mod commands;
pub mod config;
pub mod render;
pub mod terminal;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use ticklist_core::{
  HttpTaskApi,
  TaskApi,
  TaskListController
};
use tracing::{
  debug,
  info
};

use crate::cli::Command;
use crate::commands::Output;
use crate::terminal::TerminalFrontend;

/// How a command that ran to completion went.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Status {
  Clean,
  /// The server reported at least
  /// one failure.
  Failed
}

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<Status> {
  let pre =
    cli::preprocess_args(&raw_args);
  let cli = cli::GlobalCli::parse_from(
    pre.cleaned_args
  );

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting ticklist CLI"
  );
  debug!(?pre.rc_overrides, "preprocessed rc overrides");

  let mut cfg = config::Config::load(
    cli.ticklistrc.as_deref()
  )?;
  cfg.apply_overrides(
    pre.rc_overrides.into_iter().chain(
      cli
        .rc_overrides
        .into_iter()
        .map(|kv| (kv.key, kv.value))
    )
  );
  if let Some(server) = cli.server {
    cfg.apply_overrides([(
      "server.url".to_string(),
      server
    )]);
  }

  let command = cli
    .command
    .unwrap_or(Command::List {
      filter: None
    });
  let export_dir = match &command {
    | Command::Export {
      dir: Some(dir)
    } => dir.clone(),
    | _ => cfg.export_dir()
  };
  let assume_yes =
    cli.yes || !cfg.get_bool("confirm")?;

  let server_url = cfg.server_url();
  let api = HttpTaskApi::with_timeout(
    &server_url,
    cfg.request_timeout()?
  )
  .with_context(|| {
    format!(
      "failed to set up client for \
       {server_url}"
    )
  })?;

  let frontend = TerminalFrontend::new(
    render::Renderer::new(&cfg)?,
    assume_yes,
    export_dir
  );
  let controller =
    TaskListController::new(
      api, frontend
    )
    .with_filter(cfg.default_filter()?);

  let runtime =
    tokio::runtime::Builder::new_current_thread()
      .enable_all()
      .build()
      .context(
        "failed to start async runtime"
      )?;
  let output = runtime.block_on(
    commands::dispatch(
      &controller,
      command
    )
  )?;

  print_output(&controller, output)?;

  let status =
    if controller.frontend().saw_error()
    {
      Status::Failed
    } else {
      Status::Clean
    };
  info!(?status, "done");
  Ok(status)
}

fn print_output<A: TaskApi>(
  controller: &TaskListController<
    A,
    TerminalFrontend
  >,
  output: Output
) -> anyhow::Result<()> {
  let frontend = controller.frontend();
  let renderer = frontend.renderer();
  match output {
    | Output::List => {
      let snapshot = frontend
        .last_snapshot()
        .unwrap_or_else(|| {
          controller.snapshot()
        });
      renderer.print_list(&snapshot.view)
    }
    | Output::Stats => {
      renderer
        .print_stats(&controller.stats())
    }
    | Output::Export => {
      if let Some(path) =
        frontend.saved_export()
      {
        println!("{}", path.display());
      }
      Ok(())
    }
    | Output::Nothing => Ok(())
  }
}
