use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use revlay_core::{OVERLAY_DIR, Reconciler, Transcript};
use revlay_version::{RevisionId, RevisionMap, VersionId};

use crate::host;
use crate::plugins;

#[derive(Clone, Debug, Parser)]
#[command(name = "revlay", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
pub struct App {
    /// Plugins to reconcile; defaults to every plugin carrying an
    /// overlay folder
    pub plugins: Vec<String>,

    /// Directory holding the installed plugins
    #[arg(long, value_name = "DIR")]
    pub plugins_dir: PathBuf,

    /// Application root, where `.version`/`.revision` overrides live.
    /// Defaults to the parent of the plugins directory
    #[arg(long, value_name = "DIR")]
    pub app_root: Option<PathBuf>,

    /// Host-reported application version
    #[arg(long, value_name = "X.Y.Z")]
    pub app_version: VersionId,

    /// Host-reported application revision, when the host knows one
    #[arg(long, value_name = "N")]
    pub app_revision: Option<RevisionId>,

    /// Version-to-revision map file
    #[arg(long, value_name = "FILE")]
    pub revision_map: PathBuf,

    /// Write the transcript to a file instead of the console
    #[arg(long, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

pub fn run(app: App) -> Result<()> {
    let map = RevisionMap::load(&app.revision_map)
        .with_context(|| format!("loading revision map {}", app.revision_map.display()))?;

    let app_root = app
        .app_root
        .clone()
        .or_else(|| app.plugins_dir.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| app.plugins_dir.clone());
    let ctx = host::resolve_context(&app_root, app.app_version, app.app_revision);

    let names = if app.plugins.is_empty() {
        plugins::discover(&app.plugins_dir)
            .with_context(|| format!("listing plugins in {}", app.plugins_dir.display()))?
    } else {
        app.plugins.clone()
    };

    let out: Box<dyn Write> = match &app.log {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?,
        )),
        None => Box::new(io::stdout()),
    };
    let mut transcript = Transcript::new(out);
    transcript.header(&ctx)?;

    let reconciler = Reconciler::new(&map, ctx);
    for name in &names {
        transcript.plugin(name)?;
        let plugin_dir = app.plugins_dir.join(name);
        reconciler
            .reconcile_tree(&plugin_dir.join(OVERLAY_DIR), &plugin_dir, &mut transcript)
            .with_context(|| format!("reconciling plugin {}", name))?;
    }

    transcript.done()?;
    Ok(())
}
