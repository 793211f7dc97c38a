use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use swatch::application::{DevSession, HotReloadServer, PublishUseCase};
use swatch::infrastructure::{LocalFs, TcpSnapshotListener};
use swatch::Target;

use super::workspace::{event_sink, Workspace};
use crate::cli::SourceArgs;

pub fn cmd_serve(
    source: &SourceArgs,
    config_file: Option<&Path>,
    targets: Option<Vec<Target>>,
    addr: Option<String>,
    no_publish: bool,
    json: bool,
) -> Result<()> {
    let workspace = Workspace::load(source, config_file)?;
    let events = event_sink(json);
    let hot = &workspace.config.hot;

    let server = HotReloadServer::with_options(hot.ack_timeout(), events.clone());
    let mut session = DevSession::new(
        workspace.design_source()?,
        workspace.compiler()?,
        workspace.options(workspace.targets(targets)),
        server.clone(),
    )
    .with_events(events.clone())
    .with_debounce(hot.debounce());
    if hot.publish && !no_publish {
        session = session.with_publisher(
            PublishUseCase::new(workspace.output_dir(None), LocalFs::new()).with_events(events),
        );
    }

    let running = Arc::new(AtomicBool::new(true));
    let flag = running.clone();
    ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst))
        .context("installing Ctrl+C handler")?;

    let addr = addr.unwrap_or_else(|| hot.addr.clone());
    let listener =
        TcpSnapshotListener::bind(&addr).with_context(|| format!("binding {}", addr))?;
    let accept = listener.spawn(server, running.clone())?;
    info!("serving {} (Ctrl+C to stop)", workspace.project_root.display());

    let result = Arc::new(session).watch(&workspace.project_root, running.clone());
    running.store(false, Ordering::SeqCst);
    let _ = accept.join();
    result?;
    Ok(())
}
