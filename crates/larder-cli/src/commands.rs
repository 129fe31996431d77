use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use larder_cli::cli::{BrowseArgs, FacetsArgs};
use larder_cli::columns::{column_visibility, is_known_column};
use larder_cli::config::LarderConfig;
use larder_core::{BrowseSession, ColumnVisibility, default_facets};
use larder_ingest::load_records;

/// A filtered session plus how many of its rows to print.
pub struct BrowseOutcome {
    pub session: BrowseSession,
    pub row_limit: Option<usize>,
}

pub fn run_browse(args: &BrowseArgs, config: &LarderConfig) -> Result<BrowseOutcome> {
    let span = info_span!("browse", file = %args.file.display());
    let _guard = span.enter();
    let start = Instant::now();

    let mut session = open_session(&args.file, config)?;
    for action in args.filters.actions() {
        session.dispatch(&action);
    }
    for key in &args.hide_columns {
        set_column(&mut session, key, true);
    }
    for key in &args.show_columns {
        set_column(&mut session, key, false);
    }

    let row_limit = match args.max_rows {
        Some(0) => None,
        Some(rows) => Some(rows),
        None => config.display.row_limit(),
    };
    info!(
        visible = session.filtered_len(),
        total = session.universe().len(),
        active_filters = session.active_filter_count(),
        duration_ms = start.elapsed().as_millis(),
        "browse complete"
    );
    Ok(BrowseOutcome { session, row_limit })
}

pub fn run_facets(args: &FacetsArgs, config: &LarderConfig) -> Result<BrowseSession> {
    let span = info_span!("facets", file = %args.file.display());
    let _guard = span.enter();
    open_session(&args.file, config)
}

pub fn run_columns(config: &LarderConfig) -> ColumnVisibility {
    column_visibility(&config.columns.hidden)
}

fn open_session(path: &Path, config: &LarderConfig) -> Result<BrowseSession> {
    let records =
        load_records(path).with_context(|| format!("load snapshot {}", path.display()))?;
    let mut session = BrowseSession::new(
        default_facets(),
        column_visibility(&config.columns.hidden),
    );
    session.refresh(records);
    Ok(session)
}

fn set_column(session: &mut BrowseSession, key: &str, hidden: bool) {
    if !is_known_column(key) {
        warn!(column = key, "unknown column key, ignoring");
        return;
    }
    let pinned = session
        .columns()
        .columns()
        .iter()
        .any(|column| column.key == key && column.always_visible);
    if hidden && pinned {
        warn!(column = key, "column is always visible, ignoring");
        return;
    }
    session.set_column_hidden(key, hidden);
}
