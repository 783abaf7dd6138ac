//! Minimal console consumer of the monitor's snapshot channel.
//!
//! Drives the engine the way a chart renderer would: the selection goes in
//! over one watch channel, snapshots come back over another, and the cursor
//! query runs against the published series.

use fxwatch::{Currency, Monitor, Selection, Snapshot, TimeRange, spawn_monitor};
use tokio::sync::watch;

#[tokio::main]
async fn main() {
    // Initialise INFO Tracing log subscriber
    init_logging();

    let (selection_tx, selection_rx) =
        watch::channel(Selection::new(Currency::Eur, TimeRange::Hour48));
    let (snapshot_tx, mut snapshot_rx) = watch::channel(Snapshot::default());

    let monitor = spawn_monitor(Monitor::new(), selection_rx, snapshot_tx);

    for tick in 0..10u32 {
        if snapshot_rx.changed().await.is_err() {
            break;
        }
        let snapshot = snapshot_rx.borrow_and_update().clone();
        render(&snapshot);

        // Halfway through, switch currency the way a sidebar toggle would
        if tick == 4 {
            let _ = selection_tx.send(Selection::new(Currency::Usd, TimeRange::Hour48));
        }
    }

    monitor.abort();
}

fn render(snapshot: &Snapshot) {
    let Some(selection) = snapshot.selection else {
        return;
    };

    let rate = snapshot
        .current_rate()
        .map(|rate| format!("{rate:.4}"))
        .unwrap_or_else(|| "loading...".to_string());

    println!(
        "{} → CNY {rate} ({:+.2}%) [{} samples]",
        selection.currency,
        snapshot.trend.percent,
        snapshot.series.len()
    );

    for quote in &snapshot.bank_quotes {
        println!(
            "  {} sell: {}",
            quote.provider,
            quote.sell_spot.as_deref().unwrap_or("n/a")
        );
    }

    // Cursor query against the middle of the window, as a renderer would
    if let (Some(first), Some(last)) = (snapshot.series.first(), snapshot.series.last()) {
        let midpoint = first.time + (last.time - first.time) / 2;
        if let Ok(sample) = snapshot.nearest(midpoint) {
            println!("  nearest to window midpoint: {:.4} @ {}", sample.rate, sample.time);
        }
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        // Filter messages based on the INFO level
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::builder()
                .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        // Use colored output in debug mode
        .with_ansi(cfg!(debug_assertions))
        // Install this Tracing subscriber as global default
        .init()
}
