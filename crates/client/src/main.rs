//! Console shell: live inventory list + bar chart over a running API.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncBufReadExt;

use tally_client::{bar_rows, AddItemDialog, RemoteDocumentStore};
use tally_core::ItemName;
use tally_tracker::{ItemRow, LiveInventoryView, QuantityMutator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tally_observability::init();

    let api_url =
        std::env::var("TALLY_API_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());

    let store = Arc::new(RemoteDocumentStore::new(&api_url));
    let mutator = QuantityMutator::new(Arc::clone(&store));
    let view = LiveInventoryView::attach(store.as_ref()).await?;

    tracing::info!(api_url = %api_url, "connected");

    // Render loop: one fresh screen per snapshot, on a blocking thread
    // so the command loop keeps the async runtime to itself.
    let shutdown = Arc::new(AtomicBool::new(false));
    let render_shutdown = Arc::clone(&shutdown);
    let render = tokio::task::spawn_blocking(move || {
        while !render_shutdown.load(Ordering::Relaxed) {
            match view.recv_timeout(Duration::from_millis(500)) {
                Ok(rows) => render_inventory(&rows),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    tracing::warn!("snapshot stream closed");
                    break;
                }
            }
        }
    });

    println!("commands: add <name> | remove <name> | quit");

    let mut dialog = AddItemDialog::new();
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim() == "quit" || line.trim() == "exit" {
            break;
        }

        if line == "add" || line.starts_with("add ") {
            // Everything after "add " is the name, verbatim: spaces,
            // capitals, or nothing at all.
            dialog.open();
            dialog.set_name(line.strip_prefix("add ").unwrap_or(""));
            let name = dialog.submit();

            if let Err(e) = mutator.add_item(&name).await {
                tracing::error!("add failed: {e}");
            }
        } else if let Some(name) = line.strip_prefix("remove ") {
            if let Err(e) = mutator.remove_item(&ItemName::new(name)).await {
                tracing::error!("remove failed: {e}");
            }
        } else if !line.trim().is_empty() {
            println!("commands: add <name> | remove <name> | quit");
        }
    }

    shutdown.store(true, Ordering::Relaxed);
    let _ = render.await;

    Ok(())
}

fn render_inventory(rows: &[ItemRow]) {
    println!();
    println!("Inventory Items ({})", rows.len());

    for row in rows {
        println!("  {:<24} x{}", row.label, row.quantity);
    }

    if !rows.is_empty() {
        println!();
        for bar in bar_rows(rows, 40) {
            println!("  {:<24} {} {}", bar.label, "#".repeat(bar.width), bar.quantity);
        }
    }
}
