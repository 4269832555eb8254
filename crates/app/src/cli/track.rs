use std::io::{self, Write};

use bistro::orders::{TrackingStep, eta_display};
use bistro_app::{context::AppContext, domain::orders::OrderReference};
use clap::Args;
use jiff::Timestamp;

use crate::cli::labels;

#[derive(Debug, Args)]
pub(crate) struct TrackArgs {
    /// Order id returned at checkout
    order: String,
}

pub(crate) async fn run(args: TrackArgs, context: &AppContext) -> Result<(), String> {
    let tracking = context
        .orders
        .order_status(&OrderReference::new(args.order))
        .await
        .map_err(|error| format!("failed to fetch order: {error}"))?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let mut write = |line: String| writeln!(handle, "{line}").map_err(|error| error.to_string());

    write(format!(
        "Pedido #{}: {}",
        tracking.reference.short(),
        labels::status(tracking.status)
    ))?;

    if let Some(current) = tracking.status.tracking_step() {
        for (step, reached) in TrackingStep::progress(current) {
            let mark = if reached { "●" } else { "○" };

            write(format!("  {mark} {}", labels::step(step)))?;
        }
    }

    if tracking.status.is_active()
        && let Some(eta) = tracking.estimated_delivery_time
    {
        write(format!(
            "Chega em {}",
            eta_display(eta, Timestamp::now())
        ))?;
    }

    Ok(())
}
