//! A small (contrived) logging pipeline:
//!
//! ```text
//! println ===> filter ===> copy ===> redirect =x=> stdout
//!                            \==> stderr   \==> captured
//! ```
//!
//! Only lines containing "error" get past the filter; they are copied to stderr and
//! captured in memory. Then the redirect layer is removed, and from then on those lines
//! reach stdout directly.

use micro_chain::{Chain, ChainError, MemorySink, WriteSink, filter_strings};
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<(), ChainError> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let captured = Arc::new(MemorySink::new());
    let chain = Chain::builder(Arc::new(WriteSink::stdout()))
        .redirect(Arc::clone(&captured))
        .copy(Arc::new(WriteSink::stderr()))
        .build();
    let filtered = filter_strings(chain.head(), |s| s.contains("error"));

    filtered.println("This is an error message")?;
    filtered.println("This is an ordinary message")?;
    info!(captured = %captured.to_string_lossy().trim_end(), "captured before removal");

    let redirect_layer = Arc::clone(&chain.layers()[0]);
    filtered.remove_delegate(&redirect_layer);

    filtered.println("This error goes to stdout now")?;
    filtered.flush()?;

    info!(bytes = captured.len(), "captured after removal");
    Ok(())
}
