use anyhow::Context;

use mizuki_core::LedgerConfig;

fn main() -> anyhow::Result<()> {
    mizuki_observability::init();

    let config = LedgerConfig::from_env().context("invalid ledger configuration")?;
    let dispatcher = mizuki_node::build_dispatcher(config);

    let engine = dispatcher.engine();
    tracing::info!(
        rate = engine.rate().value(),
        amount_policy = ?engine.config().amount_policy,
        "starting mizuki node"
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let stats = mizuki_node::serve(&dispatcher, stdin.lock(), stdout.lock())
        .context("invocation loop failed")?;

    tracing::info!(
        handled = stats.handled,
        failed = stats.failed,
        malformed = stats.malformed,
        "input closed; shutting down"
    );
    Ok(())
}
