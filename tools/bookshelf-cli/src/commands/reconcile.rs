//! Check a returned payment session.

use anyhow::{anyhow, Result};

use super::ReconcileArgs;
use crate::context::Context;
use crate::output::status_badge;

/// Run the reconcile command.
pub async fn run(args: ReconcileArgs, ctx: &Context) -> Result<()> {
    let orchestrator = ctx.orchestrator()?;
    let mut cart = ctx.cart()?;

    let spinner = ctx.output.spinner("Checking payment status...");
    let result = orchestrator
        .reconcile(args.session_id.as_deref(), &mut cart)
        .await;
    spinner.finish_and_clear();

    let outcome = result.map_err(|e| anyhow!(e.user_message()))?;
    super::cart::warn_if_degraded(&cart, ctx);

    // A paid order closes out the checkout as well.
    if outcome.is_paid() {
        let mut checkout = ctx.checkout()?;
        checkout.reset();
        super::checkout::warn_if_degraded(&checkout, ctx);
    }

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "session": outcome.session,
            "cart_cleared": outcome.cart_cleared,
            "message": outcome.message(),
        }));
        return Ok(());
    }

    let session = &outcome.session;
    ctx.output.header("Payment");
    ctx.output.kv("session id", session.id.as_str());
    ctx.output.kv("status", &status_badge(session.status.as_str()));
    ctx.output.kv("amount", &session.total_amount.display());
    if let Some(name) = &session.customer_name {
        ctx.output.kv("customer", name);
    }
    if let Some(email) = &session.customer_email {
        ctx.output.kv("email", email);
    }
    println!();

    if outcome.is_paid() {
        ctx.output.success(outcome.message());
    } else {
        ctx.output.warn(outcome.message());
    }

    Ok(())
}
