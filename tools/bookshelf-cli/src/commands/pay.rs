//! Open a hosted payment session.

use anyhow::{anyhow, bail, Result};

use bookshelf_commerce::prelude::{checkout_total, CheckoutStep};

use crate::context::Context;

/// Run the pay command.
pub async fn run(ctx: &Context) -> Result<()> {
    let cart = ctx.cart()?;
    let checkout = ctx.checkout()?;

    if cart.is_empty() {
        bail!("Your cart is empty. Add a book with `bookshelf cart add`");
    }
    if checkout.current_step() != CheckoutStep::Payment {
        bail!(
            "Checkout is on the {} step. Finish it with `bookshelf checkout next`",
            checkout.current_step().display_name()
        );
    }

    let orchestrator = ctx.orchestrator()?;
    let total = checkout_total(cart.state(), checkout.state());

    let spinner = ctx
        .output
        .spinner(&format!("Creating payment session for {}...", total.display()));

    let result = tokio::select! {
        result = orchestrator.create_session(cart.state(), checkout.state()) => result,
        _ = tokio::signal::ctrl_c() => {
            orchestrator.abandon();
            spinner.finish_and_clear();
            bail!("Cancelled");
        }
    };
    spinner.finish_and_clear();

    let created = result.map_err(|e| anyhow!(e.user_message()))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "session_id": created.session_id,
            "client_handle": created.client_handle,
            "total": total,
        }));
        return Ok(());
    }

    ctx.output.success("Payment session created");
    ctx.output.kv("session id", created.session_id.as_str());
    ctx.output.kv("client handle", &created.client_handle);
    ctx.output.total(&total);
    ctx.output.info(&format!(
        "When payment completes, run `bookshelf reconcile {}`",
        created.session_id
    ));

    Ok(())
}
