//! Cart commands.

use anyhow::{bail, Result};

use bookshelf_cache::Storage;
use bookshelf_commerce::prelude::{BookFormat, CartState, CartStore, FormatId};

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::truncate;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart()?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add { book, format } => {
            let format: BookFormat = format.parse()?;
            let input = ctx.catalog.line_input(&book, format)?;
            let summary = format!("{} ({})", input.title, format.label());
            cart.add_item(input);
            ctx.output.success(&format!("Added {}", summary));
        }
        CartCommand::Remove { format_id } => {
            let id = FormatId::new(format_id);
            if cart.state().item(&id).is_none() {
                bail!("No cart line with format ID '{}'", id);
            }
            cart.remove_item(&id);
            ctx.output.success(&format!("Removed {}", id));
        }
        CartCommand::Qty {
            format_id,
            quantity,
        } => {
            let id = FormatId::new(format_id);
            if cart.state().item(&id).is_none() {
                bail!("No cart line with format ID '{}'", id);
            }
            cart.update_quantity(&id, quantity);
            match cart.state().item(&id) {
                Some(item) => ctx
                    .output
                    .success(&format!("{} quantity is now {}", id, item.quantity)),
                None => ctx.output.success(&format!("Removed {}", id)),
            }
        }
        CartCommand::Clear => {
            cart.clear();
            ctx.output.success("Cart cleared");
        }
    }

    warn_if_degraded(&cart, ctx);
    show_cart(cart.state(), ctx);
    Ok(())
}

pub(crate) fn warn_if_degraded<S: Storage>(cart: &CartStore<S>, ctx: &Context) {
    if cart.is_degraded() {
        ctx.output
            .warn("Cart changes could not be saved and will be lost when this command exits");
    }
}

/// Print cart lines and total.
pub(crate) fn show_cart(cart: &CartState, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&cart.snapshot());
        return;
    }

    ctx.output.header("Cart");

    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
        return;
    }

    let widths = [20, 36, 5, 10];
    ctx.output
        .table_row(&["FORMAT ID", "ITEM", "QTY", "TOTAL"], &widths);
    for item in cart.items() {
        ctx.output.table_row(
            &[
                &truncate(item.format_id.as_str(), widths[0]),
                &truncate(&item.summary(), widths[1]),
                &item.quantity.to_string(),
                &item.line_total().display(),
            ],
            &widths,
        );
    }
    println!();
    ctx.output.kv("items", &cart.item_count().to_string());
    ctx.output.amount("subtotal", &cart.total());
}
