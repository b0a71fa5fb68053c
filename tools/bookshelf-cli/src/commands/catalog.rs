//! List the books on sale.

use anyhow::Result;

use crate::context::Context;
use crate::output::truncate;

/// Run the catalog command.
pub async fn run(ctx: &Context) -> Result<()> {
    let books = ctx.catalog.books();

    if ctx.output.is_json() {
        ctx.output.json(&books);
        return Ok(());
    }

    ctx.output.header("Catalog");

    for book in books {
        println!();
        ctx.output.kv("id", book.id.as_str());
        ctx.output.kv("title", &book.title);
        ctx.output.kv("author", &book.author);
        if let Some(price) = book.starting_price() {
            ctx.output.kv("from", &price.display());
        }

        let widths = [20, 10, 10];
        ctx.output.table_row(&["FORMAT ID", "FORMAT", "PRICE"], &widths);
        for offer in &book.formats {
            let format_id = book.format_id(offer.format);
            ctx.output.table_row(
                &[
                    &truncate(format_id.as_str(), widths[0]),
                    offer.format.label(),
                    &offer.price.display(),
                ],
                &widths,
            );
        }
    }

    Ok(())
}
