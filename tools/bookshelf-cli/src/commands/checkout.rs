//! Checkout step commands.

use anyhow::{bail, Result};

use bookshelf_cache::Storage;
use bookshelf_commerce::prelude::{
    checkout_total, AddressPatch, CartState, CheckoutError, CheckoutState, CheckoutStateMachine,
    CheckoutStep, DeliveryMethod,
};

use super::{AddressArgs, CheckoutArgs, CheckoutCommand};
use crate::context::Context;

impl From<AddressArgs> for AddressPatch {
    fn from(args: AddressArgs) -> Self {
        AddressPatch {
            first_name: args.first_name,
            last_name: args.last_name,
            company: args.company,
            address: args.address,
            apt: args.apt,
            country: args.country,
            state: args.state,
            city: args.city,
            postal_code: args.postal_code,
            phone_number: args.phone,
        }
    }
}

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut checkout = ctx.checkout()?;

    match args.command.unwrap_or(CheckoutCommand::Show) {
        CheckoutCommand::Show => {}
        CheckoutCommand::Contact(address) => {
            let patch = AddressPatch::from(address);
            if patch.is_empty() {
                bail!("Nothing to update. Pass at least one address flag, e.g. --first-name");
            }
            checkout.update_shipping_address(patch);
            ctx.output.success("Shipping details updated");
        }
        CheckoutCommand::Delivery { method } => {
            let method: DeliveryMethod = method.parse()?;
            checkout.select_delivery(method);
            ctx.output.success(&format!(
                "Delivery: {} ({}, {})",
                method.name(),
                method.estimate(),
                method.price().display()
            ));
        }
        CheckoutCommand::Billing { separate, address } => {
            checkout.use_shipping_address_for_billing(!separate);
            let patch = AddressPatch::from(address);
            if !patch.is_empty() {
                checkout.update_billing_address(patch);
            }
            if separate {
                ctx.output.success("Billing to a separate address");
            } else {
                ctx.output.success("Billing to the shipping address");
            }
        }
        CheckoutCommand::Email { email } => {
            checkout.set_email(email);
            ctx.output.success("Email updated");
        }
        CheckoutCommand::Next => {
            let from = checkout.current_step();
            match checkout.advance() {
                Ok(step) => ctx
                    .output
                    .success(&format!("Moved from {} to {}", from.display_name(), step.display_name())),
                Err(CheckoutError::Validation(errors)) => {
                    for error in errors.errors() {
                        ctx.output
                            .warn(&format!("{}: {}", error.field.as_str(), error.message));
                    }
                    bail!(
                        "{} step has {} problem(s)",
                        from.display_name(),
                        errors.len()
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }
        CheckoutCommand::Back => {
            let step = checkout.retreat()?;
            ctx.output
                .success(&format!("Back to {}", step.display_name()));
        }
        CheckoutCommand::Step { number } => {
            checkout.set_step_number(number)?;
            ctx.output.success(&format!(
                "Jumped to {}",
                checkout.current_step().display_name()
            ));
        }
        CheckoutCommand::Reset => {
            checkout.reset();
            ctx.output.success("Checkout reset");
        }
    }

    warn_if_degraded(&checkout, ctx);

    let cart = ctx.cart()?;
    show_checkout(checkout.state(), cart.state(), ctx);
    Ok(())
}

pub(crate) fn warn_if_degraded<S: Storage>(checkout: &CheckoutStateMachine<S>, ctx: &Context) {
    if checkout.is_degraded() {
        ctx.output
            .warn("Checkout changes could not be saved and will be lost when this command exits");
    }
}

fn show_checkout(state: &CheckoutState, cart: &CartState, ctx: &Context) {
    let total = checkout_total(cart, state);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "checkout": state,
            "subtotal": cart.total(),
            "total": total,
        }));
        return;
    }

    ctx.output.header("Checkout");
    for step in CheckoutStep::ALL {
        ctx.output.step(
            step.number() as usize,
            CheckoutStep::ALL.len(),
            step.display_name(),
            step == state.current_step(),
        );
    }

    println!();
    let shipping = state.shipping_address();
    if !shipping.full_name().is_empty() {
        ctx.output.kv("ship to", &shipping.full_name());
    }
    if !shipping.one_line().is_empty() {
        ctx.output.kv("address", &shipping.one_line());
    }
    if !shipping.phone_number.is_empty() {
        ctx.output.kv("phone", &shipping.phone_number);
    }
    if let Some(email) = state.email() {
        ctx.output.kv("email", email);
    }
    match state.delivery_method() {
        Some(method) => ctx.output.kv(
            "delivery",
            &format!("{} ({})", method.name(), method.estimate()),
        ),
        None => ctx.output.kv("delivery", "not selected"),
    }
    if state.billing().use_shipping_address {
        ctx.output.kv("billing", "same as shipping");
    } else {
        ctx.output
            .kv("billing", &state.effective_billing_address().one_line());
    }

    println!();
    ctx.output.amount("subtotal", &cart.total());
    ctx.output.amount("delivery", &state.delivery_price());
    ctx.output.total(&total);
}
