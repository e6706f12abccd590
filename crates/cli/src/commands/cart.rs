//! Cart commands.

use std::io::Write;

use urvann_core::ItemId;
use urvann_core::cart::{CartLine, parse_quantity};
use urvann_core::storage::KeyValueStore;
use urvann_storefront::error::add_breadcrumb;
use urvann_storefront::state::AppState;

use super::CliError;

/// Print every line and the totals.
pub fn show<S: KeyValueStore + Clone>(
    state: &AppState<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let cart = state.cart();
    if cart.state().is_empty() {
        writeln!(out, "Your cart is empty.")?;
        return Ok(());
    }

    let lines = cart.line_count();
    let units = cart.total_units();
    writeln!(
        out,
        "Cart ({lines} {}, {units} {})",
        if lines == 1 { "line" } else { "lines" },
        if units == 1 { "item" } else { "items" },
    )?;
    for line in cart.lines() {
        write_line(line, out)?;
    }
    writeln!(out, "Total: {}", cart.total_price())?;
    Ok(())
}

fn write_line(line: &CartLine, out: &mut impl Write) -> Result<(), CliError> {
    let stock = if line.availability_at_add_time() {
        ""
    } else {
        " (out of stock)"
    };
    writeln!(
        out,
        "  {:<26} {:<24} {} x {} = {}{stock}",
        line.item_id(),
        line.name(),
        line.unit_price(),
        line.quantity(),
        line.line_total(),
    )?;
    Ok(())
}

/// Add one unit of a catalog plant.
pub async fn add<S: KeyValueStore + Clone>(
    state: &mut AppState<S>,
    id: &ItemId,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let product = state.add_to_cart(id).await?;
    add_breadcrumb("cart", "Added to cart", Some(&[("item_id", id.as_str())]));
    writeln!(
        out,
        "Added {} to cart (quantity {})",
        product.name,
        state.cart().quantity_of(id)
    )?;
    Ok(())
}

/// Drop a line.
pub fn remove<S: KeyValueStore + Clone>(
    state: &mut AppState<S>,
    id: &ItemId,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let present = state.cart().contains(id);
    state.cart_mut().remove_item(id);
    add_breadcrumb("cart", "Removed from cart", Some(&[("item_id", id.as_str())]));
    if present {
        writeln!(out, "Removed {id} from cart")?;
    } else {
        writeln!(out, "{id} was not in the cart")?;
    }
    Ok(())
}

/// Set a line's quantity from user-typed text.
pub fn set<S: KeyValueStore + Clone>(
    state: &mut AppState<S>,
    id: &ItemId,
    quantity: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let quantity = parse_quantity(quantity)?;
    let present = state.cart().contains(id);
    state.cart_mut().set_quantity(id, quantity)?;

    match state.cart().quantity_of(id) {
        0 if present => writeln!(out, "Removed {id} from cart")?,
        0 => writeln!(out, "{id} is not in the cart")?,
        n => writeln!(out, "{id} quantity set to {n}")?,
    }
    Ok(())
}

/// Empty the cart.
pub fn clear<S: KeyValueStore + Clone>(
    state: &mut AppState<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    state.cart_mut().clear();
    add_breadcrumb("cart", "Cleared cart", None);
    writeln!(out, "Cart cleared")?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use urvann_core::cart::{CartError, Product};
    use urvann_core::storage::MemoryStore;
    use urvann_storefront::config::StorefrontConfig;
    use urvann_storefront::error::AppError;

    use super::*;

    fn state() -> AppState<Arc<MemoryStore>> {
        let config = StorefrontConfig::from_lookup(|_| None).unwrap();
        AppState::with_storage(config, Arc::new(MemoryStore::new())).unwrap()
    }

    fn output(f: impl FnOnce(&mut Vec<u8>)) -> String {
        let mut buf = Vec::new();
        f(&mut buf);
        String::from_utf8(buf).unwrap()
    }

    fn id(s: &str) -> ItemId {
        ItemId::parse(s).unwrap()
    }

    #[test]
    fn test_show_empty() {
        let state = state();
        let text = output(|out| show(&state, out).unwrap());
        assert_eq!(text, "Your cart is empty.\n");
    }

    #[test]
    fn test_show_lines_and_total() {
        let mut state = state();
        let fern = Product::new("p1", "Fern", Decimal::from(199));
        state.cart_mut().add_item(fern.clone()).unwrap();
        state.cart_mut().add_item(fern).unwrap();

        let text = output(|out| show(&state, out).unwrap());
        assert!(text.starts_with("Cart (1 line, 2 items)\n"), "{text}");
        assert!(text.contains("₹199.00 x 2 = ₹398.00"), "{text}");
        assert!(text.ends_with("Total: ₹398.00\n"), "{text}");
    }

    #[test]
    fn test_set_parses_typed_quantity() {
        let mut state = state();
        state
            .cart_mut()
            .add_item(Product::new("p1", "Fern", Decimal::from(199)))
            .unwrap();

        let text = output(|out| set(&mut state, &id("p1"), " 4 ", out).unwrap());
        assert_eq!(text, "p1 quantity set to 4\n");

        let err = set(&mut state, &id("p1"), "two", &mut Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            CliError::App(AppError::Cart(CartError::InvalidQuantity { .. }))
        ));
        assert_eq!(state.cart().quantity_of(&id("p1")), 4);

        let text = output(|out| set(&mut state, &id("p1"), "-1", out).unwrap());
        assert_eq!(text, "Removed p1 from cart\n");
        assert!(state.cart().state().is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut state = state();
        state
            .cart_mut()
            .add_item(Product::new("p1", "Fern", Decimal::from(199)))
            .unwrap();

        let text = output(|out| remove(&mut state, &id("p1"), out).unwrap());
        assert_eq!(text, "Removed p1 from cart\n");
        let text = output(|out| remove(&mut state, &id("p1"), out).unwrap());
        assert_eq!(text, "p1 was not in the cart\n");

        let text = output(|out| clear(&mut state, out).unwrap());
        assert_eq!(text, "Cart cleared\n");
    }
}
