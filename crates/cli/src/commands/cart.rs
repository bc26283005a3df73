//! Cart and wishlist commands.

use std::io::Write;

use boutique_core::ProductId;
use boutique_storefront::Storefront;
use boutique_storefront::models::QuantityChange;
use boutique_storefront::services::TableServices;

use super::CliError;

/// Print every line and the total.
pub fn show<S: TableServices>(storefront: &Storefront<S>, out: &mut impl Write) -> Result<(), CliError> {
    let cart = storefront.cart();
    if cart.is_empty() {
        writeln!(out, "Your cart is empty")?;
        return Ok(());
    }

    for line in cart.lines() {
        writeln!(
            out,
            "{}\t{}\t{} × {}\t{}",
            line.product.id,
            line.product.name,
            line.quantity(),
            line.unit_price(),
            line.subtotal()
        )?;
    }
    writeln!(out, "Total ({} items): {}", cart.count(), cart.total())?;
    Ok(())
}

/// Add a catalog product to the cart.
pub async fn add<S: TableServices>(
    storefront: &mut Storefront<S>,
    out: &mut impl Write,
    id: ProductId,
    quantity: u32,
) -> Result<(), CliError> {
    let line_quantity = storefront.add_to_cart_by_id(&id, quantity).await?;
    writeln!(out, "{id}: {line_quantity} in cart")?;
    Ok(())
}

/// Remove a line.
pub fn remove<S: TableServices>(
    storefront: &mut Storefront<S>,
    out: &mut impl Write,
    id: &ProductId,
) -> Result<(), CliError> {
    if storefront.remove_from_cart(id) {
        writeln!(out, "{id}: removed")?;
    } else {
        writeln!(out, "{id}: not in cart")?;
    }
    Ok(())
}

/// Set a line's quantity.
pub fn set<S: TableServices>(
    storefront: &mut Storefront<S>,
    out: &mut impl Write,
    id: &ProductId,
    quantity: i64,
) -> Result<(), CliError> {
    match storefront.set_cart_quantity(id, quantity) {
        QuantityChange::Updated => writeln!(out, "{id}: {quantity} in cart")?,
        QuantityChange::Removed => writeln!(out, "{id}: removed")?,
        QuantityChange::Unchanged => writeln!(out, "{id}: not in cart")?,
    }
    Ok(())
}

/// Empty the cart.
pub fn clear<S: TableServices>(storefront: &mut Storefront<S>, out: &mut impl Write) -> Result<(), CliError> {
    storefront.clear_cart();
    writeln!(out, "Cart cleared")?;
    Ok(())
}

/// Print every wishlist entry.
pub fn show_wishlist<S: TableServices>(
    storefront: &Storefront<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let wishlist = storefront.wishlist();
    if wishlist.is_empty() {
        writeln!(out, "Your wishlist is empty")?;
    }
    for product in wishlist.entries() {
        writeln!(out, "{}\t{}\t{}", product.id, product.name, product.price)?;
    }
    Ok(())
}

/// Add or remove a product from the wishlist.
pub async fn toggle_wishlist<S: TableServices>(
    storefront: &mut Storefront<S>,
    out: &mut impl Write,
    id: &ProductId,
) -> Result<(), CliError> {
    let added = storefront.toggle_wishlist_by_id(id).await?;
    writeln!(out, "{id}: {}", if added { "added" } else { "removed" })?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::testing::{output, storefront};

    #[tokio::test]
    async fn test_add_set_show() {
        let mut storefront = storefront();
        let mut buffer = Vec::new();

        add(&mut storefront, &mut buffer, ProductId::new("1"), 2).await.unwrap();
        add(&mut storefront, &mut buffer, ProductId::new("1"), 1).await.unwrap();
        set(&mut storefront, &mut buffer, &ProductId::new("2"), 4).unwrap();
        show(&storefront, &mut buffer).unwrap();

        let text = output(buffer);
        assert!(text.contains("1: 3 in cart"));
        assert!(text.contains("2: not in cart"));
        assert!(text.contains("Total (3 items): 89,97\u{a0}€"));
    }

    #[tokio::test]
    async fn test_add_zero_fails() {
        let mut storefront = storefront();
        let mut buffer = Vec::new();
        let err = add(&mut storefront, &mut buffer, ProductId::new("1"), 0)
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Quantity must be at least 1");
    }

    #[tokio::test]
    async fn test_wishlist_toggle() {
        let mut storefront = storefront();
        let mut buffer = Vec::new();

        toggle_wishlist(&mut storefront, &mut buffer, &ProductId::new("2")).await.unwrap();
        show_wishlist(&storefront, &mut buffer).unwrap();
        toggle_wishlist(&mut storefront, &mut buffer, &ProductId::new("2")).await.unwrap();
        show_wishlist(&storefront, &mut buffer).unwrap();

        let text = output(buffer);
        assert!(text.contains("2: added"));
        assert!(text.contains("2\tVase\t15,00\u{a0}€"));
        assert!(text.contains("2: removed"));
        assert!(text.ends_with("Your wishlist is empty\n"));
    }
}
