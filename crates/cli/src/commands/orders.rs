//! Checkout and order history commands.

use std::io::Write;

use boutique_storefront::Storefront;
use boutique_storefront::format::format_date;
use boutique_storefront::services::TableServices;

use super::CliError;

/// Place an order for the cart contents.
pub async fn checkout<S: TableServices>(
    storefront: &mut Storefront<S>,
    out: &mut impl Write,
    address: &str,
) -> Result<(), CliError> {
    let order = storefront.place_order(address).await?;
    writeln!(out, "Order {} placed: {}", order.id, order.details.total)?;
    Ok(())
}

/// List the current user's orders.
pub async fn list<S: TableServices>(storefront: &Storefront<S>, out: &mut impl Write) -> Result<(), CliError> {
    let orders = storefront.orders().await?;
    if orders.is_empty() {
        writeln!(out, "No orders")?;
    }
    for order in orders {
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            order.id,
            format_date(&order.details.created_at),
            order.details.status,
            order.details.total
        )?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use boutique_core::ProductId;

    use super::*;
    use crate::commands::testing::{output, storefront};

    #[tokio::test]
    async fn test_checkout_requires_login() {
        let mut storefront = storefront();
        let mut buffer = Vec::new();
        let err = checkout(&mut storefront, &mut buffer, "").await.unwrap_err();
        assert_eq!(err.user_message(), "Please log in first");
    }

    #[tokio::test]
    async fn test_checkout_then_list() {
        let mut storefront = storefront();
        let mut buffer = Vec::new();
        storefront
            .login("marie@boutique.fr", &"pw".to_owned().into())
            .await
            .unwrap();
        storefront
            .add_to_cart_by_id(&ProductId::new("2"), 2)
            .await
            .unwrap();

        checkout(&mut storefront, &mut buffer, "1 rue de Paris").await.unwrap();
        list(&storefront, &mut buffer).await.unwrap();

        let text = output(buffer);
        assert!(text.contains("placed: 30,00\u{a0}€"));
        assert!(text.contains("\tpending\t30,00\u{a0}€"));
        assert!(storefront.cart().is_empty());
    }
}
