//! Fragment rendering commands.

use std::io::Write;

use boutique_core::ProductId;
use boutique_storefront::services::TableServices;
use boutique_storefront::{Storefront, StorefrontError};

use super::CliError;

pub fn cart<S: TableServices>(storefront: &Storefront<S>, out: &mut impl Write) -> Result<(), CliError> {
    writeln!(out, "{}", storefront.render_cart()?)?;
    Ok(())
}

pub async fn product<S: TableServices>(
    storefront: &Storefront<S>,
    out: &mut impl Write,
    id: ProductId,
) -> Result<(), CliError> {
    let product = storefront
        .product(&id)
        .await
        .ok_or(StorefrontError::ProductNotFound(id))?;
    writeln!(out, "{}", storefront.render_product_card(&product)?)?;
    Ok(())
}

pub async fn categories<S: TableServices>(
    storefront: &Storefront<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    for category in storefront.categories().await {
        writeln!(out, "{}", storefront.render_category_card(&category)?)?;
    }
    Ok(())
}

pub fn badges<S: TableServices>(storefront: &Storefront<S>, out: &mut impl Write) -> Result<(), CliError> {
    writeln!(out, "{}", storefront.render_badges()?)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::testing::{output, storefront};

    #[tokio::test]
    async fn test_render_product_card() {
        let storefront = storefront();
        let mut buffer = Vec::new();
        product(&storefront, &mut buffer, ProductId::new("1")).await.unwrap();

        let html = output(buffer);
        assert!(html.contains(r#"class="product-card"#));
        assert!(html.contains("Lampe"));
    }

    #[test]
    fn test_render_badges_hidden_for_empty_state() {
        let storefront = storefront();
        let mut buffer = Vec::new();
        badges(&storefront, &mut buffer).unwrap();
        assert_eq!(output(buffer).matches("hidden").count(), 2);
    }
}
