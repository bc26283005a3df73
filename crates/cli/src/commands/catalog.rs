//! Catalog commands.

use std::io::Write;

use boutique_core::{Product, ProductId};
use boutique_storefront::services::{ProductFilter, TableServices};
use boutique_storefront::{Storefront, StorefrontError};
use boutique_storefront::format::star_rating;

use super::CliError;

fn write_product_line(out: &mut impl Write, product: &Product, wishlisted: bool) -> std::io::Result<()> {
    writeln!(
        out,
        "{}\t{}\t{}\t{}{}",
        product.id,
        product.name,
        product.price,
        star_rating(product.rating()),
        if wishlisted { "\t♥" } else { "" }
    )
}

/// List products, one per line.
pub async fn products<S: TableServices>(
    storefront: &Storefront<S>,
    out: &mut impl Write,
    category: Option<String>,
) -> Result<(), CliError> {
    let filter = category.map_or_else(ProductFilter::all, ProductFilter::category);
    let products = storefront.products(&filter).await;

    if products.is_empty() {
        writeln!(out, "No products")?;
    }
    for product in &products {
        write_product_line(out, product, storefront.wishlist().contains(&product.id))?;
    }
    Ok(())
}

/// Show one product in detail.
pub async fn product<S: TableServices>(
    storefront: &Storefront<S>,
    out: &mut impl Write,
    id: ProductId,
) -> Result<(), CliError> {
    let product = storefront
        .product(&id)
        .await
        .ok_or(StorefrontError::ProductNotFound(id))?;

    writeln!(out, "{}", product.name)?;
    writeln!(out, "{}", product.price)?;
    writeln!(
        out,
        "{} ({} reviews)",
        star_rating(product.rating()),
        product.reviews_count
    )?;
    writeln!(out, "Category: {}", product.category)?;
    if !product.description.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", product.description)?;
    }
    Ok(())
}

/// List categories, one per line.
pub async fn categories<S: TableServices>(
    storefront: &Storefront<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    for category in storefront.categories().await {
        writeln!(out, "{}\t{}", category.id, category.name)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::testing::{output, storefront};

    #[tokio::test]
    async fn test_products_lists_rows() {
        let storefront = storefront();
        let mut buffer = Vec::new();
        products(&storefront, &mut buffer, None).await.unwrap();

        let text = output(buffer);
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("1\tLampe\t29,99\u{a0}€\t⭐⭐⭐⭐☆"));
    }

    #[tokio::test]
    async fn test_unknown_product_is_an_error() {
        let storefront = storefront();
        let mut buffer = Vec::new();
        let err = product(&storefront, &mut buffer, ProductId::new("404"))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Product not found");
    }

    #[tokio::test]
    async fn test_categories() {
        let storefront = storefront();
        let mut buffer = Vec::new();
        categories(&storefront, &mut buffer).await.unwrap();
        assert_eq!(output(buffer), "deco\tDéco\n");
    }
}
