//! Product listing.

use super::Page;
use crate::format::brl;

pub async fn list(page: &Page) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = page.catalog()?.fetch().await;

    if catalog.is_fallback() {
        println!("(catálogo offline: exibindo produtos padrão)");
    }

    for product in &catalog.products {
        let price = product
            .unit_price()
            .map(brl)
            .unwrap_or_else(|| "preço indisponível".to_string());
        println!("[{}] {} - {}", product.id, product.name, price);
        if !product.description.is_empty() {
            println!("    {}", product.description);
        }
    }
    Ok(())
}
