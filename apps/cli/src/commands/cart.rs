//! Cart commands.

use storefront_checkout::CartStore;
use tracing::info;

use super::Page;
use crate::format::brl;

pub async fn add(page: &Page, id: u32) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = page.catalog()?.fetch().await;
    let product = catalog
        .find(id)
        .ok_or_else(|| format!("produto {id} não encontrado"))?;
    let item = product.to_item()?;

    let mut cart = page.cart().await?;
    cart.add(&item).await?;

    info!(item_id = id, "Added to cart");
    println!("{} adicionado ao carrinho!", item.name);
    print_totals(&cart);
    Ok(())
}

pub async fn remove(page: &Page, id: u32) -> Result<(), Box<dyn std::error::Error>> {
    let mut cart = page.cart().await?;

    if cart.remove(id).await? {
        println!("Produto {id} removido do carrinho.");
    } else {
        println!("Produto {id} não está no carrinho.");
    }
    print_totals(&cart);
    Ok(())
}

pub async fn set_quantity(
    page: &Page,
    id: u32,
    delta: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut cart = page.cart().await?;
    cart.set_quantity(id, delta).await?;
    show_cart(&cart);
    Ok(())
}

pub async fn show(page: &Page) -> Result<(), Box<dyn std::error::Error>> {
    let cart = page.cart().await?;
    show_cart(&cart);
    Ok(())
}

pub async fn clear(page: &Page) -> Result<(), Box<dyn std::error::Error>> {
    let mut cart = page.cart().await?;
    cart.clear().await?;
    println!("Carrinho esvaziado.");
    Ok(())
}

fn show_cart(cart: &CartStore) {
    if cart.items().is_empty() {
        println!("Seu carrinho está vazio.");
        return;
    }

    for item in cart.items() {
        println!(
            "[{}] {} x{} - {} (un. {})",
            item.id,
            item.name,
            item.quantity,
            brl(item.line_total()),
            brl(item.unit_price)
        );
    }
    print_totals(cart);
}

fn print_totals(cart: &CartStore) {
    let totals = cart.totals();
    println!("Itens: {} | Total: {}", totals.count, brl(totals.amount));
}
