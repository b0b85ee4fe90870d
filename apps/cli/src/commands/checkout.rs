//! Checkout steps.

use storefront_checkout::CheckoutSession;
use storefront_core::validation::parse_distance_km;
use storefront_core::{FreightQuote, PricingSource};

use super::Page;
use crate::format::{brl, km};

pub async fn begin(page: &Page) -> Result<(), Box<dyn std::error::Error>> {
    let cart = page.cart().await?;
    let mut session = page.new_checkout()?;

    let state = session.begin(&cart).await?;

    println!("Subtotal: {}", brl(state.subtotal));
    println!("Frete (mínimo): {}", brl(state.freight_cost));
    println!("Total: {}", brl(state.total()));
    println!("Informe o CEP ou a cidade: storefront checkout freight <consulta>");
    Ok(())
}

pub async fn freight(page: &Page, query: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = page.checkout().await?;
    let quote = session.recalculate(query).await?;
    print_quote(page, &session, &quote);
    Ok(())
}

pub async fn distance(page: &Page, input: &str) -> Result<(), Box<dyn std::error::Error>> {
    let distance_km = parse_distance_km(input)?;
    let mut session = page.checkout().await?;
    let quote = session.quote_distance(distance_km).await?;
    print_quote(page, &session, &quote);
    Ok(())
}

pub async fn show(page: &Page) -> Result<(), Box<dyn std::error::Error>> {
    let session = page.checkout().await?;

    println!("Etapa: {}", session.phase());
    let Some(state) = session.state() else {
        println!("Nenhum checkout em andamento.");
        return Ok(());
    };

    println!("Subtotal: {}", brl(state.subtotal));
    match state.distance_km {
        Some(d) => println!("Frete: {} ({})", brl(state.freight_cost), km(d)),
        None => println!("Frete (mínimo): {}", brl(state.freight_cost)),
    }
    println!("Total: {}", brl(state.total()));
    Ok(())
}

pub async fn finalize(page: &Page) -> Result<(), Box<dyn std::error::Error>> {
    let mut cart = page.cart().await?;
    let mut session = page.checkout().await?;

    let receipt = session.finalize(&mut cart).await?;

    println!("Pedido finalizado com sucesso!");
    println!("Pedido: {}", receipt.order_id);
    println!("Subtotal: {}", brl(receipt.subtotal));
    println!(
        "Frete: {} ({})",
        brl(receipt.freight_cost),
        km(receipt.distance_km)
    );
    println!("Total: {}", brl(receipt.total));
    Ok(())
}

fn print_quote(page: &Page, session: &CheckoutSession, quote: &FreightQuote) {
    if quote.pricing_source == PricingSource::Local && page.config.pricing.service_url.is_some() {
        println!("(serviço de frete indisponível: valor calculado localmente)");
    }

    println!("Destino: {} ({})", quote.source_label, km(quote.distance_km));
    println!("Frete: {}", brl(quote.cost));
    if let Some(total) = session.total() {
        println!("Total: {}", brl(total));
    }
}
