use blago_core::prelude::*;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // Resolved once; override with BLAGO_API_BASE_URL.
    let base_url = resolve_base_url(&SystemEnv);
    println!("base url: {base_url}");

    let client = ApiClient::new(base_url).with_debug_level(DebugLevel::V);

    let cities = client.cities().await?;
    println!("GET /common/cities => {} cities", cities.len());

    let levels = client.education_levels().await?;
    println!("GET /common/education => {} levels", levels.len());

    let query = FundsQuery::new().city("Moscow").page(1).page_size(10);
    let funds = client.list_funds(&query).await?;
    println!(
        "GET /funds?city=Moscow&page=1&page_size=10 => {} of {} funds",
        funds.items.len(),
        funds.total
    );

    if let Some(fund) = funds.items.first() {
        let donate = client.fund_donate_url(&fund.slug).await?;
        println!("GET /funds/{}/donate-url => {}", fund.slug, donate.donate_url);
    }

    Ok(())
}
