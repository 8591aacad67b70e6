use pricing_core::round::money;
use pricing_core::stats;
use pricing_core::{Category, Sku};
use rand::Rng;

const NAMES: [&str; 16] = [
    "Organic Apples",
    "Whole Milk",
    "Laptop Stand",
    "Winter Boots",
    "Cheddar Cheese",
    "Pasta",
    "USB Hub",
    "Summer Dress",
    "Greek Yogurt",
    "Olive Oil",
    "Wireless Mouse",
    "Spring Jacket",
    "Orange Juice",
    "Bread",
    "Monitor",
    "Holiday Wreath",
];

fn depreciation_for(category: Category) -> f64 {
    match category {
        Category::Electronics => 0.5,
        Category::Seasonal => 2.0,
        Category::Perishable | Category::NonPerishable => 0.0,
    }
}

/// Demo inventory of sixteen products, categories cycling in
/// [`Category::ALL`] order. Ids run from `PROD-1000`.
pub fn sample_inventory<R: Rng + ?Sized>(rng: &mut R) -> Vec<Sku> {
    NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let category = Category::ALL[i % Category::ALL.len()];
            let quantity = rng.gen_range(10..510);
            let base_price = money(stats::uniform(rng, 5.0, 55.0));
            let holding_cost = money(stats::uniform(rng, 0.5, 2.5));
            let demand_index = money(stats::uniform(rng, 0.5, 2.5));
            let days = rng.gen_range(5..35);
            Sku {
                id: format!("PROD-{}", 1000 + i),
                name: Some((*name).to_string()),
                category,
                quantity,
                base_price,
                holding_cost,
                depreciation_rate: depreciation_for(category),
                demand_index,
                days_to_expiry: (category == Category::Perishable).then_some(days),
            }
        })
        .collect()
}
