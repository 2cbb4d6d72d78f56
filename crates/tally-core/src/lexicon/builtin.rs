//! Built-in UK expense lexicon.

use super::{CategoryDefinition, Lexicon};

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

const CURRENCY_MARKERS: [&str; 6] = ["£", "$", "€", "GBP", "USD", "EUR"];

const TOTAL_KEYWORDS: [&str; 7] = [
    "total", "grand total", "amount due", "balance", "paid", "card", "subtotal",
];

pub(super) fn date_keywords() -> Vec<String> {
    ["date", "txn", "transaction", "issued", "invoice", "payment"]
        .into_iter()
        .map(String::from)
        .collect()
}

pub(super) fn unit_keywords() -> Vec<String> {
    ["qty", "each", "unit"].into_iter().map(String::from).collect()
}

fn categories() -> Vec<CategoryDefinition> {
    vec![
        CategoryDefinition::new(
            "Fuel",
            ["petrol", "diesel", "fuel", "unleaded", "litres", "forecourt", "pump"],
        )
        .with_vat_rate(20.0),
        CategoryDefinition::new(
            "Parking",
            ["parking", "car park", "pay and display", "toll", "congestion charge"],
        )
        .with_vat_rate(20.0),
        CategoryDefinition::new(
            "Travel",
            ["train", "rail", "railway", "bus", "taxi", "uber", "flight", "airline", "tube", "ticket"],
        )
        .with_vat_rate(0.0),
        CategoryDefinition::new(
            "Accommodation",
            ["hotel", "inn", "lodge", "room", "nights", "booking", "airbnb"],
        )
        .with_vat_rate(20.0),
        CategoryDefinition::new(
            "Meals",
            ["restaurant", "cafe", "coffee", "lunch", "dinner", "breakfast", "meal", "sandwich", "tea"],
        )
        .with_vat_rate(20.0),
        CategoryDefinition::new(
            "Office Supplies",
            ["stationery", "paper", "printer", "ink", "toner", "pens", "envelopes", "stapler"],
        )
        .with_vat_rate(20.0),
        CategoryDefinition::new(
            "Phone & Internet",
            ["phone", "mobile", "broadband", "internet", "sim", "top up", "airtime"],
        )
        .with_vat_rate(20.0),
        CategoryDefinition::new(
            "Software",
            ["software", "subscription", "licence", "license", "hosting", "domain", "cloud"],
        )
        .with_vat_rate(20.0),
        CategoryDefinition::new(
            "Equipment",
            ["laptop", "computer", "monitor", "keyboard", "hardware", "tools", "equipment"],
        )
        .with_vat_rate(20.0),
        CategoryDefinition::new(
            "Advertising",
            ["ad", "ads", "advert", "advertising", "marketing", "promotion", "flyers"],
        )
        .with_vat_rate(20.0),
        CategoryDefinition::new(
            "Postage",
            ["postage", "stamps", "royal mail", "courier", "parcel", "post office"],
        )
        .with_vat_rate(0.0),
        CategoryDefinition::new(
            "Training",
            ["course", "training", "workshop", "seminar", "conference", "book", "books"],
        )
        .with_vat_rate(0.0),
        CategoryDefinition::new(
            "Vehicle Repairs",
            ["mot", "tyre", "tyres", "garage", "repair", "bodywork", "exhaust"],
        )
        .with_vat_rate(20.0),
        CategoryDefinition::new(
            "Professional Fees",
            ["accountant", "accountancy", "solicitor", "legal", "consultancy", "bookkeeping"],
        )
        .with_vat_rate(20.0),
        CategoryDefinition::new("Other", Vec::<String>::new()),
    ]
}

pub(super) fn lexicon() -> Lexicon {
    Lexicon {
        months: MONTHS.into_iter().map(String::from).collect(),
        currency_markers: CURRENCY_MARKERS.into_iter().map(String::from).collect(),
        total_keywords: TOTAL_KEYWORDS.into_iter().map(String::from).collect(),
        date_keywords: date_keywords(),
        unit_keywords: unit_keywords(),
        categories: categories(),
    }
}
