//! Plain-text rendering of listings, detail pages and the favourites sidebar.

use crate::config::{AssetBase, PriceSlider};
use crate::detail::{DetailState, DetailTab, DetailView};
use crate::favourites::FavouritesStore;
use crate::models::{Price, PropertyRecord};
use chrono::NaiveDate;
use std::fmt::Write;

/// `1250000` -> `1,250,000`
pub fn group_thousands(amount: u64) -> String {
    group_digits(&amount.to_string())
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// `LKR 1,250.5`: the whole part is grouped, any fraction is kept as is
pub fn format_price(currency: &str, amount: Price) -> String {
    let text = amount.to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };

    match fraction {
        Some(fraction) => format!("{} {}.{}", currency, group_digits(whole), fraction),
        None => format!("{} {}", currency, group_digits(whole)),
    }
}

/// `12 October 2022`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

/// Renders views with the session's currency and asset prefix
#[derive(Debug, Clone)]
pub struct Renderer {
    pub currency: String,
    pub asset_base: AssetBase,
}

impl Renderer {
    pub fn new(currency: impl Into<String>, asset_base: AssetBase) -> Self {
        Self {
            currency: currency.into(),
            asset_base,
        }
    }

    pub fn price(&self, amount: Price) -> String {
        format_price(&self.currency, amount)
    }

    /// One result card on the listing page
    pub fn card(&self, position: usize, record: &PropertyRecord) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}. {} - {}",
            position,
            record.property_type,
            self.price(record.price)
        );
        let _ = writeln!(out, "   {}", record.location);
        let _ = writeln!(
            out,
            "   {} Bedrooms · added {}",
            record.bedrooms,
            format_date(record.date_added)
        );
        let _ = writeln!(out, "   Picture: {}", self.asset_base.resolve(&record.picture));
        let _ = write!(out, "   ID: {}", record.id);
        out
    }

    pub fn listing(&self, records: &[impl AsRef<PropertyRecord>]) -> String {
        if records.is_empty() {
            return "No properties found".to_string();
        }

        let mut out = format!("{} properties\n\n", records.len());
        for (i, record) in records.iter().enumerate() {
            out.push_str(&self.card(i + 1, record.as_ref()));
            out.push_str("\n\n");
        }
        out.truncate(out.trim_end().len());
        out
    }

    pub fn detail(&self, state: &DetailState) -> String {
        match state {
            DetailState::Found(view) => self.detail_view(view),
            DetailState::NotFound(_) => "Property not found".to_string(),
        }
    }

    fn detail_view(&self, view: &DetailView) -> String {
        let record = view.record();
        let mut out = String::new();

        let _ = writeln!(out, "{} in {}", record.property_type, record.location);
        let _ = writeln!(out, "{}", self.price(record.price));
        if let Some(tenure) = &record.tenure {
            let _ = writeln!(out, "Tenure: {}", tenure);
        }
        let _ = writeln!(out, "Added: {}", format_date(record.date_added));
        let _ = writeln!(out);

        let _ = writeln!(out, "Preview: {}", self.asset_base.resolve(view.main_image()));
        for (i, image) in view.thumbnails().iter().enumerate() {
            let marker = if image == view.main_image() { '*' } else { ' ' };
            let _ = writeln!(out, " {}[{}] {}", marker, i + 1, self.asset_base.resolve(image));
        }
        let _ = writeln!(out);

        let tabs: Vec<String> = DetailTab::ALL
            .iter()
            .map(|tab| {
                if *tab == view.tab() {
                    format!("[{}]", tab.label())
                } else {
                    tab.label().to_string()
                }
            })
            .collect();
        let _ = writeln!(out, "{}", tabs.join(" | "));

        match view.tab() {
            DetailTab::Description => {
                let _ = write!(out, "{}", record.description);
            }
            DetailTab::FloorPlan => {
                let _ = write!(out, "Floor Plan Image");
            }
            DetailTab::Map => {
                let _ = write!(out, "{}", view.map_embed_url());
            }
        }

        out
    }

    /// The favourites sidebar with its running total
    pub fn favourites(&self, store: &FavouritesStore) -> String {
        if store.is_empty() {
            return "Favourites: none yet".to_string();
        }

        let mut out = format!("Favourites ({})\n", store.len());
        for record in store.iter() {
            let _ = writeln!(
                out,
                " - {} {} in {} ({})",
                record.id,
                record.property_type,
                record.location,
                self.price(record.price)
            );
        }
        let _ = write!(out, "Total: {}", self.price(store.total_price()));
        out
    }

    pub fn slider(&self, slider: &PriceSlider) -> String {
        format!(
            "Price range: {} - {} (step {}, default {} - {})",
            self.price(Price::from(slider.min)),
            self.price(Price::from(slider.max)),
            group_thousands(slider.step),
            group_thousands(slider.default_min),
            group_thousands(slider.default_max),
        )
    }
}
