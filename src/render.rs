//! Plain-text rendering for the terminal.

use crate::catalog::{DashboardStats, GuideStats, HomeView};
use crate::models::{Building, Guide, User};
use crate::panel::{Toast, ToastKind};

/// Rupees with Indian digit grouping and no paise: `₹1,23,45,678`.
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };
    format!("{}₹{}", sign, grouped)
}

pub fn toast_line(toast: &Toast) -> String {
    match toast.kind {
        ToastKind::Success => format!("✅ {}", toast.message),
        ToastKind::Error => format!("❌ {}", toast.message),
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn id_cell(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Left-aligned columns sized to their widest cell.
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let pad = width.saturating_sub(cell.chars().count());
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(headers.to_vec())];
    out.extend(
        rows.iter()
            .map(|row| line(row.iter().map(String::as_str).collect())),
    );
    out.join("\n")
}

pub fn buildings_table(buildings: &[&Building]) -> String {
    let rows: Vec<Vec<String>> = buildings
        .iter()
        .map(|b| {
            vec![
                id_cell(b.id),
                b.name.clone(),
                b.city.clone(),
                b.kind.to_string(),
                format_inr(b.price),
                b.bedrooms.to_string(),
                b.bathrooms.to_string(),
                b.area_sqft.to_string(),
                b.availability.to_string(),
                yes_no(b.featured).to_string(),
            ]
        })
        .collect();
    table(
        &[
            "ID", "NAME", "CITY", "TYPE", "PRICE", "BEDS", "BATHS", "SQFT", "STATUS", "FEATURED",
        ],
        &rows,
    )
}

pub fn guides_table(guides: &[&Guide]) -> String {
    let rows: Vec<Vec<String>> = guides
        .iter()
        .map(|g| {
            vec![
                id_cell(g.id),
                g.name.clone(),
                g.specialization.clone(),
                format!("{}, {}", g.city, g.state),
                format!("{} yrs", g.experience_years),
                format!("{:.1}", g.rating),
                yes_no(g.available).to_string(),
            ]
        })
        .collect();
    table(
        &["ID", "NAME", "SPECIALIZATION", "LOCATION", "EXPERIENCE", "RATING", "AVAILABLE"],
        &rows,
    )
}

pub fn users_table(users: &[&User]) -> String {
    let rows: Vec<Vec<String>> = users
        .iter()
        .map(|u| vec![u.username.clone(), u.email.clone(), u.phone.clone()])
        .collect();
    table(&["USERNAME", "EMAIL", "PHONE"], &rows)
}

/// Detail view of one listing.
pub fn building_card(building: &Building, guide: Option<&Guide>) -> String {
    let mut lines = vec![
        format!(
            "{}{}",
            building.name,
            if building.featured { "  ★ featured" } else { "" }
        ),
        format!(
            "   {}, {}, {} {}",
            building.address, building.city, building.state, building.zip_code
        ),
        format!(
            "   {}  ·  {}  ·  {}",
            format_inr(building.price),
            building.kind,
            building.availability
        ),
        format!(
            "   {} bed, {} bath, {} sqft",
            building.bedrooms, building.bathrooms, building.area_sqft
        ),
    ];
    if let Some(guide) = guide {
        lines.push(format!("   Guide: {} ({}, {})", guide.name, guide.phone, guide.email));
    }
    if !building.image.is_empty() {
        lines.push(format!("   Image: {}", building.image));
    }
    lines.join("\n")
}

pub fn guide_stats(stats: &GuideStats) -> String {
    format!(
        "{} guides  ·  avg {} yrs experience  ·  avg rating {:.1}",
        stats.count, stats.average_experience, stats.average_rating
    )
}

pub fn dashboard(stats: &DashboardStats) -> String {
    table(
        &["USERS", "GUIDES", "PROPERTIES", "TOTAL VALUE"],
        &[vec![
            stats.users.to_string(),
            stats.guides.to_string(),
            stats.properties.to_string(),
            stats.total_value_label(),
        ]],
    )
}

pub fn home(view: &HomeView<'_>) -> String {
    let mut out = String::new();
    if !view.featured.is_empty() {
        out.push_str("Featured\n");
        out.push_str(&buildings_table(&view.featured));
        out.push_str("\n\n");
    }
    out.push_str("Latest listings\n");
    let listings: Vec<&Building> = view.listings.iter().collect();
    out.push_str(&buildings_table(&listings));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BuildingType;

    #[test]
    fn test_inr_uses_indian_grouping() {
        assert_eq!(format_inr(0.0), "₹0");
        assert_eq!(format_inr(999.0), "₹999");
        assert_eq!(format_inr(1000.0), "₹1,000");
        assert_eq!(format_inr(100000.0), "₹1,00,000");
        assert_eq!(format_inr(12345678.0), "₹1,23,45,678");
        assert_eq!(format_inr(4500000.49), "₹45,00,000");
        assert_eq!(format_inr(-250000.0), "-₹2,50,000");
    }

    #[test]
    fn test_table_aligns_columns() {
        let oak = Building {
            id: Some(1),
            name: "Oak Villa".into(),
            city: "Pune".into(),
            kind: BuildingType::House,
            price: 12_000_000.0,
            ..Default::default()
        };
        let rendered = buildings_table(&[&oak]);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ID  NAME"));
        assert!(lines[1].contains("₹1,20,00,000"));
        assert_eq!(lines[0].find("NAME"), lines[1].find("Oak Villa"));
    }

    #[test]
    fn test_card_mentions_guide() {
        let listing = Building {
            name: "Lake Condo".into(),
            featured: true,
            ..Default::default()
        };
        let guide = Guide {
            name: "Meera".into(),
            ..Default::default()
        };
        let card = building_card(&listing, Some(&guide));
        assert!(card.starts_with("Lake Condo  ★ featured"));
        assert!(card.contains("Guide: Meera"));
    }
}
