// Comparison view over aggregated route prices

use std::fmt::{self, Write};

use chrono::NaiveDateTime;

use crate::models::{LegRequest, LegResult, RouteOption, RouteResult};

pub struct BookingLink {
    pub label: &'static str,
    pub url: &'static str,
}

// Static outbound links shown under every route
pub const BOOKING_LINKS: [BookingLink; 2] = [
    BookingLink {
        label: "Google Flights",
        url: "https://www.google.com/travel/flights",
    },
    BookingLink {
        label: "Skyscanner",
        url: "https://www.skyscanner.com.br",
    },
];

// The fixed candidate routes the comparison submits.
pub fn default_routes() -> Vec<RouteOption> {
    fn leg(from: &str, to: &str, date: &str) -> LegRequest {
        LegRequest {
            from: from.to_string(),
            to: to.to_string(),
            date: date.to_string(),
        }
    }

    vec![
        RouteOption {
            name: "Bolivia Primeiro".to_string(),
            legs: vec![
                leg("GRU", "VVI", "2026-02-15"),
                leg("VVI", "LPB", "2026-02-20"),
                leg("LPB", "CUZ", "2026-02-25"),
                leg("CUZ", "GRU", "2026-03-05"),
            ],
        },
        RouteOption {
            name: "Peru Primeiro".to_string(),
            legs: vec![
                leg("GRU", "LIM", "2026-02-15"),
                leg("LIM", "CUZ", "2026-02-20"),
                leg("CUZ", "LPB", "2026-02-25"),
                leg("LPB", "GRU", "2026-03-05"),
            ],
        },
    ]
}

// The route with the lowest total. Ties go to the route listed first.
pub fn cheapest(results: &[RouteResult]) -> Option<&RouteResult> {
    results
        .iter()
        .reduce(|best, next| if next.total_price < best.total_price { next } else { best })
}

pub fn format_price(amount: f64, currency: &str) -> String {
    format!("{currency} {amount:.2}")
}

// ISO local date-times are shortened to minutes; anything else is shown as sent
fn format_timestamp(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn render_leg(out: &mut impl Write, leg: &LegResult, currency: &str) -> fmt::Result {
    writeln!(
        out,
        "    {} → {}  {}",
        leg.from,
        leg.to,
        format_price(leg.price, currency)
    )?;
    write!(
        out,
        "      {} • {} - {}",
        leg.airline,
        format_timestamp(&leg.departure),
        format_timestamp(&leg.arrival)
    )?;
    if leg.stops > 0 {
        write!(out, " • {} stop(s)", leg.stops)?;
    }
    writeln!(out)
}

// Writes the comparison report: the recommended route first, then every
// route with its legs and booking links.
pub fn write_comparison(out: &mut impl Write, results: &[RouteResult]) -> fmt::Result {
    let Some(best) = cheapest(results) else {
        return writeln!(out, "No routes to compare.");
    };

    writeln!(out, "Best option: {}", best.route)?;
    writeln!(out, "  {}", format_price(best.total_price, &best.currency))?;
    writeln!(out)?;

    let links = BOOKING_LINKS
        .iter()
        .map(|link| format!("{}: {}", link.label, link.url))
        .collect::<Vec<_>>()
        .join(" | ");

    for result in results {
        let marker = if std::ptr::eq(result, best) { "*" } else { " " };
        writeln!(
            out,
            "{marker} {}  {}",
            result.route,
            format_price(result.total_price, &result.currency)
        )?;
        for leg in &result.legs {
            render_leg(out, leg, &result.currency)?;
        }
        writeln!(out, "    {links}")?;
        writeln!(out)?;
    }

    Ok(())
}

// The comparison report as a `Display` value
pub struct ComparisonReport<'a>(pub &'a [RouteResult]);

impl fmt::Display for ComparisonReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_comparison(f, self.0)
    }
}

pub fn render_comparison(results: &[RouteResult]) -> String {
    ComparisonReport(results).to_string()
}
