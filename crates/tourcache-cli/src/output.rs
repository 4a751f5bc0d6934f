//! Terminal rendering for tours and cache statistics.

use std::io::Write;

use anyhow::Result;
use serde_json::json;

use tourcache_core::utils::truncate_string;
use tourcache_core::{Config, RowDiagnostic, TourRecord, TourStats};

const NAME_WIDTH: usize = 32;
const PRICE_WIDTH: usize = 10;
const PHONE_WIDTH: usize = 16;

pub fn print_usage<W: Write>(out: &mut W, usage: &str) -> Result<()> {
    writeln!(out, "{}", usage)?;
    Ok(())
}

pub struct Printer<'a> {
    json: bool,
    name_field: &'a str,
    phone_field: &'a str,
}

impl<'a> Printer<'a> {
    pub fn new(config: &'a Config, json: bool) -> Self {
        Self {
            json,
            name_field: &config.name_field,
            phone_field: &config.phone_field,
        }
    }

    pub fn tours<W: Write>(&self, out: &mut W, tours: &[TourRecord]) -> Result<()> {
        if self.json {
            let body = json!({ "count": tours.len(), "tours": tours });
            writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
            return Ok(());
        }

        writeln!(
            out,
            "{:>4}  {:<nw$}  {:<pw$}  {:<phw$}",
            "#",
            "Name",
            "Price",
            "Phone",
            nw = NAME_WIDTH,
            pw = PRICE_WIDTH,
            phw = PHONE_WIDTH
        )?;
        for tour in tours {
            writeln!(
                out,
                "{:>4}  {:<nw$}  {:<pw$}  {:<phw$}",
                tour.id,
                truncate_string(tour.get_or(self.name_field, "-"), NAME_WIDTH),
                truncate_string(tour.get_or("Price", "-"), PRICE_WIDTH),
                truncate_string(tour.get_or(self.phone_field, "-"), PHONE_WIDTH),
                nw = NAME_WIDTH,
                pw = PRICE_WIDTH,
                phw = PHONE_WIDTH
            )?;
        }
        writeln!(out, "{} tours", tours.len())?;
        Ok(())
    }

    pub fn search<W: Write>(&self, out: &mut W, query: &str, tours: &[TourRecord]) -> Result<()> {
        if self.json {
            let body = json!({ "query": query, "count": tours.len(), "tours": tours });
            writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
            return Ok(());
        }

        if !query.trim().is_empty() {
            writeln!(out, "Results for {:?}:", query)?;
        }
        self.tours(out, tours)
    }

    pub fn tour<W: Write>(&self, out: &mut W, tour: &TourRecord) -> Result<()> {
        if self.json {
            writeln!(out, "{}", serde_json::to_string_pretty(&json!({ "tour": tour }))?)?;
            return Ok(());
        }

        let width = tour.fields().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
        writeln!(out, "{:<width$}  {}", "#", tour.id, width = width)?;
        for (key, value) in tour.fields() {
            writeln!(out, "{:<width$}  {}", key, value, width = width)?;
        }
        Ok(())
    }

    pub fn stats<W: Write>(
        &self,
        out: &mut W,
        stats: &TourStats,
        diagnostics: &[RowDiagnostic],
    ) -> Result<()> {
        if self.json {
            let body = json!({ "stats": stats, "skippedRows": diagnostics });
            writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
            return Ok(());
        }

        writeln!(out, "Tours:        {}", stats.total_records)?;
        writeln!(out, "Cache:        {}", stats.cache_status)?;
        writeln!(out, "Cache age:    {} ms", stats.cache_age_millis)?;
        if let Some(updated) = stats.last_updated {
            writeln!(out, "Last fetched: {}", updated.format("%Y-%m-%d %H:%M:%S UTC"))?;
        }
        if !diagnostics.is_empty() {
            writeln!(out, "Skipped rows:")?;
            for diagnostic in diagnostics {
                writeln!(out, "  {}", diagnostic)?;
            }
        }
        Ok(())
    }
}
