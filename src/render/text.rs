//! Tab-separated text rendering for rate sheets.

use std::fmt::Write;

use crate::error::{Error, Result};
use crate::model::{RateSheet, ServiceRates, ZoneDatasetRow, MAX_ZONE, MIN_ZONE};

const ZONE_COLUMNS: [&str; 6] = [
    "Country Name",
    "Country Symbol",
    "Zone",
    "City",
    "Start Postal Code",
    "End Postal Code",
];

/// Convert a rate sheet to tab-separated text blocks.
///
/// The zone dataset comes first when present, then one block per service
/// with a row per stored weight and a column per distance zone.
pub fn to_text(sheet: &RateSheet) -> Result<String> {
    let mut output = String::new();

    if let Some(zones) = &sheet.zones {
        write_zones(&mut output, zones).map_err(render_error)?;
    }

    for service in &sheet.services {
        if !output.is_empty() {
            output.push('\n');
        }
        write_service(&mut output, service).map_err(render_error)?;
    }

    Ok(output)
}

/// Render just the zone dataset block.
pub fn zones_to_text(zones: &[ZoneDatasetRow]) -> Result<String> {
    let mut output = String::new();
    write_zones(&mut output, zones).map_err(render_error)?;
    Ok(output)
}

fn write_zones(out: &mut String, zones: &[ZoneDatasetRow]) -> std::fmt::Result {
    writeln!(out, "Zones")?;
    writeln!(out, "{}", ZONE_COLUMNS.join("\t"))?;
    for row in zones {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}",
            row.country_name,
            row.country_symbol,
            row.zone,
            row.city,
            row.start_postal_code,
            row.end_postal_code
        )?;
    }
    Ok(())
}

fn write_service(out: &mut String, service: &ServiceRates) -> std::fmt::Result {
    writeln!(out, "{}", service.name)?;

    write!(out, "Weight (lb)")?;
    for zone in MIN_ZONE..=MAX_ZONE {
        write!(out, "\tZone {}", zone)?;
    }
    writeln!(out)?;

    for (weight, zones) in service.rates.iter() {
        write!(out, "{}", weight)?;
        for zone in MIN_ZONE..=MAX_ZONE {
            match zones.get(&zone) {
                Some(amount) => write!(out, "\t{}", amount)?,
                None => out.push('\t'),
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

fn render_error(err: std::fmt::Error) -> Error {
    Error::Render(format!("text formatting error: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PageSpan, RateStructure, RateTable};
    use rust_decimal_macros::dec;

    #[test]
    fn test_service_block() {
        let mut rates = RateTable::new();
        rates.insert(2, 1, dec!(11.00));
        rates.insert(1, 1, dec!(10.00));
        rates.insert(1, 16, dec!(99.99));

        let mut sheet = RateSheet::default();
        sheet.services.push(ServiceRates::new(
            "FedEx Economy",
            RateStructure::Flat,
            PageSpan::new(0, 3),
            rates,
        ));

        let text = to_text(&sheet).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "FedEx Economy");
        assert!(lines[1].starts_with("Weight (lb)\tZone 1\tZone 2"));
        assert!(lines[1].ends_with("\tZone 16"));
        assert_eq!(lines[2], format!("1\t10.00{}\t99.99", "\t".repeat(14)));
        assert_eq!(lines[3].split('\t').count(), 17);
        assert!(lines[3].starts_with("2\t11.00\t"));
    }

    #[test]
    fn test_zones_block() {
        let rows = vec![ZoneDatasetRow {
            country_name: "Canada".to_string(),
            country_symbol: "CA".to_string(),
            zone: 5,
            city: String::new(),
            start_postal_code: "M5W".to_string(),
            end_postal_code: "M5Z".to_string(),
        }];
        let text = zones_to_text(&rows).unwrap();

        assert_eq!(
            text,
            "Zones\n\
             Country Name\tCountry Symbol\tZone\tCity\tStart Postal Code\tEnd Postal Code\n\
             Canada\tCA\t5\t\tM5W\tM5Z\n"
        );
    }

    #[test]
    fn test_empty_sheet() {
        assert_eq!(to_text(&RateSheet::default()).unwrap(), "");
    }
}
