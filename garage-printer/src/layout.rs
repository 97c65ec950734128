//! Fixed two-copy layout
//!
//! The paper template is an A4 sheet with two identical copy regions:
//! ORIGINAL in the upper half, DUPLICADO in the lower half. Every field is
//! stamped once per region at fixed millimetre coordinates. The layout
//! produces a flat stamp list so the drawing backend (and the tests) never
//! need to know about regions.

use crate::doc::{ReceiptDoc, format_amount};

/// Copy region of the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyRegion {
    Original,
    Duplicado,
}

impl CopyRegion {
    /// Watermark text of the region
    pub fn label(&self) -> &'static str {
        match self {
            CopyRegion::Original => "ORIGINAL",
            CopyRegion::Duplicado => "DUPLICADO",
        }
    }

    /// Top edge of the region, in mm from the page bottom
    fn base_y(&self) -> f32 {
        match self {
            CopyRegion::Original => 280.0,
            CopyRegion::Duplicado => 135.0,
        }
    }
}

/// One piece of text at a fixed position
#[derive(Debug, Clone, PartialEq)]
pub struct Stamp {
    pub region: CopyRegion,
    pub text: String,
    /// mm from the left edge
    pub x: f32,
    /// mm from the page bottom
    pub y: f32,
    /// Font size in points
    pub size: f32,
}

// Column positions (mm from the left edge)
const COL_LABEL: f32 = 20.0;
const COL_VALUE: f32 = 58.0;
const COL_QTY: f32 = 20.0;
const COL_DESC: f32 = 32.0;
const COL_UNIT: f32 = 130.0;
const COL_TOTAL: f32 = 165.0;

const LINE_HEIGHT: f32 = 6.0;

/// Lay out a document: every field stamped at both copy regions.
pub fn stamps(doc: &ReceiptDoc) -> Vec<Stamp> {
    let mut out = Vec::new();
    for region in [CopyRegion::Original, CopyRegion::Duplicado] {
        stamp_region(doc, region, &mut out);
    }
    out
}

fn stamp_region(doc: &ReceiptDoc, region: CopyRegion, out: &mut Vec<Stamp>) {
    let base = region.base_y();
    let mut put = |text: String, x: f32, dy: f32, size: f32| {
        out.push(Stamp {
            region,
            text,
            x,
            y: base - dy,
            size,
        });
    };

    // Header
    put(doc.template.title().to_string(), COL_LABEL, 0.0, 14.0);
    put(region.label().to_string(), COL_TOTAL, 0.0, 10.0);
    let number = doc
        .receipt_number
        .map(|n| format!("N° {:08}", n))
        .unwrap_or_else(|| "N° --------".to_string());
    put(number, COL_TOTAL, LINE_HEIGHT, 10.0);

    // Customer block
    put(format!("Señor/es: {}", doc.customer_name), COL_LABEL, 14.0, 10.0);
    put(format!("Domicilio: {}", doc.address), COL_LABEL, 20.0, 10.0);
    put(format!("Fecha: {}", doc.date), COL_UNIT, 14.0, 10.0);
    put(
        format!("Forma de pago: {}", doc.payment_label),
        COL_UNIT,
        20.0,
        10.0,
    );

    // Line items: one row per spot. The total column repeats the overall
    // amount due on every row (single combined invoice).
    let mut dy = 32.0;
    for item in &doc.items {
        put(item.quantity.to_string(), COL_QTY, dy, 10.0);
        put(item.description.clone(), COL_DESC, dy, 10.0);
        put(format_amount(item.unit_amount), COL_UNIT, dy, 10.0);
        put(format_amount(doc.total), COL_TOTAL, dy, 10.0);
        dy += LINE_HEIGHT;
    }

    // Total
    put("TOTAL".to_string(), COL_UNIT, dy + LINE_HEIGHT, 12.0);
    put(format_amount(doc.total), COL_TOTAL, dy + LINE_HEIGHT, 12.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::{ReceiptLine, ReceiptTemplate};

    fn two_spot_doc() -> ReceiptDoc {
        ReceiptDoc {
            template: ReceiptTemplate::Rental,
            receipt_number: Some(17),
            customer_name: "Ana Costa".into(),
            address: "Mitre 1430".into(),
            payment_label: "Efectivo".into(),
            date: "2026-08-01".into(),
            items: vec![
                ReceiptLine {
                    quantity: 1,
                    description: "Cochera Auto".into(),
                    unit_amount: 3000.0,
                },
                ReceiptLine {
                    quantity: 1,
                    description: "Alquiler Correspondiente".into(),
                    unit_amount: 2000.0,
                },
            ],
            total: 5000.0,
        }
    }

    #[test]
    fn every_field_is_stamped_in_both_regions() {
        let stamps = stamps(&two_spot_doc());
        let originals = stamps
            .iter()
            .filter(|s| s.region == CopyRegion::Original)
            .count();
        let duplicates = stamps
            .iter()
            .filter(|s| s.region == CopyRegion::Duplicado)
            .count();
        assert_eq!(originals, duplicates);
        assert!(stamps.iter().any(|s| s.text == "ORIGINAL"));
        assert!(stamps.iter().any(|s| s.text == "DUPLICADO"));
    }

    #[test]
    fn two_spots_produce_two_line_items_per_region() {
        let stamps = stamps(&two_spot_doc());
        let descriptions = |region| {
            stamps
                .iter()
                .filter(|s| s.region == region)
                .filter(|s| s.text == "Cochera Auto" || s.text == "Alquiler Correspondiente")
                .count()
        };
        assert_eq!(descriptions(CopyRegion::Original), 2);
        assert_eq!(descriptions(CopyRegion::Duplicado), 2);
    }

    #[test]
    fn total_reads_5000_in_both_regions() {
        let stamps = stamps(&two_spot_doc());
        for region in [CopyRegion::Original, CopyRegion::Duplicado] {
            let totals = stamps
                .iter()
                .filter(|s| s.region == region && s.text == "$5000")
                .count();
            // Two line-item total columns + the TOTAL row
            assert_eq!(totals, 3);
        }
    }

    #[test]
    fn line_total_column_repeats_overall_amount_not_subtotal() {
        let stamps = stamps(&two_spot_doc());
        // Unit amounts appear, but no per-line subtotal is ever computed:
        // the total column shows $5000 even on the $3000 spot's row.
        assert!(stamps.iter().any(|s| s.text == "$3000"));
        assert!(stamps.iter().any(|s| s.text == "$2000"));
        assert!(!stamps.iter().any(|s| s.text == "$3000.00"));
    }

    #[test]
    fn missing_receipt_number_prints_placeholder() {
        let mut doc = two_spot_doc();
        doc.receipt_number = None;
        let stamps = stamps(&doc);
        assert!(stamps.iter().any(|s| s.text == "N° --------"));
    }
}
