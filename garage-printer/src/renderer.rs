//! PDF renderer
//!
//! Draws a laid-out receipt onto an A4 page with printpdf. Pure: the
//! renderer takes a finished [`ReceiptDoc`] and returns bytes.

use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::doc::ReceiptDoc;
use crate::error::{PrintError, PrintResult};
use crate::layout;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;

/// Receipt PDF renderer
pub struct ReceiptPdfRenderer;

impl ReceiptPdfRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render a receipt document to PDF bytes
    pub fn render(&self, doc: &ReceiptDoc) -> PrintResult<Vec<u8>> {
        if doc.customer_name.trim().is_empty() {
            return Err(PrintError::InvalidDocument(
                "customer name must not be empty".into(),
            ));
        }

        let (pdf, page, layer) = PdfDocument::new(
            "Recibo",
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "recibo",
        );
        let font = pdf
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| PrintError::Render(e.to_string()))?;
        let layer = pdf.get_page(page).get_layer(layer);

        for stamp in layout::stamps(doc) {
            layer.use_text(stamp.text, stamp.size, Mm(stamp.x), Mm(stamp.y), &font);
        }

        pdf.save_to_bytes()
            .map_err(|e| PrintError::Render(e.to_string()))
    }
}

impl Default for ReceiptPdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::{ReceiptLine, ReceiptTemplate};

    fn doc() -> ReceiptDoc {
        ReceiptDoc {
            template: ReceiptTemplate::Expenses,
            receipt_number: Some(1),
            customer_name: "Ana Costa".into(),
            address: "Mitre 1430".into(),
            payment_label: "Transferencia".into(),
            date: "2026-08-01".into(),
            items: vec![ReceiptLine {
                quantity: 1,
                description: "Expensas Correspondientes".into(),
                unit_amount: 5000.0,
            }],
            total: 5000.0,
        }
    }

    #[test]
    fn renders_a_pdf() {
        let bytes = ReceiptPdfRenderer::new().render(&doc()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn empty_customer_name_is_rejected() {
        let mut d = doc();
        d.customer_name = "  ".into();
        assert!(matches!(
            ReceiptPdfRenderer::new().render(&d),
            Err(PrintError::InvalidDocument(_))
        ));
    }
}
