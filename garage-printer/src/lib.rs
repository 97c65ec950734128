//! # garage-printer
//!
//! Print-ready receipt rendering - low-level document drawing only.
//!
//! ## Scope
//!
//! This crate handles HOW to render:
//! - Receipt document model ([`ReceiptDoc`])
//! - Fixed two-copy layout (ORIGINAL / DUPLICADO stamp coordinates)
//! - PDF emission (printpdf)
//!
//! Business logic (WHAT to render) stays in application code:
//! - Resolving the customer's pending receipt → garage-server
//! - Registering the payment → garage-server
//!
//! Rendering is pure: it never talks to the database and never mutates a
//! receipt. The caller resolves the amount first and hands over a finished
//! document.
//!
//! ## Example
//!
//! ```ignore
//! use garage_printer::{ReceiptDoc, ReceiptLine, ReceiptTemplate, ReceiptPdfRenderer};
//!
//! let doc = ReceiptDoc {
//!     template: ReceiptTemplate::Rental,
//!     receipt_number: Some(1041),
//!     customer_name: "Ana Costa".into(),
//!     address: "Mitre 1430".into(),
//!     payment_label: "Efectivo".into(),
//!     date: "2026-08-29".into(),
//!     items: vec![ReceiptLine {
//!         quantity: 1,
//!         description: "Cochera Auto".into(),
//!         unit_amount: 5000.0,
//!     }],
//!     total: 5000.0,
//! };
//!
//! let pdf_bytes = ReceiptPdfRenderer::new().render(&doc)?;
//! ```

mod doc;
mod error;
mod layout;
mod renderer;

// Re-exports
pub use doc::{ReceiptDoc, ReceiptLine, ReceiptTemplate, format_amount};
pub use error::{PrintError, PrintResult};
pub use layout::{CopyRegion, Stamp, stamps};
pub use renderer::ReceiptPdfRenderer;
