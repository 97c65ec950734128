//! Print document builder
//!
//! Pure assembly of a [`ReceiptDoc`] from a customer, their spots and the
//! current pending receipt. Rendering itself lives in `garage-printer`.

use std::collections::HashMap;

use garage_printer::{ReceiptDoc, ReceiptLine, ReceiptTemplate};
use shared::models::{
    Customer, CustomerType, Receipt, Vehicle, VehicleRenter, parking_type::line_description,
};

/// Build the print document for a customer.
///
/// `parking_tags` maps parking-type ids to their tags ("auto", "moto", ...).
/// Without a pending receipt the document prints with a total of 0; the
/// caller logs the situation, the operator sees it on paper.
pub fn build_receipt_doc(
    customer: &Customer,
    vehicles: &[Vehicle],
    renters: &[VehicleRenter],
    parking_tags: &HashMap<i64, String>,
    receipt: Option<&Receipt>,
) -> ReceiptDoc {
    let template = match customer.customer_type {
        CustomerType::Owner => ReceiptTemplate::Expenses,
        CustomerType::Renter | CustomerType::Private => ReceiptTemplate::Rental,
    };

    let mut items = Vec::new();
    for v in vehicles {
        let tag = v
            .parking_type_id
            .and_then(|id| parking_tags.get(&id))
            .map(String::as_str);
        items.push(ReceiptLine {
            quantity: 1,
            description: line_description(tag).to_string(),
            unit_amount: v.amount,
        });
    }
    for r in renters {
        items.push(ReceiptLine {
            quantity: 1,
            description: line_description(None).to_string(),
            unit_amount: r.amount,
        });
    }

    ReceiptDoc {
        template,
        receipt_number: receipt.and_then(|r| r.receipt_number),
        customer_name: customer.full_name(),
        address: customer.address.clone(),
        payment_label: receipt
            .and_then(|r| r.payment_type)
            .map(|t| t.label().to_string())
            .unwrap_or_default(),
        date: shared::util::today_string(),
        items,
        total: receipt.map(|r| r.price).unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::ReceiptStatus;

    fn customer(customer_type: CustomerType) -> Customer {
        Customer {
            id: 1,
            first_name: "Laura".into(),
            last_name: "Gimenez".into(),
            address: "Mitre 540".into(),
            document_number: None,
            customer_type,
            number_of_vehicles: 1,
            deleted_at: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn vehicle(amount: f64, parking_type_id: Option<i64>) -> Vehicle {
        Vehicle {
            id: 10,
            customer_id: 1,
            garage_number: "12".into(),
            amount,
            parking_type_id,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn pending(price: f64) -> Receipt {
        Receipt {
            id: 100,
            customer_id: 1,
            status: ReceiptStatus::Pending,
            price,
            start_amount: price,
            start_date: "2026-08-01".into(),
            payment_date: None,
            payment_type: None,
            receipt_number: None,
            barcode: "100".into(),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn owner_gets_the_expenses_template() {
        let doc = build_receipt_doc(
            &customer(CustomerType::Owner),
            &[vehicle(5000.0, None)],
            &[],
            &HashMap::new(),
            Some(&pending(5000.0)),
        );
        assert_eq!(doc.template, ReceiptTemplate::Expenses);
        assert_eq!(doc.total, 5000.0);
        assert_eq!(doc.items.len(), 1);
        assert_eq!(doc.items[0].description, "Alquiler Correspondiente");
    }

    #[test]
    fn parking_tag_drives_the_line_description() {
        let mut tags = HashMap::new();
        tags.insert(7, "auto".to_string());
        let doc = build_receipt_doc(
            &customer(CustomerType::Owner),
            &[vehicle(5000.0, Some(7))],
            &[],
            &tags,
            Some(&pending(5000.0)),
        );
        assert_eq!(doc.items[0].description, "Cochera Auto");
    }

    #[test]
    fn renter_uses_the_rental_template() {
        let renter_spot = VehicleRenter {
            id: 20,
            customer_id: 1,
            garage_number: "3".into(),
            amount: 4000.0,
            owner: "JOSE_FERNANDEZ".into(),
            owner_vehicle_id: None,
            created_at: 0,
            updated_at: 0,
        };
        let doc = build_receipt_doc(
            &customer(CustomerType::Renter),
            &[],
            &[renter_spot],
            &HashMap::new(),
            Some(&pending(4000.0)),
        );
        assert_eq!(doc.template, ReceiptTemplate::Rental);
        assert_eq!(doc.items.len(), 1);
    }

    #[test]
    fn missing_pending_receipt_prints_zero() {
        let doc = build_receipt_doc(
            &customer(CustomerType::Owner),
            &[vehicle(5000.0, None)],
            &[],
            &HashMap::new(),
            None,
        );
        assert_eq!(doc.total, 0.0);
        assert!(doc.receipt_number.is_none());
        assert!(doc.payment_label.is_empty());
    }
}
