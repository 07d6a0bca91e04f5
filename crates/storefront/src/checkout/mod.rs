//! Checkout orchestration.
//!
//! The flow is linear: address collection, shipping method, payment method,
//! then a handoff to the external payment provider. Shipping and payment are
//! each a single option today, so the interesting logic is address
//! validation and the total computation. Order resolution after the provider
//! redirects back lives in [`resolution`].

pub mod resolution;

use rust_decimal::Decimal;
use serde::Deserialize;
use voidwear_core::Money;

use crate::api::types::{AddressPayload, Cart};

/// Default phone country prefix.
const DEFAULT_PHONE_PREFIX: &str = "+54";

/// Available shipping methods.
///
/// A single fixed-cost express option for now; the enum keeps the total
/// computation honest when more methods arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingMethod {
    #[default]
    Express,
}

impl ShippingMethod {
    /// Flat shipping cost for this method.
    #[must_use]
    pub fn cost(self) -> Money {
        match self {
            Self::Express => Money::ars(8000),
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Express => "Envío express",
        }
    }
}

/// Raw checkout form submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub street_address: String,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub phone: String,
    /// Persist the entered address to the user's address book.
    #[serde(default)]
    pub save_address: bool,
    #[serde(default)]
    pub shipping_method: ShippingMethod,
}

/// A required address field that came back blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingField(pub &'static str);

impl CheckoutForm {
    /// Validate required fields and produce the wire payload.
    ///
    /// Whitespace-only input counts as blank. Comments are optional; the
    /// phone prefix falls back to the default when omitted.
    ///
    /// # Errors
    ///
    /// Returns the list of blank required fields, in form order.
    pub fn into_payload(self) -> Result<AddressPayload, Vec<MissingField>> {
        let mut missing = Vec::new();

        let required = [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("street_address", &self.street_address),
            ("city", &self.city),
            ("postal_code", &self.postal_code),
            ("country", &self.country),
            ("state", &self.state),
            ("phone", &self.phone),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                missing.push(MissingField(name));
            }
        }
        if !missing.is_empty() {
            return Err(missing);
        }

        let prefix = if self.prefix.trim().is_empty() {
            DEFAULT_PHONE_PREFIX.to_string()
        } else {
            self.prefix.trim().to_string()
        };

        Ok(AddressPayload {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            street_address: self.street_address.trim().to_string(),
            comments: self.comments.trim().to_string(),
            city: self.city.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
            country: self.country.trim().to_string(),
            state: self.state.trim().to_string(),
            prefix,
            phone: self.phone.trim().to_string(),
            email: None,
        })
    }
}

/// Order total: cart subtotal plus the selected shipping cost.
///
/// No other fees exist anywhere in the flow.
#[must_use]
pub fn order_total(cart: &Cart, shipping: ShippingMethod) -> Money {
    let subtotal = cart.subtotal();
    subtotal
        .checked_add(shipping.cost())
        .unwrap_or(subtotal)
}

/// The shipping cost as a bare decimal for the preference request body.
#[must_use]
pub fn shipping_cost_amount(shipping: ShippingMethod) -> Decimal {
    shipping.cost().amount
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::api::types::CartItem;
    use voidwear_core::VariantId;

    fn item(variant: i32, quantity: u32, unit_price: i64) -> CartItem {
        CartItem {
            variant_id: VariantId::new(variant),
            product_name: format!("Product {variant}"),
            image_url: None,
            size: "M".to_string(),
            color: "black".to_string(),
            quantity,
            unit_price: Decimal::from(unit_price),
        }
    }

    fn form() -> CheckoutForm {
        CheckoutForm {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            street_address: "Av. Siempre Viva 742".to_string(),
            city: "CABA".to_string(),
            postal_code: "1414".to_string(),
            country: "Argentina".to_string(),
            state: "Buenos Aires".to_string(),
            phone: "1155551234".to_string(),
            ..CheckoutForm::default()
        }
    }

    #[test]
    fn test_total_is_subtotal_plus_shipping() {
        // Two of variant A at 1000 and one of variant B at 500.
        let cart = Cart {
            items: vec![item(1, 2, 1000), item(2, 1, 500)],
        };

        assert_eq!(cart.subtotal(), Money::ars(2500));
        assert_eq!(order_total(&cart, ShippingMethod::Express), Money::ars(10500));
    }

    #[test]
    fn test_valid_form_produces_payload_with_default_prefix() {
        let payload = form().into_payload().expect("valid form");
        assert_eq!(payload.first_name, "Ada");
        assert_eq!(payload.prefix, "+54");
        assert_eq!(payload.email, None);
    }

    #[test]
    fn test_explicit_prefix_is_kept() {
        let form = CheckoutForm {
            prefix: "+598".to_string(),
            ..form()
        };
        assert_eq!(form.into_payload().expect("valid").prefix, "+598");
    }

    #[test]
    fn test_blank_required_fields_are_reported_in_order() {
        let form = CheckoutForm {
            city: "   ".to_string(),
            phone: String::new(),
            ..form()
        };
        let missing = form.into_payload().expect_err("invalid form");
        assert_eq!(missing, vec![MissingField("city"), MissingField("phone")]);
    }

    #[test]
    fn test_comments_are_optional() {
        let form = CheckoutForm {
            comments: String::new(),
            ..form()
        };
        assert!(form.into_payload().is_ok());
    }
}
