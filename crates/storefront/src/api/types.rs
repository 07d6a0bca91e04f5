//! Wire schemas for the commerce REST API.
//!
//! Every endpoint response is parsed into one of these structs at the API
//! boundary - handlers never see raw JSON. Field names follow the API's
//! snake_case JSON except addresses, which the API exposes in camelCase.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use voidwear_core::{
    AddressId, CategoryId, Currency, Email, Money, OrderId, PaymentStatus, ProductId, UserId,
    UserRole, VariantId,
};

// =============================================================================
// Cart
// =============================================================================

/// The caller's cart, owned by either a guest session or a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    /// Line items, in insertion order.
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Total number of units across all lines.
    ///
    /// Always derived by summing quantities - never stored - so the badge can
    /// not drift from the server-returned items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of unit price x quantity over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        let amount = self
            .items
            .iter()
            .map(|item| item.unit_price * Decimal::from(item.quantity))
            .sum();
        Money::new(amount, Currency::Ars)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A cart line referencing a specific product variant.
///
/// The unit price is captured server-side at add time and may differ from the
/// product's live price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// Variant this line refers to (not a bare product).
    pub variant_id: VariantId,
    /// Display name of the product.
    pub product_name: String,
    /// Primary product image, if any.
    pub image_url: Option<String>,
    /// Variant size.
    pub size: String,
    /// Variant color.
    pub color: String,
    /// Units in the cart; the server never returns a zero-quantity line.
    pub quantity: u32,
    /// Unit price snapshot taken when the line was created.
    pub unit_price: Decimal,
}

/// Response of `GET /cart/session/guest`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestSession {
    /// Server-assigned anonymous cart identity.
    pub guest_session_id: Uuid,
}

// =============================================================================
// Catalog
// =============================================================================

/// A product as returned by the listing and detail endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Live price; cart lines carry their own add-time snapshot.
    pub price: Decimal,
    pub category_id: CategoryId,
    /// Ordered image collection (at most three per product).
    #[serde(default)]
    pub images: Vec<ProductImage>,
    /// Purchasable size/color combinations.
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
}

impl Product {
    /// URL of the first image, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(|image| image.url.as_str())
    }
}

/// One image in a product's ordered collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: i32,
    pub url: String,
    /// Zero-based display position.
    pub position: u32,
}

/// A purchasable size/color combination with independent stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: VariantId,
    pub size: String,
    pub color: String,
    /// Remaining units; the server rejects adds that exceed this.
    pub stock: u32,
}

impl ProductVariant {
    /// Whether any units remain.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// A flat (non-hierarchical) product grouping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// Canonical name (Spanish, as stored).
    pub name: String,
    /// Optional per-locale display names keyed by language code.
    #[serde(default)]
    pub name_i18n: Option<HashMap<String, String>>,
}

impl Category {
    /// Display name for a language, falling back to `es`, then `en`, then the
    /// canonical name.
    #[must_use]
    pub fn localized_name(&self, language: &str) -> &str {
        if let Some(translations) = &self.name_i18n {
            for key in [language, "es", "en"] {
                if let Some(name) = translations.get(key) {
                    return name;
                }
            }
        }
        &self.name
    }
}

// =============================================================================
// Checkout & orders
// =============================================================================

/// A shipping address owned by a user.
///
/// The API exposes addresses in camelCase; the phone is split into a country
/// prefix and a local number.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// The one field the API keeps in snake_case.
    #[serde(rename = "address_id")]
    pub address_id: AddressId,
    pub first_name: String,
    pub last_name: String,
    pub street_address: String,
    #[serde(default)]
    pub comments: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub state: String,
    /// Phone country prefix, e.g. `+54`.
    pub prefix: String,
    pub phone: String,
}

/// Payload for creating or updating an address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressPayload {
    pub first_name: String,
    pub last_name: String,
    pub street_address: String,
    #[serde(default)]
    pub comments: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub state: String,
    pub prefix: String,
    pub phone: String,
    /// Buyer email forwarded to the payment provider at checkout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<&Address> for AddressPayload {
    fn from(address: &Address) -> Self {
        Self {
            first_name: address.first_name.clone(),
            last_name: address.last_name.clone(),
            street_address: address.street_address.clone(),
            comments: address.comments.clone(),
            city: address.city.clone(),
            postal_code: address.postal_code.clone(),
            country: address.country.clone(),
            state: address.state.clone(),
            prefix: address.prefix.clone(),
            phone: address.phone.clone(),
            email: None,
        }
    }
}

/// Response of `POST /checkout/create-preference`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutPreference {
    /// Provider-side checkout session id.
    pub preference_id: String,
    /// Externally-hosted payment page the browser is redirected to.
    pub init_point: String,
}

/// An order created from a cart snapshot at checkout time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Provider payment id, absent until the first callback lands.
    #[serde(default)]
    pub payment_id: Option<String>,
    pub payment_status: PaymentStatus,
    /// Subtotal plus shipping, captured at purchase time.
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    /// Immutable line items with price-at-purchase.
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// An immutable order line with its price captured at purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_name: String,
    pub size: String,
    pub color: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

// =============================================================================
// Account & wishlist
// =============================================================================

/// Response of `POST /auth/login` and `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub token_type: String,
}

/// Response of `GET /auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: Email,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub role: UserRole,
}

/// One saved product on the wishlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(variant: i32, quantity: u32, unit_price: i64) -> CartItem {
        CartItem {
            variant_id: VariantId::new(variant),
            product_name: format!("product-{variant}"),
            image_url: None,
            size: "M".to_string(),
            color: "black".to_string(),
            quantity,
            unit_price: Decimal::from(unit_price),
        }
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let cart = Cart {
            items: vec![line(1, 2, 1000), line(2, 1, 500)],
        };
        assert_eq!(cart.item_count(), 3);
        assert_eq!(Cart::default().item_count(), 0);
    }

    #[test]
    fn test_subtotal_is_price_times_quantity() {
        // 2 x 1000 + 1 x 500 = 2500.
        let cart = Cart {
            items: vec![line(1, 2, 1000), line(2, 1, 500)],
        };
        assert_eq!(cart.subtotal(), Money::ars(2500));
    }

    #[test]
    fn test_cart_deserializes_with_missing_items() {
        let cart: Cart = serde_json::from_str("{}").expect("deserialize");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_address_wire_format_is_camel_case() {
        let json = r#"{
            "address_id": 3,
            "firstName": "Ada",
            "lastName": "Lovelace",
            "streetAddress": "Av. Siempre Viva 742",
            "city": "Springfield",
            "postalCode": "1414",
            "country": "Argentina",
            "state": "Buenos Aires",
            "prefix": "+54",
            "phone": "1155551234"
        }"#;
        let address: Address = serde_json::from_str(json).expect("deserialize");
        assert_eq!(address.first_name, "Ada");
        assert_eq!(address.prefix, "+54");
        assert_eq!(address.comments, "");
    }

    #[test]
    fn test_category_localized_name_fallback_chain() {
        let mut translations = HashMap::new();
        translations.insert("en".to_string(), "Hoodies".to_string());
        let category = Category {
            id: CategoryId::new(1),
            name: "hoodies".to_string(),
            name_i18n: Some(translations),
        };
        // Requested language missing, es missing, falls through to en.
        assert_eq!(category.localized_name("pt"), "Hoodies");

        let bare = Category {
            id: CategoryId::new(2),
            name: "remeras".to_string(),
            name_i18n: None,
        };
        assert_eq!(bare.localized_name("en"), "remeras");
    }

    #[test]
    fn test_order_deserializes_without_payment_id() {
        let json = r#"{
            "id": 10,
            "payment_status": "pending",
            "total_amount": "10500",
            "created_at": "2026-01-15T12:00:00Z"
        }"#;
        let order: Order = serde_json::from_str(json).expect("deserialize");
        assert!(order.payment_id.is_none());
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert!(order.items.is_empty());
    }
}
