//! # Domain Types
//!
//! Core domain types shared by every layer of the storefront client.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      User       │   │  AuthSession    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id, email      │   │  user           │       │
//! │  │  name, category │   │  username       │   │  token          │       │
//! │  │  price (Money)  │   │  first/last     │   └─────────────────┘       │
//! │  │  stock, tags    │   └─────────────────┘                             │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ PurchaseRecord  │   │ InteractionKind │   │ Recommendation  │       │
//! │  │  products[]     │   │  view / like    │   │  products[]     │       │
//! │  │  total, status  │   │  cart/purchase  │   │  algorithm      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! All types serialize with camelCase keys to match the REST API. Prices are
//! decimal dollars on the wire and [`Money`] (cents) in memory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::{self, Money};

/// Decodes `null` as the type's default. The backend encodes empty Go
/// slices as `null`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Backend identifier (Mongo ObjectId hex string).
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: String,

    /// Unit price.
    #[serde(with = "money::dollars")]
    pub price: Money,

    /// Units in stock.
    #[serde(default)]
    pub stock: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,

    /// Average rating, 0.0 - 5.0.
    #[serde(default)]
    pub rating: f64,

    #[serde(default)]
    pub review_count: i64,
}

impl Product {
    /// Checks if at least one unit is available.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Admin create/update payload for a product.
///
/// Same shape as [`Product`] minus the server-owned fields
/// (`id`, `rating`, `reviewCount`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(with = "money::dollars")]
    pub price: Money,
    pub stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        ProductDraft {
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            price: product.price,
            stock: product.stock,
            image_url: product.image_url.clone(),
            tags: product.tags.clone(),
        }
    }
}

// =============================================================================
// Users & Sessions
// =============================================================================

/// Shopping preferences stored on the user profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<String>,
    #[serde(default)]
    pub price_range: PriceRange,
}

/// Preferred price band, in wire dollars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// An authenticated user's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub preferences: UserPreferences,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// "First Last", falling back to the username when names are blank.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }

    /// Applies a partial profile update in place.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(username) = patch.username {
            self.username = username;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(preferences) = patch.preferences {
            self.preferences = preferences;
        }
    }
}

/// Partial update to a [`User`]. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<UserPreferences>,
}

/// `POST /auth/login` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// `POST /auth/register` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// A signed-in session as returned by login/register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

// =============================================================================
// Purchases & Interactions
// =============================================================================

/// One line of a purchase record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseItem {
    #[serde(alias = "productID")]
    pub product_id: String,
    pub quantity: i64,
    /// Unit price at checkout time.
    #[serde(with = "money::dollars")]
    pub price: Money,
}

/// `POST /interactions/purchase` body, built from the cart at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub products: Vec<PurchaseItem>,
    #[serde(with = "money::dollars")]
    pub total: Money,
    pub status: PurchaseStatus,
}

/// Status of a purchase record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseStatus {
    #[default]
    Completed,
    Pending,
    Cancelled,
    /// Any status this client does not know about.
    #[serde(other)]
    Unknown,
}

/// A past purchase as returned by `GET /users/history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    #[serde(default)]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: Vec<PurchaseItem>,
    #[serde(with = "money::dollars")]
    pub total: Money,
    #[serde(default)]
    pub status: PurchaseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Purchase {
    /// Total units across all lines.
    pub fn item_count(&self) -> i64 {
        self.products.iter().map(|p| p.quantity).sum()
    }
}

/// A user behaviour signal fed to the recommendation engine.
///
/// ## Signal Weights
/// ```text
/// view ──► 1.0   like ──► 3.0   cart ──► 5.0   purchase ──► 10.0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    View,
    Like,
    Cart,
    Purchase,
}

impl InteractionKind {
    /// Weight the backend assigns to this signal.
    pub const fn weight(&self) -> f64 {
        match self {
            InteractionKind::View => 1.0,
            InteractionKind::Like => 3.0,
            InteractionKind::Cart => 5.0,
            InteractionKind::Purchase => 10.0,
        }
    }

    /// Path segment under `/interactions/`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::View => "view",
            InteractionKind::Like => "like",
            InteractionKind::Cart => "cart",
            InteractionKind::Purchase => "purchase",
        }
    }
}

impl std::fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Recommendations
// =============================================================================

/// Recommendation strategy exposed by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationAlgorithm {
    /// Hybrid of collaborative and content-based.
    #[default]
    Personalized,
    /// "Users like you" graph traversal.
    Collaborative,
    /// Based on the user's own interaction history.
    ContentBased,
}

impl RecommendationAlgorithm {
    /// Path under `/recommendations`.
    pub const fn path(&self) -> &'static str {
        match self {
            RecommendationAlgorithm::Personalized => "/recommendations",
            RecommendationAlgorithm::Collaborative => "/recommendations/collaborative",
            RecommendationAlgorithm::ContentBased => "/recommendations/content-based",
        }
    }

    /// Label shown in the algorithm picker.
    pub const fn label(&self) -> &'static str {
        match self {
            RecommendationAlgorithm::Personalized => "Personalized",
            RecommendationAlgorithm::Collaborative => "Similar Users",
            RecommendationAlgorithm::ContentBased => "Your Interests",
        }
    }
}

impl std::str::FromStr for RecommendationAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "personalized" | "hybrid" => Ok(RecommendationAlgorithm::Personalized),
            "collaborative" => Ok(RecommendationAlgorithm::Collaborative),
            "content-based" | "content_based" => Ok(RecommendationAlgorithm::ContentBased),
            other => Err(format!("Unknown recommendation algorithm: '{}'", other)),
        }
    }
}

/// A product suggested by the recommendation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedProduct {
    pub product: Product,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub reason: String,
}

/// A page of recommendations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: Vec<RecommendedProduct>,
    #[serde(default)]
    pub algorithm: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
