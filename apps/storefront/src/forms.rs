//! # Form Schemas
//!
//! The login, registration and admin product forms, wired to the shared
//! validators, plus conversions from submitted values to request bodies.
//!
//! ```text
//! ┌──────────────┬──────────────────────┬──────────────────────────────────┐
//! │ form         │ field                │ rule                             │
//! ├──────────────┼──────────────────────┼──────────────────────────────────┤
//! │ login        │ email                │ validate_email                   │
//! │              │ password             │ required                         │
//! │ register     │ email                │ validate_email + availability    │
//! │              │ username             │ min length 3                     │
//! │              │ password             │ validate_password                │
//! │              │ confirmPassword      │ matches password                 │
//! │              │ firstName / lastName │ required                         │
//! │ product      │ name/description/    │ required                         │
//! │              │ category             │                                  │
//! │              │ price                │ validate_price                   │
//! │              │ stock                │ non-negative integer             │
//! └──────────────┴──────────────────────┴──────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use storefront_core::validation::{
    validate_email, validate_match, validate_min_length, validate_non_negative_integer,
    validate_password, validate_price, validate_required, ValidationResult,
};
use storefront_core::{Credentials, Money, Product, ProductDraft, RegisterRequest};
use storefront_forms::{AsyncFieldValidator, FieldErrors, FieldValues, FormBuilder, FormController};

use crate::error::{AppError, AppResult};

/// Minimum username length on registration.
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Image used when an admin leaves the image URL blank.
const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/400x400?text=";

pub const LOGIN_FIELDS: [&str; 2] = ["email", "password"];

pub const REGISTER_FIELDS: [&str; 6] = [
    "email",
    "username",
    "password",
    "confirmPassword",
    "firstName",
    "lastName",
];

pub const PRODUCT_FIELDS: [&str; 7] = [
    "name",
    "description",
    "category",
    "price",
    "stock",
    "imageUrl",
    "tags",
];

fn field<'a>(values: &'a FieldValues, name: &str) -> &'a str {
    values.get(name).map(String::as_str).unwrap_or("")
}

fn check(errors: &mut FieldErrors, name: &str, result: ValidationResult<()>) {
    if let Err(e) = result {
        errors.insert(name.to_string(), e.to_string());
    }
}

// =============================================================================
// Login
// =============================================================================

pub fn validate_login(values: &FieldValues) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check(&mut errors, "email", validate_email(field(values, "email")));
    check(
        &mut errors,
        "password",
        validate_required(field(values, "password"), "Password"),
    );
    errors
}

pub fn login_form() -> FormController {
    FormBuilder::with_fields(LOGIN_FIELDS)
        .validate(validate_login)
        .build()
}

pub fn credentials(values: &FieldValues) -> Credentials {
    Credentials {
        email: field(values, "email").trim().to_string(),
        password: field(values, "password").to_string(),
    }
}

// =============================================================================
// Register
// =============================================================================

pub fn validate_register(values: &FieldValues) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let password = field(values, "password");

    check(&mut errors, "email", validate_email(field(values, "email")));
    check(
        &mut errors,
        "username",
        validate_min_length(field(values, "username"), MIN_USERNAME_LENGTH, "Username"),
    );
    check(&mut errors, "password", validate_password(password));
    check(
        &mut errors,
        "confirmPassword",
        validate_match(field(values, "confirmPassword"), password, "Passwords"),
    );
    check(
        &mut errors,
        "firstName",
        validate_required(field(values, "firstName"), "First name"),
    );
    check(
        &mut errors,
        "lastName",
        validate_required(field(values, "lastName"), "Last name"),
    );
    errors
}

/// Registration form; `availability` runs on the email field after
/// `debounce` of quiet typing.
pub fn register_form(
    availability: Arc<dyn AsyncFieldValidator>,
    debounce: Duration,
) -> FormController {
    FormBuilder::with_fields(REGISTER_FIELDS)
        .validate(validate_register)
        .async_validator("email", availability)
        .debounce(debounce)
        .build()
}

pub fn register_request(values: &FieldValues) -> RegisterRequest {
    RegisterRequest {
        email: field(values, "email").trim().to_string(),
        username: field(values, "username").trim().to_string(),
        password: field(values, "password").to_string(),
        first_name: field(values, "firstName").trim().to_string(),
        last_name: field(values, "lastName").trim().to_string(),
    }
}

// =============================================================================
// Admin Product
// =============================================================================

pub fn validate_product(values: &FieldValues) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check(
        &mut errors,
        "name",
        validate_required(field(values, "name"), "Name"),
    );
    check(
        &mut errors,
        "description",
        validate_required(field(values, "description"), "Description"),
    );
    check(
        &mut errors,
        "category",
        validate_required(field(values, "category"), "Category"),
    );
    check(&mut errors, "price", validate_price(field(values, "price")));
    check(
        &mut errors,
        "stock",
        validate_non_negative_integer(field(values, "stock"), "Stock"),
    );
    errors
}

/// Product form, pre-filled from `editing` when updating an existing product.
pub fn product_form(editing: Option<&Product>) -> FormController {
    let builder = match editing {
        Some(product) => FormBuilder::with_values(product_values(product)),
        None => FormBuilder::with_fields(PRODUCT_FIELDS),
    };
    builder.validate(validate_product).build()
}

/// Form values for an existing product.
pub fn product_values(product: &Product) -> FieldValues {
    let price = format!("{:.2}", product.price.to_dollars());
    [
        ("name", product.name.clone()),
        ("description", product.description.clone()),
        ("category", product.category.clone()),
        ("price", price),
        ("stock", product.stock.to_string()),
        ("imageUrl", product.image_url.clone().unwrap_or_default()),
        ("tags", product.tags.join(", ")),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

/// Builds the admin request body from validated form values.
///
/// A blank image URL becomes a placeholder image; tags are comma-separated.
pub fn product_draft(values: &FieldValues) -> AppResult<ProductDraft> {
    let errors = validate_product(values);
    if let Some(message) = errors.values().next() {
        return Err(AppError::validation(message.clone()));
    }

    let name = field(values, "name").trim().to_string();
    let price: f64 = field(values, "price")
        .trim()
        .parse()
        .map_err(|_| AppError::validation("Price must be a positive number"))?;
    let stock: i64 = field(values, "stock")
        .trim()
        .parse()
        .map_err(|_| AppError::validation("Stock must be a non-negative integer"))?;

    let image_url = match field(values, "imageUrl").trim() {
        "" => format!("{}{}", PLACEHOLDER_IMAGE_URL, name.replace(' ', "+")),
        url => url.to_string(),
    };

    let tags = field(values, "tags")
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    Ok(ProductDraft {
        description: field(values, "description").trim().to_string(),
        category: field(values, "category").trim().to_string(),
        price: Money::from_dollars(price),
        stock,
        image_url: Some(image_url),
        tags,
        name,
    })
}
