//! Submitted form payloads and their validation.
//!
//! Validation runs in the page controller before anything reaches the
//! session store or the catalog. Messages are shown inline, in Arabic.

use serde::Deserialize;
use thiserror::Error;

use matjari_core::{Price, Product, ProductFields};

/// A form rejected before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("يرجى ملء جميع الحقول")]
    MissingFields,

    #[error("كلمات المرور غير متطابقة")]
    PasswordMismatch,

    #[error("يرجى إدخال سعر صحيح لا يقل عن صفر")]
    InvalidPrice,

    #[error("يرجى إدخال كمية مخزون صحيحة لا تقل عن صفر")]
    InvalidStock,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

// =============================================================================
// Authentication
// =============================================================================

/// Login form data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// # Errors
    ///
    /// Returns [`FormError::MissingFields`] if either field is blank.
    pub fn validate(&self) -> Result<(), FormError> {
        if is_blank(&self.email) || is_blank(&self.password) {
            return Err(FormError::MissingFields);
        }
        Ok(())
    }
}

/// Registration form data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

impl RegisterForm {
    /// # Errors
    ///
    /// Presence is checked before the password confirmation.
    pub fn validate(&self) -> Result<(), FormError> {
        let fields = [
            &self.name,
            &self.email,
            &self.password,
            &self.password_confirm,
        ];
        if fields.iter().any(|f| is_blank(f)) {
            return Err(FormError::MissingFields);
        }
        if self.password != self.password_confirm {
            return Err(FormError::PasswordMismatch);
        }
        Ok(())
    }
}

// =============================================================================
// Subscription
// =============================================================================

/// Plan selection form data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlanForm {
    pub plan: String,
}

// =============================================================================
// Products
// =============================================================================

/// Product create/edit form data, kept as raw strings so a rejected
/// submission can be re-rendered as entered.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub category: String,
    pub stock: String,
    pub image_url: String,
}

impl ProductForm {
    /// Parse into catalog fields.
    ///
    /// # Errors
    ///
    /// - [`FormError::MissingFields`] if any field is blank
    /// - [`FormError::InvalidPrice`] if the price is not a non-negative decimal
    /// - [`FormError::InvalidStock`] if the stock is not a non-negative integer
    pub fn parse(&self) -> Result<ProductFields, FormError> {
        let fields = [
            &self.name,
            &self.price,
            &self.category,
            &self.stock,
            &self.image_url,
        ];
        if fields.iter().any(|f| is_blank(f)) {
            return Err(FormError::MissingFields);
        }

        let price: Price = self.price.parse().map_err(|_| FormError::InvalidPrice)?;
        let stock: u32 = self
            .stock
            .trim()
            .parse()
            .map_err(|_| FormError::InvalidStock)?;

        Ok(ProductFields {
            name: self.name.trim().to_string(),
            price,
            category: self.category.trim().to_string(),
            stock,
            image_url: self.image_url.trim().to_string(),
        })
    }
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.amount().normalize().to_string(),
            category: product.category.clone(),
            stock: product.stock.to_string(),
            image_url: product.image_url.clone(),
        }
    }
}
