//! Fixtures
//!
//! YAML fixture sets describe a restaurant menu, a coupon book and a cart. Files live under
//! `<base>/menus/<set>.yml`, `<base>/coupons/<set>.yml` and `<base>/carts/<set>.yml`.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    coupons::{Coupon, CouponError},
    fixtures::{carts::CartFixture, coupons::CouponsFixture, menus::MenuFixture},
    items::{LineItem, LineItemError},
    products::Product,
    restaurants::{DeliveryWindowError, Restaurant},
};

pub mod carts;
pub mod coupons;
pub mod menus;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Coupon not found
    #[error("Coupon not found: {0}")]
    CouponNotFound(String),

    /// Currency mismatch between fixture entries
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No menu loaded yet
    #[error("No menu loaded yet; currency unknown")]
    NoMenu,

    /// No cart loaded
    #[error("No cart loaded")]
    NoCart,

    /// Invalid delivery window
    #[error(transparent)]
    DeliveryWindow(#[from] DeliveryWindowError),

    /// Invalid coupon data
    #[error(transparent)]
    Coupon(#[from] CouponError),

    /// Invalid cart line
    #[error(transparent)]
    LineItem(#[from] LineItemError),

    /// Cart creation error
    #[error("Failed to create cart: {0}")]
    Cart(#[from] CartError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    restaurant: Option<Restaurant<'a>>,

    /// Products in menu order
    products: Vec<Product<'a>>,

    /// Product id -> index into `products`
    product_keys: FxHashMap<String, usize>,

    coupons: FxHashMap<String, Coupon<'a>>,

    cart: Option<CartFixture>,

    /// Currency for the fixture set
    currency: Option<&'a Currency>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            restaurant: None,
            products: Vec::new(),
            product_keys: FxHashMap::default(),
            coupons: FxHashMap::default(),
            cart: None,
            currency: None,
        }
    }

    /// Load a complete fixture set (menu, coupons and cart with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_in("./fixtures", name)
    }

    /// Load a complete fixture set from a custom base path
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set_in(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path);

        fixture
            .load_menu(name)?
            .load_coupons(name)?
            .load_cart(name)?;

        Ok(fixture)
    }

    /// Load a restaurant and its products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if prices mix currencies.
    pub fn load_menu(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: MenuFixture = self.read("menus", name)?;

        let restaurant = Restaurant::try_from(fixture.restaurant)?;
        self.check_currency(restaurant.delivery_fee.currency())?;
        self.restaurant = Some(restaurant);

        for product_fixture in fixture.products {
            let product = Product::try_from(product_fixture)?;

            self.check_currency(product.price.currency())?;

            self.product_keys
                .insert(product.id.as_str().to_string(), self.products.len());
            self.products.push(product);
        }

        Ok(self)
    }

    /// Load a coupon book from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a coupon is invalid.
    pub fn load_coupons(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: CouponsFixture = self.read("coupons", name)?;

        for coupon_fixture in fixture.coupons {
            let coupon = Coupon::try_from(coupon_fixture)?;

            self.check_currency(coupon.min_order().currency())?;
            self.coupons.insert(coupon.code().to_string(), coupon);
        }

        Ok(self)
    }

    /// Load a cart from a YAML fixture file
    ///
    /// Product and coupon references are resolved when the cart is built.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_cart(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        self.cart = Some(self.read("carts", name)?);

        Ok(self)
    }

    /// Get a product by its id
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, id: &str) -> Result<&Product<'a>, FixtureError> {
        self.product_keys
            .get(id)
            .and_then(|&idx| self.products.get(idx))
            .ok_or_else(|| FixtureError::ProductNotFound(id.to_string()))
    }

    /// Products in menu order
    pub fn products(&self) -> &[Product<'a>] {
        &self.products
    }

    /// The restaurant from the menu, if loaded
    pub fn restaurant(&self) -> Option<&Restaurant<'a>> {
        self.restaurant.as_ref()
    }

    /// Look up a coupon by exact code, as the coupon service would.
    pub fn lookup_coupon(&self, code: &str) -> Option<Coupon<'a>> {
        self.coupons.get(code).cloned()
    }

    /// Get a coupon by its code
    ///
    /// # Errors
    ///
    /// Returns an error if the coupon is not found.
    pub fn coupon(&self, code: &str) -> Result<&Coupon<'a>, FixtureError> {
        self.coupons
            .get(code)
            .ok_or_else(|| FixtureError::CouponNotFound(code.to_string()))
    }

    /// The restaurant's delivery fee
    ///
    /// # Errors
    ///
    /// Returns an error if no menu has been loaded.
    pub fn delivery_fee(&self) -> Result<Money<'a, Currency>, FixtureError> {
        self.restaurant
            .as_ref()
            .map(|restaurant| restaurant.delivery_fee)
            .ok_or(FixtureError::NoMenu)
    }

    /// Build the fixture cart, without applying its coupon
    ///
    /// # Errors
    ///
    /// Returns an error if no cart or menu is loaded, or a line references an unknown product.
    pub fn cart(&self) -> Result<Cart<'a>, FixtureError> {
        let fixture = self.cart.as_ref().ok_or(FixtureError::NoCart)?;
        let currency = self.currency()?;

        let cart = match &self.restaurant {
            Some(restaurant) => Cart::for_restaurant(restaurant.id.clone(), currency),
            None => Cart::new(currency),
        };

        fixture.items.iter().try_fold(cart, |cart, line| -> Result<Cart<'a>, FixtureError> {
            let product = self.product(&line.product)?;

            let item = LineItem::new(
                product.id.clone(),
                product.name.clone(),
                product.price,
                line.quantity,
            )?;

            Ok(cart.add_line(item)?)
        })
    }

    /// Code of the coupon the fixture cart asks for
    pub fn cart_coupon_code(&self) -> Option<&str> {
        self.cart.as_ref().and_then(|cart| cart.coupon.as_deref())
    }

    /// Build the fixture cart with its coupon applied
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be built, the coupon is unknown, or it is not
    /// eligible for the cart.
    pub fn cart_with_coupon(&self) -> Result<Cart<'a>, FixtureError> {
        let cart = self.cart()?;

        match self.cart_coupon_code() {
            Some(code) => Ok(cart.apply_coupon(self.coupon(code)?.clone())?),
            None => Ok(cart),
        }
    }

    /// Get the currency for the fixture set
    ///
    /// # Errors
    ///
    /// Returns an error if no menu has been loaded.
    pub fn currency(&self) -> Result<&'a Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoMenu)
    }

    fn read<T: serde::de::DeserializeOwned>(&self, category: &str, name: &str) -> Result<T, FixtureError> {
        let file_path = self.base_path.join(category).join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        Ok(serde_norway::from_str(&contents)?)
    }

    fn check_currency(&mut self, currency: &'a Currency) -> Result<(), FixtureError> {
        match self.currency {
            Some(existing) if existing != currency => Err(FixtureError::CurrencyMismatch(
                existing.iso_alpha_code.to_string(),
                currency.iso_alpha_code.to_string(),
            )),
            Some(_) => Ok(()),
            None => {
                self.currency = Some(currency);

                Ok(())
            }
        }
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}
