//! Customers (storefront accounts) and users (staff accounts).

use resource_store::StoreEntity;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub customer_id: String,
    pub customer_name: String,
    pub contact: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl StoreEntity for Customer {
    type Id = String;
    type Patch = Infallible;

    fn id(&self) -> String {
        self.customer_id.clone()
    }

    fn apply_patch(&mut self, patch: &Infallible) {
        match *patch {}
    }
}

/// Storefront sign-up form.
#[derive(Debug, Clone, Validate)]
pub struct CustomerCreate {
    #[validate(length(min = 1, message = "Name is required"))]
    pub customer_name: String,
    #[validate(length(min = 1, message = "Contact number is required"))]
    pub contact: String,
    #[validate(email(message = "Email address is invalid"))]
    pub email: Option<String>,
    pub address: Option<String>,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Wire body of `Customer-Post`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload<'a> {
    pub customer_id: &'a str,
    pub customer_name: &'a str,
    pub contact: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<&'a str>,
    pub password: &'a str,
}

impl CustomerCreate {
    pub fn payload<'a>(&'a self, customer_id: &'a str) -> CustomerPayload<'a> {
        CustomerPayload {
            customer_id,
            customer_name: &self.customer_name,
            contact: &self.contact,
            email: self.email.as_deref(),
            address: self.address.as_deref(),
            password: &self.password,
        }
    }

    pub fn into_customer(self, customer_id: String) -> Customer {
        Customer {
            customer_id,
            customer_name: self.customer_name,
            contact: self.contact,
            email: self.email,
            address: self.address,
        }
    }
}

/// A staff account. `position` drives which panel the user lands in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub user_name: String,
    pub contact: String,
    pub position: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "active")]
    pub is_active: bool,
}

fn active() -> bool {
    true
}

impl StoreEntity for User {
    type Id = String;
    type Patch = Infallible;

    fn id(&self) -> String {
        self.user_id.clone()
    }

    fn apply_patch(&mut self, patch: &Infallible) {
        match *patch {}
    }
}

/// Staff registration form.
#[derive(Debug, Clone, Validate)]
pub struct UserCreate {
    #[validate(length(min = 1, message = "Name is required"))]
    pub user_name: String,
    #[validate(length(min = 1, message = "Contact number is required"))]
    pub contact: String,
    #[validate(length(min = 1, message = "Position is required"))]
    pub position: String,
    #[validate(email(message = "Email address is invalid"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload<'a> {
    pub user_id: &'a str,
    pub user_name: &'a str,
    pub contact: &'a str,
    pub position: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    pub password: &'a str,
}

impl UserCreate {
    pub fn payload<'a>(&'a self, user_id: &'a str) -> UserPayload<'a> {
        UserPayload {
            user_id,
            user_name: &self.user_name,
            contact: &self.contact,
            position: &self.position,
            email: self.email.as_deref(),
            password: &self.password,
        }
    }

    pub fn into_user(self, user_id: String) -> User {
        User {
            user_id,
            user_name: self.user_name,
            contact: self.contact,
            position: self.position,
            email: self.email,
            is_active: true,
        }
    }
}

/// Contact number and password as typed into a login form.
#[derive(Debug, Clone, Validate)]
pub struct Credentials {
    #[validate(length(min = 1, message = "Contact number is required"))]
    pub contact: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl Credentials {
    pub fn new(contact: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            contact: contact.into(),
            password: password.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_customer_payload_shape() {
        let create = CustomerCreate {
            customer_name: "Rafi".into(),
            contact: "01711000000".into(),
            email: None,
            address: Some("Dhaka".into()),
            password: "secret".into(),
        };
        assert_eq!(
            serde_json::to_value(create.payload("c-1")).unwrap(),
            json!({
                "customerId": "c-1",
                "customerName": "Rafi",
                "contact": "01711000000",
                "address": "Dhaka",
                "password": "secret"
            })
        );
    }

    #[test]
    fn test_credentials_required() {
        assert!(Credentials::new("", "pw").validate().is_err());
        assert!(Credentials::new("01711000000", "pw").validate().is_ok());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let create = UserCreate {
            user_name: "Nadia".into(),
            contact: "01811000000".into(),
            position: "Admin".into(),
            email: Some("not-an-email".into()),
            password: "pw".into(),
        };
        assert!(create.validate().unwrap_err().errors().contains_key("email"));
    }
}
