use serde::{Deserialize, Serialize};

use models::address::{AddressChanges, NewAddress};

use crate::validation::{Length, Validate, ValidationErrors, Validator};

pub type Address = models::address::Model;

const STREET: Length = Length::max(255);
const CITY: Length = Length::max(100);
const PROVINCE: Length = Length::max(100);
const COUNTRY: Length = Length::between(1, 100);
const POSTAL_CODE: Length = Length::between(1, 10);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressResponse {
    pub id: i32,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: String,
}

impl From<Address> for AddressResponse {
    fn from(a: Address) -> Self {
        Self {
            id: a.id,
            street: a.street,
            city: a.city,
            province: a.province,
            country: a.country,
            postal_code: a.postal_code,
        }
    }
}

#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateAddressRequest {
    #[serde(skip_deserializing)]
    pub contact_id: i32,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

impl Validate for CreateAddressRequest {
    type Output = (i32, NewAddress);

    fn validate(self) -> Result<Self::Output, ValidationErrors> {
        let mut v = Validator::new();
        v.positive("contact_id", i64::from(self.contact_id));
        let street = v.optional("street", self.street, STREET);
        let city = v.optional("city", self.city, CITY);
        let province = v.optional("province", self.province, PROVINCE);
        let country = v.required("country", self.country, COUNTRY);
        let postal_code = v.required("postal_code", self.postal_code, POSTAL_CODE);
        v.finish((self.contact_id, NewAddress { street, city, province, country, postal_code }))
    }
}

/// Both ids come from the path.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateAddressRequest {
    #[serde(skip_deserializing)]
    pub contact_id: i32,
    #[serde(skip_deserializing)]
    pub id: i32,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

impl Validate for UpdateAddressRequest {
    type Output = (AddressKey, AddressChanges);

    fn validate(self) -> Result<Self::Output, ValidationErrors> {
        let mut v = Validator::new();
        v.positive("contact_id", i64::from(self.contact_id));
        v.positive("id", i64::from(self.id));
        let street = v.optional("street", self.street, STREET);
        let city = v.optional("city", self.city, CITY);
        let province = v.optional("province", self.province, PROVINCE);
        let country = v.optional("country", self.country, COUNTRY);
        let postal_code = v.optional("postal_code", self.postal_code, POSTAL_CODE);
        let key = AddressKey { contact_id: self.contact_id, address_id: self.id };
        v.finish((key, AddressChanges { street, city, province, country, postal_code }))
    }
}

/// Identifies one address under one contact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct AddressKey {
    pub contact_id: i32,
    pub address_id: i32,
}

pub type GetAddressRequest = AddressKey;
pub type RemoveAddressRequest = AddressKey;

impl Validate for AddressKey {
    type Output = AddressKey;

    fn validate(self) -> Result<AddressKey, ValidationErrors> {
        let mut v = Validator::new();
        v.positive("contact_id", i64::from(self.contact_id));
        v.positive("address_id", i64::from(self.address_id));
        v.finish(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_country_and_postal_code() {
        let req = CreateAddressRequest { contact_id: 1, ..Default::default() };
        let err = req.validate().err().unwrap();
        assert_eq!(err.fields().len(), 2);
        assert!(err.has("country") && err.has("postal_code"));
    }

    #[test]
    fn create_checks_lengths_and_contact_id() {
        let req = CreateAddressRequest {
            contact_id: 0,
            street: Some("s".repeat(256)),
            city: Some("Jakarta".into()),
            province: None,
            country: Some("Indonesia".into()),
            postal_code: Some("12345678901".into()),
        };
        let err = req.validate().err().unwrap();
        assert!(err.has("contact_id") && err.has("street") && err.has("postal_code"));
        assert!(!err.has("city"));
    }

    #[test]
    fn key_needs_both_ids_positive() {
        let err = AddressKey { contact_id: -1, address_id: 0 }.validate().err().unwrap();
        assert!(err.has("contact_id") && err.has("address_id"));
        assert!(AddressKey { contact_id: 1, address_id: 2 }.validate().is_ok());
    }

    #[test]
    fn update_fields_are_optional() {
        let (key, changes) = UpdateAddressRequest { contact_id: 3, id: 4, ..Default::default() }.validate().unwrap();
        assert_eq!(key, AddressKey { contact_id: 3, address_id: 4 });
        assert_eq!(changes, AddressChanges::default());
    }
}
