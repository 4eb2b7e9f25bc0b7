use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::project;
use crate::validation::{check_len, check_range};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub age: i32,
    #[sea_orm(unique)]
    pub student_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Project,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Project => Entity::has_many(project::Entity).into() }
    }
}

impl Related<project::Entity> for Entity {
    fn to() -> RelationDef { Relation::Project.def() }
}

impl ActiveModelBehavior for ActiveModel {}

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email regex")
});

static STUDENT_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^S[0-9]{7}$").expect("student id regex"));

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    check_len("name", name, 1, 100)
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    if email.len() > 255 || !EMAIL_RE.is_match(email) {
        return Err(ModelError::invalid("email is not a valid email address"));
    }
    Ok(())
}

pub fn validate_age(age: i32) -> Result<(), ModelError> {
    check_range("age", age, 0, 150)
}

pub fn validate_student_id(student_id: &str) -> Result<(), ModelError> {
    if !STUDENT_ID_RE.is_match(student_id) {
        return Err(ModelError::invalid("student_id must match S followed by 7 digits"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_accepts_common_forms() {
        for ok in ["ada@x.com", "first.last+tag@uni.example.org", "a_b@sub-domain.io"] {
            assert!(validate_email(ok).is_ok(), "{ok}");
        }
    }

    #[test]
    fn email_rejects_malformed() {
        for bad in ["", "ada", "ada@", "@x.com", "ada@x", "a da@x.com", "ada@@x.com", "ada@-x.com"] {
            assert!(validate_email(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn student_id_pattern() {
        assert!(validate_student_id("S1234567").is_ok());
        assert!(validate_student_id("s1234567").is_err());
        assert!(validate_student_id("S123456").is_err());
        assert!(validate_student_id("S12345678").is_err());
        assert!(validate_student_id("S12345a7").is_err());
        // non-ASCII digits are not accepted
        assert!(validate_student_id("S١٢٣٤٥٦٧").is_err());
    }

    #[test]
    fn name_and_age_bounds() {
        assert!(validate_name("Ada").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name(&"x".repeat(101)).is_err());
        assert!(validate_age(-1).is_err());
        assert!(validate_age(30).is_ok());
    }

    #[test]
    fn model_serializes_as_user_read() {
        let m = Model { id: 1, name: "Ada".into(), email: "ada@x.com".into(), age: 30, student_id: "S1234567".into() };
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(
            v,
            serde_json::json!({"id": 1, "name": "Ada", "email": "ada@x.com", "age": 30, "student_id": "S1234567"})
        );
    }
}
