//! Request payloads accepted by the service operations.
//!
//! `Option` fields on the update payloads treat a missing key and an explicit
//! `null` the same way: the stored value is left untouched.

use sea_orm::Set;
use serde::{Deserialize, Serialize};

use models::errors::ModelError;
use models::{course, project, user};

/// Field-level checks run before any persistence attempt.
pub trait Validate {
    fn validate(&self) -> Result<(), ModelError>;
}

// ---------- Users ----------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub age: i32,
    pub student_id: String,
}

impl Validate for UserCreate {
    fn validate(&self) -> Result<(), ModelError> {
        user::validate_name(&self.name)?;
        user::validate_email(&self.email)?;
        user::validate_age(self.age)?;
        user::validate_student_id(&self.student_id)
    }
}

impl UserCreate {
    /// Overwrite every column of `am` (PUT and POST).
    pub fn write_to(self, am: &mut user::ActiveModel) {
        am.name = Set(self.name);
        am.email = Set(self.email);
        am.age = Set(self.age);
        am.student_id = Set(self.student_id);
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
    pub student_id: Option<String>,
}

impl Validate for UserUpdate {
    fn validate(&self) -> Result<(), ModelError> {
        if let Some(n) = &self.name {
            user::validate_name(n)?;
        }
        if let Some(e) = &self.email {
            user::validate_email(e)?;
        }
        if let Some(a) = self.age {
            user::validate_age(a)?;
        }
        if let Some(s) = &self.student_id {
            user::validate_student_id(s)?;
        }
        Ok(())
    }
}

impl UserUpdate {
    /// Merge provided fields into `am`; absent fields stay as they are.
    pub fn merge_into(self, am: &mut user::ActiveModel) {
        if let Some(n) = self.name {
            am.name = Set(n);
        }
        if let Some(e) = self.email {
            am.email = Set(e);
        }
        if let Some(a) = self.age {
            am.age = Set(a);
        }
        if let Some(s) = self.student_id {
            am.student_id = Set(s);
        }
    }
}

// ---------- Courses ----------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourseCreate {
    pub code: String,
    pub name: String,
    pub credits: i32,
}

impl Validate for CourseCreate {
    fn validate(&self) -> Result<(), ModelError> {
        course::validate_code(&self.code)?;
        course::validate_name(&self.name)?;
        course::validate_credits(self.credits)
    }
}

impl From<CourseCreate> for course::ActiveModel {
    fn from(c: CourseCreate) -> Self {
        course::ActiveModel {
            code: Set(c.code),
            name: Set(c.name),
            credits: Set(c.credits),
            ..Default::default()
        }
    }
}

// ---------- Projects ----------

/// Flat route: owner given in the body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub owner_id: i32,
}

impl Validate for ProjectCreate {
    fn validate(&self) -> Result<(), ModelError> {
        project::validate_name(&self.name)?;
        project::validate_description(self.description.as_deref())
    }
}

impl ProjectCreate {
    /// Overwrite every column of `am`, including clearing `description`.
    pub fn write_to(self, am: &mut project::ActiveModel) {
        am.name = Set(self.name);
        am.description = Set(self.description);
        am.owner_id = Set(self.owner_id);
    }
}

/// Nested route: owner implied by the path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectCreateForUser {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Validate for ProjectCreateForUser {
    fn validate(&self) -> Result<(), ModelError> {
        project::validate_name(&self.name)?;
        project::validate_description(self.description.as_deref())
    }
}

impl ProjectCreateForUser {
    pub fn with_owner(self, owner_id: i32) -> ProjectCreate {
        ProjectCreate { name: self.name, description: self.description, owner_id }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub owner_id: Option<i32>,
}

impl Validate for ProjectUpdate {
    fn validate(&self) -> Result<(), ModelError> {
        if let Some(n) = &self.name {
            project::validate_name(n)?;
        }
        project::validate_description(self.description.as_deref())
    }
}

impl ProjectUpdate {
    pub fn merge_into(self, am: &mut project::ActiveModel) {
        if let Some(n) = self.name {
            am.name = Set(n);
        }
        if let Some(d) = self.description {
            am.description = Set(Some(d));
        }
        if let Some(o) = self.owner_id {
            am.owner_id = Set(o);
        }
    }
}

/// A project with its owner embedded.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProjectWithOwner {
    #[serde(flatten)]
    pub project: project::Model,
    pub owner: Option<user::Model>,
}
