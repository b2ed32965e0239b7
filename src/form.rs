use std::collections::HashSet;

use serde::Deserialize;

/// Required + length bounds for one text field. Lengths count chars.
pub struct FieldRule {
    pub required: &'static str,
    pub min: (usize, &'static str),
    pub max: (usize, &'static str),
}

impl FieldRule {
    pub fn check(&self, value: &str) -> Option<&'static str> {
        let len = value.chars().count();
        if value.is_empty() {
            Some(self.required)
        } else if len < self.min.0 {
            Some(self.min.1)
        } else if len > self.max.0 {
            Some(self.max.1)
        } else {
            None
        }
    }
}

pub const USERNAME_RULE: FieldRule = FieldRule {
    required: "Please enter username",
    min: (2, "Username must have at least 2 characters"),
    max: (30, "Username must have max 30 characters"),
};

pub const EMAIL_RULE: FieldRule = FieldRule {
    required: "Email is required",
    min: (10, "Email must have at least 10 characters"),
    max: (30, "Email must have max 30 characters"),
};

pub const PASSWORD_RULE: FieldRule = FieldRule {
    required: "Password is required",
    min: (8, "Password must have at least 8 characters"),
    max: (30, "Password must have max 30 characters"),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignupField {
    Username,
    Email,
    Password,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupValues {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormErrors {
    pub username: Option<&'static str>,
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.password.is_none()
    }

    pub fn get(&self, field: SignupField) -> Option<&'static str> {
        match field {
            SignupField::Username => self.username,
            SignupField::Email => self.email,
            SignupField::Password => self.password,
        }
    }
}

pub fn validate_signup(values: &SignupValues) -> FormErrors {
    FormErrors {
        username: USERNAME_RULE.check(&values.username),
        email: EMAIL_RULE.check(&values.email),
        password: PASSWORD_RULE.check(&values.password),
    }
}

/// Form state kept between renders of the signup modal.
#[derive(Debug, Default, Clone)]
pub struct SignupDraft {
    pub values: SignupValues,
    pub touched: HashSet<SignupField>,
    pub errors: FormErrors,
}

impl SignupDraft {
    /// Touches every field and validates, like a submit does.
    pub fn submit(&mut self, values: SignupValues) -> Result<SignupValues, FormErrors> {
        self.touched.extend([SignupField::Username, SignupField::Email, SignupField::Password]);
        self.errors = validate_signup(&values);
        self.values = SignupValues { password: String::new(), ..values.clone() };
        if self.errors.is_empty() {
            Ok(values)
        } else {
            Err(self.errors.clone())
        }
    }

    /// Error to display under a field: only once it has been touched.
    pub fn visible_error(&self, field: SignupField) -> Option<&'static str> {
        self.errors.get(field).filter(|_| self.touched.contains(&field))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct LoginValues {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginValues {
    pub fn is_complete(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }
}
