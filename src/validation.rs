use crate::errors::{DomainError, DomainResult, ValidationError};
use chrono::NaiveDate;

/// A trait that entities should implement for validation.
pub trait Validate {
    /// Validates the entity and returns an error if validation fails.
    fn validate(&self) -> DomainResult<()>;
}

/// Struct for configuring validations in a fluent style
#[derive(Default)]
pub struct ValidationBuilder<T> {
    field_name: String,
    value: Option<T>,
    errors: Vec<ValidationError>,
}

/// Generic validation implementations
impl<T> ValidationBuilder<T> {
    pub fn new(field_name: &str, value: Option<T>) -> Self {
        Self {
            field_name: field_name.to_string(),
            value,
            errors: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self
    where
        T: Default + PartialEq,
    {
        if self.value.is_none() || self.value == Some(T::default()) {
            self.errors.push(ValidationError::required(&self.field_name));
        }
        self
    }

    pub fn validate_with<F>(mut self, validator: F) -> Self
    where
        F: FnOnce(&T) -> Result<(), ValidationError>,
    {
        if let Some(value) = &self.value {
            if let Err(err) = validator(value) {
                self.errors.push(err);
            }
        }
        self
    }

    /// Complete validation and return result
    pub fn validate(self) -> DomainResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            // Return the first error for simplicity
            Err(DomainError::Validation(self.errors[0].clone()))
        }
    }
}

/// String-specific validations
impl ValidationBuilder<String> {
    pub fn min_length(mut self, min: usize) -> Self {
        if let Some(value) = &self.value {
            if value.len() < min {
                self.errors
                    .push(ValidationError::min_length(&self.field_name, min));
            }
        }
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        if let Some(value) = &self.value {
            if value.len() > max {
                self.errors
                    .push(ValidationError::max_length(&self.field_name, max));
            }
        }
        self
    }

    pub fn one_of(mut self, allowed_values: &[&str], message: Option<&str>) -> Self {
        if let Some(value) = &self.value {
            if !allowed_values.contains(&value.as_str()) {
                let reason = message.unwrap_or("must be one of the allowed values");
                self.errors
                    .push(ValidationError::invalid_value(&self.field_name, reason));
            }
        }
        self
    }

    /// Require ISO `YYYY-MM-DD` format.
    pub fn iso_date(mut self) -> Self {
        if let Some(value) = &self.value {
            if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
                self.errors.push(ValidationError::format(
                    &self.field_name,
                    "Invalid date format. Expected YYYY-MM-DD",
                ));
            }
        }
        self
    }
}

/// Numeric validations
impl<T> ValidationBuilder<T>
where
    T: PartialOrd + Clone + std::fmt::Display,
{
    pub fn min(mut self, min: T) -> Self {
        if let Some(value) = &self.value {
            if value < &min {
                self.errors.push(ValidationError::range(
                    &self.field_name,
                    min.to_string(),
                    "maximum".to_string(),
                ));
            }
        }
        self
    }

    pub fn max(mut self, max: T) -> Self {
        if let Some(value) = &self.value {
            if value > &max {
                self.errors.push(ValidationError::range(
                    &self.field_name,
                    "minimum".to_string(),
                    max.to_string(),
                ));
            }
        }
        self
    }

    pub fn range(mut self, min: T, max: T) -> Self {
        if let Some(value) = &self.value {
            if value < &min || value > &max {
                self.errors.push(ValidationError::range(
                    &self.field_name,
                    min.to_string(),
                    max.to_string(),
                ));
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_string() {
        assert!(ValidationBuilder::new("name", Some("Ahmad".to_string()))
            .required()
            .validate()
            .is_ok());
        assert!(ValidationBuilder::<String>::new("name", None)
            .required()
            .validate()
            .is_err());
        assert!(ValidationBuilder::new("name", Some(String::new()))
            .required()
            .validate()
            .is_err());
    }

    #[test]
    fn test_length_bounds() {
        assert!(ValidationBuilder::new("name", Some("ab".to_string()))
            .min_length(3)
            .validate()
            .is_err());
        assert!(ValidationBuilder::new("name", Some("abcd".to_string()))
            .min_length(3)
            .max_length(10)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_numeric_range() {
        assert!(ValidationBuilder::new("year", Some(2025))
            .range(2000, 2100)
            .validate()
            .is_ok());
        assert!(ValidationBuilder::new("year", Some(1900))
            .range(2000, 2100)
            .validate()
            .is_err());
        assert!(ValidationBuilder::new("amount", Some(-1i64))
            .min(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_iso_date() {
        assert!(ValidationBuilder::new("date", Some("2025-01-15".to_string()))
            .iso_date()
            .validate()
            .is_ok());
        assert!(ValidationBuilder::new("date", Some("15/01/2025".to_string()))
            .iso_date()
            .validate()
            .is_err());
        assert!(ValidationBuilder::new("date", Some("2025-02-30".to_string()))
            .iso_date()
            .validate()
            .is_err());
    }
}
