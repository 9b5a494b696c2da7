//! Configuration validation.

use autolabel_protocols::Selector;

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Collapse into a single error, if any were recorded.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(first) => Err(ConfigError::InvalidValue {
                field: first.path,
                message: first.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_attributes(config, &mut result);
        Self::validate_selector(config, &mut result);
        Self::validate_visibility(config, &mut result);
        Self::validate_overlay(config, &mut result);

        result
    }

    fn validate_attributes(config: &Config, result: &mut ValidationResult) {
        let attrs = &config.attributes;
        let named = [
            ("attributes.visible_text", attrs.visible_text.as_str()),
            ("attributes.aria_label", attrs.aria_label.as_str()),
            ("attributes.label", attrs.label.as_str()),
        ];

        for (path, name) in named {
            if name.is_empty() {
                result.add_error(ValidationError::new(path, "Attribute name cannot be empty"));
            } else if Selector::any_attribute(&[name]).is_err() {
                result.add_error(ValidationError::new(
                    path,
                    format!("'{}' is not a valid attribute name", name),
                ));
            }
        }

        for (i, (path, name)) in named.iter().enumerate() {
            if !name.is_empty() && named[..i].iter().any(|(_, other)| other == name) {
                result.add_error(ValidationError::new(
                    *path,
                    format!("Attribute '{}' is used for more than one purpose", name),
                ));
            }
        }
    }

    fn validate_selector(config: &Config, result: &mut ValidationResult) {
        if let Err(e) = Selector::parse(&config.selector.interactive) {
            result.add_error(ValidationError::new("selector.interactive", e.to_string()));
        }
    }

    fn validate_visibility(config: &Config, result: &mut ValidationResult) {
        let opacity = config.visibility.min_opacity;
        if !(0.0..=1.0).contains(&opacity) {
            result.add_error(ValidationError::new(
                "visibility.min_opacity",
                "min_opacity must be between 0 and 1",
            ));
        } else if opacity == 0.0 {
            result.add_warning(ValidationWarning::new(
                "visibility.min_opacity",
                "min_opacity of 0 treats fully transparent elements as visible",
            ));
        }
    }

    fn validate_overlay(config: &Config, result: &mut ValidationResult) {
        let overlay = &config.overlay;
        let classes = [
            ("overlay.wrapper_class", overlay.wrapper_class.as_str()),
            ("overlay.marker_class", overlay.marker_class.as_str()),
        ];
        for (path, class) in classes {
            if Selector::class(class).is_err() {
                result.add_error(ValidationError::new(
                    path,
                    format!("'{}' is not a valid class name", class),
                ));
            }
        }

        if overlay.wrapper_class == overlay.marker_class {
            result.add_error(ValidationError::new(
                "overlay.marker_class",
                "marker_class must differ from wrapper_class",
            ));
        }

        if overlay.style_id.trim().is_empty() {
            result.add_error(ValidationError::new("overlay.style_id", "style_id cannot be empty"));
        }

        if overlay.z_index_base < 0 {
            result.add_warning(ValidationWarning::new(
                "overlay.z_index_base",
                "Negative z_index_base may place markers beneath page content",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
