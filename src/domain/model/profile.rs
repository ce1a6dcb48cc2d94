use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{FieldChecks, FieldError, Validate};

/// The artisan's public profile. There is exactly one, overwritten wholesale on save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    pub name: String,
    pub location: String,
    pub story: String,
    pub heritage: String,
}

impl Validate for Profile {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        FieldChecks::new()
            .min_len("name", &self.name, 2, "Name must be at least 2 characters.")
            .min_len("location", &self.location, 2, "Location is required.")
            .min_len("story", &self.story, 10, "Your story should be at least 10 characters.")
            .min_len(
                "heritage",
                &self.heritage,
                10,
                "Cultural heritage should be at least 10 characters.",
            )
            .finish()
    }
}
