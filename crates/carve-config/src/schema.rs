use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::CarveConfig;

/// JSON schema for `carve.toml`, for editor tooling and CI validation.
#[must_use]
pub fn json_schema() -> RootSchema {
    schema_for!(CarveConfig)
}
