use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::locale::{Direction, Language, strings};

#[derive(Debug, Serialize, ToSchema)]
pub struct LocaleView {
    pub language: Language,
    pub direction: Direction,
    pub strings: BTreeMap<String, String>,
}

impl LocaleView {
    pub fn for_language(language: Language) -> Self {
        Self {
            language,
            direction: language.direction(),
            strings: strings(language),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetLanguageRequest {
    pub language: Language,
}
