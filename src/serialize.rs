//! `serde` support; a [`CalendarDate`] is stored as its absolute form, `%X`.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::{CalendarDate, Pattern, template};

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.to_absolute())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Pattern::cached(template::ABSOLUTE)
            .and_then(|pattern| pattern.parse(&text))
            .map_err(de::Error::custom)
    }
}
