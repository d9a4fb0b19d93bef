//! Message catalog for the supported locales.
//!
//! Templates use `{name}` placeholders. A key missing from a locale falls back to the
//! English template, and a key missing everywhere renders as the key itself.

use std::fmt;

pub const STATUS_OK: &str = "status.ok";
pub const STATUS_ERROR: &str = "status.error";
pub const STATUS_NOT_FOUND: &str = "status.not_found";
pub const STATUS_CONFLICT: &str = "status.conflict";
pub const STATUS_INVALID_DATA: &str = "status.invalid_data";
pub const STATUS_CREATED: &str = "status.created";
pub const STATUS_DELETED: &str = "status.deleted";
pub const CONTEXT_FILE: &str = "context.file";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    En,
    Id,
}

impl Locale {
    /// Exact match on a supported language tag (`en`, `id`, `en-US`, ...).
    pub fn supported(tag: &str) -> Option<Locale> {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match primary.as_str() {
            "en" => Some(Locale::En),
            "id" | "in" => Some(Locale::Id),
            _ => None,
        }
    }

    /// Like [`Locale::supported`] but never fails: unknown tags resolve to the default.
    pub fn from_tag(tag: &str) -> Locale {
        Self::supported(tag).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Id => "id",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn template(locale: Locale, key: &str) -> Option<&'static str> {
    let template = match (locale, key) {
        (Locale::En, STATUS_OK) => "Success",
        (Locale::En, STATUS_CREATED) => "File uploaded successfully",
        (Locale::En, STATUS_DELETED) => "File deleted successfully",
        (Locale::En, STATUS_ERROR) => "An unexpected error occurred",
        (Locale::En, STATUS_NOT_FOUND) => "{context} not found",
        (Locale::En, STATUS_CONFLICT) => "{context} already exists",
        (Locale::En, STATUS_INVALID_DATA) => "Invalid data",
        (Locale::En, "required") => "{field} is a required field",
        (Locale::En, "oneof") => "{field} must be one of [{values}]",
        (Locale::En, "invalid") => "{field} is invalid",
        (Locale::En, CONTEXT_FILE) => "File",

        (Locale::Id, STATUS_OK) => "Berhasil",
        (Locale::Id, STATUS_CREATED) => "Berkas berhasil diunggah",
        (Locale::Id, STATUS_DELETED) => "Berkas berhasil dihapus",
        (Locale::Id, STATUS_ERROR) => "Terjadi kesalahan yang tidak terduga",
        (Locale::Id, STATUS_NOT_FOUND) => "{context} tidak ditemukan",
        (Locale::Id, STATUS_CONFLICT) => "{context} sudah ada",
        (Locale::Id, STATUS_INVALID_DATA) => "Data tidak valid",
        (Locale::Id, "required") => "{field} wajib diisi",
        (Locale::Id, "oneof") => "{field} harus berupa salah satu dari [{values}]",
        (Locale::Id, "invalid") => "{field} tidak valid",
        (Locale::Id, CONTEXT_FILE) => "Berkas",

        _ => return None,
    };
    Some(template)
}

pub fn translate(locale: Locale, key: &str, args: &[(&str, &str)]) -> String {
    let found = template(locale, key)
        .or_else(|| template(Locale::En, key))
        .unwrap_or(key);

    args.iter().fold(found.to_string(), |message, (name, value)| {
        message.replace(&format!("{{{}}}", name), value)
    })
}
